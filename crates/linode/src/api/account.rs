use crate::client::LinodeClient;
use crate::error::Result;
use crate::models::{AccountInfo, Profile};

impl LinodeClient {
    /// `GET /profile`. Cheap and available to every token scope, so it doubles as the
    /// credential check.
    pub async fn profile(&self) -> Result<Profile> {
        self.get("/profile").await
    }

    pub async fn account(&self) -> Result<AccountInfo> {
        self.get("/account").await
    }
}
