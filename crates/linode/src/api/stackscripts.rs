use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::{CreateStackScript, StackScript, UpdateStackScript};

impl LinodeClient {
    pub async fn stackscripts(&self, options: &ListOptions) -> Result<Vec<StackScript>> {
        self.list_all("/linode/stackscripts", options).await
    }

    pub async fn stackscript(&self, id: u64) -> Result<StackScript> {
        self.get(&format!("/linode/stackscripts/{id}")).await
    }

    pub async fn create_stackscript(&self, request: &CreateStackScript) -> Result<StackScript> {
        self.post("/linode/stackscripts", request).await
    }

    pub async fn update_stackscript(
        &self,
        id: u64,
        request: &UpdateStackScript,
    ) -> Result<StackScript> {
        self.put(&format!("/linode/stackscripts/{id}"), request)
            .await
    }

    pub async fn delete_stackscript(&self, id: u64) -> Result<()> {
        self.delete(&format!("/linode/stackscripts/{id}")).await
    }
}
