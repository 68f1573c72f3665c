use serde_json::json;

use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::LongviewClient;

impl LinodeClient {
    pub async fn longview_clients(&self) -> Result<Vec<LongviewClient>> {
        self.list_all("/longview/clients", &ListOptions::default())
            .await
    }

    pub async fn longview_client(&self, id: u64) -> Result<LongviewClient> {
        self.get(&format!("/longview/clients/{id}")).await
    }

    pub async fn create_longview_client(&self, label: Option<&str>) -> Result<LongviewClient> {
        let body = match label {
            Some(label) => json!({ "label": label }),
            None => json!({}),
        };
        self.post("/longview/clients", &body).await
    }

    pub async fn delete_longview_client(&self, id: u64) -> Result<()> {
        self.delete(&format!("/longview/clients/{id}")).await
    }
}
