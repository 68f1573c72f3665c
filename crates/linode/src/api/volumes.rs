use serde_json::json;

use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::{CreateVolume, UpdateVolume, Volume};

impl LinodeClient {
    pub async fn volumes(&self) -> Result<Vec<Volume>> {
        self.list_all("/volumes", &ListOptions::default()).await
    }

    pub async fn volume(&self, id: u64) -> Result<Volume> {
        self.get(&format!("/volumes/{id}")).await
    }

    pub async fn create_volume(&self, request: &CreateVolume) -> Result<Volume> {
        self.post("/volumes", request).await
    }

    pub async fn update_volume(&self, id: u64, request: &UpdateVolume) -> Result<Volume> {
        self.put(&format!("/volumes/{id}"), request).await
    }

    pub async fn delete_volume(&self, id: u64) -> Result<()> {
        self.delete(&format!("/volumes/{id}")).await
    }

    pub async fn attach_volume(&self, id: u64, linode_id: u64) -> Result<Volume> {
        self.post(
            &format!("/volumes/{id}/attach"),
            &json!({ "linode_id": linode_id }),
        )
        .await
    }

    pub async fn detach_volume(&self, id: u64) -> Result<()> {
        self.action(&format!("/volumes/{id}/detach"), &json!({}))
            .await
    }

    /// Grow a volume to `size` GB. Volumes cannot shrink.
    pub async fn resize_volume(&self, id: u64, size: u64) -> Result<Volume> {
        self.post(&format!("/volumes/{id}/resize"), &json!({ "size": size }))
            .await
    }
}
