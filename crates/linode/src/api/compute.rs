use serde_json::json;

use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::{CreateImage, CreateInstance, Image, Instance, UpdateImage, UpdateInstance};

impl LinodeClient {
    pub async fn instances(&self, options: &ListOptions) -> Result<Vec<Instance>> {
        self.list_all("/linode/instances", options).await
    }

    pub async fn instance(&self, id: u64) -> Result<Instance> {
        self.get(&format!("/linode/instances/{id}")).await
    }

    pub async fn create_instance(&self, request: &CreateInstance) -> Result<Instance> {
        self.post("/linode/instances", request).await
    }

    pub async fn update_instance(&self, id: u64, request: &UpdateInstance) -> Result<Instance> {
        self.put(&format!("/linode/instances/{id}"), request).await
    }

    pub async fn delete_instance(&self, id: u64) -> Result<()> {
        self.delete(&format!("/linode/instances/{id}")).await
    }

    pub async fn boot_instance(&self, id: u64) -> Result<()> {
        self.action(&format!("/linode/instances/{id}/boot"), &json!({}))
            .await
    }

    pub async fn reboot_instance(&self, id: u64) -> Result<()> {
        self.action(&format!("/linode/instances/{id}/reboot"), &json!({}))
            .await
    }

    pub async fn shutdown_instance(&self, id: u64) -> Result<()> {
        self.action(&format!("/linode/instances/{id}/shutdown"), &json!({}))
            .await
    }

    pub async fn resize_instance(&self, id: u64, plan: &str) -> Result<()> {
        self.action(
            &format!("/linode/instances/{id}/resize"),
            &json!({ "type": plan }),
        )
        .await
    }

    pub async fn images(&self, options: &ListOptions) -> Result<Vec<Image>> {
        self.list_all("/images", options).await
    }

    pub async fn image(&self, id: &str) -> Result<Image> {
        self.get(&format!("/images/{id}")).await
    }

    pub async fn create_image(&self, request: &CreateImage) -> Result<Image> {
        self.post("/images", request).await
    }

    pub async fn update_image(&self, id: &str, request: &UpdateImage) -> Result<Image> {
        self.put(&format!("/images/{id}"), request).await
    }

    pub async fn delete_image(&self, id: &str) -> Result<()> {
        self.delete(&format!("/images/{id}")).await
    }

    /// Replace the set of regions an image is replicated to.
    pub async fn replicate_image(&self, id: &str, regions: &[String]) -> Result<Image> {
        self.post(
            &format!("/images/{id}/regions"),
            &json!({ "regions": regions }),
        )
        .await
    }
}
