use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::{
    CreateBucket, CreateObjectStorageKey, ObjectStorageBucket, ObjectStorageCluster,
    ObjectStorageKey,
};

impl LinodeClient {
    pub async fn object_storage_clusters(&self) -> Result<Vec<ObjectStorageCluster>> {
        self.list_all("/object-storage/clusters", &ListOptions::default())
            .await
    }

    pub async fn buckets(&self) -> Result<Vec<ObjectStorageBucket>> {
        self.list_all("/object-storage/buckets", &ListOptions::default())
            .await
    }

    /// `location` is a cluster id or region id.
    pub async fn bucket(&self, location: &str, label: &str) -> Result<ObjectStorageBucket> {
        self.get(&format!("/object-storage/buckets/{location}/{label}"))
            .await
    }

    pub async fn create_bucket(&self, request: &CreateBucket) -> Result<ObjectStorageBucket> {
        self.post("/object-storage/buckets", request).await
    }

    pub async fn delete_bucket(&self, location: &str, label: &str) -> Result<()> {
        self.delete(&format!("/object-storage/buckets/{location}/{label}"))
            .await
    }

    pub async fn object_storage_keys(&self) -> Result<Vec<ObjectStorageKey>> {
        self.list_all("/object-storage/keys", &ListOptions::default())
            .await
    }

    pub async fn object_storage_key(&self, id: u64) -> Result<ObjectStorageKey> {
        self.get(&format!("/object-storage/keys/{id}")).await
    }

    /// The returned secret key is only ever shown by this call.
    pub async fn create_object_storage_key(
        &self,
        request: &CreateObjectStorageKey,
    ) -> Result<ObjectStorageKey> {
        self.post("/object-storage/keys", request).await
    }

    pub async fn delete_object_storage_key(&self, id: u64) -> Result<()> {
        self.delete(&format!("/object-storage/keys/{id}")).await
    }
}
