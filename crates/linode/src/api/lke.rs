use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::{CreateLkeCluster, LkeCluster, LkeKubeconfig, LkeNodePool, LkeVersion};

impl LinodeClient {
    pub async fn lke_clusters(&self) -> Result<Vec<LkeCluster>> {
        self.list_all("/lke/clusters", &ListOptions::default())
            .await
    }

    pub async fn lke_cluster(&self, id: u64) -> Result<LkeCluster> {
        self.get(&format!("/lke/clusters/{id}")).await
    }

    pub async fn create_lke_cluster(&self, request: &CreateLkeCluster) -> Result<LkeCluster> {
        self.post("/lke/clusters", request).await
    }

    pub async fn delete_lke_cluster(&self, id: u64) -> Result<()> {
        self.delete(&format!("/lke/clusters/{id}")).await
    }

    pub async fn lke_pools(&self, cluster_id: u64) -> Result<Vec<LkeNodePool>> {
        self.list_all(
            &format!("/lke/clusters/{cluster_id}/pools"),
            &ListOptions::default(),
        )
        .await
    }

    pub async fn lke_kubeconfig(&self, cluster_id: u64) -> Result<LkeKubeconfig> {
        self.get(&format!("/lke/clusters/{cluster_id}/kubeconfig"))
            .await
    }

    pub async fn lke_versions(&self) -> Result<Vec<LkeVersion>> {
        self.list_all("/lke/versions", &ListOptions::default())
            .await
    }
}
