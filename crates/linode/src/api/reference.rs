use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::{Kernel, LinodeType, Region};

impl LinodeClient {
    pub async fn regions(&self) -> Result<Vec<Region>> {
        self.list_all("/regions", &ListOptions::default()).await
    }

    pub async fn region(&self, id: &str) -> Result<Region> {
        self.get(&format!("/regions/{id}")).await
    }

    pub async fn linode_types(&self) -> Result<Vec<LinodeType>> {
        self.list_all("/linode/types", &ListOptions::default()).await
    }

    pub async fn linode_type(&self, id: &str) -> Result<LinodeType> {
        self.get(&format!("/linode/types/{id}")).await
    }

    pub async fn kernels(&self) -> Result<Vec<Kernel>> {
        self.list_all("/linode/kernels", &ListOptions::default()).await
    }
}
