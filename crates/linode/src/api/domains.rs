use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::{CreateDomain, CreateDomainRecord, Domain, DomainRecord, UpdateDomain};

impl LinodeClient {
    pub async fn domains(&self) -> Result<Vec<Domain>> {
        self.list_all("/domains", &ListOptions::default()).await
    }

    pub async fn domain(&self, id: u64) -> Result<Domain> {
        self.get(&format!("/domains/{id}")).await
    }

    pub async fn create_domain(&self, request: &CreateDomain) -> Result<Domain> {
        self.post("/domains", request).await
    }

    pub async fn update_domain(&self, id: u64, request: &UpdateDomain) -> Result<Domain> {
        self.put(&format!("/domains/{id}"), request).await
    }

    pub async fn delete_domain(&self, id: u64) -> Result<()> {
        self.delete(&format!("/domains/{id}")).await
    }

    pub async fn domain_records(&self, domain_id: u64) -> Result<Vec<DomainRecord>> {
        self.list_all(
            &format!("/domains/{domain_id}/records"),
            &ListOptions::default(),
        )
        .await
    }

    pub async fn create_domain_record(
        &self,
        domain_id: u64,
        request: &CreateDomainRecord,
    ) -> Result<DomainRecord> {
        self.post(&format!("/domains/{domain_id}/records"), request)
            .await
    }

    pub async fn delete_domain_record(&self, domain_id: u64, record_id: u64) -> Result<()> {
        self.delete(&format!("/domains/{domain_id}/records/{record_id}"))
            .await
    }
}
