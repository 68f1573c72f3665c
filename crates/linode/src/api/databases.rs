use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::{CreateDatabase, Database, DatabaseCredentials, DatabaseEngine};

impl LinodeClient {
    /// Every managed database regardless of engine.
    pub async fn databases(&self) -> Result<Vec<Database>> {
        self.list_all("/databases/instances", &ListOptions::default())
            .await
    }

    pub async fn database_engines(&self) -> Result<Vec<DatabaseEngine>> {
        self.list_all("/databases/engines", &ListOptions::default())
            .await
    }

    /// `engine` is `mysql` or `postgresql`.
    pub async fn database(&self, engine: &str, id: u64) -> Result<Database> {
        self.get(&format!("/databases/{engine}/instances/{id}"))
            .await
    }

    pub async fn create_database(&self, engine: &str, request: &CreateDatabase) -> Result<Database> {
        self.post(&format!("/databases/{engine}/instances"), request)
            .await
    }

    pub async fn delete_database(&self, engine: &str, id: u64) -> Result<()> {
        self.delete(&format!("/databases/{engine}/instances/{id}"))
            .await
    }

    pub async fn database_credentials(&self, engine: &str, id: u64) -> Result<DatabaseCredentials> {
        self.get(&format!("/databases/{engine}/instances/{id}/credentials"))
            .await
    }
}
