use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackScript {
    pub id: u64,
    pub label: String,
    pub username: String,
    pub description: String,
    pub images: Vec<String>,
    pub is_public: bool,
    pub mine: bool,
    pub rev_note: String,
    pub script: String,
    pub deployments_total: u64,
    pub deployments_active: u64,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateStackScript {
    pub label: String,
    pub images: Vec<String>,
    pub script: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev_note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateStackScript {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev_note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LkeControlPlane {
    pub high_availability: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LkeCluster {
    pub id: u64,
    pub label: String,
    pub region: String,
    pub k8s_version: String,
    pub status: String,
    pub control_plane: LkeControlPlane,
    pub tags: Vec<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LkeNode {
    pub id: String,
    pub instance_id: Option<u64>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LkeNodePool {
    pub id: u64,
    #[serde(rename = "type")]
    pub plan: String,
    pub count: u32,
    pub nodes: Vec<LkeNode>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LkeNodePoolSpec {
    #[serde(rename = "type")]
    pub plan: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateLkeCluster {
    pub label: String,
    pub region: String,
    pub k8s_version: String,
    pub node_pools: Vec<LkeNodePoolSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Base64-encoded kubeconfig document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LkeKubeconfig {
    pub kubeconfig: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LkeVersion {
    pub id: String,
}

/// Managed database instance (MySQL or PostgreSQL).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    pub id: u64,
    pub label: String,
    pub engine: String,
    pub version: String,
    pub region: String,
    pub status: String,
    #[serde(rename = "type")]
    pub plan: String,
    pub cluster_size: u32,
    pub hosts: DatabaseHosts,
    pub port: u16,
    pub ssl_connection: bool,
    pub allow_list: Vec<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseHosts {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseEngine {
    pub id: String,
    pub engine: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDatabase {
    pub label: String,
    pub region: String,
    #[serde(rename = "type")]
    pub plan: String,
    pub engine: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_size: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allow_list: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongviewClient {
    pub id: u64,
    pub label: String,
    pub api_key: String,
    pub install_code: String,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketEntity {
    pub id: u64,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportTicket {
    pub id: u64,
    pub summary: String,
    pub description: String,
    pub status: String,
    pub opened: Option<String>,
    pub opened_by: String,
    pub updated: Option<String>,
    pub updated_by: Option<String>,
    pub closed: Option<String>,
    pub closable: bool,
    pub entity: Option<TicketEntity>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSupportTicket {
    pub summary: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linode_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodebalancer_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketReply {
    pub id: u64,
    pub description: String,
    pub created: Option<String>,
    pub created_by: String,
    pub from_linode: bool,
}
