use serde_json::json;

use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::{
    AllocateIp, CreateFirewall, CreateNodeBalancer, Firewall, FirewallDevice, FirewallRules,
    IpAddress, NodeBalancer, NodeBalancerConfig, UpdateFirewall, UpdateNodeBalancer, Vlan,
};

impl LinodeClient {
    pub async fn firewalls(&self) -> Result<Vec<Firewall>> {
        self.list_all("/networking/firewalls", &ListOptions::default())
            .await
    }

    pub async fn firewall(&self, id: u64) -> Result<Firewall> {
        self.get(&format!("/networking/firewalls/{id}")).await
    }

    pub async fn create_firewall(&self, request: &CreateFirewall) -> Result<Firewall> {
        self.post("/networking/firewalls", request).await
    }

    pub async fn update_firewall(&self, id: u64, request: &UpdateFirewall) -> Result<Firewall> {
        self.put(&format!("/networking/firewalls/{id}"), request)
            .await
    }

    pub async fn delete_firewall(&self, id: u64) -> Result<()> {
        self.delete(&format!("/networking/firewalls/{id}")).await
    }

    pub async fn update_firewall_rules(
        &self,
        id: u64,
        rules: &FirewallRules,
    ) -> Result<FirewallRules> {
        self.put(&format!("/networking/firewalls/{id}/rules"), rules)
            .await
    }

    pub async fn firewall_devices(&self, id: u64) -> Result<Vec<FirewallDevice>> {
        self.list_all(
            &format!("/networking/firewalls/{id}/devices"),
            &ListOptions::default(),
        )
        .await
    }

    pub async fn nodebalancers(&self) -> Result<Vec<NodeBalancer>> {
        self.list_all("/nodebalancers", &ListOptions::default())
            .await
    }

    pub async fn nodebalancer(&self, id: u64) -> Result<NodeBalancer> {
        self.get(&format!("/nodebalancers/{id}")).await
    }

    pub async fn create_nodebalancer(&self, request: &CreateNodeBalancer) -> Result<NodeBalancer> {
        self.post("/nodebalancers", request).await
    }

    pub async fn update_nodebalancer(
        &self,
        id: u64,
        request: &UpdateNodeBalancer,
    ) -> Result<NodeBalancer> {
        self.put(&format!("/nodebalancers/{id}"), request).await
    }

    pub async fn delete_nodebalancer(&self, id: u64) -> Result<()> {
        self.delete(&format!("/nodebalancers/{id}")).await
    }

    pub async fn nodebalancer_configs(&self, id: u64) -> Result<Vec<NodeBalancerConfig>> {
        self.list_all(
            &format!("/nodebalancers/{id}/configs"),
            &ListOptions::default(),
        )
        .await
    }

    pub async fn ips(&self) -> Result<Vec<IpAddress>> {
        self.list_all("/networking/ips", &ListOptions::default())
            .await
    }

    /// `address` must already be a validated IP literal.
    pub async fn ip(&self, address: &str) -> Result<IpAddress> {
        self.get(&format!("/networking/ips/{address}")).await
    }

    /// Set (or clear, with `None`) the reverse DNS of an address.
    pub async fn update_ip_rdns(&self, address: &str, rdns: Option<&str>) -> Result<IpAddress> {
        self.put(
            &format!("/networking/ips/{address}"),
            &json!({ "rdns": rdns }),
        )
        .await
    }

    pub async fn allocate_ip(&self, request: &AllocateIp) -> Result<IpAddress> {
        self.post("/networking/ips", request).await
    }

    pub async fn vlans(&self) -> Result<Vec<Vlan>> {
        self.list_all("/networking/vlans", &ListOptions::default())
            .await
    }
}
