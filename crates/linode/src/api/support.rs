use serde_json::json;

use crate::client::{LinodeClient, ListOptions};
use crate::error::Result;
use crate::models::{CreateSupportTicket, SupportTicket, TicketReply};

impl LinodeClient {
    pub async fn support_tickets(&self) -> Result<Vec<SupportTicket>> {
        self.list_all("/support/tickets", &ListOptions::default())
            .await
    }

    pub async fn support_ticket(&self, id: u64) -> Result<SupportTicket> {
        self.get(&format!("/support/tickets/{id}")).await
    }

    pub async fn create_support_ticket(
        &self,
        request: &CreateSupportTicket,
    ) -> Result<SupportTicket> {
        self.post("/support/tickets", request).await
    }

    pub async fn reply_support_ticket(&self, id: u64, description: &str) -> Result<TicketReply> {
        self.post(
            &format!("/support/tickets/{id}/replies"),
            &json!({ "description": description }),
        )
        .await
    }

    pub async fn support_ticket_replies(&self, id: u64) -> Result<Vec<TicketReply>> {
        self.list_all(
            &format!("/support/tickets/{id}/replies"),
            &ListOptions::default(),
        )
        .await
    }
}
