use std::fmt::Write;

use cloudmcp_linode::models::{CreateSupportTicket, SupportTicket};

use super::UpstreamExt;
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    details_header, field, item_field, list_header, or_none, timestamp, yes_no,
};
use crate::tools::schemas::support::{TicketCreateRequest, TicketIdRequest, TicketReplyRequest};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register(
        "linode_support_tickets_list",
        "List support tickets",
        tickets_list,
    )?;
    d.register(
        "linode_support_ticket_get",
        "Get one support ticket",
        ticket_get,
    )?;
    d.register(
        "linode_support_ticket_create",
        "Open a support ticket, optionally about one resource",
        ticket_create,
    )?;
    d.register(
        "linode_support_ticket_reply",
        "Reply to a support ticket",
        ticket_reply,
    )?;
    d.register(
        "linode_support_ticket_replies_list",
        "List the replies on a support ticket",
        replies_list,
    )?;
    Ok(())
}

fn regarding(ticket: &SupportTicket) -> String {
    match &ticket.entity {
        Some(entity) => format!("{} {} ({})", entity.kind, entity.id, entity.label),
        None => "None".to_string(),
    }
}

fn render_ticket(out: &mut String, ticket: &SupportTicket) {
    field(out, "ID", ticket.id);
    field(out, "Summary", &ticket.summary);
    field(out, "Status", &ticket.status);
    field(out, "Regarding", regarding(ticket));
    field(out, "Opened", timestamp(ticket.opened.as_deref()));
    field(out, "Opened By", &ticket.opened_by);
    field(out, "Updated", timestamp(ticket.updated.as_deref()));
    field(out, "Updated By", or_none(ticket.updated_by.as_deref()));
    field(out, "Closed", timestamp(ticket.closed.as_deref()));
    field(out, "Closable", yes_no(ticket.closable));
    let _ = write!(out, "\nDescription:\n{}\n", ticket.description);
}

async fn tickets_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let tickets = account
        .client
        .support_tickets()
        .await
        .upstream("list support tickets")?;

    let mut out = list_header(tickets.len(), "support tickets");
    for ticket in &tickets {
        let _ = writeln!(out, "ID: {} | {}", ticket.id, ticket.summary);
        item_field(&mut out, "Status", &ticket.status);
        item_field(&mut out, "Regarding", regarding(ticket));
        item_field(&mut out, "Updated", timestamp(ticket.updated.as_deref()));
        out.push('\n');
    }
    Ok(out)
}

async fn ticket_get(ctx: ToolContext, p: TicketIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let ticket = account
        .client
        .support_ticket(p.ticket_id)
        .await
        .upstream("get support ticket")?;
    let mut out = details_header("Support Ticket");
    render_ticket(&mut out, &ticket);
    Ok(out)
}

async fn ticket_create(ctx: ToolContext, p: TicketCreateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = CreateSupportTicket {
        summary: p.summary,
        description: p.description,
        linode_id: p.linode_id,
        volume_id: p.volume_id,
        domain_id: p.domain_id,
        nodebalancer_id: p.nodebalancer_id,
    };
    let ticket = account
        .client
        .create_support_ticket(&request)
        .await
        .upstream("create support ticket")?;
    Ok(format!(
        "Support ticket {} opened: {}",
        ticket.id, ticket.summary
    ))
}

async fn ticket_reply(ctx: ToolContext, p: TicketReplyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let reply = account
        .client
        .reply_support_ticket(p.ticket_id, &p.description)
        .await
        .upstream("reply to support ticket")?;
    Ok(format!(
        "Reply {} added to support ticket {}.",
        reply.id, p.ticket_id
    ))
}

async fn replies_list(ctx: ToolContext, p: TicketIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let replies = account
        .client
        .support_ticket_replies(p.ticket_id)
        .await
        .upstream("list support ticket replies")?;

    let mut out = list_header(replies.len(), "replies");
    for reply in &replies {
        let author = if reply.from_linode {
            format!("{} (Linode)", reply.created_by)
        } else {
            reply.created_by.clone()
        };
        let _ = writeln!(
            out,
            "Reply {} by {} at {}:",
            reply.id,
            author,
            timestamp(reply.created.as_deref())
        );
        let _ = writeln!(out, "{}\n", reply.description.trim());
    }
    Ok(out)
}
