use std::fmt::Write;

use cloudmcp_linode::models::Profile;
use cloudmcp_linode::DEFAULT_BASE_URL;

use super::UpstreamExt;
use crate::accounts::AccountUpdate;
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{details_header, field, join_or_none, list_header, timestamp, yes_no};
use crate::tools::schemas::account::{
    AccountAddRequest, AccountRemoveRequest, AccountSwitchRequest, AccountUpdateRequest,
};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register(
        "linode_account_list",
        "List configured Linode accounts and show which one is current",
        account_list,
    )?;
    d.register(
        "linode_account_switch",
        "Switch the current Linode account; every other tool runs against it",
        account_switch,
    )?;
    d.register(
        "linode_account_get",
        "Get billing and contact details of the current Linode account",
        account_get,
    )?;
    d.register(
        "linode_profile_get",
        "Get the user profile behind the current account's token",
        profile_get,
    )?;
    d.register(
        "cloudmcp_account_list",
        "List configured accounts with label, API URL and default/current markers",
        manage_list,
    )?;
    d.register(
        "cloudmcp_account_add",
        "Add an account. The token is verified against the Linode API before it is saved.",
        manage_add,
    )?;
    d.register(
        "cloudmcp_account_remove",
        "Remove an account from the configuration. The default account cannot be removed.",
        manage_remove,
    )?;
    d.register(
        "cloudmcp_account_update",
        "Update an account's label, token or API URL. Token and URL changes are re-verified.",
        manage_update,
    )?;
    Ok(())
}

fn render_profile(out: &mut String, profile: &Profile) {
    field(out, "Username", &profile.username);
    field(out, "Email", &profile.email);
    field(out, "Timezone", &profile.timezone);
    field(out, "Restricted", yes_no(profile.restricted));
    field(out, "Two-Factor Auth", yes_no(profile.two_factor_auth));
}

async fn account_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let accounts = ctx.registry().list().await;
    let mut out = list_header(accounts.len(), "configured accounts");
    for account in &accounts {
        let marker = if account.is_current { " (current)" } else { "" };
        let _ = writeln!(out, "- {}: {}{marker}", account.name, account.label);
    }
    Ok(out)
}

async fn account_switch(ctx: ToolContext, p: AccountSwitchRequest) -> Result<String, ToolError> {
    let account = ctx.registry().switch(p.account_name.trim()).await?;
    let mut out = format!(
        "Switched to account '{}' ({}).\n\n",
        account.name, account.label
    );
    match account.client.profile().await {
        Ok(profile) => {
            out.push_str(&details_header("Profile"));
            render_profile(&mut out, &profile);
        }
        Err(err) => {
            log::warn!("Profile fetch after switching to '{}' failed: {err}", account.name);
            let _ = writeln!(out, "Warning: could not fetch the account profile: {err}");
        }
    }
    Ok(out)
}

async fn account_get(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let info = account.client.account().await.upstream("get account")?;

    let mut out = details_header("Account");
    field(&mut out, "Account Name", &account.name);
    field(&mut out, "Company", &info.company);
    field(&mut out, "Name", format!("{} {}", info.first_name, info.last_name).trim());
    field(&mut out, "Email", &info.email);
    field(&mut out, "Country", &info.country);
    field(&mut out, "Balance", format!("${:.2}", info.balance));
    field(&mut out, "Uninvoiced", format!("${:.2}", info.balance_uninvoiced));
    field(&mut out, "Active Since", timestamp(info.active_since.as_deref()));
    field(&mut out, "Capabilities", join_or_none(&info.capabilities));
    Ok(out)
}

async fn profile_get(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let profile = account.client.profile().await.upstream("get profile")?;
    let mut out = details_header("Profile");
    render_profile(&mut out, &profile);
    Ok(out)
}

async fn manage_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let accounts = ctx.registry().list().await;
    let mut out = list_header(accounts.len(), "accounts");
    for account in &accounts {
        let mut markers = Vec::new();
        if account.is_default {
            markers.push("default");
        }
        if account.is_current {
            markers.push("current");
        }
        let _ = write!(out, "- {}", account.name);
        if !markers.is_empty() {
            let _ = write!(out, " [{}]", markers.join(", "));
        }
        out.push('\n');
        let _ = writeln!(out, "  Label: {}", account.label);
        let _ = writeln!(
            out,
            "  API URL: {}",
            account.api_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
        );
    }
    Ok(out)
}

async fn manage_add(ctx: ToolContext, p: AccountAddRequest) -> Result<String, ToolError> {
    let account = ctx
        .registry()
        .add(&p.name, &p.label, &p.token, p.apiurl)
        .await?;
    Ok(format!(
        "Account '{}' ({}) added and verified.",
        account.name, account.label
    ))
}

async fn manage_remove(ctx: ToolContext, p: AccountRemoveRequest) -> Result<String, ToolError> {
    let name = p.name.trim();
    ctx.registry().remove(name).await?;
    Ok(format!("Account '{name}' removed."))
}

async fn manage_update(ctx: ToolContext, p: AccountUpdateRequest) -> Result<String, ToolError> {
    let update = AccountUpdate {
        label: p.label,
        token: p.token,
        api_url: p.apiurl,
    };
    let account = ctx.registry().update(p.name.trim(), update).await?;
    Ok(format!(
        "Account '{}' ({}) updated.",
        account.name, account.label
    ))
}
