// Tool handlers, one module per Linode domain.

mod account;
mod compute;
mod databases;
mod domains;
mod firewalls;
mod lke;
mod longview;
mod networking;
mod nodebalancers;
mod object_storage;
mod reference;
mod stackscripts;
mod support;
mod system;
mod volumes;

use cloudmcp_linode::ApiError;

use super::{DispatchError, ToolDispatcher};
use crate::tools::ToolError;

pub(super) fn register_all(dispatcher: &mut ToolDispatcher) -> Result<(), DispatchError> {
    system::register(dispatcher)?;
    account::register(dispatcher)?;
    reference::register(dispatcher)?;
    compute::register(dispatcher)?;
    volumes::register(dispatcher)?;
    firewalls::register(dispatcher)?;
    nodebalancers::register(dispatcher)?;
    domains::register(dispatcher)?;
    stackscripts::register(dispatcher)?;
    lke::register(dispatcher)?;
    databases::register(dispatcher)?;
    object_storage::register(dispatcher)?;
    longview::register(dispatcher)?;
    support::register(dispatcher)?;
    networking::register(dispatcher)?;
    Ok(())
}

/// Attach the failed action to an upstream error: `.upstream("list volumes")?`.
trait UpstreamExt<T> {
    fn upstream(self, action: &str) -> Result<T, ToolError>;
}

impl<T> UpstreamExt<T> for Result<T, ApiError> {
    fn upstream(self, action: &str) -> Result<T, ToolError> {
        self.map_err(|err| ToolError::upstream(action, err))
    }
}

fn tags(value: Option<Vec<String>>) -> Vec<String> {
    value.unwrap_or_default()
}
