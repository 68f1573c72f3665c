//! Parameter structs for every tool. Field doc comments become the schema descriptions.

pub mod account;
pub mod compute;
pub mod databases;
pub mod domains;
pub mod firewalls;
pub mod lke;
pub mod longview;
pub mod networking;
pub mod nodebalancers;
pub mod object_storage;
pub mod reference;
pub mod stackscripts;
pub mod support;
pub mod volumes;

use rmcp::schemars;
use serde::Deserialize;

use super::params::plain_params;

/// Tools that take no arguments.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct EmptyRequest {}

plain_params!(EmptyRequest);
