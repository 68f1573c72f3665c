//! CloudMCP tool surface.
//!
//! Schemas (typed parameter structs) live in `schemas`, handlers in `dispatch::router`, and the
//! shared prologue (argument parsing, account acquisition, error mapping, formatting) in
//! `params`, `error`, `format` and `dispatch::context`.

mod dispatch;
pub mod error;
pub mod format;
pub mod params;
pub mod schemas;

pub use dispatch::{CloudMcpService, DispatchError, ToolContext, ToolDispatcher};
pub use error::ToolError;
