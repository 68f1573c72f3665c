//! Linode API v4 client.
//!
//! [`transport`] turns a named profile into a tuned `reqwest` client; [`LinodeClient`] layers
//! bearer authentication, pagination and error decoding on top, with one typed method per
//! endpoint.

mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{Credential, LinodeClient, LinodeClientBuilder, ListOptions, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use transport::{TransportConfig, TransportProfile};
