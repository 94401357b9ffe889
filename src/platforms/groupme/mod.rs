//! GroupMe platform adapter
//!
//! Requests go out through a [`Transport`], which owns the one pooled HTTP
//! client. Operations are methods on the transport, one module per resource.

mod client;
mod config;
mod groups;
mod types;

pub use client::{RawResponse, Transport};
pub use config::{TransportConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use groups::{omit_param, GroupsQuery, GroupsResponse};
pub use types::*;
