//! Client-side adapter for the GroupMe REST API
//!
//! Turns HTTP+JSON exchanges into typed values. Every call is a single,
//! blocking request/decode pipeline:
//!
//! 1. build a GET request with the caller's token and query parameters
//! 2. execute it through a shared [`Transport`]
//! 3. decode the body as the success shape, then as the service's error
//!    envelope, and report anything else as an unrecognized response
//!
//! ```no_run
//! use groupme::Transport;
//!
//! let transport = Transport::default_transport()?;
//! for group in transport.user_groups("ACCESS_TOKEN", 1, 10, true)? {
//!     println!("{} ({})", group.name, group.id);
//! }
//! # Ok::<(), groupme::Error>(())
//! ```
//!
//! Retries, rate limiting, timeouts and token acquisition are left to the
//! caller. Logging goes through `tracing` at debug level; install a
//! subscriber to see it.

// Core modules
pub mod error;
pub mod platforms;
pub mod runtime;
mod serde_helpers;

// Re-exports for convenience
pub use error::{Error, ErrorCode, Meta, Result, ServiceError, UNEXPECTED_RESPONSE};
pub use platforms::groupme::{
    omit_param, Attachment, AttachmentKind, Group, GroupsQuery, GroupsResponse, Member, MessagePreview, Messages,
    RawResponse, Transport, TransportConfig,
};

// Library version information
pub const VERSION_STRING: &str = concat!(env!("CARGO_PKG_VERSION"), " (groupme-rest)");
