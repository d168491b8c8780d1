//! Context and session management for the line-card proxy.
//!
//! A session owns one [`RemoteInterface`](lcp_proxy::RemoteInterface) and
//! one validation layer per execution context, built from a JSON context
//! configuration file. Calls are routed by the context field of the object
//! id they name.
//!
//! # Key Types
//!
//! - [`Session`] — routing front end over every context
//! - [`ContextConfig`] — one context: guid, store addresses, line cards
//! - [`SessionConfig`] — configuration file path, proxy settings, validation mode

pub mod config;
pub mod error;
pub mod session;

pub use config::{load_contexts, read_contexts, ContextConfig, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use session::Session;
