//! Remote interface of the line-card proxy.
//!
//! Composes id allocation, the attribute codec and the transport channel
//! into the quad operations (create, remove, set, get), statistics and
//! capability probes of one execution context. Objects created here are
//! tracked locally so notifications can be routed without asking the
//! backend.
//!
//! # Key Types
//!
//! - [`RemoteInterface`] — the per-context proxy
//! - [`ProxyConfig`] — transport mode, response timeout, pipeline depth
//! - [`Validator`] — bookkeeping hooks around every operation
//! - [`ObjectTable`] — locally known objects and their notification pointers

pub mod callbacks;
pub mod config;
pub mod error;
pub mod objects;
pub mod proxy;
pub mod validator;

pub use callbacks::{Callback, CallbackRegistry};
pub use config::ProxyConfig;
pub use error::{ProxyError, ProxyResult};
pub use objects::{ObjectEntry, ObjectTable};
pub use proxy::{object_key, AttrCapability, RemoteInterface};
pub use validator::{MetaValidator, PassThrough, ValidationMode, Validator};
