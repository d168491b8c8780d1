//! Transport for the line-card proxy.
//!
//! Requests are pushed as keyed records onto a queue the backend drains.
//! Each request is answered on a response topic, strictly in send order.
//! Unsolicited notifications arrive on a separate topic and are handled by
//! a listener thread that serializes with API calls through the context
//! lock.
//!
//! # Key Types
//!
//! - [`Channel`] — send/flush/wait plus the notification listener
//! - [`Store`] / [`StoreConnector`] — the shared store, client side
//! - [`InMemoryStore`] — in-process store with a backend-side API
//! - [`Notification`] / [`DecoderRegistry`] — decoded backend events
//! - [`FakeBackend`] — store-level backend double for tests

pub mod channel;
pub mod command;
pub mod error;
pub mod fake;
pub mod memory;
pub mod notification;
pub mod store;

pub use channel::{
    Channel, ChannelConfig, ContextLock, NotificationCallback, NotificationSink, Response,
    TransportMode,
};
pub use command::Command;
pub use error::{ChannelError, ChannelResult};
pub use fake::FakeBackend;
pub use memory::{InMemoryConnector, InMemoryStore};
pub use notification::{DecoderRegistry, Notification, NotificationKind};
pub use store::{Record, Store, StoreConnector, Subscription};
