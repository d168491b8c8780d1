use std::sync::Arc;

use crossbeam_channel::Receiver;
use lcp_types::FieldValue;
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::ChannelResult;

/// Queue the backend drains for requests.
pub const REQUEST_QUEUE: &str = "LCP_STATE";
/// Topic carrying responses to requests.
pub const RESPONSE_TOPIC: &str = "GETRESPONSE";
/// Topic carrying unsolicited backend notifications.
pub const NOTIFICATION_TOPIC: &str = "NOTIFICATIONS";

/// One keyed operation record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub op: String,
    pub fields: Vec<FieldValue>,
}

impl Record {
    pub fn new(key: impl Into<String>, op: impl Into<String>, fields: Vec<FieldValue>) -> Self {
        Self {
            key: key.into(),
            op: op.into(),
            fields,
        }
    }

    pub fn command(key: impl Into<String>, command: Command, fields: Vec<FieldValue>) -> Self {
        Self::new(key, command.tag(), fields)
    }
}

/// Stream of records published on a topic.
pub type Subscription = Receiver<Record>;

/// Shared key-value/pub-sub store, client side.
pub trait Store: Send + Sync {
    /// Append records to the request queue, preserving order.
    fn push(&self, records: Vec<Record>) -> ChannelResult<()>;

    /// Subscribe to a topic. Only records published after the call are
    /// delivered. Dropping the receiver unsubscribes.
    fn subscribe(&self, topic: &str) -> ChannelResult<Subscription>;
}

/// Opens stores by address.
pub trait StoreConnector: Send + Sync {
    fn connect(&self, address: &str) -> ChannelResult<Arc<dyn Store>>;
}
