use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use tracing::trace;

use crate::error::ChannelResult;
use crate::store::{Record, Store, StoreConnector, Subscription};

/// In-process store.
///
/// The request queue is a single FIFO. Topics fan out to every live
/// subscriber; subscribers whose receiver was dropped are pruned on the
/// next publish.
pub struct InMemoryStore {
    address: String,
    requests_tx: Sender<Record>,
    requests_rx: Receiver<Record>,
    topics: Mutex<HashMap<String, Vec<Sender<Record>>>>,
}

impl InMemoryStore {
    pub fn new(address: impl Into<String>) -> Self {
        let (requests_tx, requests_rx) = unbounded();
        Self {
            address: address.into(),
            requests_tx,
            requests_rx,
            topics: Mutex::new(HashMap::new()),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Backend side: take the next request, waiting up to `timeout`.
    pub fn next_request(&self, timeout: Duration) -> Option<Record> {
        self.requests_rx.recv_timeout(timeout).ok()
    }

    /// Requests queued and not yet taken by the backend.
    pub fn pending_requests(&self) -> usize {
        self.requests_rx.len()
    }

    /// Backend side: publish a record on a topic. Returns the number of
    /// subscribers it was delivered to.
    pub fn publish(&self, topic: &str, record: Record) -> usize {
        let mut topics = self.topics.lock();
        let Some(subscribers) = topics.get_mut(topic) else {
            return 0;
        };
        subscribers.retain(|tx| tx.send(record.clone()).is_ok());
        trace!(topic, op = %record.op, delivered = subscribers.len(), "published");
        subscribers.len()
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.lock().get(topic).map_or(0, Vec::len)
    }
}

impl Store for InMemoryStore {
    fn push(&self, records: Vec<Record>) -> ChannelResult<()> {
        for record in records {
            // Both ends live in `self`, so the queue cannot be disconnected.
            let _ = self.requests_tx.send(record);
        }
        Ok(())
    }

    fn subscribe(&self, topic: &str) -> ChannelResult<Subscription> {
        let (tx, rx) = unbounded();
        self.topics
            .lock()
            .entry(topic.to_string())
            .or_default()
            .push(tx);
        Ok(rx)
    }
}

/// Hands out one [`InMemoryStore`] per address, creating it on first use.
#[derive(Default)]
pub struct InMemoryConnector {
    stores: Mutex<HashMap<String, Arc<InMemoryStore>>>,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store behind `address`, for attaching a backend.
    pub fn store(&self, address: &str) -> Arc<InMemoryStore> {
        Arc::clone(
            self.stores
                .lock()
                .entry(address.to_string())
                .or_insert_with(|| Arc::new(InMemoryStore::new(address))),
        )
    }
}

impl StoreConnector for InMemoryConnector {
    fn connect(&self, address: &str) -> ChannelResult<Arc<dyn Store>> {
        let store: Arc<dyn Store> = self.store(address);
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_fifo() {
        let store = InMemoryStore::new("ASIC_DB");
        store
            .push(vec![
                Record::new("A", "create", vec![]),
                Record::new("B", "set", vec![]),
            ])
            .unwrap();
        assert_eq!(store.pending_requests(), 2);
        let timeout = Duration::from_millis(10);
        assert_eq!(store.next_request(timeout).unwrap().key, "A");
        assert_eq!(store.next_request(timeout).unwrap().key, "B");
        assert!(store.next_request(timeout).is_none());
    }

    #[test]
    fn publish_fans_out_and_prunes() {
        let store = InMemoryStore::new("ASIC_DB");
        let a = store.subscribe("T").unwrap();
        let b = store.subscribe("T").unwrap();
        assert_eq!(store.publish("T", Record::new("k", "op", vec![])), 2);
        assert_eq!(a.try_recv().unwrap().key, "k");
        assert_eq!(b.try_recv().unwrap().key, "k");

        drop(b);
        assert_eq!(store.publish("T", Record::new("k2", "op", vec![])), 1);
        assert_eq!(store.subscriber_count("T"), 1);
        assert_eq!(store.publish("other", Record::new("k", "op", vec![])), 0);
    }

    #[test]
    fn connector_shares_store_per_address() {
        let connector = InMemoryConnector::new();
        let a = connector.store("ASIC_DB");
        let b = connector.store("ASIC_DB");
        let c = connector.store("OTHER_DB");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert!(connector.connect("ASIC_DB").is_ok());
    }
}
