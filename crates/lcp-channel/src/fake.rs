//! Store-level stand-in for the vendor backend.
//!
//! Drains the request queue of an [`InMemoryStore`] on its own thread,
//! keeps a key -> field/value map, and answers quad operations, statistics
//! and capability probes the way a real backend would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use lcp_types::field::find_field;
use lcp_types::{FieldValue, Status};
use parking_lot::Mutex;
use tracing::debug;

use crate::command::Command;
use crate::memory::InMemoryStore;
use crate::store::{Record, NOTIFICATION_TOPIC, RESPONSE_TOPIC};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Called after a request is processed and before it is answered.
pub type PreReplyHook = Box<dyn FnMut(&Record, &InMemoryStore) + Send>;

#[derive(Default)]
struct FakeState {
    objects: HashMap<String, Vec<FieldValue>>,
    stats: HashMap<(String, String), String>,
    /// `(object type, attribute)` -> create/set/get implemented.
    capabilities: HashMap<(String, String), [bool; 3]>,
    enum_capabilities: HashMap<(String, String), Vec<String>>,
    availability: HashMap<String, u64>,
    async_mode: bool,
    forced_status: Option<Status>,
    received: Vec<Record>,
    max_backlog: usize,
    reply_delay: Duration,
    hook: Option<PreReplyHook>,
}

/// Test double answering requests on an [`InMemoryStore`].
pub struct FakeBackend {
    store: Arc<InMemoryStore>,
    state: Arc<Mutex<FakeState>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FakeBackend {
    pub fn start(store: Arc<InMemoryStore>) -> std::io::Result<Self> {
        let state = Arc::new(Mutex::new(FakeState::default()));
        let running = Arc::new(AtomicBool::new(true));
        let handle = {
            let store = Arc::clone(&store);
            let state = Arc::clone(&state);
            let running = Arc::clone(&running);
            std::thread::Builder::new()
                .name("lcp-fake-backend".into())
                .spawn(move || serve(&store, &state, &running))?
        };
        Ok(Self {
            store,
            state,
            running,
            handle: Some(handle),
        })
    }

    pub fn store(&self) -> &Arc<InMemoryStore> {
        &self.store
    }

    /// Seed or overwrite one field of a stored object.
    pub fn put(&self, key: &str, field: &str, value: &str) {
        let mut state = self.state.lock();
        let fields = state.objects.entry(key.to_string()).or_default();
        upsert(fields, field, value);
    }

    pub fn object(&self, key: &str) -> Option<Vec<FieldValue>> {
        self.state.lock().objects.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.lock().objects.contains_key(key)
    }

    pub fn set_stat(&self, key: &str, name: &str, value: &str) {
        self.state
            .lock()
            .stats
            .insert((key.to_string(), name.to_string()), value.to_string());
    }

    pub fn set_capability(&self, object_type: &str, attr: &str, create: bool, set: bool, get: bool) {
        self.state
            .lock()
            .capabilities
            .insert((object_type.to_string(), attr.to_string()), [create, set, get]);
    }

    pub fn set_enum_capability(&self, object_type: &str, attr: &str, values: &[&str]) {
        self.state.lock().enum_capabilities.insert(
            (object_type.to_string(), attr.to_string()),
            values.iter().map(|v| v.to_string()).collect(),
        );
    }

    pub fn set_availability(&self, object_type: &str, count: u64) {
        self.state
            .lock()
            .availability
            .insert(object_type.to_string(), count);
    }

    /// Answer the next replied-to request with `status` and no payload.
    pub fn fail_next(&self, status: Status) {
        self.state.lock().forced_status = Some(status);
    }

    pub fn set_reply_delay(&self, delay: Duration) {
        self.state.lock().reply_delay = delay;
    }

    pub fn set_pre_reply_hook(&self, hook: impl FnMut(&Record, &InMemoryStore) + Send + 'static) {
        self.state.lock().hook = Some(Box::new(hook));
    }

    /// Whether the client last announced buffered mode.
    pub fn is_async(&self) -> bool {
        self.state.lock().async_mode
    }

    /// Every request taken from the queue, in order.
    pub fn received(&self) -> Vec<Record> {
        self.state.lock().received.clone()
    }

    /// Largest number of requests found still queued right after taking one.
    pub fn max_backlog(&self) -> usize {
        self.state.lock().max_backlog
    }

    /// Publish a notification record.
    pub fn notify(&self, record: Record) -> usize {
        self.store.publish(NOTIFICATION_TOPIC, record)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.stop();
    }
}

fn serve(store: &InMemoryStore, state: &Mutex<FakeState>, running: &AtomicBool) {
    while running.load(Ordering::Acquire) {
        let Some(record) = store.next_request(POLL_INTERVAL) else {
            continue;
        };
        let backlog = store.pending_requests();
        let (reply, delay, hook) = {
            let mut state = state.lock();
            state.max_backlog = state.max_backlog.max(backlog);
            state.received.push(record.clone());
            let reply = handle(&mut state, &record);
            (reply, state.reply_delay, state.hook.take())
        };
        if let Some(mut hook) = hook {
            hook(&record, store);
            let mut state = state.lock();
            if state.hook.is_none() {
                state.hook = Some(hook);
            }
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        if let Some(reply) = reply {
            store.publish(RESPONSE_TOPIC, reply);
        }
    }
}

fn handle(state: &mut FakeState, record: &Record) -> Option<Record> {
    let Ok(command) = record.op.parse::<Command>() else {
        debug!(op = %record.op, "fake backend ignoring unknown op");
        return None;
    };
    let response_tag = command.response_tag()?;

    if command == Command::Notify {
        match record.key.as_str() {
            "ASYNC_MODE" => state.async_mode = true,
            "SYNC_MODE" => state.async_mode = false,
            _ => {}
        }
        return Some(Record::new(Status::Success.name(), response_tag.tag(), vec![]));
    }

    let silent = state.async_mode
        && matches!(command, Command::Create | Command::Remove | Command::Set);

    let (status, fields) = match state.forced_status.take() {
        Some(forced) if !silent => (forced, vec![]),
        forced => {
            state.forced_status = forced;
            execute(state, command, record)
        }
    };
    if silent {
        return None;
    }
    Some(Record::new(status.name(), response_tag.tag(), fields))
}

fn execute(state: &mut FakeState, command: Command, record: &Record) -> (Status, Vec<FieldValue>) {
    let key = record.key.as_str();
    match command {
        Command::Create => {
            if state.objects.contains_key(key) {
                return (Status::ItemAlreadyExists, vec![]);
            }
            let fields = record
                .fields
                .iter()
                .filter(|fv| !fv.is_null_sentinel())
                .cloned()
                .collect();
            state.objects.insert(key.to_string(), fields);
            (Status::Success, vec![])
        }
        Command::Remove => {
            if state.objects.remove(key).is_none() {
                return (Status::ItemNotFound, vec![]);
            }
            state.stats.retain(|(k, _), _| k != key);
            (Status::Success, vec![])
        }
        Command::Set => match state.objects.get_mut(key) {
            None => (Status::ItemNotFound, vec![]),
            Some(fields) => {
                for fv in &record.fields {
                    upsert(fields, &fv.field, &fv.value);
                }
                (Status::Success, vec![])
            }
        },
        Command::Get => match state.objects.get(key) {
            None => (Status::ItemNotFound, vec![]),
            Some(stored) => answer_get(stored, &record.fields),
        },
        Command::GetStats => {
            if !state.objects.contains_key(key) {
                return (Status::ItemNotFound, vec![]);
            }
            let fields = record
                .fields
                .iter()
                .map(|fv| {
                    let value = state
                        .stats
                        .get(&(key.to_string(), fv.field.clone()))
                        .cloned()
                        .unwrap_or_else(|| "0".to_string());
                    FieldValue::new(fv.field.clone(), value)
                })
                .collect();
            (Status::Success, fields)
        }
        Command::ClearStats => {
            if !state.objects.contains_key(key) {
                return (Status::ItemNotFound, vec![]);
            }
            for fv in &record.fields {
                state
                    .stats
                    .insert((key.to_string(), fv.field.clone()), "0".to_string());
            }
            (Status::Success, vec![])
        }
        Command::AttributeCapabilityQuery => {
            let probe = probe_key(&record.fields);
            let [create, set, get] = state.capabilities.get(&probe).copied().unwrap_or([true; 3]);
            (
                Status::Success,
                vec![
                    FieldValue::new("CREATE_IMPLEMENTED", create.to_string()),
                    FieldValue::new("SET_IMPLEMENTED", set.to_string()),
                    FieldValue::new("GET_IMPLEMENTED", get.to_string()),
                ],
            )
        }
        Command::AttributeEnumValuesCapabilityQuery => {
            let probe = probe_key(&record.fields);
            let values = state.enum_capabilities.get(&probe).cloned().unwrap_or_default();
            let capacity: usize = find_field(&record.fields, "ENUM_COUNT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            if values.len() > capacity {
                return (
                    Status::BufferOverflow,
                    vec![
                        FieldValue::new("ENUM_CAPABILITY", ""),
                        FieldValue::new("ENUM_COUNT", values.len().to_string()),
                    ],
                );
            }
            (
                Status::Success,
                vec![
                    FieldValue::new("ENUM_CAPABILITY", values.join(",")),
                    FieldValue::new("ENUM_COUNT", values.len().to_string()),
                ],
            )
        }
        Command::ObjectTypeAvailabilityQuery => {
            let object_type = find_field(&record.fields, "OBJECT_TYPE").unwrap_or_default();
            let count = state.availability.get(object_type).copied().unwrap_or(0);
            (
                Status::Success,
                vec![FieldValue::new("OBJECT_COUNT", count.to_string())],
            )
        }
        Command::Notify | Command::GetResponse => (Status::NotSupported, vec![]),
    }
}

fn probe_key(fields: &[FieldValue]) -> (String, String) {
    (
        find_field(fields, "OBJECT_TYPE").unwrap_or_default().to_string(),
        find_field(fields, "ATTR_ID").unwrap_or_default().to_string(),
    )
}

/// Answer a get in request order. A list requested as `<capacity>:null`
/// whose stored count exceeds the capacity comes back as `<count>:null`
/// with an overflow status.
fn answer_get(stored: &[FieldValue], requested: &[FieldValue]) -> (Status, Vec<FieldValue>) {
    let mut status = Status::Success;
    let mut fields = Vec::with_capacity(requested.len());
    for req in requested {
        let Some(value) = find_field(stored, &req.field) else {
            return (Status::InvalidAttribute, vec![]);
        };
        let value = match (list_capacity(&req.value), stored_count(value)) {
            (Some(capacity), Some(count)) if count > capacity => {
                status = Status::BufferOverflow;
                format!("{count}:null")
            }
            _ => value.to_string(),
        };
        fields.push(FieldValue::new(req.field.clone(), value));
    }
    (status, fields)
}

fn list_capacity(value: &str) -> Option<u32> {
    value.strip_suffix(":null")?.parse().ok()
}

fn stored_count(value: &str) -> Option<u32> {
    value.split_once(':')?.0.parse().ok()
}

fn upsert(fields: &mut Vec<FieldValue>, field: &str, value: &str) {
    match fields.iter_mut().find(|fv| fv.field == field) {
        Some(fv) => fv.value = value.to_string(),
        None => fields.push(FieldValue::new(field, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    fn roundtrip(store: &InMemoryStore, record: Record) -> Record {
        let responses = store.subscribe(RESPONSE_TOPIC).unwrap();
        store.push(vec![record]).unwrap();
        responses.recv_timeout(Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn quad_operations() {
        let store = Arc::new(InMemoryStore::new("db"));
        let backend = FakeBackend::start(Arc::clone(&store)).unwrap();
        let key = "PORT:oid:0x0000010200000001";

        let create = Record::command(key, Command::Create, vec![FieldValue::new("PORT_NAME", "p1")]);
        assert_eq!(roundtrip(&store, create.clone()).key, "STATUS_SUCCESS");
        assert_eq!(roundtrip(&store, create).key, "STATUS_ITEM_ALREADY_EXISTS");

        let set = Record::command(key, Command::Set, vec![FieldValue::new("PORT_NAME", "p2")]);
        assert_eq!(roundtrip(&store, set).key, "STATUS_SUCCESS");

        let get = Record::command(key, Command::Get, vec![FieldValue::new("PORT_NAME", "")]);
        let resp = roundtrip(&store, get);
        assert_eq!(resp.op, "getresponse");
        assert_eq!(resp.fields, vec![FieldValue::new("PORT_NAME", "p2")]);

        let remove = Record::command(key, Command::Remove, vec![]);
        assert_eq!(roundtrip(&store, remove.clone()).key, "STATUS_SUCCESS");
        assert_eq!(roundtrip(&store, remove).key, "STATUS_ITEM_NOT_FOUND");
        assert!(!backend.contains(key));
    }

    #[test]
    fn get_overflow_reports_count_only() {
        let store = Arc::new(InMemoryStore::new("db"));
        let backend = FakeBackend::start(Arc::clone(&store)).unwrap();
        backend.put("OTDR:x", "OTDR_ID", "1");
        backend.put("OTDR:x", "OTDR_SUPPORTED_PULSE_WIDTHS", "3:10,20,30");
        let get = Record::command(
            "OTDR:x",
            Command::Get,
            vec![
                FieldValue::new("OTDR_ID", "0"),
                FieldValue::new("OTDR_SUPPORTED_PULSE_WIDTHS", "1:null"),
            ],
        );
        let resp = roundtrip(&store, get);
        assert_eq!(resp.key, "STATUS_BUFFER_OVERFLOW");
        assert_eq!(
            resp.fields,
            vec![
                FieldValue::new("OTDR_ID", "1"),
                FieldValue::new("OTDR_SUPPORTED_PULSE_WIDTHS", "3:null"),
            ]
        );
    }

    #[test]
    fn async_mode_silences_quad_writes() {
        let store = Arc::new(InMemoryStore::new("db"));
        let backend = FakeBackend::start(Arc::clone(&store)).unwrap();
        let resp = roundtrip(&store, Record::command("ASYNC_MODE", Command::Notify, vec![]));
        assert_eq!(resp.op, "notify");
        assert!(backend.is_async());

        let responses = store.subscribe(RESPONSE_TOPIC).unwrap();
        store
            .push(vec![Record::command("PORT:a", Command::Create, vec![])])
            .unwrap();
        assert!(responses.recv_timeout(Duration::from_millis(150)).is_err());
        assert!(backend.contains("PORT:a"));
    }

    #[test]
    fn stats_default_to_zero() {
        let store = Arc::new(InMemoryStore::new("db"));
        let backend = FakeBackend::start(Arc::clone(&store)).unwrap();
        backend.put("OA:x", "OA_ID", "1");
        backend.set_stat("OA:x", "OA_INPUT_POWER", "-3.5");
        let req = Record::command(
            "OA:x",
            Command::GetStats,
            vec![FieldValue::new("OA_INPUT_POWER", ""), FieldValue::new("OA_OUTPUT_POWER", "")],
        );
        let resp = roundtrip(&store, req);
        assert_eq!(
            resp.fields,
            vec![
                FieldValue::new("OA_INPUT_POWER", "-3.5"),
                FieldValue::new("OA_OUTPUT_POWER", "0"),
            ]
        );
    }

    #[test]
    fn forced_status_applies_once() {
        let store = Arc::new(InMemoryStore::new("db"));
        let backend = FakeBackend::start(Arc::clone(&store)).unwrap();
        backend.fail_next(Status::InsufficientResources);
        let create = Record::command("PORT:a", Command::Create, vec![]);
        assert_eq!(roundtrip(&store, create.clone()).key, "STATUS_INSUFFICIENT_RESOURCES");
        assert_eq!(roundtrip(&store, create).key, "STATUS_SUCCESS");
    }
}
