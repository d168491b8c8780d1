use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{JoinHandle, ThreadId};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, select, Receiver, RecvTimeoutError, Sender};
use lcp_types::{FieldValue, Status};
use parking_lot::{Mutex, ReentrantMutex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::error::{ChannelError, ChannelResult};
use crate::notification::{DecoderRegistry, Notification};
use crate::store::{Record, Store, Subscription, NOTIFICATION_TOPIC, RESPONSE_TOPIC};

/// Lock serializing API calls with notification processing for one
/// execution context.
pub type ContextLock = Arc<ReentrantMutex<()>>;

/// User-code continuation of a notification, run after the context lock
/// is released.
pub type NotificationCallback = Box<dyn FnOnce(&Notification) + Send>;

/// Receiver of decoded notifications.
///
/// `process` runs on the listener thread while the context lock is held,
/// so it observes object state consistent with API calls. The callback it
/// returns runs after the lock is released.
pub trait NotificationSink: Send + Sync {
    fn process(&self, notification: &Notification) -> Option<NotificationCallback>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Pipelined: create/remove/set do not wait for a response.
    Buffered,
    /// Every record is sent immediately and every call waits.
    Unbuffered,
}

impl TransportMode {
    /// Key of the `notify` record announcing this mode to the backend.
    pub fn announcement_key(self) -> &'static str {
        match self {
            Self::Buffered => "ASYNC_MODE",
            Self::Unbuffered => "SYNC_MODE",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub mode: TransportMode,
    pub response_timeout: Duration,
    /// Records held client-side in buffered mode before an automatic flush.
    pub pipeline_depth: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            mode: TransportMode::Unbuffered,
            response_timeout: Duration::from_secs(60),
            pipeline_depth: 128,
        }
    }
}

/// A correlated backend response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub fields: Vec<FieldValue>,
}

enum Control {
    Shutdown,
}

/// Bidirectional conduit to the backend over a shared store.
///
/// Requests go onto the store's request queue; responses are read from a
/// dedicated subscription, strictly in send order. A listener thread
/// drains the notification topic independently.
pub struct Channel {
    store: Arc<dyn Store>,
    lock: ContextLock,
    sink: Arc<dyn NotificationSink>,
    // Released on close so the store stops queueing for this channel.
    notifications: Mutex<Option<Subscription>>,
    mode: TransportMode,
    response_timeout: Mutex<Duration>,
    pipeline_depth: usize,
    pending: Mutex<Vec<Record>>,
    responses: Subscription,
    control: Sender<Control>,
    stopping: AtomicBool,
    listener: Mutex<Option<JoinHandle<()>>>,
    listener_id: ThreadId,
}

impl Channel {
    /// Connect to `store` and start the notification listener.
    pub fn open(
        store: Arc<dyn Store>,
        config: &ChannelConfig,
        lock: ContextLock,
        sink: Arc<dyn NotificationSink>,
    ) -> ChannelResult<Self> {
        let notifications = store.subscribe(NOTIFICATION_TOPIC)?;
        Self::start(store, config, lock, sink, notifications)
    }

    /// Open a sibling channel with another configuration on the same store.
    ///
    /// The sibling takes over this channel's notification queue instead of
    /// subscribing afresh: every notification is handled exactly once,
    /// either by this listener before it stops or by the sibling's.
    pub fn reopen(&self, config: &ChannelConfig) -> ChannelResult<Self> {
        let notifications = self
            .notifications
            .lock()
            .clone()
            .ok_or(ChannelError::Closed)?;
        Self::start(
            Arc::clone(&self.store),
            config,
            Arc::clone(&self.lock),
            Arc::clone(&self.sink),
            notifications,
        )
    }

    fn start(
        store: Arc<dyn Store>,
        config: &ChannelConfig,
        lock: ContextLock,
        sink: Arc<dyn NotificationSink>,
        notifications: Subscription,
    ) -> ChannelResult<Self> {
        let responses = store.subscribe(RESPONSE_TOPIC)?;
        let (control, control_rx) = bounded(1);
        let stopping = AtomicBool::new(false);

        let listener = Listener {
            control: control_rx,
            notifications: notifications.clone(),
            decoders: DecoderRegistry::default(),
            lock: Arc::clone(&lock),
            sink: Arc::clone(&sink),
        };
        let handle = std::thread::Builder::new()
            .name("lcp-notifications".into())
            .spawn(move || listener.run())?;
        let listener_id = handle.thread().id();

        info!(mode = ?config.mode, timeout = ?config.response_timeout, "channel connected");

        Ok(Self {
            store,
            lock,
            sink,
            notifications: Mutex::new(Some(notifications)),
            mode: config.mode,
            response_timeout: Mutex::new(config.response_timeout),
            pipeline_depth: config.pipeline_depth.max(1),
            pending: Mutex::new(Vec::new()),
            responses,
            control,
            stopping,
            listener: Mutex::new(Some(handle)),
            listener_id,
        })
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn response_timeout(&self) -> Duration {
        *self.response_timeout.lock()
    }

    pub fn set_response_timeout(&self, timeout: Duration) {
        *self.response_timeout.lock() = timeout;
        debug!(?timeout, "response timeout changed");
    }

    pub fn is_closed(&self) -> bool {
        self.stopping.load(Ordering::Acquire)
    }

    /// Append one record. Buffered mode holds it until [`Self::flush`] or
    /// until the pipeline fills; unbuffered mode sends it immediately.
    pub fn send(&self, key: &str, fields: Vec<FieldValue>, command: Command) -> ChannelResult<()> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        let record = Record::command(key, command, fields);
        debug!(%key, op = %command, "send");
        match self.mode {
            TransportMode::Unbuffered => self.store.push(vec![record]),
            TransportMode::Buffered => {
                let batch = {
                    let mut pending = self.pending.lock();
                    pending.push(record);
                    if pending.len() < self.pipeline_depth {
                        return Ok(());
                    }
                    std::mem::take(&mut *pending)
                };
                self.store.push(batch)
            }
        }
    }

    /// Push every held record to the store.
    pub fn flush(&self) -> ChannelResult<()> {
        let batch = std::mem::take(&mut *self.pending.lock());
        if batch.is_empty() {
            return Ok(());
        }
        debug!(records = batch.len(), "flush");
        self.store.push(batch)
    }

    /// Block for the next response tagged `expected`.
    ///
    /// Responses carrying another tag are logged and skipped. On timeout
    /// the call fails; the channel stays usable.
    pub fn wait_for_response(&self, expected: Command) -> ChannelResult<Response> {
        self.flush()?;
        let timeout = self.response_timeout();
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let record = match self.responses.recv_timeout(remaining) {
                Ok(record) => record,
                Err(RecvTimeoutError::Timeout) => {
                    warn!(%expected, ?timeout, "response timeout");
                    return Err(ChannelError::Timeout { expected, timeout });
                }
                Err(RecvTimeoutError::Disconnected) => return Err(ChannelError::Disconnected),
            };
            if record.op != expected.tag() {
                warn!(op = %record.op, %expected, "skipping unexpected response");
                continue;
            }
            let status = record
                .key
                .parse::<Status>()
                .map_err(|e| ChannelError::Malformed(e.to_string()))?;
            debug!(%status, fields = record.fields.len(), "response");
            return Ok(Response {
                status,
                fields: record.fields,
            });
        }
    }

    /// Send one record and wait for its correlated response.
    ///
    /// Responses left over from an earlier timed-out request are discarded
    /// first so they cannot be matched to this one.
    pub fn request(
        &self,
        key: &str,
        fields: Vec<FieldValue>,
        command: Command,
    ) -> ChannelResult<Response> {
        let expected = command.response_tag().ok_or_else(|| {
            ChannelError::Malformed(format!("{command} is not a request"))
        })?;
        for stale in self.responses.try_iter() {
            warn!(op = %stale.op, status = %stale.key, "discarding stale response");
        }
        self.send(key, fields, command)?;
        self.wait_for_response(expected)
    }

    /// Stop the listener and disconnect.
    ///
    /// Notifications already queued when the listener sees the shutdown are
    /// still handled; later ones are discarded. Must not be called while
    /// holding the context lock: the listener may be waiting on it.
    pub fn close(&self) {
        if self.stopping.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Err(e) = self.flush() {
            warn!(error = %e, "dropping held records on close");
        }
        self.notifications.lock().take();
        let _ = self.control.try_send(Control::Shutdown);
        let handle = self.listener.lock().take();
        if let Some(handle) = handle {
            if std::thread::current().id() == self.listener_id {
                // Closed from a notification callback; the thread exits on its own.
                return;
            }
            if handle.join().is_err() {
                warn!("notification listener panicked");
            }
        }
        info!(mode = ?self.mode, "channel closed");
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.close();
    }
}

struct Listener {
    control: Receiver<Control>,
    notifications: Subscription,
    decoders: DecoderRegistry,
    lock: ContextLock,
    sink: Arc<dyn NotificationSink>,
}

impl Listener {
    fn run(self) {
        debug!("notification listener started");
        loop {
            let running = select! {
                recv(self.control) -> _ => {
                    self.drain();
                    false
                },
                recv(self.notifications) -> msg => match msg {
                    Ok(record) => {
                        self.dispatch(&record);
                        true
                    }
                    Err(_) => false,
                },
            };
            if !running {
                break;
            }
        }
        debug!("notification listener exiting");
    }

    /// Handle what was queued before the shutdown; anything published
    /// after this point is left behind.
    fn drain(&self) {
        let backlog = self.notifications.len();
        if backlog > 0 {
            debug!(backlog, "draining notifications before exit");
        }
        for record in self.notifications.try_iter().take(backlog) {
            self.dispatch(&record);
        }
    }

    fn dispatch(&self, record: &Record) {
        let Some(notification) = self.decoders.decode(record) else {
            return;
        };
        let callback = {
            let _guard = self.lock.lock();
            self.sink.process(&notification)
        };
        if let Some(callback) = callback {
            callback(&notification);
        }
    }
}
