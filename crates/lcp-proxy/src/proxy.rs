use std::str::FromStr;
use std::sync::{Arc, Weak};
use std::time::Duration;

use lcp_channel::{
    Channel, ChannelConfig, Command, ContextLock, Notification, NotificationCallback,
    NotificationSink, Response, Store, TransportMode,
};
use lcp_codec::attrs::linecard::HARDWARE_INFO;
use lcp_codec::meta;
use lcp_codec::{
    decode_attributes, decode_stat_values, encode_attributes, encode_stat_ids, Attribute,
    CodecError, DecodeStatus, StatValue, ValueList,
};
use lcp_types::field::find_field;
use lcp_types::{FieldValue, IdAllocator, LinecardContainer, ObjectId, ObjectType, Status};
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::callbacks::{Callback, CallbackRegistry};
use crate::config::ProxyConfig;
use crate::error::{ProxyError, ProxyResult};
use crate::objects::{ObjectEntry, ObjectTable};
use crate::validator::Validator;

/// Store key of an object: `<TYPE>:oid:0x…`.
pub fn object_key(object_type: ObjectType, id: ObjectId) -> String {
    format!("{}:{}", object_type.name(), id)
}

/// Which operations the backend implements for one attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttrCapability {
    pub create_implemented: bool,
    pub set_implemented: bool,
    pub get_implemented: bool,
}

struct Shared {
    // First field: dropping it stops the listener before the tables go.
    channel: RwLock<Option<Arc<Channel>>>,
    context: u8,
    lock: ContextLock,
    store: Arc<dyn Store>,
    pipeline_depth: usize,
    allocator: Mutex<IdAllocator>,
    objects: RwLock<ObjectTable>,
    callbacks: RwLock<CallbackRegistry>,
    validator: Arc<dyn Validator>,
}

/// Client-side stand-in for the device API of one execution context.
///
/// Ids are allocated locally and every operation is shipped to the backend
/// over a [`Channel`]. Each blocking call holds the context lock from send
/// to response, so at most one request is in flight per context and
/// notification processing never interleaves with an API call.
pub struct RemoteInterface {
    shared: Arc<Shared>,
}

impl RemoteInterface {
    /// Open a channel on `store` and announce the configured transport mode.
    pub fn connect(
        context: u8,
        store: Arc<dyn Store>,
        linecards: LinecardContainer,
        config: &ProxyConfig,
        validator: Arc<dyn Validator>,
    ) -> ProxyResult<Self> {
        let shared = Arc::new(Shared {
            channel: RwLock::new(None),
            context,
            lock: Arc::new(ReentrantMutex::new(())),
            store,
            pipeline_depth: config.pipeline_depth,
            allocator: Mutex::new(IdAllocator::new(context, linecards)),
            objects: RwLock::new(ObjectTable::new()),
            callbacks: RwLock::new(CallbackRegistry::new()),
            validator,
        });
        let channel = shared.open_channel(&config.channel_config())?;
        announce(&channel, config.mode)?;
        *shared.channel.write() = Some(Arc::new(channel));
        info!(context, mode = ?config.mode, "proxy connected");
        Ok(Self { shared })
    }

    pub fn context(&self) -> u8 {
        self.shared.context
    }

    /// The lock serializing API calls and notification processing.
    pub fn context_lock(&self) -> ContextLock {
        Arc::clone(&self.shared.lock)
    }

    pub fn validator(&self) -> Arc<dyn Validator> {
        Arc::clone(&self.shared.validator)
    }

    pub fn mode(&self) -> ProxyResult<TransportMode> {
        Ok(self.shared.channel()?.mode())
    }

    pub fn response_timeout(&self) -> ProxyResult<Duration> {
        Ok(self.shared.channel()?.response_timeout())
    }

    pub fn set_response_timeout(&self, timeout: Duration) -> ProxyResult<()> {
        self.shared.channel()?.set_response_timeout(timeout);
        Ok(())
    }

    /// Push records held by a buffered channel.
    pub fn flush(&self) -> ProxyResult<()> {
        let _guard = self.shared.lock.lock();
        self.shared.channel()?.flush()?;
        Ok(())
    }

    /// Whether `id` was created through this proxy and not yet removed.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.shared.objects.read().contains(id)
    }

    /// Register a notification callback. The returned handle is what the
    /// line-card notification pointer attributes carry.
    pub fn register_callback(
        &self,
        callback: impl Fn(&Notification) + Send + Sync + 'static,
    ) -> u64 {
        let callback: Callback = Arc::new(callback);
        self.shared.callbacks.write().register(callback)
    }

    pub fn unregister_callback(&self, handle: u64) -> bool {
        self.shared.callbacks.write().unregister(handle)
    }

    /// Create a line card. Its slot derives from `LINECARD_HARDWARE_INFO`
    /// (empty when absent).
    pub fn create_linecard(&self, attrs: &[Attribute]) -> ProxyResult<ObjectId> {
        let _guard = self.shared.lock.lock();
        let channel = self.shared.channel()?;
        let hwinfo = attrs
            .iter()
            .find(|attr| attr.id == HARDWARE_INFO)
            .and_then(|attr| attr.value.as_chars())
            .unwrap_or("");
        let fields = create_fields(ObjectType::Linecard, attrs)?;
        let id = self.shared.allocator.lock().allocate_linecard(hwinfo)?;

        let key = object_key(ObjectType::Linecard, id);
        if let Err(e) = self.shared.write(&channel, Command::Create, &key, fields) {
            self.shared.allocator.lock().release(id);
            return Err(e);
        }
        let mut entry = ObjectEntry::new(ObjectType::Linecard, id);
        entry.apply(attrs);
        self.shared.objects.write().insert(id, entry);
        info!(%id, hwinfo, slot = id.slot(), "line card created");
        Ok(id)
    }

    /// Create an object of `object_type` under `linecard`.
    pub fn create(
        &self,
        object_type: ObjectType,
        linecard: ObjectId,
        attrs: &[Attribute],
    ) -> ProxyResult<ObjectId> {
        if object_type == ObjectType::Linecard {
            return self.create_linecard(attrs);
        }
        let _guard = self.shared.lock.lock();
        let channel = self.shared.channel()?;
        self.shared.linecard(linecard)?;
        let fields = create_fields(object_type, attrs)?;
        let id = self.shared.allocator.lock().allocate(object_type, linecard)?;

        let key = object_key(object_type, id);
        self.shared.write(&channel, Command::Create, &key, fields)?;
        self.shared
            .objects
            .write()
            .insert(id, ObjectEntry::new(object_type, linecard));
        debug!(%id, %object_type, "created");
        Ok(id)
    }

    /// Remove an object. A line card can only be removed once every object
    /// it owns is gone; its slot then returns to the pool.
    pub fn remove(&self, id: ObjectId) -> ProxyResult<()> {
        let _guard = self.shared.lock.lock();
        let channel = self.shared.channel()?;
        let object_type = self.shared.lookup(id)?;
        if object_type == ObjectType::Linecard && self.shared.objects.read().children_of(id) > 0 {
            return Err(ProxyError::InUse(id));
        }
        let key = object_key(object_type, id);
        self.shared.write(&channel, Command::Remove, &key, Vec::new())?;
        self.shared.objects.write().remove(id);
        self.shared.allocator.lock().release(id);
        debug!(%id, "removed");
        Ok(())
    }

    pub fn set(&self, id: ObjectId, attr: &Attribute) -> ProxyResult<()> {
        let _guard = self.shared.lock.lock();
        let channel = self.shared.channel()?;
        let object_type = self.shared.lookup(id)?;
        let attrs = std::slice::from_ref(attr);
        let fields = encode_attributes(object_type, attrs, false)?;
        let key = object_key(object_type, id);
        self.shared.write(&channel, Command::Set, &key, fields)?;
        if let Some(entry) = self.shared.objects.write().get_mut(id) {
            entry.apply(attrs);
        }
        Ok(())
    }

    /// Read attributes into caller-provided destinations.
    ///
    /// Lists are requested by capacity only. When a list does not fit, the
    /// call fails with [`ProxyError::BufferTooSmall`] after every scalar in
    /// `attrs` was decoded and the list's count set to its true length.
    pub fn get(&self, id: ObjectId, attrs: &mut [Attribute]) -> ProxyResult<()> {
        let _guard = self.shared.lock.lock();
        let channel = self.shared.channel()?;
        let object_type = self.shared.lookup(id)?;
        let fields = encode_attributes(object_type, attrs, true)?;
        let key = object_key(object_type, id);
        let response = channel.request(&key, fields, Command::Get)?;
        match response.status {
            Status::Success | Status::BufferOverflow => {
                let decoded = decode_attributes(object_type, &response.fields, attrs, false)
                    .map_err(|e| protocol(Command::Get, id, e))?;
                if response.status == Status::BufferOverflow
                    || decoded == DecodeStatus::BufferTooSmall
                {
                    debug!(%id, "get: destination list too small");
                    return Err(ProxyError::BufferTooSmall);
                }
                Ok(())
            }
            status => Err(rejected(Command::Get, status)),
        }
    }

    /// Read statistics, in the order of `ids`.
    pub fn get_stats(&self, id: ObjectId, ids: &[u32]) -> ProxyResult<Vec<StatValue>> {
        let _guard = self.shared.lock.lock();
        let channel = self.shared.channel()?;
        let object_type = self.shared.lookup(id)?;
        let fields = encode_stat_ids(object_type, ids)?;
        let key = object_key(object_type, id);
        let response = channel.request(&key, fields, Command::GetStats)?;
        expect_success(Command::GetStats, response.status)?;
        decode_stat_values(object_type, ids, &response.fields)
            .map_err(|e| protocol(Command::GetStats, id, e))
    }

    /// Reset statistics. Always waits for the backend, in either mode.
    pub fn clear_stats(&self, id: ObjectId, ids: &[u32]) -> ProxyResult<()> {
        let _guard = self.shared.lock.lock();
        let channel = self.shared.channel()?;
        let object_type = self.shared.lookup(id)?;
        let fields = encode_stat_ids(object_type, ids)?;
        let key = object_key(object_type, id);
        let response = channel.request(&key, fields, Command::ClearStats)?;
        expect_success(Command::ClearStats, response.status)
    }

    /// Ask which operations the backend implements for one attribute.
    pub fn query_attribute_capability(
        &self,
        linecard: ObjectId,
        object_type: ObjectType,
        attr_id: u32,
    ) -> ProxyResult<AttrCapability> {
        let meta = meta::attribute(object_type, attr_id)?;
        let op = Command::AttributeCapabilityQuery;
        let response = self.shared.probe(
            linecard,
            op,
            vec![
                FieldValue::new("OBJECT_TYPE", object_type.name()),
                FieldValue::new("ATTR_ID", meta.name),
            ],
        )?;
        expect_success(op, response.status)?;
        Ok(AttrCapability {
            create_implemented: parse_field(op, &response.fields, "CREATE_IMPLEMENTED")?,
            set_implemented: parse_field(op, &response.fields, "SET_IMPLEMENTED")?,
            get_implemented: parse_field(op, &response.fields, "GET_IMPLEMENTED")?,
        })
    }

    /// Ask which values of an enum attribute the backend supports.
    ///
    /// `values` offers its capacity. On success it holds the supported
    /// values; when they do not fit, it holds their count only and the
    /// call fails with [`ProxyError::BufferTooSmall`].
    pub fn query_enum_values_capability(
        &self,
        linecard: ObjectId,
        object_type: ObjectType,
        attr_id: u32,
        values: &mut ValueList<i32>,
    ) -> ProxyResult<()> {
        let meta = meta::attribute(object_type, attr_id)?;
        let enum_meta = meta
            .enum_meta
            .ok_or_else(|| ProxyError::InvalidArgument(format!("{} is not an enum", meta.name)))?;
        let op = Command::AttributeEnumValuesCapabilityQuery;
        let capacity = values.capacity();
        let response = self.shared.probe(
            linecard,
            op,
            vec![
                FieldValue::new("OBJECT_TYPE", object_type.name()),
                FieldValue::new("ATTR_ID", meta.name),
                FieldValue::new("ENUM_COUNT", capacity.to_string()),
            ],
        )?;
        match response.status {
            Status::Success => {
                let listed = required_field(op, &response.fields, "ENUM_CAPABILITY")?;
                let supported = listed
                    .split(',')
                    .filter(|name| !name.is_empty())
                    .map(|name| {
                        enum_meta
                            .value_of(name)
                            .or_else(|| name.parse().ok())
                            .ok_or_else(|| {
                                ProxyError::Protocol(format!("{op}: unknown {} value {name:?}", enum_meta.name))
                            })
                    })
                    .collect::<ProxyResult<Vec<i32>>>()?;
                if supported.len() as u32 > capacity {
                    *values = ValueList::count_only(supported.len() as u32);
                    return Err(ProxyError::BufferTooSmall);
                }
                *values = ValueList::from_vec(supported);
                Ok(())
            }
            Status::BufferOverflow => {
                let count = parse_field(op, &response.fields, "ENUM_COUNT")?;
                *values = ValueList::count_only(count);
                Err(ProxyError::BufferTooSmall)
            }
            status => Err(rejected(op, status)),
        }
    }

    /// How many more objects of `object_type` the backend can create.
    pub fn object_type_availability(
        &self,
        linecard: ObjectId,
        object_type: ObjectType,
        attrs: &[Attribute],
    ) -> ProxyResult<u64> {
        let op = Command::ObjectTypeAvailabilityQuery;
        let mut fields = vec![FieldValue::new("OBJECT_TYPE", object_type.name())];
        fields.extend(encode_attributes(object_type, attrs, false)?);
        let response = self.shared.probe(linecard, op, fields)?;
        expect_success(op, response.status)?;
        parse_field(op, &response.fields, "OBJECT_COUNT")
    }

    /// Switch between buffered and unbuffered transport.
    ///
    /// The backend is told first; only when it acknowledges is the channel
    /// rebuilt. The new channel takes over the old notification queue, so
    /// events published around the switch are delivered exactly once. The
    /// old channel is closed after the context lock is released, since
    /// closing waits for a listener that may itself be waiting on that
    /// lock. Callers must not hold the context lock.
    pub fn set_transport_mode(&self, mode: TransportMode) -> ProxyResult<()> {
        let old = {
            let _guard = self.shared.lock.lock();
            let current = self.shared.channel()?;
            if current.mode() == mode {
                return Ok(());
            }
            announce(&current, mode)?;
            let config = ChannelConfig {
                mode,
                response_timeout: current.response_timeout(),
                pipeline_depth: self.shared.pipeline_depth,
            };
            let next = Arc::new(current.reopen(&config)?);
            self.shared.channel.write().replace(next)
        };
        if let Some(old) = old {
            old.close();
        }
        info!(context = self.shared.context, ?mode, "transport mode switched");
        Ok(())
    }

    /// Stop the listener, then forget every tracked object. Later calls
    /// fail with [`ProxyError::ShutDown`].
    pub fn shutdown(&self) {
        let channel = self.shared.channel.write().take();
        let Some(channel) = channel else {
            return;
        };
        channel.close();
        let _guard = self.shared.lock.lock();
        self.shared.objects.write().clear();
        info!(context = self.shared.context, "proxy shut down");
    }
}

impl Shared {
    fn channel(&self) -> ProxyResult<Arc<Channel>> {
        self.channel.read().clone().ok_or(ProxyError::ShutDown)
    }

    fn open_channel(self: &Arc<Self>, config: &ChannelConfig) -> ProxyResult<Channel> {
        let sink: Arc<dyn NotificationSink> = Arc::new(ProxySink(Arc::downgrade(self)));
        Ok(Channel::open(
            Arc::clone(&self.store),
            config,
            Arc::clone(&self.lock),
            sink,
        )?)
    }

    fn lookup(&self, id: ObjectId) -> ProxyResult<ObjectType> {
        self.objects
            .read()
            .get(id)
            .map(|entry| entry.object_type)
            .ok_or(ProxyError::NotFound(id))
    }

    fn linecard(&self, id: ObjectId) -> ProxyResult<()> {
        if id.decode_type()? != ObjectType::Linecard {
            return Err(lcp_types::TypeError::NotALinecard(id).into());
        }
        self.lookup(id).map(|_| ())
    }

    /// Send a create/remove/set. Buffered mode returns without waiting; the
    /// backend does not answer writes in that mode.
    fn write(
        &self,
        channel: &Channel,
        command: Command,
        key: &str,
        fields: Vec<FieldValue>,
    ) -> ProxyResult<()> {
        if channel.mode() == TransportMode::Buffered {
            channel.send(key, fields, command)?;
            return Ok(());
        }
        let response = channel.request(key, fields, command)?;
        expect_success(command, response.status)
    }

    /// Send a capability probe keyed by `linecard`. Probes always wait.
    fn probe(
        &self,
        linecard: ObjectId,
        op: Command,
        fields: Vec<FieldValue>,
    ) -> ProxyResult<Response> {
        let _guard = self.lock.lock();
        let channel = self.channel()?;
        self.linecard(linecard)?;
        let key = object_key(ObjectType::Linecard, linecard);
        Ok(channel.request(&key, fields, op)?)
    }

    /// Listener-side routing, under the context lock.
    fn route(&self, notification: &Notification) -> Option<NotificationCallback> {
        let linecard = notification.linecard();
        let pointer = {
            let objects = self.objects.read();
            let Some(entry) = objects.get(linecard) else {
                debug!(%linecard, name = notification.name(), "notification for unknown line card");
                return None;
            };
            entry.pointer(notification.kind())
        };
        self.validator.on_notification(notification);

        let Some(handle) = pointer else {
            debug!(%linecard, name = notification.name(), "no callback set, dropping");
            return None;
        };
        let Some(callback) = self.callbacks.read().get(handle) else {
            warn!(%linecard, handle, "notification pointer names no registered callback");
            return None;
        };
        let deliver: NotificationCallback = Box::new(move |n: &Notification| callback(n));
        Some(deliver)
    }
}

struct ProxySink(Weak<Shared>);

impl NotificationSink for ProxySink {
    fn process(&self, notification: &Notification) -> Option<NotificationCallback> {
        self.0.upgrade()?.route(notification)
    }
}

fn announce(channel: &Channel, mode: TransportMode) -> ProxyResult<()> {
    let response = channel.request(mode.announcement_key(), Vec::new(), Command::Notify)?;
    expect_success(Command::Notify, response.status)
}

fn create_fields(object_type: ObjectType, attrs: &[Attribute]) -> ProxyResult<Vec<FieldValue>> {
    let mut fields = encode_attributes(object_type, attrs, false)?;
    if fields.is_empty() {
        fields.push(FieldValue::null_sentinel());
    }
    Ok(fields)
}

fn expect_success(op: Command, status: Status) -> ProxyResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(rejected(op, status))
    }
}

fn rejected(op: Command, status: Status) -> ProxyError {
    debug!(%op, %status, "backend rejected request");
    ProxyError::Rejected { op, status }
}

fn protocol(op: Command, id: ObjectId, e: CodecError) -> ProxyError {
    error!(%op, %id, error = %e, "malformed backend response");
    ProxyError::Protocol(format!("{op} on {id}: {e}"))
}

fn required_field<'a>(op: Command, fields: &'a [FieldValue], name: &str) -> ProxyResult<&'a str> {
    find_field(fields, name).ok_or_else(|| {
        error!(%op, field = name, "response is missing a field");
        ProxyError::Protocol(format!("{op}: response is missing {name}"))
    })
}

fn parse_field<T>(op: Command, fields: &[FieldValue], name: &str) -> ProxyResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let text = required_field(op, fields, name)?;
    text.parse().map_err(|e: T::Err| {
        error!(%op, field = name, value = text, "unparsable response field");
        ProxyError::Protocol(format!("{op}: {name}={text:?}: {e}"))
    })
}
