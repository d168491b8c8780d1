use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use lcp_channel::{Notification, StoreConnector, TransportMode};
use lcp_codec::{Attribute, StatValue, ValueList};
use lcp_proxy::{AttrCapability, ProxyConfig, RemoteInterface, Validator};
use lcp_types::{ObjectId, ObjectType};
use tracing::{debug, info};

use crate::config::{load_contexts, ContextConfig, SessionConfig};
use crate::error::{SessionError, SessionResult};

struct ContextHandle {
    config: ContextConfig,
    proxy: RemoteInterface,
}

/// Entry point for callers: one proxy and one validator per execution
/// context, with every call routed by the context bits of its object id.
///
/// Each operation runs the validator's pre hook, the proxy call and the
/// post hook under the context lock, so notification processing for that
/// context observes either none or all of it.
pub struct Session {
    contexts: BTreeMap<u8, ContextHandle>,
}

impl Session {
    /// Load the context configuration and connect every context.
    pub fn open(config: &SessionConfig, connector: &dyn StoreConnector) -> SessionResult<Self> {
        let contexts = load_contexts(config.contexts_path.as_deref());
        let validation = config.validation;
        Self::with_validators(contexts, &config.proxy, connector, |_| validation.build())
    }

    /// Connect the given contexts, asking `validator` for each context's
    /// validation layer.
    pub fn with_validators(
        contexts: Vec<ContextConfig>,
        proxy_config: &ProxyConfig,
        connector: &dyn StoreConnector,
        validator: impl Fn(&ContextConfig) -> Arc<dyn Validator>,
    ) -> SessionResult<Self> {
        let mut handles = BTreeMap::new();
        for config in contexts {
            let context = config.context()?;
            if handles.contains_key(&context) {
                return Err(SessionError::Config(format!("duplicate context guid {context}")));
            }
            let store = connector.connect(&config.db_asic)?;
            let proxy = RemoteInterface::connect(
                context,
                store,
                config.linecard_container()?,
                proxy_config,
                validator(&config),
            )?;
            info!(context, name = %config.name, store = %config.db_asic, "context connected");
            handles.insert(context, ContextHandle { config, proxy });
        }
        Ok(Self { contexts: handles })
    }

    pub fn context_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.contexts.keys().copied()
    }

    pub fn context_config(&self, context: u8) -> Option<&ContextConfig> {
        self.contexts.get(&context).map(|handle| &handle.config)
    }

    pub fn proxy(&self, context: u8) -> SessionResult<&RemoteInterface> {
        self.contexts
            .get(&context)
            .map(|handle| &handle.proxy)
            .ok_or(SessionError::UnknownContext(context))
    }

    fn route(&self, id: ObjectId) -> SessionResult<&RemoteInterface> {
        self.proxy(id.context())
    }

    pub fn create_linecard(&self, context: u8, attrs: &[Attribute]) -> SessionResult<ObjectId> {
        let proxy = self.proxy(context)?;
        let lock = proxy.context_lock();
        let _guard = lock.lock();
        let validator = proxy.validator();
        validator.pre_create(ObjectType::Linecard, attrs)?;
        let id = proxy.create_linecard(attrs)?;
        validator.post_create(id, attrs);
        Ok(id)
    }

    /// Create an object under `linecard`, in the line card's context.
    pub fn create(
        &self,
        object_type: ObjectType,
        linecard: ObjectId,
        attrs: &[Attribute],
    ) -> SessionResult<ObjectId> {
        let proxy = self.route(linecard)?;
        let lock = proxy.context_lock();
        let _guard = lock.lock();
        let validator = proxy.validator();
        validator.pre_create(object_type, attrs)?;
        let id = proxy.create(object_type, linecard, attrs)?;
        validator.post_create(id, attrs);
        Ok(id)
    }

    pub fn remove(&self, id: ObjectId) -> SessionResult<()> {
        let proxy = self.route(id)?;
        let lock = proxy.context_lock();
        let _guard = lock.lock();
        let validator = proxy.validator();
        validator.pre_remove(id)?;
        proxy.remove(id)?;
        validator.post_remove(id);
        Ok(())
    }

    pub fn set(&self, id: ObjectId, attr: &Attribute) -> SessionResult<()> {
        let proxy = self.route(id)?;
        let lock = proxy.context_lock();
        let _guard = lock.lock();
        let validator = proxy.validator();
        validator.pre_set(id, attr)?;
        proxy.set(id, attr)?;
        validator.post_set(id, attr);
        Ok(())
    }

    pub fn get(&self, id: ObjectId, attrs: &mut [Attribute]) -> SessionResult<()> {
        let proxy = self.route(id)?;
        let lock = proxy.context_lock();
        let _guard = lock.lock();
        let validator = proxy.validator();
        validator.pre_get(id, attrs)?;
        proxy.get(id, attrs)?;
        validator.post_get(id, attrs);
        Ok(())
    }

    pub fn get_stats(&self, id: ObjectId, ids: &[u32]) -> SessionResult<Vec<StatValue>> {
        Ok(self.route(id)?.get_stats(id, ids)?)
    }

    pub fn clear_stats(&self, id: ObjectId, ids: &[u32]) -> SessionResult<()> {
        Ok(self.route(id)?.clear_stats(id, ids)?)
    }

    pub fn query_attribute_capability(
        &self,
        linecard: ObjectId,
        object_type: ObjectType,
        attr_id: u32,
    ) -> SessionResult<AttrCapability> {
        Ok(self
            .route(linecard)?
            .query_attribute_capability(linecard, object_type, attr_id)?)
    }

    pub fn query_enum_values_capability(
        &self,
        linecard: ObjectId,
        object_type: ObjectType,
        attr_id: u32,
        values: &mut ValueList<i32>,
    ) -> SessionResult<()> {
        Ok(self
            .route(linecard)?
            .query_enum_values_capability(linecard, object_type, attr_id, values)?)
    }

    pub fn object_type_availability(
        &self,
        linecard: ObjectId,
        object_type: ObjectType,
        attrs: &[Attribute],
    ) -> SessionResult<u64> {
        Ok(self
            .route(linecard)?
            .object_type_availability(linecard, object_type, attrs)?)
    }

    /// Switch one context's transport mode. Must not be called while
    /// holding that context's lock.
    pub fn set_transport_mode(&self, context: u8, mode: TransportMode) -> SessionResult<()> {
        Ok(self.proxy(context)?.set_transport_mode(mode)?)
    }

    pub fn set_response_timeout(&self, context: u8, timeout: Duration) -> SessionResult<()> {
        Ok(self.proxy(context)?.set_response_timeout(timeout)?)
    }

    pub fn flush(&self, context: u8) -> SessionResult<()> {
        Ok(self.proxy(context)?.flush()?)
    }

    pub fn register_callback(
        &self,
        context: u8,
        callback: impl Fn(&Notification) + Send + Sync + 'static,
    ) -> SessionResult<u64> {
        Ok(self.proxy(context)?.register_callback(callback))
    }

    /// Stop every context's listener, then release its state.
    pub fn shutdown(&self) {
        for (context, handle) in &self.contexts {
            debug!(context, "shutting down context");
            handle.proxy.shutdown();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
