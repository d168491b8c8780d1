use lcp_channel::Notification;
use lcp_codec::meta::{attribute, attributes_of};
use lcp_codec::Attribute;
use lcp_types::{ObjectId, ObjectType};
use serde::{Deserialize, Serialize};

use crate::error::{ProxyError, ProxyResult};

/// Bookkeeping layer wrapped around every proxy operation.
///
/// `pre_*` hooks may veto an operation before anything reaches the
/// transport. `post_*` hooks run only after the backend accepted it.
/// Every hook, including [`Validator::on_notification`], runs under the
/// context lock.
pub trait Validator: Send + Sync {
    fn pre_create(&self, _object_type: ObjectType, _attrs: &[Attribute]) -> ProxyResult<()> {
        Ok(())
    }

    fn post_create(&self, _id: ObjectId, _attrs: &[Attribute]) {}

    fn pre_remove(&self, _id: ObjectId) -> ProxyResult<()> {
        Ok(())
    }

    fn post_remove(&self, _id: ObjectId) {}

    fn pre_set(&self, _id: ObjectId, _attr: &Attribute) -> ProxyResult<()> {
        Ok(())
    }

    fn post_set(&self, _id: ObjectId, _attr: &Attribute) {}

    fn pre_get(&self, _id: ObjectId, _attrs: &[Attribute]) -> ProxyResult<()> {
        Ok(())
    }

    fn post_get(&self, _id: ObjectId, _attrs: &[Attribute]) {}

    fn on_notification(&self, _notification: &Notification) {}
}

/// Accepts everything.
pub struct PassThrough;

impl Validator for PassThrough {}

/// Checks attribute lists against the metadata tables.
pub struct MetaValidator;

impl MetaValidator {
    fn known(object_type: ObjectType, attr: &Attribute) -> ProxyResult<&'static lcp_codec::AttrMeta> {
        let meta = attribute(object_type, attr.id)?;
        if attr.value.kind() != meta.kind {
            return Err(ProxyError::InvalidArgument(format!(
                "{}: expected {:?} value, got {:?}",
                meta.name,
                meta.kind,
                attr.value.kind()
            )));
        }
        Ok(meta)
    }
}

impl Validator for MetaValidator {
    fn pre_create(&self, object_type: ObjectType, attrs: &[Attribute]) -> ProxyResult<()> {
        for attr in attrs {
            let meta = Self::known(object_type, attr)?;
            if meta.read_only {
                return Err(ProxyError::InvalidArgument(format!(
                    "{} is read-only",
                    meta.name
                )));
            }
        }
        for meta in attributes_of(object_type)? {
            if meta.required_on_create() && !attrs.iter().any(|a| a.id == meta.id) {
                return Err(ProxyError::InvalidArgument(format!(
                    "{} is mandatory on create",
                    meta.name
                )));
            }
        }
        Ok(())
    }

    fn pre_set(&self, id: ObjectId, attr: &Attribute) -> ProxyResult<()> {
        let meta = Self::known(id.decode_type()?, attr)?;
        if meta.read_only || meta.create_only {
            return Err(ProxyError::InvalidArgument(format!(
                "{} cannot be set",
                meta.name
            )));
        }
        Ok(())
    }

    fn pre_get(&self, id: ObjectId, attrs: &[Attribute]) -> ProxyResult<()> {
        let object_type = id.decode_type()?;
        for attr in attrs {
            Self::known(object_type, attr)?;
        }
        Ok(())
    }
}

/// Which [`Validator`] a session installs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    PassThrough,
    #[default]
    Metadata,
}

impl ValidationMode {
    pub fn build(self) -> std::sync::Arc<dyn Validator> {
        match self {
            Self::PassThrough => std::sync::Arc::new(PassThrough),
            Self::Metadata => std::sync::Arc::new(MetaValidator),
        }
    }
}
