use std::collections::HashMap;
use std::sync::Arc;

use lcp_channel::Notification;

/// User code run for a delivered notification.
pub type Callback = Arc<dyn Fn(&Notification) + Send + Sync>;

/// Notification callbacks, addressed by the handle stored in line-card
/// pointer attributes.
#[derive(Default)]
pub struct CallbackRegistry {
    next: u64,
    callbacks: HashMap<u64, Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`, returning its handle. Handles are never zero:
    /// a zero pointer means "no callback".
    pub fn register(&mut self, callback: Callback) -> u64 {
        self.next += 1;
        self.callbacks.insert(self.next, callback);
        self.next
    }

    pub fn unregister(&mut self, handle: u64) -> bool {
        self.callbacks.remove(&handle).is_some()
    }

    pub fn get(&self, handle: u64) -> Option<Callback> {
        self.callbacks.get(&handle).cloned()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_non_zero_and_unique() {
        let mut registry = CallbackRegistry::new();
        let a = registry.register(Arc::new(|_| {}));
        let b = registry.register(Arc::new(|_| {}));
        assert_ne!(a, 0);
        assert_ne!(a, b);
        assert!(registry.get(a).is_some());
        assert!(registry.unregister(a));
        assert!(!registry.unregister(a));
        assert!(registry.get(a).is_none());
        assert_eq!(registry.len(), 1);
    }
}
