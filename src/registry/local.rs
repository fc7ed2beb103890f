//! In-memory registry backed by a concurrent map.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::ScopeError;
use crate::resource::ScopedResource;

use super::{RegistryKey, ResourceRegistry};

/// A thread-safe in-memory resource registry.
///
/// Suitable for tests, demos, and embedders without a registry of their
/// own. Callers keep keys disjoint per request; see
/// [`RegistryKey::for_request`].
#[derive(Clone, Default)]
pub struct LocalRegistry {
    inner: Arc<DashMap<RegistryKey, Arc<dyn ScopedResource>>>,
}

impl LocalRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no bindings are live.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl ResourceRegistry for LocalRegistry {
    fn bind(&self, key: &RegistryKey, resource: Arc<dyn ScopedResource>) -> Result<(), ScopeError> {
        use dashmap::mapref::entry::Entry;

        match self.inner.entry(key.clone()) {
            Entry::Occupied(_) => Err(ScopeError::AlreadyBound(key.clone())),
            Entry::Vacant(slot) => {
                slot.insert(resource);
                Ok(())
            }
        }
    }

    fn unbind(&self, key: &RegistryKey) -> Result<Arc<dyn ScopedResource>, ScopeError> {
        self.inner
            .remove(key)
            .map(|(_, resource)| resource)
            .ok_or_else(|| ScopeError::NotBound(key.clone()))
    }

    fn lookup(&self, key: &RegistryKey) -> Option<Arc<dyn ScopedResource>> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }
}
