//! Shared utilities for lifecycle and integration testing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use request_scope::{BoxError, RegistryKey, ResourceFactory, ScopeError, ScopedResource};

/// A scoped resource that records close calls.
#[derive(Default)]
pub struct MockResource {
    closed: AtomicUsize,
    fail_close: AtomicBool,
}

impl MockResource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// How many times `close` succeeded.
    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Make the next `close` call fail.
    #[allow(dead_code)]
    pub fn fail_next_close(&self) {
        self.fail_close.store(true, Ordering::SeqCst);
    }
}

impl ScopedResource for MockResource {
    fn close(&self) -> Result<(), BoxError> {
        if self.fail_close.swap(false, Ordering::SeqCst) {
            return Err("close failed".into());
        }
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.closed.load(Ordering::SeqCst) == 0
    }
}

/// Factory that remembers every resource it opened.
#[allow(dead_code)]
#[derive(Default)]
pub struct MockFactory {
    opened: Mutex<Vec<Arc<MockResource>>>,
}

impl MockFactory {
    #[allow(dead_code)]
    pub fn opened(&self) -> Vec<Arc<MockResource>> {
        self.opened.lock().unwrap().clone()
    }
}

impl ResourceFactory for MockFactory {
    fn open(&self) -> Result<Arc<dyn ScopedResource>, ScopeError> {
        let resource = MockResource::new();
        self.opened.lock().unwrap().push(resource.clone());
        Ok(resource)
    }

    fn registry_key(&self) -> RegistryKey {
        RegistryKey::new("mock-session")
    }
}
