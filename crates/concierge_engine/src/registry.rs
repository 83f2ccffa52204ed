use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use thiserror::Error;

use crate::ScriptResource;

#[derive(Debug, Error)]
pub enum AttachError {
    #[error("resource already attached: {0}")]
    AlreadyAttached(String),
}

/// Stand-in for the host page's document: where script nodes get attached
/// and where loaded capabilities surface as global namespaces. Injectable so
/// loaders can be tested against a fake host.
pub trait CapabilityHost: Send + Sync {
    /// Whether the capability namespace is already exposed, e.g. because the
    /// script shipped with the page.
    fn capability_present(&self, namespace: &str) -> bool;

    /// Attach a fetched script node. Exposes the resource's namespace.
    /// Attaching the same URL twice is an error; the loader's single-flight
    /// state machine never does it.
    fn attach(&self, resource: &ScriptResource, body: &[u8]) -> Result<(), AttachError>;

    fn attached(&self, resource_url: &str) -> bool;
}

/// Default process-wide host, shared by every loader consumer.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    inner: Mutex<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    /// url -> attached byte length.
    scripts: HashMap<String, u64>,
    namespaces: HashSet<String>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-expose a namespace, as when the capability is bundled with the
    /// page rather than injected.
    pub fn expose_namespace(&self, namespace: &str) {
        let mut inner = self.inner.lock().expect("lock registry");
        inner.namespaces.insert(namespace.to_string());
    }

    pub fn attached_count(&self) -> usize {
        self.inner.lock().expect("lock registry").scripts.len()
    }
}

impl CapabilityHost for DocumentRegistry {
    fn capability_present(&self, namespace: &str) -> bool {
        self.inner
            .lock()
            .expect("lock registry")
            .namespaces
            .contains(namespace)
    }

    fn attach(&self, resource: &ScriptResource, body: &[u8]) -> Result<(), AttachError> {
        let mut inner = self.inner.lock().expect("lock registry");
        if inner.scripts.contains_key(&resource.url) {
            return Err(AttachError::AlreadyAttached(resource.url.clone()));
        }
        inner.scripts.insert(resource.url.clone(), body.len() as u64);
        inner.namespaces.insert(resource.namespace.clone());
        Ok(())
    }

    fn attached(&self, resource_url: &str) -> bool {
        self.inner
            .lock()
            .expect("lock registry")
            .scripts
            .contains_key(resource_url)
    }
}
