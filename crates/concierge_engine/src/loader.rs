use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use page_logging::{page_info, page_warn};
use tokio::sync::watch;

use crate::{CapabilityHost, LoadPhase, LoaderEvent, ScriptFetcher, ScriptResource};

/// Receives every phase transition, exactly once per transition.
pub trait LoaderSink: Send + Sync {
    fn emit(&self, event: LoaderEvent);
}

pub struct ChannelLoaderSink {
    tx: std::sync::mpsc::Sender<LoaderEvent>,
}

impl ChannelLoaderSink {
    pub fn new(tx: std::sync::mpsc::Sender<LoaderEvent>) -> Self {
        Self { tx }
    }
}

impl LoaderSink for ChannelLoaderSink {
    fn emit(&self, event: LoaderEvent) {
        let _ = self.tx.send(event);
    }
}

/// Observer handle for one resource's load state. All watches for a URL
/// observe the same shared state; dropping one never cancels the load.
#[derive(Debug, Clone)]
pub struct ReadinessWatch {
    rx: watch::Receiver<LoadPhase>,
}

impl ReadinessWatch {
    pub fn current(&self) -> LoadPhase {
        *self.rx.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.current() == LoadPhase::Ready
    }

    /// Waits for the first terminal phase. Resolves immediately if the load
    /// already settled.
    pub async fn settled(mut self) -> LoadPhase {
        loop {
            let phase = *self.rx.borrow_and_update();
            if phase.is_terminal() {
                return phase;
            }
            if self.rx.changed().await.is_err() {
                return *self.rx.borrow();
            }
        }
    }
}

/// Single-flight script loader.
///
/// One entry per resource URL for the process lifetime: the first request
/// either observes a pre-existing capability or starts the only fetch that
/// will ever run for that URL. Every other request, concurrent or later,
/// shares the same state. The host is mutated at most once per URL.
#[derive(Clone)]
pub struct ScriptLoader {
    inner: Arc<LoaderInner>,
}

struct LoaderInner {
    fetcher: Arc<dyn ScriptFetcher>,
    host: Arc<dyn CapabilityHost>,
    sink: Arc<dyn LoaderSink>,
    entries: Mutex<HashMap<String, watch::Sender<LoadPhase>>>,
}

impl ScriptLoader {
    pub fn new(
        fetcher: Arc<dyn ScriptFetcher>,
        host: Arc<dyn CapabilityHost>,
        sink: Arc<dyn LoaderSink>,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                fetcher,
                host,
                sink,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Current phase for a URL; `NotRequested` if nobody asked yet.
    pub fn current(&self, resource_url: &str) -> LoadPhase {
        self.inner
            .entries
            .lock()
            .expect("lock loader state")
            .get(resource_url)
            .map(|tx| *tx.borrow())
            .unwrap_or_default()
    }

    /// Requests the resource and returns a watch on its state.
    ///
    /// Must be called from within a tokio runtime: the first caller per URL
    /// spawns the fetch-and-attach task. No cancellation; once started the
    /// load runs to `Ready` or `Failed`.
    pub fn ensure_loaded(&self, resource: &ScriptResource) -> ReadinessWatch {
        let mut entries = self.inner.entries.lock().expect("lock loader state");
        if let Some(tx) = entries.get(&resource.url) {
            return ReadinessWatch { rx: tx.subscribe() };
        }

        // First request for this URL in the process lifetime.
        if self.inner.host.capability_present(&resource.namespace) {
            let (tx, rx) = watch::channel(LoadPhase::Ready);
            entries.insert(resource.url.clone(), tx);
            drop(entries);
            page_info!(
                "Capability {} already present; no injection for {}",
                resource.namespace,
                resource.url
            );
            self.inner.emit(&resource.url, LoadPhase::Ready);
            return ReadinessWatch { rx };
        }

        let (tx, rx) = watch::channel(LoadPhase::Loading);
        entries.insert(resource.url.clone(), tx);
        drop(entries);
        self.inner.emit(&resource.url, LoadPhase::Loading);

        let inner = Arc::clone(&self.inner);
        let resource = resource.clone();
        tokio::spawn(async move {
            inner.run_load(resource).await;
        });

        ReadinessWatch { rx }
    }
}

impl LoaderInner {
    async fn run_load(&self, resource: ScriptResource) {
        let outcome = match self.fetcher.fetch_script(&resource.url).await {
            Ok(source) => match self.host.attach(&resource, &source.body) {
                Ok(()) => {
                    page_info!(
                        "Attached {} ({} bytes) exposing {}",
                        resource.url,
                        source.metadata.byte_len,
                        resource.namespace
                    );
                    LoadPhase::Ready
                }
                Err(err) => {
                    page_warn!("Attach failed for {}: {}", resource.url, err);
                    LoadPhase::Failed
                }
            },
            Err(err) => {
                page_warn!(
                    "Script fetch failed for {}: {} ({})",
                    resource.url,
                    err.kind,
                    err.message
                );
                LoadPhase::Failed
            }
        };
        self.settle(&resource.url, outcome);
    }

    fn settle(&self, resource_url: &str, phase: LoadPhase) {
        {
            let entries = self.entries.lock().expect("lock loader state");
            if let Some(tx) = entries.get(resource_url) {
                let _ = tx.send(phase);
            }
        }
        self.emit(resource_url, phase);
    }

    fn emit(&self, resource_url: &str, status: LoadPhase) {
        self.sink.emit(LoaderEvent::StatusChanged {
            resource_url: resource_url.to_string(),
            status,
        });
    }
}
