use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use concierge_engine::{
    CapabilityHost, DocumentRegistry, FailureKind, FetchError, LoadPhase, LoaderEvent, LoaderSink,
    ScriptFetcher, ScriptLoader, ScriptMetadata, ScriptResource, ScriptSource,
};
use pretty_assertions::assert_eq;
use tokio::sync::Semaphore;

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<LoaderEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<LoaderEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl LoaderSink for TestSink {
    fn emit(&self, event: LoaderEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Fetcher that blocks on a gate and counts invocations.
struct GatedFetcher {
    calls: AtomicUsize,
    gate: Semaphore,
    fail: bool,
}

impl GatedFetcher {
    /// Succeeds once released via `release()`.
    fn gated() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(0),
            fail: false,
        })
    }

    /// Completes immediately with the given outcome.
    fn immediate(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
            fail,
        })
    }

    fn release(&self) {
        self.gate.add_permits(1);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ScriptFetcher for GatedFetcher {
    async fn fetch_script(&self, url: &str) -> Result<ScriptSource, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self.gate.acquire().await.expect("gate closed");
        permit.forget();
        if self.fail {
            return Err(FetchError {
                kind: FailureKind::Network,
                message: "connection reset".to_string(),
            });
        }
        let body = b"window.daum = {};".to_vec();
        Ok(ScriptSource {
            metadata: ScriptMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                redirect_count: 0,
                content_type: Some("text/javascript".to_string()),
                byte_len: body.len() as u64,
            },
            body,
        })
    }
}

fn loader_with(
    fetcher: Arc<GatedFetcher>,
    host: Arc<DocumentRegistry>,
    sink: Arc<TestSink>,
) -> ScriptLoader {
    ScriptLoader::new(fetcher, host, sink)
}

#[tokio::test]
async fn concurrent_requests_coalesce_into_one_load() {
    let fetcher = GatedFetcher::gated();
    let host = Arc::new(DocumentRegistry::new());
    let loader = loader_with(fetcher.clone(), host.clone(), Arc::new(TestSink::default()));
    let resource = ScriptResource::address_lookup();

    let watches: Vec<_> = (0..4).map(|_| loader.ensure_loaded(&resource)).collect();
    for watch in &watches {
        assert_eq!(watch.current(), LoadPhase::Loading);
    }

    // Let the single fetch task reach the gate.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(fetcher.calls(), 1);

    fetcher.release();
    for watch in watches {
        assert_eq!(watch.settled().await, LoadPhase::Ready);
    }

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(host.attached_count(), 1);
    assert!(host.attached(&resource.url));
    assert!(host.capability_present(&resource.namespace));
}

#[tokio::test]
async fn pre_exposed_capability_is_ready_without_injection() {
    let fetcher = GatedFetcher::immediate(false);
    let host = Arc::new(DocumentRegistry::new());
    let sink = Arc::new(TestSink::default());
    let loader = loader_with(fetcher.clone(), host.clone(), sink.clone());
    let resource = ScriptResource::address_lookup();

    host.expose_namespace(&resource.namespace);
    let watch = loader.ensure_loaded(&resource);

    assert_eq!(watch.current(), LoadPhase::Ready);
    assert_eq!(fetcher.calls(), 0);
    assert_eq!(host.attached_count(), 0);
    assert_eq!(
        sink.take(),
        vec![LoaderEvent::StatusChanged {
            resource_url: resource.url.clone(),
            status: LoadPhase::Ready,
        }]
    );
}

#[tokio::test]
async fn failed_load_is_terminal_and_shared_with_late_callers() {
    let fetcher = GatedFetcher::immediate(true);
    let host = Arc::new(DocumentRegistry::new());
    let loader = loader_with(fetcher.clone(), host.clone(), Arc::new(TestSink::default()));
    let resource = ScriptResource::address_lookup();

    let watch = loader.ensure_loaded(&resource);
    assert_eq!(watch.settled().await, LoadPhase::Failed);

    // A later consumer observes the same terminal state; no retry happens.
    let late = loader.ensure_loaded(&resource);
    assert_eq!(late.current(), LoadPhase::Failed);
    assert_eq!(late.settled().await, LoadPhase::Failed);
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(host.attached_count(), 0);
}

#[tokio::test]
async fn transitions_are_reported_exactly_once() {
    let fetcher = GatedFetcher::immediate(false);
    let host = Arc::new(DocumentRegistry::new());
    let sink = Arc::new(TestSink::default());
    let loader = loader_with(fetcher, host, sink.clone());
    let resource = ScriptResource::address_lookup();

    let watch = loader.ensure_loaded(&resource);
    assert_eq!(watch.settled().await, LoadPhase::Ready);

    // Repeat requests observe state without producing new transitions.
    let repeat = loader.ensure_loaded(&resource);
    assert!(repeat.is_ready());

    assert_eq!(
        sink.take(),
        vec![
            LoaderEvent::StatusChanged {
                resource_url: resource.url.clone(),
                status: LoadPhase::Loading,
            },
            LoaderEvent::StatusChanged {
                resource_url: resource.url.clone(),
                status: LoadPhase::Ready,
            },
        ]
    );
}

#[tokio::test]
async fn unrequested_resource_reads_not_requested() {
    let loader = loader_with(
        GatedFetcher::immediate(false),
        Arc::new(DocumentRegistry::new()),
        Arc::new(TestSink::default()),
    );

    assert_eq!(
        loader.current("https://t1.daumcdn.net/mapjsapi/bundle/postcode/prod/postcode.v2.js"),
        LoadPhase::NotRequested
    );
}
