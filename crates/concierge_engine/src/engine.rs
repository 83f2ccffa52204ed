use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::fetch::{FetchSettings, ReqwestScriptFetcher};
use crate::loader::{ChannelLoaderSink, ScriptLoader};
use crate::{CapabilityHost, LoaderEvent, ScriptResource};

enum LoaderCommand {
    Ensure { resource: ScriptResource },
}

/// Channel front end to a `ScriptLoader` on its own runtime thread.
///
/// Commands go in over mpsc; `LoaderEvent`s come out the same way. Phase
/// transitions are forwarded exactly once each; an `Ensure` for an already
/// requested resource re-emits the current phase as a snapshot so remounted
/// consumers resynchronize.
#[derive(Clone)]
pub struct LoaderHandle {
    cmd_tx: mpsc::Sender<LoaderCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<LoaderEvent>>>,
}

impl LoaderHandle {
    pub fn new(settings: FetchSettings, host: Arc<dyn CapabilityHost>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let fetcher = Arc::new(ReqwestScriptFetcher::new(settings));
        let sink = Arc::new(ChannelLoaderSink::new(event_tx.clone()));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let loader = ScriptLoader::new(fetcher, host, sink);
            let _guard = runtime.enter();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    LoaderCommand::Ensure { resource } => {
                        let watch = loader.ensure_loaded(&resource);
                        let _ = event_tx.send(LoaderEvent::StatusChanged {
                            resource_url: resource.url,
                            status: watch.current(),
                        });
                    }
                }
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn ensure_loaded(&self, resource: ScriptResource) {
        let _ = self.cmd_tx.send(LoaderCommand::Ensure { resource });
    }

    pub fn try_recv(&self) -> Option<LoaderEvent> {
        self.event_rx
            .lock()
            .expect("lock loader events")
            .try_recv()
            .ok()
    }
}
