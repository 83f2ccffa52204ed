use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use concierge_core::{Effect, LookupAvailability, Msg};
use concierge_engine::{
    DocumentRegistry, FetchSettings, LoadPhase, LoaderEvent, LoaderHandle, ScriptResource,
};
use page_logging::page_info;

use crate::app::AppMsg;

pub(crate) struct EffectRunner {
    loader: LoaderHandle,
}

impl EffectRunner {
    pub(crate) fn new(msg_tx: mpsc::Sender<AppMsg>) -> Self {
        let host = Arc::new(DocumentRegistry::new());
        let loader = LoaderHandle::new(FetchSettings::default(), host);
        let runner = Self { loader };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::EnsureLookupScript => {
                    let resource = ScriptResource::address_lookup();
                    page_info!("EnsureLookupScript url={}", resource.url);
                    self.loader.ensure_loaded(resource);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<AppMsg>) {
        let loader = self.loader.clone();
        thread::spawn(move || loop {
            match loader.try_recv() {
                Some(LoaderEvent::StatusChanged { status, .. }) => {
                    let msg = Msg::LookupStatusChanged(map_phase(status));
                    if msg_tx.send(AppMsg::Core(msg)).is_err() {
                        break;
                    }
                }
                None => thread::sleep(Duration::from_millis(25)),
            }
        });
    }
}

fn map_phase(phase: LoadPhase) -> LookupAvailability {
    match phase {
        LoadPhase::NotRequested => LookupAvailability::NotRequested,
        LoadPhase::Loading => LookupAvailability::Loading,
        LoadPhase::Ready => LookupAvailability::Ready,
        LoadPhase::Failed => LookupAvailability::Failed,
    }
}
