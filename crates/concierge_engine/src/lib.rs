//! Concierge engine: single-flight external-script loading.
mod engine;
mod fetch;
mod loader;
mod registry;
mod types;

pub use engine::LoaderHandle;
pub use fetch::{FetchSettings, ReqwestScriptFetcher, ScriptFetcher};
pub use loader::{ChannelLoaderSink, LoaderSink, ReadinessWatch, ScriptLoader};
pub use registry::{AttachError, CapabilityHost, DocumentRegistry};
pub use types::{
    FailureKind, FetchError, LoadPhase, LoaderEvent, ScriptMetadata, ScriptResource, ScriptSource,
};
