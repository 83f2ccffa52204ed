use std::fmt;

/// An external script and the global namespace it exposes once evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptResource {
    pub url: String,
    pub namespace: String,
}

impl ScriptResource {
    pub fn new(url: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            namespace: namespace.into(),
        }
    }

    /// The postcode widget bundle backing the address-lookup panel.
    pub fn address_lookup() -> Self {
        Self::new(
            "https://t1.daumcdn.net/mapjsapi/bundle/postcode/prod/postcode.v2.js",
            "daum.Postcode",
        )
    }
}

/// Load state of one resource. A resource that has left `NotRequested`
/// never returns to it; `Ready` and `Failed` are terminal for the process
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    NotRequested,
    Loading,
    Ready,
    Failed,
}

impl LoadPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, LoadPhase::Ready | LoadPhase::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderEvent {
    StatusChanged {
        resource_url: String,
        status: LoadPhase,
    },
}

/// A fetched script body plus transport metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSource {
    pub body: Vec<u8>,
    pub metadata: ScriptMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
