use serde::Serialize;
use std::fmt;

/// What went wrong at a provider boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Connection refused, DNS failure, transport-level timeout.
    Transport,
    /// The provider answered with a non-success HTTP status.
    ProviderStatus,
    /// Success status, but the payload was not the expected JSON shape.
    MalformedResponse,
    /// The provider answered correctly but had no usable candidate.
    NotFound,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FaultKind::Transport => "transport failure",
            FaultKind::ProviderStatus => "provider status error",
            FaultKind::MalformedResponse => "malformed response",
            FaultKind::NotFound => "not found",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderFault {
    pub kind: FaultKind,
    pub message: String,
}

impl ProviderFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Transport, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(FaultKind::ProviderStatus, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FaultKind::MalformedResponse, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FaultKind::NotFound, message)
    }

    /// `NotFound` means "legitimately nothing there", every other kind is a
    /// genuine provider failure.
    pub fn is_not_found(&self) -> bool {
        self.kind == FaultKind::NotFound
    }

    /// Classifies a `reqwest` error raised while sending a request or
    /// reading its body.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_decode() {
            Self::malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::status(format!("HTTP {}", status))
        } else {
            Self::transport(err.to_string())
        }
    }
}

impl fmt::Display for ProviderFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ProviderFault {}

/// Pipeline stage a fault was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Directory,
    Geocoding,
    StoreSearch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Directory => "directory",
            Stage::Geocoding => "geocoding",
            Stage::StoreSearch => "store search",
        };
        f.write_str(label)
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderFault>;
