use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type RequestId = u64;

/// Success payload returned by the summarization service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummaryPayload {
    pub summary: String,
    pub key_points: Vec<String>,
    pub accuracy_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RequestSettled {
        request_id: RequestId,
        result: Result<SummaryPayload, SummarizeError>,
    },
    ScrambleFrame {
        generation: u64,
        text: String,
    },
    ExpiryElapsed {
        key: String,
        generation: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct SummarizeError {
    pub kind: FailureKind,
    pub message: String,
}

impl SummarizeError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text the service itself supplied, suitable for showing verbatim.
    pub fn service_message(&self) -> Option<&str> {
        match self.kind {
            FailureKind::Service { .. } => Some(&self.message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Well-formed error response carrying an `error` message.
    Service { status: u16 },
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedPayload,
    /// The client task died before producing an outcome.
    Panicked,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Service { status } => write!(f, "service error (status {status})"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedPayload => write!(f, "malformed payload"),
            FailureKind::Panicked => write!(f, "client task panicked"),
        }
    }
}
