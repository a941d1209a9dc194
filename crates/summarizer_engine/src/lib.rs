//! Summarizer engine: outbound request and timer execution for the core's effects.
mod client;
mod engine;
mod scramble;
mod timers;
mod types;

pub use client::{classify_response, ClientSettings, ReqwestSummaryClient, SummaryClient};
pub use engine::EngineHandle;
pub use scramble::{ScrambleAnimator, ScrambleFrames, SCRAMBLE_ALPHABET, TICKS_PER_CHAR};
pub use timers::ExpiryTimers;
pub use types::{EngineEvent, FailureKind, RequestId, SummarizeError, SummaryPayload};
