use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL.
    SubmitClicked,
    /// User clicked Clear Results.
    ClearClicked,
    /// User clicked a copy control.
    CopyClicked {
        target: crate::CopyTarget,
        at: Instant,
    },
    /// A copy revert timer fired.
    CopyExpired {
        target: crate::CopyTarget,
        generation: u64,
    },
    /// The loading animation produced a new label.
    ScrambleFrame { generation: u64, text: String },
    /// The summarization service answered with a usable payload.
    RequestSucceeded {
        request_id: crate::RequestId,
        result: crate::SummaryResult,
    },
    /// The request failed; `message` is the service-provided text, if any.
    RequestFailed {
        request_id: crate::RequestId,
        message: Option<String>,
    },
    /// UI/render tick carrying the current time.
    Tick { now: Instant },
    /// Fallback for placeholder wiring.
    NoOp,
}
