use std::time::Duration;

use crate::{CopyTarget, RequestId};

/// Side effects requested by [`crate::update`]; the platform executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the one outbound summarization request.
    SubmitRequest { request_id: RequestId, url: String },
    /// Start (or restart) the loading-label animation.
    StartScramble {
        generation: u64,
        target: String,
        interval: Duration,
    },
    /// Halt the loading-label animation, if any.
    StopScramble,
    /// Write text to the system clipboard.
    CopyToClipboard { target: CopyTarget, text: String },
    /// Arm the revert timer for a copy confirmation, replacing any pending one.
    ScheduleCopyRevert {
        target: CopyTarget,
        generation: u64,
        after: Duration,
    },
    /// Drop every pending copy revert timer.
    CancelCopyReverts,
}
