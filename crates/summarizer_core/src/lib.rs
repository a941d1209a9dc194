//! Summarizer core: pure request-lifecycle state machine and view-model helpers.
mod copy;
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use copy::{ClipboardCopier, CopyStatus, CopyTarget, COPIED_LABEL, COPY_CONFIRM_DURATION};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, FormState, RequestId, RequestState, SummaryResult, GENERIC_FAILURE_MESSAGE,
    IDLE_LABEL, LOADING_LABEL, SCRAMBLE_INTERVAL, URL_ERROR_MESSAGE,
};
pub use update::update;
pub use validate::validate_url;
pub use view_model::{AccuracyBand, AppViewModel, ResultView, SummaryView};
