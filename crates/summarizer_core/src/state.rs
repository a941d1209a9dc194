use std::time::Duration;

use crate::copy::ClipboardCopier;
use crate::view_model::AppViewModel;

pub type RequestId = u64;

pub const URL_ERROR_MESSAGE: &str = "Please enter a valid URL format (e.g., https://example.com).";
pub const GENERIC_FAILURE_MESSAGE: &str = "An unknown backend error occurred.";
pub const IDLE_LABEL: &str = "Summarize";
pub const LOADING_LABEL: &str = "Analyzing...";
pub const SCRAMBLE_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub url: String,
    pub url_error: Option<String>,
}

/// Parsed success payload of the summarization service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary: String,
    pub key_points: Vec<String>,
    pub accuracy_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(SummaryResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    form: FormState,
    request: RequestState,
    in_flight: Option<RequestId>,
    last_request_id: RequestId,
    scramble: Option<u64>,
    last_scramble_generation: u64,
    submit_label: String,
    copier: ClipboardCopier,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            form: FormState::default(),
            request: RequestState::Idle,
            in_flight: None,
            last_request_id: 0,
            scramble: None,
            last_scramble_generation: 0,
            submit_label: IDLE_LABEL.to_string(),
            copier: ClipboardCopier::new(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::project(self)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn url(&self) -> &str {
        &self.form.url
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn copier(&self) -> &ClipboardCopier {
        &self.copier
    }

    /// Whether a submit would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !self.form.url.is_empty()
            && self.form.url_error.is_none()
            && self.request != RequestState::Loading
    }

    /// Returns and clears the redraw flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_url(&mut self, url: String, url_error: Option<String>) {
        if self.form.url != url || self.form.url_error != url_error {
            self.form = FormState { url, url_error };
            self.mark_dirty();
        }
    }

    /// Moves to `Loading` and returns the id of the new request and the
    /// generation of the new animation.
    pub(crate) fn begin_request(&mut self) -> (RequestId, u64) {
        self.last_request_id += 1;
        self.last_scramble_generation += 1;
        self.request = RequestState::Loading;
        self.in_flight = Some(self.last_request_id);
        self.scramble = Some(self.last_scramble_generation);
        self.copier.reset();
        self.mark_dirty();
        (self.last_request_id, self.last_scramble_generation)
    }

    /// Applies a terminal outcome if `request_id` is the request in flight.
    pub(crate) fn settle(&mut self, request_id: RequestId, outcome: RequestState) -> bool {
        if self.in_flight != Some(request_id) || self.request != RequestState::Loading {
            return false;
        }
        self.request = outcome;
        self.in_flight = None;
        self.stop_scramble();
        self.mark_dirty();
        true
    }

    /// Returns whether an animation was running.
    pub(crate) fn stop_scramble(&mut self) -> bool {
        let was_running = self.scramble.take().is_some();
        if self.submit_label != IDLE_LABEL {
            self.submit_label = IDLE_LABEL.to_string();
            self.mark_dirty();
        }
        was_running
    }

    pub(crate) fn apply_scramble_frame(&mut self, generation: u64, text: String) {
        if self.scramble != Some(generation) || self.request != RequestState::Loading {
            return;
        }
        if self.submit_label != text {
            self.submit_label = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn copier_mut(&mut self) -> &mut ClipboardCopier {
        &mut self.copier
    }

    /// Back to the initial form and request state. Id counters keep running
    /// so that late messages for superseded work stay unmatched.
    pub(crate) fn reset(&mut self) {
        self.form = FormState::default();
        self.request = RequestState::Idle;
        self.in_flight = None;
        self.stop_scramble();
        self.copier.reset();
        self.mark_dirty();
    }
}
