use crate::{AppState, CopyTarget, RequestState};

/// Categorical grouping of the accuracy score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyBand {
    High,
    Medium,
    Low,
}

impl AccuracyBand {
    /// Lower bounds are inclusive: 75 is high, 40 is medium.
    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => AccuracyBand::High,
            40..=74 => AccuracyBand::Medium,
            _ => AccuracyBand::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccuracyBand::High => "high",
            AccuracyBand::Medium => "medium",
            AccuracyBand::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub summary: String,
    pub key_points: Vec<String>,
    pub accuracy_score: u8,
    pub band: AccuracyBand,
    pub copy_summary_label: String,
    pub copy_points_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultView {
    #[default]
    Hidden,
    Error {
        message: String,
    },
    Summary(SummaryView),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url: String,
    pub url_error: Option<String>,
    pub submit_label: String,
    pub submit_enabled: bool,
    pub loading: bool,
    pub clear_visible: bool,
    pub result: ResultView,
}

impl AppViewModel {
    pub(crate) fn project(state: &AppState) -> Self {
        let form = state.form();
        let result = match state.request() {
            RequestState::Idle | RequestState::Loading => ResultView::Hidden,
            RequestState::Failed(message) => ResultView::Error {
                message: message.clone(),
            },
            RequestState::Succeeded(result) => ResultView::Summary(SummaryView {
                summary: result.summary.clone(),
                key_points: result.key_points.clone(),
                accuracy_score: result.accuracy_score,
                band: AccuracyBand::from_score(result.accuracy_score),
                copy_summary_label: state.copier().label(CopyTarget::Summary).to_string(),
                copy_points_label: state.copier().label(CopyTarget::KeyPoints).to_string(),
            }),
        };

        Self {
            url: form.url.clone(),
            url_error: form.url_error.clone(),
            submit_label: state.submit_label().to_string(),
            submit_enabled: state.can_submit(),
            loading: matches!(state.request(), RequestState::Loading),
            clear_visible: result != ResultView::Hidden,
            result,
        }
    }
}
