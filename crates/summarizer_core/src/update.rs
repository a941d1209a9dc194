use crate::{
    validate_url, AppState, CopyTarget, Effect, Msg, RequestId, RequestState, SummaryResult,
    COPY_CONFIRM_DURATION, GENERIC_FAILURE_MESSAGE, LOADING_LABEL, SCRAMBLE_INTERVAL,
    URL_ERROR_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(url) => {
            // Empty input only disables submit; it is never flagged.
            let url_error = if !url.is_empty() && !validate_url(&url) {
                Some(URL_ERROR_MESSAGE.to_string())
            } else {
                None
            };
            state.set_url(url, url_error);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if !state.can_submit() {
                return (state, Vec::new());
            }
            let url = state.url().to_string();
            let (request_id, generation) = state.begin_request();
            vec![
                Effect::CancelCopyReverts,
                Effect::StartScramble {
                    generation,
                    target: LOADING_LABEL.to_string(),
                    interval: SCRAMBLE_INTERVAL,
                },
                Effect::SubmitRequest { request_id, url },
            ]
        }
        Msg::RequestSucceeded { request_id, result } => {
            settle(&mut state, request_id, RequestState::Succeeded(result))
        }
        Msg::RequestFailed {
            request_id,
            message,
        } => {
            let message = message
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            settle(&mut state, request_id, RequestState::Failed(message))
        }
        Msg::ClearClicked => {
            state.reset();
            vec![Effect::StopScramble, Effect::CancelCopyReverts]
        }
        Msg::ScrambleFrame { generation, text } => {
            state.apply_scramble_frame(generation, text);
            Vec::new()
        }
        Msg::CopyClicked { target, at } => {
            let text = match state.request() {
                RequestState::Succeeded(result) => copy_text(result, target),
                _ => return (state, Vec::new()),
            };
            let generation = state.copier_mut().confirm(target, at);
            state.mark_dirty();
            vec![
                Effect::CopyToClipboard { target, text },
                Effect::ScheduleCopyRevert {
                    target,
                    generation,
                    after: COPY_CONFIRM_DURATION,
                },
            ]
        }
        Msg::CopyExpired { target, generation } => {
            if state.copier_mut().expire(target, generation) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick { now } => {
            if state.copier_mut().sweep(now) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn settle(state: &mut AppState, request_id: RequestId, outcome: RequestState) -> Vec<Effect> {
    if state.settle(request_id, outcome) {
        vec![Effect::StopScramble]
    } else {
        Vec::new()
    }
}

fn copy_text(result: &SummaryResult, target: CopyTarget) -> String {
    match target {
        CopyTarget::Summary => result.summary.trim().to_string(),
        CopyTarget::KeyPoints => result
            .key_points
            .iter()
            .map(|point| format!("- {point}"))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
