use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use summarizer_core::{
    update, AppState, CopyTarget, Effect, Msg, SummaryResult, COPIED_LABEL,
    COPY_CONFIRM_DURATION,
};

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn with_result() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::InputChanged("https://example.com/a".to_string()),
    );
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::RequestSucceeded {
            request_id: 1,
            result: SummaryResult {
                summary: "  A short summary.\n".to_string(),
                key_points: vec!["first".to_string(), "second".to_string()],
                accuracy_score: 82,
            },
        },
    );
    state
}

fn labels(state: &AppState) -> (String, String) {
    let copier = state.copier();
    (
        copier.label(CopyTarget::Summary).to_string(),
        copier.label(CopyTarget::KeyPoints).to_string(),
    )
}

#[test]
fn copy_summary_confirms_and_schedules_revert() {
    init_logging();
    let at = Instant::now();
    let (mut state, effects) = update(
        with_result(),
        Msg::CopyClicked {
            target: CopyTarget::Summary,
            at,
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::CopyToClipboard {
                target: CopyTarget::Summary,
                text: "A short summary.".to_string(),
            },
            Effect::ScheduleCopyRevert {
                target: CopyTarget::Summary,
                generation: 1,
                after: COPY_CONFIRM_DURATION,
            },
        ]
    );
    assert_eq!(
        labels(&state),
        (COPIED_LABEL.to_string(), "Copy Points".to_string())
    );
    assert!(state.consume_dirty());
}

#[test]
fn copy_points_formats_bullets() {
    init_logging();
    let (_, effects) = update(
        with_result(),
        Msg::CopyClicked {
            target: CopyTarget::KeyPoints,
            at: Instant::now(),
        },
    );

    assert_eq!(
        effects[0],
        Effect::CopyToClipboard {
            target: CopyTarget::KeyPoints,
            text: "- first\n- second".to_string(),
        }
    );
}

#[test]
fn expiry_reverts_label() {
    init_logging();
    let (state, _) = update(
        with_result(),
        Msg::CopyClicked {
            target: CopyTarget::Summary,
            at: Instant::now(),
        },
    );
    let (state, _) = update(
        state,
        Msg::CopyExpired {
            target: CopyTarget::Summary,
            generation: 1,
        },
    );

    assert_eq!(labels(&state).0, "Copy");
}

#[test]
fn second_copy_supersedes_first_timer() {
    init_logging();
    let at = Instant::now();
    let (state, _) = update(
        with_result(),
        Msg::CopyClicked {
            target: CopyTarget::Summary,
            at,
        },
    );
    let (state, effects) = update(
        state,
        Msg::CopyClicked {
            target: CopyTarget::Summary,
            at: at + Duration::from_millis(1500),
        },
    );
    assert_eq!(
        effects[1],
        Effect::ScheduleCopyRevert {
            target: CopyTarget::Summary,
            generation: 2,
            after: COPY_CONFIRM_DURATION,
        }
    );

    let (state, _) = update(
        state,
        Msg::CopyExpired {
            target: CopyTarget::Summary,
            generation: 1,
        },
    );
    assert_eq!(labels(&state).0, COPIED_LABEL);

    // The first deadline has passed, the second has not.
    let (state, _) = update(
        state,
        Msg::Tick {
            now: at + Duration::from_millis(2100),
        },
    );
    assert_eq!(labels(&state).0, COPIED_LABEL);

    let (state, _) = update(
        state,
        Msg::Tick {
            now: at + Duration::from_millis(3500),
        },
    );
    assert_eq!(labels(&state).0, "Copy");
}

#[test]
fn targets_are_independent() {
    init_logging();
    let at = Instant::now();
    let (state, _) = update(
        with_result(),
        Msg::CopyClicked {
            target: CopyTarget::Summary,
            at,
        },
    );
    let (state, _) = update(
        state,
        Msg::CopyClicked {
            target: CopyTarget::KeyPoints,
            at,
        },
    );
    let (state, _) = update(
        state,
        Msg::CopyExpired {
            target: CopyTarget::Summary,
            generation: 1,
        },
    );

    assert_eq!(
        labels(&state),
        ("Copy".to_string(), COPIED_LABEL.to_string())
    );
}

#[test]
fn clear_resets_labels_and_ignores_queued_expiry() {
    init_logging();
    let at = Instant::now();
    let (state, _) = update(
        with_result(),
        Msg::CopyClicked {
            target: CopyTarget::Summary,
            at,
        },
    );
    let (state, effects) = update(state, Msg::ClearClicked);
    assert!(effects.contains(&Effect::CancelCopyReverts));
    assert_eq!(labels(&state).0, "Copy");

    let before = state.clone();
    let (state, _) = update(
        state,
        Msg::CopyExpired {
            target: CopyTarget::Summary,
            generation: 1,
        },
    );
    assert_eq!(state, before);
}

#[test]
fn copy_without_result_is_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::CopyClicked {
            target: CopyTarget::Summary,
            at: Instant::now(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next, state);
}
