use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_debug, engine_info, engine_warn};
use summarizer_core::{CopyTarget, Effect, Msg, SummaryResult};
use summarizer_engine::{EngineEvent, EngineHandle, SummaryPayload};

use super::clipboard::ClipboardSink;

pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn ClipboardSink>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        events: mpsc::Receiver<EngineEvent>,
        clipboard: Box<dyn ClipboardSink>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        spawn_event_loop(events, msg_tx);
        Self { engine, clipboard }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitRequest { request_id, url } => {
                    self.engine.summarize(request_id, url);
                }
                Effect::StartScramble {
                    generation,
                    target,
                    interval,
                } => {
                    engine_debug!("StartScramble generation={}", generation);
                    self.engine.start_scramble(generation, target, interval);
                }
                Effect::StopScramble => self.engine.stop_scramble(),
                Effect::CopyToClipboard { target, text } => {
                    engine_info!("Copy {} chars={}", target.key(), text.chars().count());
                    if let Err(err) = self.clipboard.write_text(&text) {
                        engine_warn!("Copy {} failed: {}", target.key(), err);
                    }
                }
                Effect::ScheduleCopyRevert {
                    target,
                    generation,
                    after,
                } => {
                    self.engine.schedule_expiry(target.key(), generation, after);
                }
                Effect::CancelCopyReverts => self.engine.cancel_expiries(),
            }
        }
    }
}

fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        for event in events {
            let Some(msg) = map_event(event) else {
                continue;
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::RequestSettled { request_id, result } => Some(match result {
            Ok(payload) => Msg::RequestSucceeded {
                request_id,
                result: map_payload(payload),
            },
            Err(err) => Msg::RequestFailed {
                request_id,
                message: err.service_message().map(ToOwned::to_owned),
            },
        }),
        EngineEvent::ScrambleFrame { generation, text } => {
            Some(Msg::ScrambleFrame { generation, text })
        }
        EngineEvent::ExpiryElapsed { key, generation } => match CopyTarget::from_key(&key) {
            Some(target) => Some(Msg::CopyExpired { target, generation }),
            None => {
                engine_warn!("Expiry for unknown copy target {:?}", key);
                None
            }
        },
    }
}

fn map_payload(payload: SummaryPayload) -> SummaryResult {
    SummaryResult {
        summary: payload.summary,
        key_points: payload.key_points,
        accuracy_score: payload.accuracy_score,
    }
}
