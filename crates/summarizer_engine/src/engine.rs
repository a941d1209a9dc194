use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::client::{ClientSettings, ReqwestSummaryClient, SummaryClient};
use crate::scramble::ScrambleAnimator;
use crate::timers::ExpiryTimers;
use crate::{EngineEvent, FailureKind, RequestId, SummarizeError, SummaryPayload};

enum EngineCommand {
    Summarize {
        request_id: RequestId,
        url: String,
    },
    StartScramble {
        generation: u64,
        target: String,
        interval: Duration,
    },
    StopScramble,
    ScheduleExpiry {
        key: String,
        generation: u64,
        after: Duration,
    },
    CancelExpiries,
}

/// Command side of the engine thread. Events come back on the receiver
/// returned by [`EngineHandle::spawn`].
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(settings: ClientSettings) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        Self::spawn_with_client(Arc::new(ReqwestSummaryClient::new(settings)))
    }

    pub fn spawn_with_client(
        client: Arc<dyn SummaryClient>,
    ) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("summarizer-io")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("summarizer-engine".to_string())
            .spawn(move || {
                let _guard = runtime.enter();
                let mut worker = EngineWorker::new(client, event_tx);
                while let Ok(command) = cmd_rx.recv() {
                    worker.handle(command);
                }
                engine_debug!("engine command channel closed");
            })?;

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn summarize(&self, request_id: RequestId, url: impl Into<String>) {
        self.send(EngineCommand::Summarize {
            request_id,
            url: url.into(),
        });
    }

    pub fn start_scramble(&self, generation: u64, target: impl Into<String>, interval: Duration) {
        self.send(EngineCommand::StartScramble {
            generation,
            target: target.into(),
            interval,
        });
    }

    pub fn stop_scramble(&self) {
        self.send(EngineCommand::StopScramble);
    }

    pub fn schedule_expiry(&self, key: impl Into<String>, generation: u64, after: Duration) {
        self.send(EngineCommand::ScheduleExpiry {
            key: key.into(),
            generation,
            after,
        });
    }

    pub fn cancel_expiries(&self) {
        self.send(EngineCommand::CancelExpiries);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("engine thread is gone; command dropped");
        }
    }
}

struct EngineWorker {
    client: Arc<dyn SummaryClient>,
    events: mpsc::Sender<EngineEvent>,
    scramble: ScrambleAnimator,
    expiries: ExpiryTimers,
}

impl EngineWorker {
    fn new(client: Arc<dyn SummaryClient>, events: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            client,
            events,
            scramble: ScrambleAnimator::new(),
            expiries: ExpiryTimers::new(),
        }
    }

    fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Summarize { request_id, url } => {
                engine_info!(
                    "Summarize request_id={} url_len={} url={}",
                    request_id,
                    url.len(),
                    url
                );
                let client = self.client.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let result = summarize_guarded(client, url).await;
                    match &result {
                        Ok(_) => engine_info!("Request {} succeeded", request_id),
                        Err(err) => engine_warn!("Request {} failed: {}", request_id, err),
                    }
                    let _ = events.send(EngineEvent::RequestSettled { request_id, result });
                });
            }
            EngineCommand::StartScramble {
                generation,
                target,
                interval,
            } => {
                let events = self.events.clone();
                self.scramble.start(&target, interval, move |text| {
                    let _ = events.send(EngineEvent::ScrambleFrame { generation, text });
                });
            }
            EngineCommand::StopScramble => self.scramble.stop(),
            EngineCommand::ScheduleExpiry {
                key,
                generation,
                after,
            } => {
                let events = self.events.clone();
                let fired_key = key.clone();
                self.expiries.schedule(key, after, move || {
                    let _ = events.send(EngineEvent::ExpiryElapsed {
                        key: fired_key,
                        generation,
                    });
                });
            }
            EngineCommand::CancelExpiries => self.expiries.cancel_all(),
        }
    }
}

/// Runs the client on its own task so a panic still settles the request.
async fn summarize_guarded(
    client: Arc<dyn SummaryClient>,
    url: String,
) -> Result<SummaryPayload, SummarizeError> {
    let task = tokio::spawn(async move { client.summarize(&url).await });
    match task.await {
        Ok(result) => result,
        Err(join_err) => Err(SummarizeError::new(
            FailureKind::Panicked,
            join_err.to_string(),
        )),
    }
}
