use std::time::Duration;

use engine_logging::engine_debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Symbols substituted for characters that are not revealed yet.
pub const SCRAMBLE_ALPHABET: &[char] = &[
    'Σ', '@', '#', '$', '%', '^', '*', '(', ')', '[', ']', '{', '}', ';', ':', ',', '.', '?', '/',
    '~',
];

/// Ticks spent on each character before it is revealed.
pub const TICKS_PER_CHAR: usize = 2;

/// Frame generator for the loading label.
///
/// Characters are revealed left to right, one every [`TICKS_PER_CHAR`] ticks.
/// Positions not revealed yet show a random symbol. After the whole target has
/// been shown the cycle starts over.
#[derive(Debug, Clone)]
pub struct ScrambleFrames {
    target: Vec<char>,
    tick: usize,
}

impl ScrambleFrames {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.chars().collect(),
            tick: 0,
        }
    }

    #[cfg(test)]
    fn tick(&self) -> usize {
        self.tick
    }

    pub fn revealed_len(&self) -> usize {
        self.tick.div_ceil(TICKS_PER_CHAR).min(self.target.len())
    }

    pub fn next_frame<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        let revealed = self.revealed_len();
        let frame = self
            .target
            .iter()
            .enumerate()
            .map(|(index, &ch)| {
                if index < revealed {
                    ch
                } else {
                    SCRAMBLE_ALPHABET[rng.gen_range(0..SCRAMBLE_ALPHABET.len())]
                }
            })
            .collect();

        self.tick += 1;
        if self.tick >= self.target.len() * TICKS_PER_CHAR {
            self.tick = 0;
        }
        frame
    }
}

struct RunningScramble {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Owns the repeating timer that feeds [`ScrambleFrames`] to a callback.
///
/// At most one animation runs per animator: `start` replaces a running one.
/// `stop` is idempotent and dropping the animator stops it.
#[derive(Default)]
pub struct ScrambleAnimator {
    running: Option<RunningScramble>,
}

impl ScrambleAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts emitting frames every `interval`, the first one after one
    /// interval has elapsed. Must be called from within a tokio runtime.
    pub fn start<F>(&mut self, target: &str, interval: Duration, mut on_frame: F)
    where
        F: FnMut(String) + Send + 'static,
    {
        self.stop();

        let period = interval.max(Duration::from_millis(1));
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let mut frames = ScrambleFrames::new(target);
        let mut rng = StdRng::from_entropy();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => on_frame(frames.next_frame(&mut rng)),
                }
            }
        });

        engine_debug!("scramble started target_len={} period={:?}", target.len(), period);
        self.running = Some(RunningScramble { cancel, task });
    }

    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.cancel.cancel();
            running.task.abort();
            engine_debug!("scramble stopped");
        }
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for ScrambleAnimator {
    fn drop(&mut self) {
        self.stop();
    }
}
