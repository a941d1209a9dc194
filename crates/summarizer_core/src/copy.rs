use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// How long a "Copied!" confirmation stays visible.
pub const COPY_CONFIRM_DURATION: Duration = Duration::from_millis(2000);

pub const COPIED_LABEL: &str = "Copied!";

/// A result section with its own copy control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CopyTarget {
    Summary,
    KeyPoints,
}

impl CopyTarget {
    pub const ALL: [CopyTarget; 2] = [CopyTarget::Summary, CopyTarget::KeyPoints];

    pub fn default_label(self) -> &'static str {
        match self {
            CopyTarget::Summary => "Copy",
            CopyTarget::KeyPoints => "Copy Points",
        }
    }

    /// Stable key used when the target crosses into the engine's timer table.
    pub fn key(self) -> &'static str {
        match self {
            CopyTarget::Summary => "summary",
            CopyTarget::KeyPoints => "key_points",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|target| target.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyStatus {
    pub label: String,
    pub expires_at: Option<Instant>,
    generation: u64,
}

/// Confirmation bookkeeping for the copy controls.
///
/// Statuses are created on the first copy of a target and dropped on reset or
/// expiry. Generations come from a single counter that is never rewound, so a
/// revert that was queued before a reset can not match a later copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipboardCopier {
    statuses: BTreeMap<CopyTarget, CopyStatus>,
    last_generation: u64,
}

impl ClipboardCopier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `target` as copied at `at` and returns the generation the revert
    /// timer must carry.
    pub fn confirm(&mut self, target: CopyTarget, at: Instant) -> u64 {
        self.last_generation += 1;
        let generation = self.last_generation;
        self.statuses.insert(
            target,
            CopyStatus {
                label: COPIED_LABEL.to_string(),
                expires_at: Some(at + COPY_CONFIRM_DURATION),
                generation,
            },
        );
        generation
    }

    /// Reverts `target` if `generation` is still the latest confirmation.
    /// Returns whether the label changed.
    pub fn expire(&mut self, target: CopyTarget, generation: u64) -> bool {
        match self.statuses.get(&target) {
            Some(status) if status.generation == generation => {
                self.statuses.remove(&target);
                true
            }
            _ => false,
        }
    }

    /// Reverts every confirmation whose deadline is at or before `now`.
    pub fn sweep(&mut self, now: Instant) -> bool {
        let before = self.statuses.len();
        self.statuses
            .retain(|_, status| status.expires_at.is_some_and(|deadline| deadline > now));
        self.statuses.len() != before
    }

    /// Drops all confirmations. Returns whether any label changed.
    pub fn reset(&mut self) -> bool {
        let had_any = !self.statuses.is_empty();
        self.statuses.clear();
        had_any
    }

    pub fn label(&self, target: CopyTarget) -> &str {
        self.statuses
            .get(&target)
            .map(|status| status.label.as_str())
            .unwrap_or_else(|| target.default_label())
    }

    #[cfg(test)]
    fn status(&self, target: CopyTarget) -> Option<&CopyStatus> {
        self.statuses.get(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_sets_label_and_deadline() {
        let mut copier = ClipboardCopier::new();
        let at = Instant::now();
        copier.confirm(CopyTarget::Summary, at);

        assert_eq!(copier.label(CopyTarget::Summary), COPIED_LABEL);
        assert_eq!(
            copier.status(CopyTarget::Summary).unwrap().expires_at,
            Some(at + COPY_CONFIRM_DURATION)
        );
        assert_eq!(copier.label(CopyTarget::KeyPoints), "Copy Points");
    }

    #[test]
    fn stale_generation_does_not_revert() {
        let mut copier = ClipboardCopier::new();
        let at = Instant::now();
        let first = copier.confirm(CopyTarget::Summary, at);
        let second = copier.confirm(CopyTarget::Summary, at + Duration::from_millis(500));

        assert!(!copier.expire(CopyTarget::Summary, first));
        assert_eq!(copier.label(CopyTarget::Summary), COPIED_LABEL);
        assert!(copier.expire(CopyTarget::Summary, second));
        assert_eq!(copier.label(CopyTarget::Summary), "Copy");
    }

    #[test]
    fn sweep_reverts_only_elapsed_deadlines() {
        let mut copier = ClipboardCopier::new();
        let at = Instant::now();
        copier.confirm(CopyTarget::Summary, at);
        copier.confirm(CopyTarget::KeyPoints, at + Duration::from_millis(1000));

        assert!(!copier.sweep(at + Duration::from_millis(1999)));
        assert!(copier.sweep(at + COPY_CONFIRM_DURATION));
        assert_eq!(copier.label(CopyTarget::Summary), "Copy");
        assert_eq!(copier.label(CopyTarget::KeyPoints), COPIED_LABEL);
    }

    #[test]
    fn generations_survive_reset() {
        let mut copier = ClipboardCopier::new();
        let at = Instant::now();
        let before_reset = copier.confirm(CopyTarget::Summary, at);
        assert!(copier.reset());
        let after_reset = copier.confirm(CopyTarget::Summary, at);

        assert_ne!(before_reset, after_reset);
        assert!(!copier.expire(CopyTarget::Summary, before_reset));
    }

    #[test]
    fn target_keys_round_trip() {
        for target in CopyTarget::ALL {
            assert_eq!(CopyTarget::from_key(target.key()), Some(target));
        }
        assert_eq!(CopyTarget::from_key("nope"), None);
    }
}
