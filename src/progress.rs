//! Progress reporting through `tracing`.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts completed work units and emits an `info` event roughly every tenth
/// of the total. Safe to tick from worker threads.
#[derive(Debug)]
pub(crate) struct Progress {
    stage: &'static str,
    total: usize,
    step: usize,
    done: AtomicUsize,
    enabled: bool,
}

impl Progress {
    pub(crate) fn new(stage: &'static str, total: usize, enabled: bool) -> Self {
        Self {
            stage,
            total,
            step: (total / 10).max(1),
            done: AtomicUsize::new(0),
            enabled,
        }
    }

    /// Record one finished unit of work.
    pub(crate) fn tick(&self) {
        if !self.enabled {
            return;
        }
        let prev = self.done.fetch_add(1, Ordering::Relaxed);
        let now = prev + 1;
        if now / self.step != prev / self.step || now == self.total {
            tracing::info!(
                stage = self.stage,
                done = now,
                total = self.total,
                "{}: {}/{}",
                self.stage,
                now,
                self.total
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn completed(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_progress_does_not_count() {
        let progress = Progress::new("rows", 5, false);
        progress.tick();
        assert_eq!(progress.completed(), 0);
    }

    #[test]
    fn test_enabled_progress_counts() {
        let progress = Progress::new("rows", 3, true);
        for _ in 0..3 {
            progress.tick();
        }
        assert_eq!(progress.completed(), 3);
    }
}
