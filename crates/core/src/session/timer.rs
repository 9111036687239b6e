use serde::{Deserialize, Serialize};

/// Seconds allowed per question before it is skipped as unanswered.
pub const QUESTION_TIME_SECS: u32 = 20;

/// Identifies one countdown run.
///
/// Every restart or cancel moves the session to a new epoch, so a tick carrying
/// an older epoch belongs to a countdown that no longer exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerEpoch(u64);

impl TimerEpoch {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickResult {
    Stale,
    Running(u32),
    Expired,
}

/// Countdown for the question currently on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionTimer {
    epoch: TimerEpoch,
    remaining: Option<u32>,
}

impl QuestionTimer {
    #[must_use]
    pub fn epoch(&self) -> TimerEpoch {
        self.epoch
    }

    /// Seconds left, or `None` when no countdown is running.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    pub(crate) fn restart(&mut self) {
        self.epoch = TimerEpoch(self.epoch.0.wrapping_add(1));
        self.remaining = Some(QUESTION_TIME_SECS);
    }

    pub(crate) fn cancel(&mut self) {
        self.epoch = TimerEpoch(self.epoch.0.wrapping_add(1));
        self.remaining = None;
    }

    pub(crate) fn tick(&mut self, epoch: TimerEpoch) -> TickResult {
        let Some(remaining) = self.remaining else {
            return TickResult::Stale;
        };
        if epoch != self.epoch {
            return TickResult::Stale;
        }
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.cancel();
            TickResult::Expired
        } else {
            self.remaining = Some(remaining);
            TickResult::Running(remaining)
        }
    }
}
