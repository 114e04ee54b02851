use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::engine::state::{ActivateOutcome, LaunchPhase, LaunchState, NicknameError};
use crate::util::{Clock, elapsed_between};

pub mod state;

/// Time between two progress steps.
pub const STEP_INTERVAL: Duration = Duration::from_millis(100);
/// Hold at 100% before moving to the next phase.
pub const PHASE_PAUSE: Duration = Duration::from_millis(500);

/// Drives the Play button through Idle -> Checking -> Downloading -> Idle.
///
/// The sequence is a fixed animation: it never touches the disk or the
/// network, cannot fail and cannot be cancelled once started. Time only
/// moves through [`LaunchSequencer::advance`], so the whole cycle can be
/// replayed without real timers.
#[derive(Debug, Default)]
pub struct LaunchSequencer {
    state: LaunchState,
    pending: Duration,
    last_sync: Option<Instant>,
}

impl LaunchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LaunchState {
        &self.state
    }

    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.state.nickname = nickname.into();
        if self.state.nickname_error.take().is_some() {
            debug!("launch: nickname edited, clearing error");
        }
    }

    pub fn activate(&mut self) -> ActivateOutcome {
        if !self.state.is_interactive() {
            debug!("launch: activation ignored in {:?}", self.state.phase);
            return ActivateOutcome::Busy;
        }
        if self.state.nickname.trim().is_empty() {
            self.state.nickname_error = Some(NicknameError::Missing);
            warn!("launch: nickname missing, not starting");
            return ActivateOutcome::Rejected(NicknameError::Missing);
        }

        self.state.nickname_error = None;
        self.enter(LaunchPhase::Checking);
        ActivateOutcome::Started
    }

    /// Move the animation forward by `elapsed` of virtual time.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.state.phase == LaunchPhase::Idle {
            return;
        }
        self.pending += elapsed;
        while self.state.phase != LaunchPhase::Idle {
            let deadline = self.current_deadline();
            if self.pending < deadline {
                break;
            }
            self.pending -= deadline;
            self.step();
        }
    }

    /// Advance by the wall time that passed since the previous sync.
    pub fn sync(&mut self, clock: &impl Clock) {
        let now = clock.now();
        if let Some(last) = self.last_sync.replace(now) {
            self.advance(elapsed_between(last, now));
        }
    }

    /// Time until the next visible change, `None` while idle.
    pub fn next_event_in(&self) -> Option<Duration> {
        if self.state.phase == LaunchPhase::Idle {
            return None;
        }
        Some(self.current_deadline().saturating_sub(self.pending))
    }

    fn current_deadline(&self) -> Duration {
        if self.state.progress < 100 {
            STEP_INTERVAL
        } else {
            PHASE_PAUSE
        }
    }

    fn step(&mut self) {
        if self.state.progress < 100 {
            let increment = self.state.phase.increment();
            self.state.progress = self.state.progress.saturating_add(increment).min(100);
            debug!(
                "launch: {:?} progress {}%",
                self.state.phase, self.state.progress
            );
        } else {
            self.enter(self.state.phase.next());
        }
    }

    fn enter(&mut self, phase: LaunchPhase) {
        info!("launch: {:?} -> {:?}", self.state.phase, phase);
        self.state.phase = phase;
        self.state.progress = 0;
        if phase == LaunchPhase::Idle {
            self.pending = Duration::ZERO;
        }
    }
}
