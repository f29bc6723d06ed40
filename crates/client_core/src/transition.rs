//! Route transition sequencing.
//!
//! `Stable --navigate--> Exiting --exit done--> Entering --entrance done--> Stable`.
//! The outgoing view finishes its exit before the incoming one mounts, so two
//! full-screen views are never shown at once. Navigation requests that
//! arrive mid-transition only replace the queued target; the running
//! animation is never cut short.

use std::time::{Duration, Instant};

use tracing::debug;

pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Predict,
    History,
    About,
    Contact,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Home,
        View::Predict,
        View::History,
        View::About,
        View::Contact,
    ];

    pub fn path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::Predict => "/predict",
            View::History => "/history",
            View::About => "/about",
            View::Contact => "/contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Predict => "Predict",
            View::History => "History",
            View::About => "About",
            View::Contact => "Contact",
        }
    }

    pub fn from_path(path: &str) -> Option<View> {
        let trimmed = path.trim().trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        View::ALL.into_iter().find(|view| view.path() == normalized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Stable,
    Exiting,
    Entering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionState {
    pub active_view: View,
    pub pending_view: Option<View>,
    pub phase: TransitionPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Exit of the active view began.
    Started,
    /// A transition is running; the target replaced any queued one.
    Queued,
    /// Already showing the target with nothing in flight.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct RouteTransitionController {
    state: TransitionState,
    duration: Duration,
    phase_started_at: Option<Instant>,
}

impl RouteTransitionController {
    pub fn new(initial: View, duration: Duration) -> Self {
        Self {
            state: TransitionState {
                active_view: initial,
                pending_view: None,
                phase: TransitionPhase::Stable,
            },
            duration,
            phase_started_at: None,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn active_view(&self) -> View {
        self.state.active_view
    }

    pub fn phase(&self) -> TransitionPhase {
        self.state.phase
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn navigate(&mut self, target: View, now: Instant) -> NavigationOutcome {
        match self.state.phase {
            TransitionPhase::Stable => {
                if target == self.state.active_view {
                    return NavigationOutcome::Unchanged;
                }
                self.state.pending_view = Some(target);
                self.enter_phase(TransitionPhase::Exiting, now);
                NavigationOutcome::Started
            }
            TransitionPhase::Exiting | TransitionPhase::Entering => {
                if let Some(previous) = self.state.pending_view.replace(target) {
                    if previous != target {
                        debug!(?previous, ?target, "queued navigation target replaced");
                    }
                }
                NavigationOutcome::Queued
            }
        }
    }

    /// The outgoing view finished animating out; mount the queued target.
    pub fn on_exit_complete(&mut self, now: Instant) {
        if self.state.phase != TransitionPhase::Exiting {
            return;
        }
        if let Some(target) = self.state.pending_view {
            self.state.active_view = target;
        }
        self.enter_phase(TransitionPhase::Entering, now);
    }

    /// The incoming view finished animating in. A target queued for some
    /// other view during the entrance starts the next exit right away.
    pub fn on_entrance_complete(&mut self, now: Instant) {
        if self.state.phase != TransitionPhase::Entering {
            return;
        }
        match self.state.pending_view {
            Some(next) if next != self.state.active_view => {
                self.enter_phase(TransitionPhase::Exiting, now);
            }
            _ => {
                self.state.pending_view = None;
                self.phase_started_at = None;
                self.state.phase = TransitionPhase::Stable;
                debug!(view = ?self.state.active_view, "route transition settled");
            }
        }
    }

    /// Completes the current phase once its fixed duration has elapsed.
    /// Returns `true` if the phase changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(started) = self.phase_started_at else {
            return false;
        };
        if now.saturating_duration_since(started) < self.duration {
            return false;
        }
        match self.state.phase {
            TransitionPhase::Exiting => self.on_exit_complete(now),
            TransitionPhase::Entering => self.on_entrance_complete(now),
            TransitionPhase::Stable => return false,
        }
        true
    }

    /// Normalized progress of the running phase; `1.0` when stable.
    pub fn progress(&self, now: Instant) -> f32 {
        match self.phase_started_at {
            Some(started) if !self.duration.is_zero() => {
                let elapsed = now.saturating_duration_since(started);
                (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
            }
            _ => 1.0,
        }
    }

    fn enter_phase(&mut self, phase: TransitionPhase, now: Instant) {
        debug!(
            view = ?self.state.active_view,
            pending = ?self.state.pending_view,
            ?phase,
            "route transition phase"
        );
        self.state.phase = phase;
        self.phase_started_at = Some(now);
    }
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
