use std::time::{Duration, Instant};

use tracing::debug;

use crate::transition::{NavigationOutcome, RouteTransitionController, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// Process-wide UI state: theme mode and the active route.
///
/// Both start from fixed values at app start and change only through
/// [`AppState::toggle_theme`] and [`AppState::navigate`]. Views read them
/// through the accessors.
#[derive(Debug, Clone)]
pub struct AppState {
    theme: ThemeMode,
    routes: RouteTransitionController,
}

impl AppState {
    pub fn new(transition_duration: Duration) -> Self {
        Self {
            theme: ThemeMode::default(),
            routes: RouteTransitionController::new(View::Home, transition_duration),
        }
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = match self.theme {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
        debug!(theme = ?self.theme, "theme toggled");
        self.theme
    }

    pub fn routes(&self) -> &RouteTransitionController {
        &self.routes
    }

    pub fn navigate(&mut self, target: View, now: Instant) -> NavigationOutcome {
        self.routes.navigate(target, now)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.routes.tick(now)
    }
}
