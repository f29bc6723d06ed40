//! One-shot viewport reveal tracking for section entrance animations.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealVariant {
    Hidden,
    Visible,
}

/// Whether the host can report section/viewport intersection at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationSupport {
    Available,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevealOptions {
    /// Fraction of the section that must be visible. `0.0` means any overlap.
    pub threshold: f32,
}

impl RevealOptions {
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    fn is_met(&self, visible_fraction: f32) -> bool {
        if self.threshold <= 0.0 {
            visible_fraction > 0.0
        } else {
            visible_fraction >= self.threshold
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealState {
    pub has_entered_viewport: bool,
}

/// Flips `has_entered_viewport` to `true` the first time the section
/// intersects the viewport and never flips it back. One instance per
/// section; instances share nothing.
#[derive(Debug, Clone)]
pub struct RevealController {
    section: &'static str,
    options: RevealOptions,
    state: RevealState,
}

impl RevealController {
    pub fn new(section: &'static str, options: RevealOptions, support: ObservationSupport) -> Self {
        // Without observation the section would stay hidden forever.
        let has_entered_viewport = support == ObservationSupport::Unavailable;
        if has_entered_viewport {
            debug!(section, "intersection observation unavailable; revealing immediately");
        }
        Self {
            section,
            options,
            state: RevealState {
                has_entered_viewport,
            },
        }
    }

    pub fn section(&self) -> &'static str {
        self.section
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn has_entered_viewport(&self) -> bool {
        self.state.has_entered_viewport
    }

    pub fn variant(&self) -> RevealVariant {
        if self.state.has_entered_viewport {
            RevealVariant::Visible
        } else {
            RevealVariant::Hidden
        }
    }

    /// Feeds one intersection sample. Returns `true` only for the sample that
    /// reveals the section.
    pub fn observe(&mut self, visible_fraction: f32) -> bool {
        if self.state.has_entered_viewport || !self.options.is_met(visible_fraction) {
            return false;
        }
        self.state.has_entered_viewport = true;
        debug!(section = self.section, visible_fraction, "section entered viewport");
        true
    }
}

/// Fraction of the vertical span `[top, bottom]` that lies inside
/// `[viewport_top, viewport_bottom]`, in `0.0..=1.0`.
pub fn vertical_visible_fraction(
    top: f32,
    bottom: f32,
    viewport_top: f32,
    viewport_bottom: f32,
) -> f32 {
    let height = bottom - top;
    if height <= 0.0 {
        return if top >= viewport_top && top <= viewport_bottom {
            1.0
        } else {
            0.0
        };
    }
    let overlap = bottom.min(viewport_bottom) - top.max(viewport_top);
    (overlap / height).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "tests/reveal_tests.rs"]
mod tests;
