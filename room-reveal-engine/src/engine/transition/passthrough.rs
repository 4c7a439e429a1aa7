use bevy::prelude::*;

use super::progress::advance_progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassthroughPhase {
    /// Camera feed visible, background fully transparent.
    #[default]
    Visible,
    FadingOut,
    /// Background fully opaque black.
    Disabled,
}

/// Background alpha written by one fade step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassthroughStep {
    pub background_alpha: f32,
}

/// Fades the compositor background from see-through (0) to opaque black (1).
#[derive(Debug, Clone)]
pub struct PassthroughFade {
    phase: PassthroughPhase,
    progress: f32,
    duration: f32,
}

impl PassthroughFade {
    pub fn new(duration: f32) -> Self {
        Self {
            phase: PassthroughPhase::Visible,
            progress: 0.0,
            duration,
        }
    }

    pub fn phase(&self) -> PassthroughPhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Starts the fade. Only the first call has any effect.
    pub fn start(&mut self) -> bool {
        if self.phase != PassthroughPhase::Visible {
            return false;
        }
        self.phase = PassthroughPhase::FadingOut;
        self.progress = 0.0;
        true
    }

    pub fn advance(&mut self, delta: f32) -> Option<PassthroughStep> {
        if self.phase != PassthroughPhase::FadingOut {
            return None;
        }

        self.progress = advance_progress(self.progress, delta, self.duration);
        if self.progress >= 1.0 {
            self.phase = PassthroughPhase::Disabled;
            info!("Passthrough disabled, now fully virtual");
        }

        Some(PassthroughStep {
            background_alpha: self.progress,
        })
    }
}
