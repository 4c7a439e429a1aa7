use bevy::prelude::*;

use super::passthrough::{PassthroughFade, PassthroughPhase, PassthroughStep};
use super::progress::advance_progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Scanning,
    Solidifying,
    Complete,
}

impl TransitionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scanning => "Scanning",
            Self::Solidifying => "Solidifying",
            Self::Complete => "Complete",
        }
    }
}

/// One-shot notifications for observers of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSignal {
    ScanningComplete,
    SolidifyComplete,
}

/// Result of one solidify tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidifyStep {
    pub progress: f32,
    /// Set on the single tick that reaches full opacity.
    pub completed: Option<TransitionSignal>,
}

/// Owns the scanning/solidify phases and the passthrough fade.
///
/// Material side effects are left to the caller; this type only decides when
/// things happen.
#[derive(Debug, Clone)]
pub struct TransitionStateMachine {
    phase: TransitionPhase,
    solidify_progress: f32,
    solidify_duration: f32,
    passthrough: PassthroughFade,
}

impl TransitionStateMachine {
    pub fn new(solidify_duration: f32, passthrough_fade_duration: f32) -> Self {
        Self {
            phase: TransitionPhase::Scanning,
            solidify_progress: 0.0,
            solidify_duration,
            passthrough: PassthroughFade::new(passthrough_fade_duration),
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn solidify_progress(&self) -> f32 {
        self.solidify_progress
    }

    pub fn is_solidified(&self) -> bool {
        self.solidify_progress >= 1.0
    }

    pub fn passthrough_phase(&self) -> PassthroughPhase {
        self.passthrough.phase()
    }

    pub fn passthrough_fade_progress(&self) -> f32 {
        self.passthrough.progress()
    }

    /// Fires the scanning latch the first time coverage is complete.
    pub fn observe_coverage(&mut self, coverage_complete: bool) -> Option<TransitionSignal> {
        if !coverage_complete || self.phase != TransitionPhase::Scanning {
            return None;
        }
        info!("Scanning complete, starting solidify");
        Some(self.begin_solidify())
    }

    /// Operator shortcut into `Solidifying`. No-op once scanning has completed.
    pub fn force_complete(&mut self) -> Option<TransitionSignal> {
        if self.phase != TransitionPhase::Scanning {
            debug!("Force complete ignored in phase {}", self.phase.label());
            return None;
        }
        info!("Scanning force-completed, starting solidify");
        Some(self.begin_solidify())
    }

    fn begin_solidify(&mut self) -> TransitionSignal {
        self.phase = TransitionPhase::Solidifying;
        self.solidify_progress = 0.0;
        TransitionSignal::ScanningComplete
    }

    /// Advances the solidify ramp. Returns `None` outside `Solidifying`.
    ///
    /// Reaching full progress moves to `Complete` and starts the passthrough
    /// fade before the completion signal is handed back.
    pub fn advance_solidify(&mut self, delta: f32) -> Option<SolidifyStep> {
        if self.phase != TransitionPhase::Solidifying {
            return None;
        }

        self.solidify_progress =
            advance_progress(self.solidify_progress, delta, self.solidify_duration);

        let mut completed = None;
        if self.solidify_progress >= 1.0 {
            self.phase = TransitionPhase::Complete;
            self.passthrough.start();
            info!("Solidify complete, now in virtual room");
            completed = Some(TransitionSignal::SolidifyComplete);
        }

        Some(SolidifyStep {
            progress: self.solidify_progress,
            completed,
        })
    }

    pub fn advance_passthrough(&mut self, delta: f32) -> Option<PassthroughStep> {
        self.passthrough.advance(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> TransitionStateMachine {
        TransitionStateMachine::new(2.0, 1.0)
    }

    #[test]
    fn incomplete_coverage_keeps_scanning() {
        let mut m = machine();
        assert_eq!(m.observe_coverage(false), None);
        assert_eq!(m.phase(), TransitionPhase::Scanning);
        assert_eq!(m.advance_solidify(1.0), None);
    }

    #[test]
    fn scanning_latch_fires_once() {
        let mut m = machine();
        assert_eq!(
            m.observe_coverage(true),
            Some(TransitionSignal::ScanningComplete)
        );
        assert_eq!(m.phase(), TransitionPhase::Solidifying);
        assert_eq!(m.observe_coverage(true), None);
        assert_eq!(m.force_complete(), None);
    }

    #[test]
    fn solidify_ramps_then_completes_once() {
        let mut m = machine();
        m.observe_coverage(true);

        let step = m.advance_solidify(1.0).expect("solidifying");
        assert!((step.progress - 0.5).abs() < f32::EPSILON);
        assert_eq!(step.completed, None);

        let step = m.advance_solidify(1.0).expect("solidifying");
        assert_eq!(step.progress, 1.0);
        assert_eq!(step.completed, Some(TransitionSignal::SolidifyComplete));
        assert_eq!(m.phase(), TransitionPhase::Complete);
        assert!(m.is_solidified());

        assert_eq!(m.advance_solidify(1.0), None);
    }

    #[test]
    fn passthrough_fade_only_starts_after_solidify() {
        let mut m = machine();
        assert_eq!(m.advance_passthrough(1.0), None);

        m.observe_coverage(true);
        assert_eq!(m.advance_passthrough(1.0), None);
        assert_eq!(m.passthrough_phase(), PassthroughPhase::Visible);

        m.advance_solidify(100.0);
        assert_eq!(m.passthrough_phase(), PassthroughPhase::FadingOut);

        let step = m.advance_passthrough(0.5).expect("fading");
        assert!((step.background_alpha - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn large_deltas_stay_clamped() {
        let mut m = machine();
        m.force_complete();
        let step = m.advance_solidify(1.0e9).expect("solidifying");
        assert_eq!(step.progress, 1.0);
        let fade = m.advance_passthrough(1.0e9).expect("fading");
        assert_eq!(fade.background_alpha, 1.0);
        assert_eq!(m.passthrough_phase(), PassthroughPhase::Disabled);
        assert_eq!(m.passthrough_fade_progress(), 1.0);
    }

    #[test]
    fn force_complete_resets_solidify_progress() {
        let mut m = machine();
        assert_eq!(m.force_complete(), Some(TransitionSignal::ScanningComplete));
        assert_eq!(m.phase(), TransitionPhase::Solidifying);
        assert_eq!(m.solidify_progress(), 0.0);
    }

    #[test]
    fn force_complete_is_idempotent_after_complete() {
        let mut m = machine();
        m.force_complete();
        m.advance_solidify(5.0);
        assert_eq!(m.force_complete(), None);
        assert_eq!(m.phase(), TransitionPhase::Complete);
    }
}
