use bevy::prelude::*;

use constants::shader_params::SURFACE_MODE_OPAQUE;

use crate::engine::camera::observer::Observer;
use crate::engine::config::reveal_config::RevealConfig;
use crate::engine::coverage::estimator::CoverageEstimator;
use crate::engine::materials::bridge::{MaterialParameterBridge, ScalarParam, SurfaceMaterialKind};
use crate::engine::reveal::evidence_source::{EvidenceMode, EvidenceSource, evidence_source_for};
use crate::engine::surfaces::registry::{SurfaceRegistry, TrackedSurface};
use crate::engine::surfaces::surface::{MaterialMode, Surface, SurfaceId};
use crate::engine::transition::state_machine::{
    TransitionPhase, TransitionSignal, TransitionStateMachine,
};

/// One room-reveal session: surfaces, evidence, coverage and the transition.
///
/// The host calls [`RevealSession::update`] once per frame and forwards
/// detection callbacks through [`RevealSession::on_surfaces_changed`]. All
/// rendering output goes through the [`MaterialParameterBridge`].
#[derive(Resource)]
pub struct RevealSession {
    registry: SurfaceRegistry,
    source: Box<dyn EvidenceSource>,
    coverage: CoverageEstimator,
    machine: TransitionStateMachine,
    accepting_evidence: bool,
    started: bool,
    last_observer: Observer,
}

impl RevealSession {
    /// New session using the evidence source selected by `config.evidence_mode`.
    pub fn from_config(config: &RevealConfig) -> Self {
        Self::with_source(config, evidence_source_for(config))
    }

    /// New session driven by a caller-supplied evidence source.
    /// The coverage strategy follows the source's mode.
    pub fn with_source(config: &RevealConfig, source: Box<dyn EvidenceSource>) -> Self {
        let strategy = source.mode().coverage_strategy(config.room_size);
        info!(
            "Reveal session created: mode={:?}, target coverage {:.0}%",
            source.mode(),
            config.target_coverage * 100.0
        );
        Self {
            registry: SurfaceRegistry::new(config.floor_classifier()),
            source,
            coverage: CoverageEstimator::new(strategy, config.target_coverage),
            machine: TransitionStateMachine::new(
                config.solidify_duration,
                config.passthrough_fade_duration,
            ),
            accepting_evidence: true,
            started: false,
            last_observer: Observer::default(),
        }
    }

    /// Runs one frame: evidence, coverage, latch, then the active animation.
    ///
    /// Returns the signals raised this frame, in the order they fired.
    pub fn update(
        &mut self,
        delta: f32,
        observer: &Observer,
        bridge: &mut MaterialParameterBridge,
    ) -> Vec<TransitionSignal> {
        let mut signals = Vec::new();
        self.last_observer = *observer;

        if !self.started {
            self.started = true;
            bridge.set_background_alpha(0.0);
            self.source.begin(observer, &mut self.registry, bridge);
            self.recompute_coverage();
        }

        let phase = self.machine.phase();

        if phase == TransitionPhase::Scanning
            && self.accepting_evidence
            && self.source.gather(observer, &mut self.registry, bridge)
        {
            self.recompute_coverage();
        }

        if let Some(signal) = self.machine.observe_coverage(self.coverage.is_complete()) {
            info!(
                "Coverage {:.0}% reached target {:.0}%",
                self.coverage.current() * 100.0,
                self.coverage.target() * 100.0
            );
            self.swap_all_to_solid(bridge);
            signals.push(signal);
        }

        match phase {
            TransitionPhase::Scanning => self.source.animate(delta, &mut self.registry, bridge),
            TransitionPhase::Solidifying => {
                if let Some(step) = self.machine.advance_solidify(delta) {
                    let opaque = step.completed.is_some();
                    for tracked in self.registry.iter() {
                        write_solid_alpha(tracked, step.progress, opaque, bridge);
                    }
                    signals.extend(step.completed);
                }
            }
            TransitionPhase::Complete => {}
        }

        if let Some(step) = self.machine.advance_passthrough(delta) {
            bridge.set_background_alpha(step.background_alpha);
        }

        signals
    }

    /// Applies a detection add/remove batch.
    pub fn on_surfaces_changed(
        &mut self,
        added: &[Surface],
        removed: &[SurfaceId],
        bridge: &mut MaterialParameterBridge,
    ) {
        let observer = self.last_observer;
        let new_ids = self.registry.on_surfaces_added(added, &observer, bridge);
        let removed_count = self.registry.on_surfaces_removed(removed, bridge);

        if new_ids.is_empty() && removed_count == 0 {
            return;
        }
        debug!(
            "Surfaces changed: {} added, {} removed, {} tracked",
            new_ids.len(),
            removed_count,
            self.registry.len()
        );

        if self.machine.phase() == TransitionPhase::Scanning {
            self.source.refresh_surfaces(&mut self.registry, bridge);
            if removed_count > 0 {
                self.coverage
                    .recompute_after_removal(self.source.evidence(), &self.registry);
            } else {
                self.recompute_coverage();
            }
            return;
        }

        // Late arrivals join the solid room at its current opacity.
        let progress = self.machine.solidify_progress();
        let opaque = self.machine.phase() == TransitionPhase::Complete;
        for id in new_ids {
            if let Some(tracked) = self.registry.get_mut(id) {
                swap_to_solid(tracked, bridge);
                write_solid_alpha(tracked, progress, opaque, bridge);
            }
        }
    }

    /// Operator shortcut: skip accumulation and start solidifying now.
    ///
    /// Returns the scanning signal the first time; afterwards does nothing.
    pub fn force_complete(
        &mut self,
        bridge: &mut MaterialParameterBridge,
    ) -> Option<TransitionSignal> {
        if self.machine.phase() != TransitionPhase::Scanning {
            debug!("Force complete ignored, already {}", self.machine.phase().label());
            return None;
        }

        self.source.reveal_all(&mut self.registry);
        self.coverage.force_full();
        let signal = self.machine.force_complete()?;
        self.swap_all_to_solid(bridge);
        Some(signal)
    }

    /// Permanently stops evidence gathering. A running solidify is unaffected.
    pub fn stop_revealing(&mut self) {
        if self.accepting_evidence {
            self.accepting_evidence = false;
            info!("Revealing stopped, evidence gathering disabled");
        }
    }

    fn recompute_coverage(&mut self) {
        self.coverage
            .recompute(self.source.evidence(), &self.registry);
    }

    fn swap_all_to_solid(&mut self, bridge: &mut MaterialParameterBridge) {
        info!("Swapping {} surfaces to solid materials", self.registry.len());
        for tracked in self.registry.iter_mut() {
            swap_to_solid(tracked, bridge);
        }
    }

    /// Latest coverage in `[0, 1]`.
    pub fn coverage(&self) -> f32 {
        self.coverage.current()
    }

    /// Whether coverage has reached the configured target.
    pub fn is_complete(&self) -> bool {
        self.coverage.is_complete()
    }

    /// Current transition phase.
    pub fn phase(&self) -> TransitionPhase {
        self.machine.phase()
    }

    /// Transition state, including solidify and passthrough progress.
    pub fn machine(&self) -> &TransitionStateMachine {
        &self.machine
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    pub fn evidence_mode(&self) -> EvidenceMode {
        self.source.mode()
    }

    /// Recorded evidence positions. Empty in gaze mode.
    pub fn evidence(&self) -> &[Vec3] {
        self.source.evidence()
    }

    pub fn is_accepting_evidence(&self) -> bool {
        self.accepting_evidence
    }

    /// Observer pose from the most recent update.
    pub fn last_observer(&self) -> Observer {
        self.last_observer
    }
}

fn swap_to_solid(tracked: &mut TrackedSurface, bridge: &mut MaterialParameterBridge) {
    let kind = SurfaceMaterialKind::solid_for(tracked.state.is_floor);
    bridge.swap_material(tracked.surface.id, kind);
    tracked.state.material_mode = MaterialMode::Solid;
}

fn write_solid_alpha(
    tracked: &TrackedSurface,
    progress: f32,
    opaque: bool,
    bridge: &mut MaterialParameterBridge,
) {
    let id = tracked.surface.id;
    if opaque {
        bridge.set_color_alpha(id, 1.0);
        bridge.set_scalar(id, ScalarParam::SurfaceMode, SURFACE_MODE_OPAQUE);
    } else {
        bridge.set_color_alpha(id, progress);
    }
}
