use bevy::prelude::*;

use super::operator::{ForceCompleteScan, StopRevealing, handle_operator_requests};
use crate::engine::camera::observer::Observer;
use crate::engine::camera::observer_camera::ObserverCamera;
use crate::engine::core::app_state::AppState;
use crate::engine::detection::events::{
    DetectionSubscription, SurfacesChanged, subscribe_to_detection, unsubscribe_from_detection,
};
use crate::engine::materials::bridge::MaterialParameterBridge;
use crate::engine::session::RevealSession;
use crate::engine::transition::state_machine::TransitionSignal;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealSet {
    Ingest,
    Operator,
    Advance,
    Flush,
}

/// Coverage crossed the target (or the scan was forced). Fired once.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ScanningComplete {
    pub coverage: f32,
}

/// Every surface is opaque; the passthrough fade has started. Fired once.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidifyComplete;

/// Headless reveal core: no rendering, no input, no detection provider.
pub struct RevealCorePlugin;

impl Plugin for RevealCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MaterialParameterBridge>()
            .add_event::<SurfacesChanged>()
            .add_event::<ScanningComplete>()
            .add_event::<SolidifyComplete>()
            .add_event::<ForceCompleteScan>()
            .add_event::<StopRevealing>()
            .configure_sets(
                Update,
                (
                    RevealSet::Ingest,
                    RevealSet::Operator,
                    RevealSet::Advance,
                    RevealSet::Flush,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(Startup, subscribe_to_detection)
            .add_systems(
                Update,
                (
                    ingest_surface_changes.in_set(RevealSet::Ingest),
                    handle_operator_requests.in_set(RevealSet::Operator),
                    advance_reveal_session.in_set(RevealSet::Advance),
                ),
            )
            .add_systems(Last, unsubscribe_from_detection);
    }
}

/// Forwards detection batches to the session while subscribed.
pub fn ingest_surface_changes(
    mut events: EventReader<SurfacesChanged>,
    subscription: Option<Res<DetectionSubscription>>,
    session: Option<ResMut<RevealSession>>,
    mut bridge: ResMut<MaterialParameterBridge>,
) {
    let (Some(_), Some(mut session)) = (subscription, session) else {
        events.clear();
        return;
    };

    for event in events.read().filter(|event| !event.is_empty()) {
        session.on_surfaces_changed(&event.added, &event.removed, &mut bridge);
    }
}

pub fn advance_reveal_session(
    time: Res<Time>,
    session: Option<ResMut<RevealSession>>,
    mut bridge: ResMut<MaterialParameterBridge>,
    // Transform, not GlobalTransform: the desktop controller moves the camera
    // earlier in Update and propagation only runs in PostUpdate.
    observer_camera: Query<&Transform, With<ObserverCamera>>,
    mut scanning_events: EventWriter<ScanningComplete>,
    mut solidify_events: EventWriter<SolidifyComplete>,
) {
    let Some(mut session) = session else {
        return;
    };

    let observer = observer_camera
        .single()
        .map(Observer::from)
        .unwrap_or_else(|_| session.last_observer());

    let signals = session.update(time.delta_secs(), &observer, &mut bridge);
    for signal in signals {
        emit_signal(
            signal,
            session.coverage(),
            &mut scanning_events,
            &mut solidify_events,
        );
    }
}

pub(crate) fn emit_signal(
    signal: TransitionSignal,
    coverage: f32,
    scanning_events: &mut EventWriter<ScanningComplete>,
    solidify_events: &mut EventWriter<SolidifyComplete>,
) {
    match signal {
        TransitionSignal::ScanningComplete => {
            info!("Scanning complete at {:.0}% coverage", coverage * 100.0);
            scanning_events.write(ScanningComplete { coverage });
        }
        TransitionSignal::SolidifyComplete => {
            info!("Solidify complete");
            solidify_events.write(SolidifyComplete);
        }
    }
}
