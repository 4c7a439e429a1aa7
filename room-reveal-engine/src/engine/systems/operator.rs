use bevy::prelude::*;

use super::reveal_update::{ScanningComplete, SolidifyComplete, emit_signal};
use crate::engine::materials::bridge::MaterialParameterBridge;
use crate::engine::session::RevealSession;

/// Skip the scan and start solidifying. Ignored once solidify has begun.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ForceCompleteScan;

/// Stop gathering evidence for the rest of the session.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct StopRevealing;

pub fn handle_operator_requests(
    mut force_events: EventReader<ForceCompleteScan>,
    mut stop_events: EventReader<StopRevealing>,
    session: Option<ResMut<RevealSession>>,
    mut bridge: ResMut<MaterialParameterBridge>,
    mut scanning_events: EventWriter<ScanningComplete>,
    mut solidify_events: EventWriter<SolidifyComplete>,
) {
    let Some(mut session) = session else {
        force_events.clear();
        stop_events.clear();
        return;
    };

    if stop_events.read().count() > 0 {
        session.stop_revealing();
    }

    if force_events.read().count() > 0 {
        info!("Force complete requested");
        if let Some(signal) = session.force_complete(&mut bridge) {
            emit_signal(
                signal,
                session.coverage(),
                &mut scanning_events,
                &mut solidify_events,
            );
        }
    }
}

/// F forces completion, X stops revealing (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_operator_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut force_events: EventWriter<ForceCompleteScan>,
    mut stop_events: EventWriter<StopRevealing>,
) {
    if keyboard.just_pressed(KeyCode::KeyF) {
        force_events.write(ForceCompleteScan);
    }

    if keyboard.just_pressed(KeyCode::KeyX) {
        stop_events.write(StopRevealing);
    }
}

/// Placeholder for WASM builds where keyboard shortcuts are disabled.
#[cfg(target_arch = "wasm32")]
pub fn handle_operator_keyboard_shortcuts() {}
