use bevy::prelude::*;

use crate::engine::errors::RevealSetupError;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    /// Setup failed; the room stays in passthrough and nothing is revealed.
    Disabled,
}

pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !loading_progress.session_ready {
        return;
    }
    info!("→ Reveal session ready, transitioning to Running state");
    next_state.set(AppState::Running);
}

/// Log-and-disable path for unrecoverable setup errors.
pub fn disable_reveal(
    error: &RevealSetupError,
    next_state: &mut NextState<AppState>,
) {
    error!("{error}");
    next_state.set(AppState::Disabled);
}

pub fn log_disabled() {
    warn!("Room reveal disabled, passthrough stays on");
}
