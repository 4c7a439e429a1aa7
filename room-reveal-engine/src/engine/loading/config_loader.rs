use bevy::asset::LoadState;
use bevy::prelude::*;

use constants::path::REVEAL_CONFIG_PATH;

use crate::engine::config::reveal_config::RevealConfig;
use crate::engine::core::app_state::{AppState, disable_reveal};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::materials::solid::SolidMaterialTemplates;
use crate::engine::session::RevealSession;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<RevealConfig>>,
}

pub fn start_loading(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    config_loader.handle = Some(asset_server.load(REVEAL_CONFIG_PATH));
}

/// Waits for the config asset, falling back to defaults if it fails to load.
/// An invalid config disables the experience.
pub fn load_config_system(
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    configs: Res<Assets<RevealConfig>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.config_loaded {
        return;
    }
    let Some(handle) = config_loader.handle.as_ref() else {
        return;
    };

    let config = if let Some(config) = configs.get(handle) {
        info!("✓ Reveal config loaded from {}", REVEAL_CONFIG_PATH);
        config.clone()
    } else if let Some(LoadState::Failed(error)) = asset_server.get_load_state(handle) {
        warn!("Reveal config unavailable ({error}), using defaults");
        RevealConfig::default()
    } else {
        return;
    };
    loading_progress.config_loaded = true;

    if let Err(error) = config.validate() {
        disable_reveal(&error, &mut next_state);
        return;
    }

    install_session(&mut commands, config);
    loading_progress.session_ready = true;
}

/// Inserts everything a running session needs. The config is frozen from
/// here on.
pub fn install_session(commands: &mut Commands, config: RevealConfig) {
    commands.insert_resource(SolidMaterialTemplates::from_config(&config));
    commands.insert_resource(RevealSession::from_config(&config));
    commands.insert_resource(config);
}
