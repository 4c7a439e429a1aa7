// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::camera::observer_camera::{desktop_observer_controller, spawn_observer_camera};
use crate::engine::config::reveal_config::RevealConfig;
use crate::engine::core::app_state::{AppState, log_disabled, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::detection::simulated::SimulatedDetectionPlugin;
use crate::engine::loading::config_loader::{ConfigLoader, load_config_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::materials::flush::SurfaceMaterialPlugin;
use crate::engine::systems::hud::{coverage_text_update_system, spawn_coverage_overlay};
use crate::engine::systems::operator::handle_operator_keyboard_shortcuts;
use crate::engine::systems::reveal_update::{RevealCorePlugin, RevealSet};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers RevealConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<RevealConfig>::new(&["json"]))
        .add_plugins(RevealCorePlugin)
        .add_plugins(SurfaceMaterialPlugin)
        .add_plugins(SimulatedDetectionPlugin);

    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (load_config_system, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Disabled), log_disabled);

    let runtime_systems = (
        handle_operator_keyboard_shortcuts.before(RevealSet::Operator),
        desktop_observer_controller.before(RevealSet::Advance),
    );
    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_coverage_overlay);
        app.add_systems(Update, coverage_text_update_system);
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_observer_camera(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
