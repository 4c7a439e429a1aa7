use bevy::prelude::*;
use bevy::window::{CompositeAlphaMode, PresentMode};

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            transparent: true,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Room Reveal".into(),
            present_mode: PresentMode::AutoVsync,
            // Clear colour alpha stands in for camera passthrough.
            transparent: true,
            composite_alpha_mode: CompositeAlphaMode::Auto,
            ..default()
        }
    }
}
