use bevy::prelude::*;

use crate::engine::core::app_state::{AppState, disable_reveal};
use crate::engine::errors::RevealSetupError;
use crate::engine::surfaces::surface::{Surface, SurfaceId};

/// Batch of surface additions and removals from the detection subsystem.
#[derive(Event, Debug, Clone, Default)]
pub struct SurfacesChanged {
    pub added: Vec<Surface>,
    pub removed: Vec<SurfaceId>,
}

impl SurfacesChanged {
    pub fn added(surfaces: Vec<Surface>) -> Self {
        Self {
            added: surfaces,
            removed: Vec::new(),
        }
    }

    pub fn removed(ids: Vec<SurfaceId>) -> Self {
        Self {
            added: Vec::new(),
            removed: ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Marks the render entity of a detected surface.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedSurface {
    pub id: SurfaceId,
}

/// Present when some provider delivers surfaces.
#[derive(Resource, Debug, Clone)]
pub struct DetectionSubsystem {
    pub provider: String,
}

impl DetectionSubsystem {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }
}

/// Live subscription of the reveal core to the detection subsystem.
#[derive(Resource, Debug, Clone)]
pub struct DetectionSubscription {
    pub provider: String,
}

pub fn subscribe_to_detection(
    mut commands: Commands,
    subsystem: Option<Res<DetectionSubsystem>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(subsystem) = subsystem else {
        disable_reveal(&RevealSetupError::MissingDetectionSubsystem, &mut next_state);
        return;
    };

    info!("Subscribed to surface detection from '{}'", subsystem.provider);
    commands.insert_resource(DetectionSubscription {
        provider: subsystem.provider.clone(),
    });
}

pub fn unsubscribe_from_detection(
    mut commands: Commands,
    mut exit_events: EventReader<AppExit>,
    subscription: Option<Res<DetectionSubscription>>,
) {
    if exit_events.read().next().is_none() {
        return;
    }
    if let Some(subscription) = subscription {
        info!(
            "Unsubscribed from surface detection from '{}'",
            subscription.provider
        );
        commands.remove_resource::<DetectionSubscription>();
    }
}

/// Despawns render entities of surfaces the provider removed.
pub fn despawn_removed_surfaces(
    mut commands: Commands,
    mut events: EventReader<SurfacesChanged>,
    surfaces: Query<(Entity, &DetectedSurface)>,
) {
    for event in events.read() {
        if event.removed.is_empty() {
            continue;
        }
        for (entity, detected) in &surfaces {
            if event.removed.contains(&detected.id) {
                commands.entity(entity).despawn();
            }
        }
    }
}
