use std::collections::HashMap;

use bevy::prelude::*;

use super::surface::{FloorClassifier, MaterialMode, Surface, SurfaceId, SurfaceRevealState};
use crate::engine::camera::observer::Observer;
use crate::engine::materials::bridge::MaterialParameterBridge;

#[derive(Debug, Clone)]
pub struct TrackedSurface {
    pub surface: Surface,
    pub state: SurfaceRevealState,
}

/// Surfaces currently known to the detection subsystem.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<SurfaceId, TrackedSurface>,
    classifier: FloorClassifier,
}

impl SurfaceRegistry {
    /// Empty registry that classifies floors with `classifier`.
    pub fn new(classifier: FloorClassifier) -> Self {
        Self {
            surfaces: HashMap::new(),
            classifier,
        }
    }

    /// Tracks newly detected surfaces and returns the ids that were new.
    ///
    /// New surfaces start hidden with a zero alpha written to their material.
    /// A surface that is already tracked only has its geometry replaced, its
    /// reveal state is kept.
    pub fn on_surfaces_added(
        &mut self,
        added: &[Surface],
        observer: &Observer,
        bridge: &mut MaterialParameterBridge,
    ) -> Vec<SurfaceId> {
        let mut new_ids = Vec::with_capacity(added.len());

        for surface in added {
            let horizontal = self.classifier.is_horizontal(surface);
            let below = self.classifier.is_below(surface, observer.position.y);
            let is_floor = horizontal && below;

            if let Some(tracked) = self.surfaces.get_mut(&surface.id) {
                tracked.surface = surface.clone();
                if tracked.state.material_mode != MaterialMode::Solid {
                    tracked.state.is_floor = is_floor;
                }
                debug!("{} geometry refreshed", surface.id);
                continue;
            }

            debug!(
                "{} detected: horizontal={}, below_observer={}, is_floor={}, classification={:?}",
                surface.id, horizontal, below, is_floor, surface.classification
            );

            bridge.bind_surface(surface.id);
            bridge.set_color_alpha(surface.id, 0.0);

            self.surfaces.insert(
                surface.id,
                TrackedSurface {
                    surface: surface.clone(),
                    state: SurfaceRevealState::new(is_floor),
                },
            );
            new_ids.push(surface.id);
        }

        new_ids
    }

    /// Drops state for removed surfaces. Unknown ids are ignored.
    pub fn on_surfaces_removed(
        &mut self,
        removed: &[SurfaceId],
        bridge: &mut MaterialParameterBridge,
    ) -> usize {
        let mut count = 0;
        for id in removed {
            if self.surfaces.remove(id).is_some() {
                bridge.release_surface(*id);
                count += 1;
            }
        }
        count
    }

    /// Tracked surface for `id`, if detection still reports it.
    pub fn get(&self, id: SurfaceId) -> Option<&TrackedSurface> {
        self.surfaces.get(&id)
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut TrackedSurface> {
        self.surfaces.get_mut(&id)
    }

    /// Tracked surfaces in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedSurface> {
        self.surfaces.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TrackedSurface> {
        self.surfaces.values_mut()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Number of surfaces that have been revealed at least once.
    pub fn revealed_count(&self) -> usize {
        self.surfaces.values().filter(|t| t.state.revealed).count()
    }
}
