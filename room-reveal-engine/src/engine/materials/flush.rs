use std::collections::HashMap;

use bevy::prelude::*;

use constants::render_settings::{PASSTHROUGH_BACKGROUND, REVEAL_TINT};

use super::bridge::{MaterialParameterBridge, SurfaceMaterialParams};
use super::reveal_material::SurfaceRevealMaterial;
use super::solid::SolidMaterialTemplates;
use crate::engine::detection::events::DetectedSurface;
use crate::engine::surfaces::surface::SurfaceId;
use crate::engine::systems::reveal_update::RevealSet;

/// Registers the reveal material and the end-of-frame flush.
pub struct SurfaceMaterialPlugin;

impl Plugin for SurfaceMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<SurfaceRevealMaterial>::default())
            .insert_resource(ClearColor(PASSTHROUGH_BACKGROUND))
            .add_systems(Update, flush_material_parameters.in_set(RevealSet::Flush));
    }
}

type SurfaceMaterials<'a> = (
    Entity,
    &'a DetectedSurface,
    Option<&'a MeshMaterial3d<SurfaceRevealMaterial>>,
    Option<&'a MeshMaterial3d<StandardMaterial>>,
);

/// Pushes this frame's bridge writes into material assets and the clear
/// colour. Surfaces whose entity has not spawned yet stay queued.
pub fn flush_material_parameters(
    mut commands: Commands,
    mut bridge: ResMut<MaterialParameterBridge>,
    templates: Option<Res<SolidMaterialTemplates>>,
    clear_color: Option<ResMut<ClearColor>>,
    mut reveal_materials: ResMut<Assets<SurfaceRevealMaterial>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    surfaces: Query<SurfaceMaterials>,
) {
    if let Some(alpha) = bridge.take_background_alpha() {
        if let Some(mut clear_color) = clear_color {
            clear_color.0 = PASSTHROUGH_BACKGROUND.with_alpha(alpha);
        }
    }

    let points_dirty = bridge.take_reveal_points_dirty();
    let mut dirty: HashMap<SurfaceId, SurfaceMaterialParams> =
        bridge.take_dirty_surfaces().into_iter().collect();
    if dirty.is_empty() && !points_dirty {
        return;
    }
    let points = bridge.reveal_points().to_vec();

    for (entity, detected, reveal_handle, standard_handle) in &surfaces {
        let Some(params) = dirty.remove(&detected.id) else {
            if points_dirty {
                if let Some(material) =
                    reveal_handle.and_then(|handle| reveal_materials.get_mut(&handle.0))
                {
                    material.reveal.write_points(&points);
                }
            }
            continue;
        };

        if params.kind.is_solid() {
            let Some(material) = templates.as_deref().and_then(|templates| {
                templates.instance(params.kind, params.color_alpha, params.is_opaque())
            }) else {
                continue;
            };

            if let Some(existing) =
                standard_handle.and_then(|handle| standard_materials.get_mut(&handle.0))
            {
                *existing = material;
            } else {
                commands
                    .entity(entity)
                    .remove::<MeshMaterial3d<SurfaceRevealMaterial>>()
                    .insert(MeshMaterial3d(standard_materials.add(material)));
            }
            continue;
        }

        if let Some(existing) =
            reveal_handle.and_then(|handle| reveal_materials.get_mut(&handle.0))
        {
            existing.reveal.write_params(&params, REVEAL_TINT);
            existing.reveal.write_points(&points);
        } else {
            let mut material = SurfaceRevealMaterial::default();
            material.reveal.write_params(&params, REVEAL_TINT);
            material.reveal.write_points(&points);
            commands
                .entity(entity)
                .insert(MeshMaterial3d(reveal_materials.add(material)));
        }
    }

    for id in dirty.into_keys() {
        bridge.mark_dirty(id);
    }
}
