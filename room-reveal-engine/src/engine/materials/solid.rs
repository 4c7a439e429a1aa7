use bevy::prelude::*;

use super::bridge::SurfaceMaterialKind;
use crate::engine::config::reveal_config::RevealConfig;

/// Base materials cloned per surface when the room solidifies.
#[derive(Resource, Debug, Clone)]
pub struct SolidMaterialTemplates {
    pub floor: StandardMaterial,
    pub wall: StandardMaterial,
}

impl SolidMaterialTemplates {
    pub fn from_config(config: &RevealConfig) -> Self {
        let template = |color: Color| StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.9,
            alpha_mode: AlphaMode::Blend,
            ..default()
        };
        Self {
            floor: template(config.floor_color()),
            wall: template(config.wall_color()),
        }
    }

    /// A per-surface instance at the given opacity. `Reveal` has no solid
    /// template and yields `None`.
    pub fn instance(
        &self,
        kind: SurfaceMaterialKind,
        alpha: f32,
        opaque: bool,
    ) -> Option<StandardMaterial> {
        let template = match kind {
            SurfaceMaterialKind::FloorSolid => &self.floor,
            SurfaceMaterialKind::WallSolid => &self.wall,
            SurfaceMaterialKind::Reveal => return None,
        };
        let mut material = template.clone();
        if opaque {
            material.base_color.set_alpha(1.0);
            material.alpha_mode = AlphaMode::Opaque;
        } else {
            material.base_color.set_alpha(alpha);
            material.alpha_mode = AlphaMode::Blend;
        }
        Some(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fading_instance_is_blended_at_alpha() {
        let templates = SolidMaterialTemplates::from_config(&RevealConfig::default());
        let material = templates
            .instance(SurfaceMaterialKind::WallSolid, 0.25, false)
            .expect("wall template");

        assert_eq!(material.base_color.alpha(), 0.25);
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
    }

    #[test]
    fn opaque_instance_ignores_alpha() {
        let templates = SolidMaterialTemplates::from_config(&RevealConfig::default());
        let material = templates
            .instance(SurfaceMaterialKind::FloorSolid, 0.3, true)
            .expect("floor template");

        assert_eq!(material.base_color.alpha(), 1.0);
        assert_eq!(material.alpha_mode, AlphaMode::Opaque);
    }

    #[test]
    fn reveal_kind_has_no_template() {
        let templates = SolidMaterialTemplates::from_config(&RevealConfig::default());
        assert!(templates.instance(SurfaceMaterialKind::Reveal, 1.0, true).is_none());
    }
}
