use std::collections::HashMap;

use bevy::prelude::*;

use constants::coverage::MAX_REVEAL_POINTS;
use constants::shader_params::{
    EDGE_SOFTNESS, POINT_COUNT, REVEAL_POINTS, REVEAL_RADIUS, SURFACE_MODE, SURFACE_MODE_OPAQUE,
    SURFACE_MODE_TRANSPARENT,
};

use crate::engine::surfaces::surface::SurfaceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarParam {
    RevealRadius,
    EdgeSoftness,
    PointCount,
    SurfaceMode,
}

impl ScalarParam {
    /// Field name in the `surface_reveal.wgsl` uniform.
    pub fn name(self) -> &'static str {
        match self {
            Self::RevealRadius => REVEAL_RADIUS,
            Self::EdgeSoftness => EDGE_SOFTNESS,
            Self::PointCount => POINT_COUNT,
            Self::SurfaceMode => SURFACE_MODE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorArrayParam {
    RevealPoints,
}

impl VectorArrayParam {
    /// Field name in the `surface_reveal.wgsl` uniform.
    pub fn name(self) -> &'static str {
        match self {
            Self::RevealPoints => REVEAL_POINTS,
        }
    }
}

/// Which material a surface renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceMaterialKind {
    #[default]
    Reveal,
    FloorSolid,
    WallSolid,
}

impl SurfaceMaterialKind {
    pub fn solid_for(is_floor: bool) -> Self {
        if is_floor {
            Self::FloorSolid
        } else {
            Self::WallSolid
        }
    }

    pub fn is_solid(self) -> bool {
        !matches!(self, Self::Reveal)
    }
}

/// Cached parameter record for one surface's material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMaterialParams {
    pub kind: SurfaceMaterialKind,
    pub color_alpha: f32,
    pub reveal_radius: f32,
    pub edge_softness: f32,
    pub point_count: u32,
    pub surface_mode: f32,
    dirty: bool,
}

impl Default for SurfaceMaterialParams {
    fn default() -> Self {
        Self {
            kind: SurfaceMaterialKind::Reveal,
            color_alpha: 0.0,
            reveal_radius: 0.0,
            edge_softness: 0.0,
            point_count: 0,
            surface_mode: SURFACE_MODE_TRANSPARENT,
            dirty: true,
        }
    }
}

impl SurfaceMaterialParams {
    pub fn is_opaque(&self) -> bool {
        self.surface_mode == SURFACE_MODE_OPAQUE
    }
}

/// Write-only adapter between the reveal core and the renderer.
///
/// The core writes parameters here during the frame; the flush system pushes
/// whatever changed into material assets and the compositor. Writes aimed at
/// a surface that is not bound are dropped.
#[derive(Resource, Debug, Default)]
pub struct MaterialParameterBridge {
    surfaces: HashMap<SurfaceId, SurfaceMaterialParams>,
    reveal_points: Vec<Vec4>,
    reveal_points_dirty: bool,
    background_alpha: Option<f32>,
    background_dirty: bool,
}

impl MaterialParameterBridge {
    /// Starts tracking parameters for a newly detected surface.
    pub fn bind_surface(&mut self, surface: SurfaceId) {
        self.surfaces.insert(surface, SurfaceMaterialParams::default());
    }

    pub fn release_surface(&mut self, surface: SurfaceId) -> bool {
        self.surfaces.remove(&surface).is_some()
    }

    pub fn is_bound(&self, surface: SurfaceId) -> bool {
        self.surfaces.contains_key(&surface)
    }

    pub fn surface_params(&self, surface: SurfaceId) -> Option<&SurfaceMaterialParams> {
        self.surfaces.get(&surface)
    }

    pub fn set_scalar(&mut self, surface: SurfaceId, param: ScalarParam, value: f32) -> bool {
        let Some(params) = self.surfaces.get_mut(&surface) else {
            debug!("Dropped {} write for unbound surface {:?}", param.name(), surface);
            return false;
        };

        let changed = match param {
            ScalarParam::RevealRadius => replace(&mut params.reveal_radius, value),
            ScalarParam::EdgeSoftness => replace(&mut params.edge_softness, value),
            ScalarParam::SurfaceMode => replace(&mut params.surface_mode, value),
            ScalarParam::PointCount => {
                let count = value.max(0.0) as u32;
                let changed = params.point_count != count;
                params.point_count = count;
                changed
            }
        };
        params.dirty |= changed;
        true
    }

    pub fn set_color_alpha(&mut self, surface: SurfaceId, alpha: f32) -> bool {
        let Some(params) = self.surfaces.get_mut(&surface) else {
            return false;
        };
        params.dirty |= replace(&mut params.color_alpha, alpha.clamp(0.0, 1.0));
        true
    }

    /// Swaps the surface onto another material. The record is reused in place
    /// and starts fully transparent and alpha-blended.
    pub fn swap_material(&mut self, surface: SurfaceId, kind: SurfaceMaterialKind) -> bool {
        let Some(params) = self.surfaces.get_mut(&surface) else {
            return false;
        };
        params.kind = kind;
        params.color_alpha = 0.0;
        params.surface_mode = SURFACE_MODE_TRANSPARENT;
        params.dirty = true;
        true
    }

    /// Uploads the evidence point list. Only the first
    /// [`MAX_REVEAL_POINTS`] entries reach the renderer; returns how many did.
    pub fn set_vector_array(&mut self, param: VectorArrayParam, values: &[Vec3]) -> usize {
        match param {
            VectorArrayParam::RevealPoints => {
                let transferred: Vec<Vec4> = values
                    .iter()
                    .take(MAX_REVEAL_POINTS)
                    .map(|p| p.extend(1.0))
                    .collect();
                let count = transferred.len();
                if count < values.len() {
                    debug!(
                        "{}: {} of {} points transferred",
                        param.name(),
                        count,
                        values.len()
                    );
                }
                if transferred != self.reveal_points {
                    self.reveal_points = transferred;
                    self.reveal_points_dirty = true;
                }
                count
            }
        }
    }

    pub fn reveal_points(&self) -> &[Vec4] {
        &self.reveal_points
    }

    /// Passthrough opacity: 0 shows the camera feed, 1 is opaque black.
    pub fn set_background_alpha(&mut self, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if self.background_alpha != Some(alpha) {
            self.background_alpha = Some(alpha);
            self.background_dirty = true;
        }
    }

    pub fn background_alpha(&self) -> Option<f32> {
        self.background_alpha
    }

    /// Re-queues a surface whose render entity was not ready at flush time.
    pub fn mark_dirty(&mut self, surface: SurfaceId) {
        if let Some(params) = self.surfaces.get_mut(&surface) {
            params.dirty = true;
        }
    }

    /// Drains surfaces whose parameters changed since the last flush.
    pub fn take_dirty_surfaces(&mut self) -> Vec<(SurfaceId, SurfaceMaterialParams)> {
        self.surfaces
            .iter_mut()
            .filter(|(_, params)| params.dirty)
            .map(|(id, params)| {
                params.dirty = false;
                (*id, *params)
            })
            .collect()
    }

    pub fn take_reveal_points_dirty(&mut self) -> bool {
        std::mem::take(&mut self.reveal_points_dirty)
    }

    pub fn take_background_alpha(&mut self) -> Option<f32> {
        if std::mem::take(&mut self.background_dirty) {
            self.background_alpha
        } else {
            None
        }
    }
}

fn replace(slot: &mut f32, value: f32) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: SurfaceId = SurfaceId(7);

    #[test]
    fn parameter_names_match_shader_uniform() {
        let shader = include_str!("../../../assets/shaders/surface_reveal.wgsl");
        let scalars = [
            ScalarParam::RevealRadius,
            ScalarParam::EdgeSoftness,
            ScalarParam::PointCount,
            ScalarParam::SurfaceMode,
        ];
        for name in scalars
            .map(ScalarParam::name)
            .into_iter()
            .chain([VectorArrayParam::RevealPoints.name()])
        {
            assert!(shader.contains(&format!("    {name}: ")), "{name} missing");
        }
    }

    #[test]
    fn writes_to_unbound_surface_are_noops() {
        let mut bridge = MaterialParameterBridge::default();
        assert!(!bridge.set_color_alpha(A, 0.5));
        assert!(!bridge.set_scalar(A, ScalarParam::RevealRadius, 2.0));
        assert!(!bridge.swap_material(A, SurfaceMaterialKind::WallSolid));
        assert!(bridge.take_dirty_surfaces().is_empty());
    }

    #[test]
    fn only_changed_surfaces_are_flushed() {
        let mut bridge = MaterialParameterBridge::default();
        bridge.bind_surface(A);
        assert_eq!(bridge.take_dirty_surfaces().len(), 1);

        bridge.set_color_alpha(A, 0.0);
        assert!(bridge.take_dirty_surfaces().is_empty());

        bridge.set_color_alpha(A, 0.3);
        let dirty = bridge.take_dirty_surfaces();
        assert_eq!(dirty.len(), 1);
        assert!((dirty[0].1.color_alpha - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn point_count_is_stored_as_integer() {
        let mut bridge = MaterialParameterBridge::default();
        bridge.bind_surface(A);
        bridge.set_scalar(A, ScalarParam::PointCount, 12.0);
        assert_eq!(bridge.surface_params(A).map(|p| p.point_count), Some(12));
        bridge.set_scalar(A, ScalarParam::PointCount, -4.0);
        assert_eq!(bridge.surface_params(A).map(|p| p.point_count), Some(0));
    }

    #[test]
    fn swap_resets_record_in_place() {
        let mut bridge = MaterialParameterBridge::default();
        bridge.bind_surface(A);
        bridge.set_scalar(A, ScalarParam::RevealRadius, 2.0);
        bridge.set_color_alpha(A, 0.5);

        assert!(bridge.swap_material(A, SurfaceMaterialKind::FloorSolid));
        let params = bridge.surface_params(A).copied().expect("bound");
        assert_eq!(params.kind, SurfaceMaterialKind::FloorSolid);
        assert_eq!(params.color_alpha, 0.0);
        assert!(!params.is_opaque());
        assert_eq!(params.reveal_radius, 2.0);
    }

    #[test]
    fn vector_array_transfer_is_capped() {
        let mut bridge = MaterialParameterBridge::default();
        let points: Vec<Vec3> = (0..100).map(|i| Vec3::splat(i as f32)).collect();

        let transferred = bridge.set_vector_array(VectorArrayParam::RevealPoints, &points);
        assert_eq!(transferred, MAX_REVEAL_POINTS);
        assert_eq!(bridge.reveal_points().len(), MAX_REVEAL_POINTS);
        assert_eq!(bridge.reveal_points()[3], Vec4::new(3.0, 3.0, 3.0, 1.0));
        assert!(bridge.take_reveal_points_dirty());
        assert!(!bridge.take_reveal_points_dirty());
    }

    #[test]
    fn background_alpha_flushes_once_per_change() {
        let mut bridge = MaterialParameterBridge::default();
        bridge.set_background_alpha(0.0);
        assert_eq!(bridge.take_background_alpha(), Some(0.0));
        assert_eq!(bridge.take_background_alpha(), None);

        bridge.set_background_alpha(0.0);
        assert_eq!(bridge.take_background_alpha(), None);

        bridge.set_background_alpha(4.0);
        assert_eq!(bridge.take_background_alpha(), Some(1.0));
    }

    #[test]
    fn released_surface_stops_accepting_writes() {
        let mut bridge = MaterialParameterBridge::default();
        bridge.bind_surface(A);
        assert!(bridge.release_surface(A));
        assert!(!bridge.is_bound(A));
        assert!(!bridge.set_color_alpha(A, 1.0));
        assert!(!bridge.release_surface(A));
    }
}
