use bevy::render::render_resource::ShaderType;
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};

use constants::coverage::MAX_REVEAL_POINTS;
use constants::shader_params::SURFACE_MODE_TRANSPARENT;

use super::bridge::SurfaceMaterialParams;

pub const SURFACE_REVEAL_SHADER: &str = "shaders/surface_reveal.wgsl";

/// Uniform block of `surface_reveal.wgsl`. Field order must match the WGSL
/// struct.
#[derive(Debug, Clone, Copy, ShaderType)]
#[repr(C)]
pub struct SurfaceRevealUniform {
    pub base_color: Vec4,
    pub reveal_radius: f32,
    pub edge_softness: f32,
    pub point_count: u32,
    pub surface_mode: f32,
    pub points: [Vec4; MAX_REVEAL_POINTS], // [x, y, z, 1]
}

impl Default for SurfaceRevealUniform {
    fn default() -> Self {
        Self {
            base_color: Vec4::ZERO,
            reveal_radius: 0.0,
            edge_softness: 0.0,
            point_count: 0,
            surface_mode: SURFACE_MODE_TRANSPARENT,
            points: [Vec4::ZERO; MAX_REVEAL_POINTS],
        }
    }
}

impl SurfaceRevealUniform {
    /// Copies cached scalars and tints the surface with the given colour at
    /// the cached alpha.
    pub fn write_params(&mut self, params: &SurfaceMaterialParams, tint: Color) {
        let tint = tint.to_linear();
        self.base_color = Vec4::new(tint.red, tint.green, tint.blue, params.color_alpha);
        self.reveal_radius = params.reveal_radius;
        self.edge_softness = params.edge_softness;
        self.point_count = params.point_count.min(MAX_REVEAL_POINTS as u32);
        self.surface_mode = params.surface_mode;
    }

    pub fn write_points(&mut self, points: &[Vec4]) {
        self.points = [Vec4::ZERO; MAX_REVEAL_POINTS];
        for (slot, point) in self.points.iter_mut().zip(points) {
            *slot = *point;
        }
    }
}

/// Translucent scanning material: a tinted surface masked by the distance to
/// the recorded evidence points.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct SurfaceRevealMaterial {
    #[uniform(0)]
    pub reveal: SurfaceRevealUniform,
    pub alpha_mode: AlphaMode,
}

impl Default for SurfaceRevealMaterial {
    fn default() -> Self {
        Self {
            reveal: SurfaceRevealUniform::default(),
            alpha_mode: AlphaMode::Blend,
        }
    }
}

impl Material for SurfaceRevealMaterial {
    fn fragment_shader() -> ShaderRef {
        SURFACE_REVEAL_SHADER.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_points_zeroes_stale_entries() {
        let mut uniform = SurfaceRevealUniform::default();
        uniform.write_points(&[Vec4::ONE; 3]);
        uniform.write_points(&[Vec4::new(2.0, 0.0, 2.0, 1.0)]);

        assert_eq!(uniform.points[0], Vec4::new(2.0, 0.0, 2.0, 1.0));
        assert_eq!(uniform.points[1], Vec4::ZERO);
        assert_eq!(uniform.points[2], Vec4::ZERO);
    }

    #[test]
    fn write_params_uses_cached_alpha() {
        let mut uniform = SurfaceRevealUniform::default();
        let mut params = SurfaceMaterialParams::default();
        params.color_alpha = 0.5;
        params.reveal_radius = 2.0;
        params.point_count = 3;
        uniform.write_params(&params, Color::WHITE);

        assert_eq!(uniform.base_color.w, 0.5);
        assert_eq!(uniform.reveal_radius, 2.0);
        assert_eq!(uniform.point_count, 3);
    }
}
