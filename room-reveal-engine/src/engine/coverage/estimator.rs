use bevy::prelude::*;

use crate::engine::surfaces::registry::SurfaceRegistry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoverageStrategy {
    /// XZ bounding-box area of the evidence over `room_size²`.
    BoundingBox { room_size: f32 },
    /// Revealed surfaces over tracked surfaces.
    FractionRevealed,
}

/// Holds the most recent coverage value and the completion target.
#[derive(Debug, Clone)]
pub struct CoverageEstimator {
    strategy: CoverageStrategy,
    target: f32,
    current: f32,
}

impl CoverageEstimator {
    pub fn new(strategy: CoverageStrategy, target: f32) -> Self {
        Self {
            strategy,
            target,
            current: 0.0,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }

    /// Recomputes coverage after evidence, a reveal or added surfaces.
    ///
    /// Keeps the high-water mark: a new unrevealed surface grows the
    /// fraction-revealed denominator but never lowers the reported value.
    pub fn recompute(&mut self, evidence: &[Vec3], registry: &SurfaceRegistry) -> f32 {
        self.current = self.current.max(self.raw(evidence, registry));
        self.current
    }

    /// Recomputes coverage after surfaces were removed.
    ///
    /// Stores the raw value, so fraction-revealed coverage drops when a
    /// revealed surface leaves and rises when an unrevealed one does.
    pub fn recompute_after_removal(
        &mut self,
        evidence: &[Vec3],
        registry: &SurfaceRegistry,
    ) -> f32 {
        self.current = self.raw(evidence, registry);
        self.current
    }

    fn raw(&self, evidence: &[Vec3], registry: &SurfaceRegistry) -> f32 {
        match self.strategy {
            CoverageStrategy::BoundingBox { room_size } => {
                bounding_box_coverage(evidence, room_size)
            }
            CoverageStrategy::FractionRevealed => fraction_revealed_coverage(registry),
        }
    }

    /// Operator override: report the room as fully covered.
    pub fn force_full(&mut self) {
        self.current = 1.0;
    }
}

/// `clamp01(xExtent × zExtent / room_size²)`; fewer than two points is 0.
pub fn bounding_box_coverage(points: &[Vec3], room_size: f32) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }

    let room_area = room_size * room_size;
    if room_area <= f32::EPSILON || !room_area.is_finite() {
        return 0.0;
    }

    let (min, max) = points[1..]
        .iter()
        .fold((points[0], points[0]), |(min, max), p| (min.min(*p), max.max(*p)));

    let revealed_area = (max.x - min.x) * (max.z - min.z);
    (revealed_area / room_area).clamp(0.0, 1.0)
}

/// `revealed / total`; an empty registry is 0.
pub fn fraction_revealed_coverage(registry: &SurfaceRegistry) -> f32 {
    if registry.is_empty() {
        return 0.0;
    }
    registry.revealed_count() as f32 / registry.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::observer::Observer;
    use crate::engine::materials::bridge::MaterialParameterBridge;
    use crate::engine::surfaces::surface::{Surface, SurfaceId};

    fn registry_with(total: u64, revealed: u64) -> SurfaceRegistry {
        let mut registry = SurfaceRegistry::default();
        let mut bridge = MaterialParameterBridge::default();
        let surfaces: Vec<Surface> = (0..total)
            .map(|i| Surface::new(SurfaceId(i), Vec3::new(i as f32, 1.0, -2.0), Vec3::Z))
            .collect();
        registry.on_surfaces_added(&surfaces, &Observer::default(), &mut bridge);
        for i in 0..revealed {
            registry
                .get_mut(SurfaceId(i))
                .expect("tracked")
                .state
                .mark_revealed();
        }
        registry
    }

    #[test]
    fn fewer_than_two_points_is_zero() {
        assert_eq!(bounding_box_coverage(&[], 5.0), 0.0);
        assert_eq!(bounding_box_coverage(&[Vec3::new(3.0, 0.0, 3.0)], 5.0), 0.0);
    }

    #[test]
    fn opposite_corners_cover_whole_room() {
        let points = [Vec3::ZERO, Vec3::new(5.0, 0.0, 5.0)];
        assert_eq!(bounding_box_coverage(&points, 5.0), 1.0);

        let mut estimator =
            CoverageEstimator::new(CoverageStrategy::BoundingBox { room_size: 5.0 }, 0.8);
        estimator.recompute(&points, &SurfaceRegistry::default());
        assert!(estimator.is_complete());
    }

    #[test]
    fn bounding_box_ignores_height_and_clamps() {
        let points = [
            Vec3::new(0.0, -3.0, 0.0),
            Vec3::new(1.0, 9.0, 2.0),
            Vec3::new(0.5, 0.0, 1.0),
        ];
        let coverage = bounding_box_coverage(&points, 5.0);
        assert!((coverage - 2.0 / 25.0).abs() < 1e-6, "got {coverage}");

        let far = [Vec3::new(-10.0, 0.0, -10.0), Vec3::new(10.0, 0.0, 10.0)];
        assert_eq!(bounding_box_coverage(&far, 5.0), 1.0);
    }

    #[test]
    fn straight_line_path_has_no_area() {
        let points = [Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)];
        assert_eq!(bounding_box_coverage(&points, 5.0), 0.0);
    }

    #[test]
    fn degenerate_room_size_reports_zero() {
        let points = [Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)];
        assert_eq!(bounding_box_coverage(&points, 0.0), 0.0);
    }

    #[test]
    fn eight_of_ten_revealed_meets_default_target() {
        let registry = registry_with(10, 8);
        assert!((fraction_revealed_coverage(&registry) - 0.8).abs() < f32::EPSILON);

        let mut estimator = CoverageEstimator::new(CoverageStrategy::FractionRevealed, 0.8);
        estimator.recompute(&[], &registry);
        assert!(estimator.is_complete());
    }

    #[test]
    fn fraction_is_exact_and_bounded() {
        for (total, revealed) in [(1, 0), (1, 1), (3, 1), (7, 7), (12, 5)] {
            let registry = registry_with(total, revealed);
            let coverage = fraction_revealed_coverage(&registry);
            assert_eq!(coverage, revealed as f32 / total as f32);
            assert!((0.0..=1.0).contains(&coverage));
        }
    }

    #[test]
    fn empty_registry_is_zero() {
        assert_eq!(fraction_revealed_coverage(&SurfaceRegistry::default()), 0.0);
    }

    #[test]
    fn added_surfaces_keep_the_high_water_mark() {
        let mut estimator = CoverageEstimator::new(CoverageStrategy::FractionRevealed, 0.8);
        estimator.recompute(&[], &registry_with(2, 1));
        assert_eq!(estimator.current(), 0.5);

        let grown = registry_with(3, 1);
        assert!((fraction_revealed_coverage(&grown) - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(estimator.recompute(&[], &grown), 0.5);

        assert_eq!(estimator.recompute(&[], &registry_with(3, 2)), 2.0 / 3.0);
    }

    #[test]
    fn removal_reports_the_raw_fraction() {
        let mut estimator = CoverageEstimator::new(CoverageStrategy::FractionRevealed, 0.8);
        estimator.recompute(&[], &registry_with(2, 1));
        assert_eq!(estimator.recompute_after_removal(&[], &registry_with(2, 0)), 0.0);
    }

    #[test]
    fn growing_path_never_lowers_coverage() {
        let path = [
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.5),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(2.0, 0.0, 3.0),
            Vec3::new(-1.0, 0.0, 1.0),
        ];
        let mut last = 0.0;
        for len in 1..=path.len() {
            let coverage = bounding_box_coverage(&path[..len], 5.0);
            assert!(coverage >= last);
            last = coverage;
        }
    }
}
