use bevy::prelude::*;

/// Observer positions sampled along the walked path.
///
/// Consecutive points are at least `min_spacing` apart. The full sequence is
/// kept for coverage; only the first `transfer_cap` points go to the renderer.
#[derive(Debug, Clone)]
pub struct EvidenceTrail {
    points: Vec<Vec3>,
    min_spacing: f32,
    transfer_cap: usize,
}

impl EvidenceTrail {
    pub fn new(min_spacing: f32, transfer_cap: usize) -> Self {
        Self {
            points: Vec::new(),
            min_spacing: min_spacing.max(0.0),
            transfer_cap,
        }
    }

    /// Records `position` if it is far enough from the last point.
    /// The first position is always recorded.
    pub fn record(&mut self, position: Vec3) -> bool {
        if let Some(last) = self.points.last() {
            if last.distance(position) < self.min_spacing {
                return false;
            }
        }
        self.points.push(position);
        true
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// The prefix of the trail that fits the renderer's point array.
    pub fn transfer_view(&self) -> &[Vec3] {
        let len = self.points.len().min(self.transfer_cap);
        &self.points[..len]
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_point_is_always_recorded() {
        let mut trail = EvidenceTrail::new(0.5, 64);
        assert!(trail.record(Vec3::ZERO));
        assert_eq!(trail.points().len(), 1);
    }

    #[test]
    fn enforces_minimum_spacing_against_last_point() {
        let mut trail = EvidenceTrail::new(0.5, 64);
        trail.record(Vec3::ZERO);
        assert!(!trail.record(Vec3::new(0.3, 0.0, 0.0)));
        assert!(trail.record(Vec3::new(0.5, 0.0, 0.0)));
        assert!(!trail.record(Vec3::new(0.6, 0.0, 0.2)));
        assert_eq!(trail.points().len(), 2);
        assert_eq!(trail.points().last(), Some(&Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn transfer_view_is_capped_but_trail_is_not() {
        let mut trail = EvidenceTrail::new(1.0, 4);
        for i in 0..10 {
            trail.record(Vec3::new(i as f32, 0.0, 0.0));
        }
        assert_eq!(trail.points().len(), 10);
        assert_eq!(trail.transfer_view().len(), 4);
        assert_eq!(trail.transfer_view()[3].x, 3.0);
    }
}
