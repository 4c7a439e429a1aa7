use bevy::prelude::*;

use constants::render_settings::OBSERVER_EYE_HEIGHT;

/// Position and view direction of the person wearing the headset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub position: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
}

impl Default for Observer {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, OBSERVER_EYE_HEIGHT, 0.0),
            forward: Vec3::NEG_Z,
        }
    }
}

impl Observer {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.normalize_or(Vec3::NEG_Z),
        }
    }

    /// Angle in degrees between the view direction and `target`.
    /// A target at the observer's own position is straight ahead.
    pub fn angle_to(&self, target: Vec3) -> f32 {
        let to_target = target - self.position;
        if to_target.length_squared() <= f32::EPSILON {
            return 0.0;
        }
        self.forward.angle_between(to_target).to_degrees()
    }

    pub fn distance_to(&self, target: Vec3) -> f32 {
        self.position.distance(target)
    }
}

/// The observer camera is a root entity, so its local transform is its pose.
impl From<&Transform> for Observer {
    fn from(transform: &Transform) -> Self {
        Self::new(transform.translation, transform.forward().as_vec3())
    }
}
