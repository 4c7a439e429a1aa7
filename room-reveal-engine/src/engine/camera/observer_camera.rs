use bevy::input::mouse::MouseMotion;
use bevy::math::EulerRot;
use bevy::prelude::*;

use constants::render_settings::OBSERVER_EYE_HEIGHT;

/// The camera whose pose is the observer. On a headset this is the XR view;
/// natively it is the desktop fly camera.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ObserverCamera;

/// Walk-around controls standing in for head tracking.
#[derive(Component, Debug, Clone, Copy)]
pub struct DesktopObserver {
    pub yaw: f32,
    pub pitch: f32,
    /// Walking speed in metres per second.
    pub speed: f32,
}

impl Default for DesktopObserver {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            speed: 1.4,
        }
    }
}

impl DesktopObserver {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Horizontal displacement for one frame. `input` is (strafe, forward)
    /// in the range [-1, 1]; the eye never leaves its height.
    pub fn walk_step(&self, input: Vec2, delta: f32) -> Vec3 {
        if input == Vec2::ZERO {
            return Vec3::ZERO;
        }
        let heading = Quat::from_rotation_y(self.yaw);
        let forward = heading * Vec3::NEG_Z;
        let right = heading * Vec3::X;
        (right * input.x + forward * input.y).normalize_or_zero() * self.speed * delta
    }
}

pub fn spawn_observer_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, OBSERVER_EYE_HEIGHT, 0.0).looking_to(Vec3::NEG_Z, Vec3::Y),
        ObserverCamera,
        DesktopObserver::default(),
    ));
}

/// WASD to walk, right mouse to look (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn desktop_observer_controller(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut observers: Query<(&mut Transform, &mut DesktopObserver)>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let Ok((mut transform, mut observer)) = observers.single_mut() else {
        return;
    };

    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        let yaw_sens = 0.0035;
        let pitch_sens = 0.0030;
        observer.yaw -= mouse_delta.x * yaw_sens;
        observer.pitch = (observer.pitch - mouse_delta.y * pitch_sens).clamp(-1.55, 1.55);
    }

    let mut input = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        input.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        input.x -= 1.0;
    }

    transform.translation += observer.walk_step(input, time.delta_secs());
    transform.rotation = observer.rotation();
}

/// Placeholder for WASM builds; the pose comes from the XR runtime.
#[cfg(target_arch = "wasm32")]
pub fn desktop_observer_controller() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_forward_follows_yaw_and_keeps_height() {
        let observer = DesktopObserver {
            yaw: std::f32::consts::FRAC_PI_2,
            pitch: 0.4,
            speed: 2.0,
        };
        let step = observer.walk_step(Vec2::new(0.0, 1.0), 0.5);

        assert!((step - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn diagonal_input_is_not_faster() {
        let observer = DesktopObserver::default();
        let step = observer.walk_step(Vec2::new(1.0, 1.0), 1.0);
        assert!((step.length() - observer.speed).abs() < 1e-5);
    }
}
