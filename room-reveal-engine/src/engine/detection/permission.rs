use bevy::prelude::*;

use constants::reveal::SCENE_PERMISSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    #[default]
    NotRequested,
    Requested,
    Granted,
    Denied,
}

/// Runtime capability the headset needs before it hands out scene data.
#[derive(Resource, Debug, Clone)]
pub struct ScenePermission {
    pub capability: &'static str,
    status: PermissionStatus,
}

impl Default for ScenePermission {
    fn default() -> Self {
        Self {
            capability: SCENE_PERMISSION,
            status: PermissionStatus::NotRequested,
        }
    }
}

impl ScenePermission {
    pub fn status(&self) -> PermissionStatus {
        self.status
    }

    pub fn is_granted(&self) -> bool {
        self.status == PermissionStatus::Granted
    }

    /// Starts the one-shot request. Returns false if one was already made.
    pub fn mark_requested(&mut self) -> bool {
        if self.status != PermissionStatus::NotRequested {
            return false;
        }
        self.status = PermissionStatus::Requested;
        true
    }

    pub fn resolve(&mut self, granted: bool) {
        self.status = if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
    }
}

/// Answer from the platform permission dialog.
///
/// Sent by the Android platform layer once the user answers the prompt; the
/// engine itself never produces it.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScenePermissionResult {
    pub granted: bool,
}

/// Issues the request once. Only Android headsets gate scene data behind a
/// runtime prompt; every other target is treated as already granted.
///
/// On Android this only logs and marks the request. The status stays
/// `Requested` until the platform layer sends a [`ScenePermissionResult`].
pub fn request_scene_permission(mut permission: ResMut<ScenePermission>) {
    if !permission.mark_requested() {
        return;
    }

    #[cfg(target_os = "android")]
    {
        info!("Requesting scene permission {}", permission.capability);
    }

    #[cfg(not(target_os = "android"))]
    {
        info!("Scene permission {} already granted", permission.capability);
        permission.resolve(true);
    }
}

pub fn apply_permission_results(
    mut results: EventReader<ScenePermissionResult>,
    mut permission: ResMut<ScenePermission>,
) {
    for result in results.read() {
        permission.resolve(result.granted);
        if result.granted {
            info!("Scene permission {} granted", permission.capability);
        } else {
            warn!(
                "Scene permission {} denied, no surfaces will be detected",
                permission.capability
            );
        }
    }
}
