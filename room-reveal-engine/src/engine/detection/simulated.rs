use std::collections::VecDeque;

use bevy::prelude::*;

use constants::render_settings::SIMULATED_ROOM_HEIGHT;

use super::events::{DetectedSurface, DetectionSubsystem, SurfacesChanged, despawn_removed_surfaces};
use super::permission::{
    ScenePermission, ScenePermissionResult, apply_permission_results, request_scene_permission,
};
use crate::engine::config::reveal_config::RevealConfig;
use crate::engine::core::app_state::AppState;
use crate::engine::reveal::evidence_source::EvidenceMode;
use crate::engine::surfaces::surface::{Surface, SurfaceClassification, SurfaceId};
use crate::engine::systems::reveal_update::RevealSet;

/// Edge length of one simulated mesh chunk.
const CHUNK_SIZE: f32 = 1.0;
const SURFACE_THICKNESS: f32 = 0.02;

const PLANE_INTERVAL_SECS: f32 = 0.75;
const CHUNK_INTERVAL_SECS: f32 = 0.2;
const CHUNKS_PER_BATCH: usize = 4;

pub struct SimulatedDetectionPlugin;

impl Plugin for SimulatedDetectionPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DetectionSubsystem::new("simulated"))
            .init_resource::<ScenePermission>()
            .add_event::<ScenePermissionResult>()
            .add_event::<SurfacesChanged>()
            .add_systems(Startup, request_scene_permission)
            .add_systems(Update, apply_permission_results)
            .add_systems(
                Update,
                announce_simulated_surfaces
                    .before(RevealSet::Ingest)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(Update, despawn_removed_surfaces.after(RevealSet::Ingest));
    }
}

/// Surfaces of the synthetic room still waiting to be announced.
#[derive(Resource, Debug)]
pub struct SimulatedRoom {
    pending: VecDeque<Surface>,
    timer: Timer,
    batch_size: usize,
}

impl SimulatedRoom {
    pub fn new(mode: EvidenceMode, room_size: f32) -> Self {
        let (interval, batch_size) = match mode {
            EvidenceMode::Gaze => (PLANE_INTERVAL_SECS, 1),
            EvidenceMode::Movement => (CHUNK_INTERVAL_SECS, CHUNKS_PER_BATCH),
        };
        Self {
            pending: simulated_room(mode, room_size, SIMULATED_ROOM_HEIGHT).into(),
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
            batch_size,
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn next_batch(&mut self) -> Vec<Surface> {
        let count = self.batch_size.min(self.pending.len());
        self.pending.drain(..count).collect()
    }
}

/// Square room centred on the origin: six planes for gaze mode, or a grid of
/// mesh chunks over floor and walls for movement mode.
pub fn simulated_room(mode: EvidenceMode, room_size: f32, height: f32) -> Vec<Surface> {
    match mode {
        EvidenceMode::Gaze => room_planes(room_size, height),
        EvidenceMode::Movement => room_chunks(room_size, height),
    }
}

fn room_planes(room_size: f32, height: f32) -> Vec<Surface> {
    let half = room_size * 0.5;
    let mid = height * 0.5;
    let specs = [
        (Vec3::ZERO, Vec3::Y, Vec3::new(half, 0.0, half), SurfaceClassification::Floor),
        (Vec3::new(0.0, height, 0.0), Vec3::NEG_Y, Vec3::new(half, 0.0, half), SurfaceClassification::Ceiling),
        (Vec3::new(0.0, mid, -half), Vec3::Z, Vec3::new(half, mid, 0.0), SurfaceClassification::Wall),
        (Vec3::new(0.0, mid, half), Vec3::NEG_Z, Vec3::new(half, mid, 0.0), SurfaceClassification::Wall),
        (Vec3::new(-half, mid, 0.0), Vec3::X, Vec3::new(0.0, mid, half), SurfaceClassification::Wall),
        (Vec3::new(half, mid, 0.0), Vec3::NEG_X, Vec3::new(0.0, mid, half), SurfaceClassification::Wall),
    ];

    specs
        .into_iter()
        .enumerate()
        .map(|(i, (center, normal, half_extents, classification))| {
            Surface::new(SurfaceId(i as u64), center, normal)
                .with_half_extents(half_extents)
                .with_classification(classification)
        })
        .collect()
}

fn room_chunks(room_size: f32, height: f32) -> Vec<Surface> {
    let half = room_size * 0.5;
    let columns = (room_size / CHUNK_SIZE).ceil().max(1.0) as usize;
    let rows = (height / CHUNK_SIZE).ceil().max(1.0) as usize;
    let side = room_size / columns as f32;
    let row_height = height / rows as f32;
    let along = |i: usize| -half + (i as f32 + 0.5) * side;

    let mut chunks = Vec::with_capacity(columns * columns + 4 * columns * rows);
    let mut push = |center: Vec3, normal: Vec3, half_extents: Vec3, class| {
        let id = SurfaceId(chunks.len() as u64);
        chunks.push(
            Surface::new(id, center, normal)
                .with_half_extents(half_extents)
                .with_classification(class),
        );
    };

    for i in 0..columns {
        for j in 0..columns {
            push(
                Vec3::new(along(i), 0.0, along(j)),
                Vec3::Y,
                Vec3::new(side * 0.5, 0.0, side * 0.5),
                SurfaceClassification::Floor,
            );
        }
    }

    for i in 0..columns {
        for k in 0..rows {
            let y = (k as f32 + 0.5) * row_height;
            let z_extent = Vec3::new(side * 0.5, row_height * 0.5, 0.0);
            let x_extent = Vec3::new(0.0, row_height * 0.5, side * 0.5);
            push(Vec3::new(along(i), y, -half), Vec3::Z, z_extent, SurfaceClassification::Wall);
            push(Vec3::new(along(i), y, half), Vec3::NEG_Z, z_extent, SurfaceClassification::Wall);
            push(Vec3::new(-half, y, along(i)), Vec3::X, x_extent, SurfaceClassification::Wall);
            push(Vec3::new(half, y, along(i)), Vec3::NEG_X, x_extent, SurfaceClassification::Wall);
        }
    }

    chunks
}

fn announce_simulated_surfaces(
    mut commands: Commands,
    time: Res<Time>,
    permission: Res<ScenePermission>,
    config: Option<Res<RevealConfig>>,
    room: Option<ResMut<SimulatedRoom>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut events: EventWriter<SurfacesChanged>,
) {
    if !permission.is_granted() {
        return;
    }

    let Some(mut room) = room else {
        let Some(config) = config else {
            return;
        };
        let room = SimulatedRoom::new(config.evidence_mode, config.room_size);
        info!("Simulated room prepared with {} surfaces", room.remaining());
        commands.insert_resource(room);
        return;
    };

    if !room.timer.tick(time.delta()).just_finished() {
        return;
    }

    let batch = room.next_batch();
    if batch.is_empty() {
        return;
    }

    for surface in &batch {
        let size = (surface.half_extents * 2.0).max(Vec3::splat(SURFACE_THICKNESS));
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            Transform::from_translation(surface.center),
            DetectedSurface { id: surface.id },
        ));
    }

    if room.remaining() == 0 {
        info!("Simulated room fully announced");
    }
    events.write(SurfacesChanged::added(batch));
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::engine::surfaces::surface::FloorClassifier;

    #[test]
    fn gaze_room_is_six_planes_with_one_floor() {
        let planes = simulated_room(EvidenceMode::Gaze, 5.0, 2.6);
        assert_eq!(planes.len(), 6);

        let classifier = FloorClassifier::default();
        let floors = planes.iter().filter(|p| classifier.is_floor(p, 1.6)).count();
        assert_eq!(floors, 1);
    }

    #[test]
    fn movement_room_covers_floor_and_walls_in_chunks() {
        let chunks = simulated_room(EvidenceMode::Movement, 5.0, 2.6);
        assert_eq!(chunks.len(), 25 + 4 * 5 * 3);

        let ids: HashSet<_> = chunks.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), chunks.len());
    }

    #[test]
    fn batches_drain_the_room() {
        let mut room = SimulatedRoom::new(EvidenceMode::Movement, 2.0);
        let total = room.remaining();
        let mut announced = 0;
        while room.remaining() > 0 {
            let batch = room.next_batch();
            assert!(batch.len() <= CHUNKS_PER_BATCH);
            announced += batch.len();
        }
        assert_eq!(announced, total);
        assert!(room.next_batch().is_empty());
    }
}
