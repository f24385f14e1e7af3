use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use crate::engine::assets::morph_manifest::MorphManifest;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::mesh::point_cloud_mesh::{MorphPointCloud, create_point_cloud_mesh};
use crate::engine::morph::context::MorphContext;
use crate::engine::render::point_cloud_material::PointCloudMaterial;

pub fn create_point_cloud_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PointCloudMaterial>>,
    manifest: Option<Res<MorphManifest>>,
    context: Option<Res<MorphContext>>,
) {
    if loading_progress.point_cloud_created || !loading_progress.targets_sampled {
        return;
    }
    let (Some(manifest), Some(context)) = (manifest, context) else {
        return;
    };

    // Seed the active buffer with the current phase so the first frame is
    // already in place.
    let mut point_cloud = MorphPointCloud::new(context.point_count());
    if let Err(err) = context.blend_into(&mut point_cloud.active) {
        error!("Failed to build initial point cloud: {}", err);
        loading_progress.fail(err.to_string());
        return;
    }
    point_cloud.applied_phase = Some(context.phase());

    let mesh = create_point_cloud_mesh(&point_cloud.active);
    let material = PointCloudMaterial::new(manifest.point_colour, manifest.point_size);

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(material)),
        Transform::from_translation(Vec3::ZERO),
        point_cloud,
        // Positions move every frame, so the loaded AABB never holds.
        NoFrustumCulling,
        NotShadowCaster,
    ));

    info!(
        "Point cloud entity spawned with {} points across {} targets",
        context.point_count(),
        context.targets().len()
    );
    loading_progress.point_cloud_created = true;
}
