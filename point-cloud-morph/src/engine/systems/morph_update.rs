use bevy::prelude::*;

use crate::engine::mesh::point_cloud_mesh::{MorphPointCloud, write_point_positions};
use crate::engine::morph::context::MorphContext;
use crate::engine::morph::interpolator::phase_indices;
use crate::engine::scroll::scroll_state::ScrollState;
use crate::rpc::web_rpc::WebRpcInterface;

/// Scroll handler: remap the latest scroll signal into the morph phase.
pub fn update_morph_phase(scroll: Res<ScrollState>, mut context: ResMut<MorphContext>) {
    if !scroll.is_changed() {
        return;
    }
    let phase = context.apply_scroll(scroll.normalized());
    trace!("Scroll {:.3} -> phase {:.4}", scroll.normalized(), phase);
}

/// Frame update: blend the neighbouring targets into each point cloud's
/// active buffer and push it into the mesh. Frames where the phase has not
/// moved are skipped.
pub fn update_morph_positions(
    context: Res<MorphContext>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut point_clouds: Query<(&Mesh3d, &mut MorphPointCloud)>,
    mut warned: Local<bool>,
) {
    let phase = context.phase();
    for (mesh_handle, mut point_cloud) in &mut point_clouds {
        if point_cloud.applied_phase == Some(phase) {
            continue;
        }

        if let Err(err) = context.blend_into(&mut point_cloud.active) {
            if !*warned {
                warn!("Skipping morph update: {}", err);
                *warned = true;
            }
            continue;
        }

        let Some(mesh) = meshes.get_mut(&mesh_handle.0) else {
            continue;
        };
        if let Err(err) = write_point_positions(mesh, &point_cloud.active) {
            if !*warned {
                warn!("Skipping morph update: {}", err);
                *warned = true;
            }
            continue;
        }
        point_cloud.applied_phase = Some(phase);
    }
}

pub fn phase_notification_system(
    context: Res<MorphContext>,
    scroll: Res<ScrollState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_phase: Local<Option<f32>>,
) {
    let phase = context.phase();
    if *last_phase == Some(phase) {
        return;
    }
    *last_phase = Some(phase);

    let (lower, upper, t) = phase_indices(phase, context.targets().len());
    let name = |index: usize| context.targets().get(index).map(|target| target.name.clone());
    rpc_interface.send_notification(
        "phase_update",
        serde_json::json!({
            "phase": phase,
            "scroll": scroll.normalized(),
            "from": name(lower),
            "to": name(upper),
            "blend": t
        }),
    );
}
