use bevy::prelude::*;

use crate::engine::mesh::point_cloud_mesh::MorphPointCloud;
use crate::engine::morph::context::MorphContext;
use crate::engine::morph::interpolator::phase_indices;
use crate::engine::scroll::scroll_state::ScrollState;

pub fn debug_morph_state(
    context: Res<MorphContext>,
    scroll: Res<ScrollState>,
    point_clouds: Query<&MorphPointCloud>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }

    let (lower, upper, t) = phase_indices(context.phase(), context.targets().len());
    let names: Vec<&str> = context.targets().iter().map(|t| t.name.as_str()).collect();

    info!("=== MORPH DEBUG STATE ===");
    info!(
        "Scroll: {:.1}/{:.1} px ({:.3}) from {:?}",
        scroll.offset,
        scroll.scrollable,
        scroll.normalized(),
        scroll.source
    );
    info!(
        "Phase: {:.4} (targets {} -> {}, t = {:.3})",
        context.phase(),
        lower,
        upper,
        t
    );
    info!(
        "Plateau: [{:.2}, {:.2}]",
        context.plateau().start(),
        context.plateau().end()
    );
    info!("Targets: {:?}, {} points each", names, context.point_count());
    for point_cloud in &point_clouds {
        info!(
            "Point cloud: {} points, applied phase {:?}",
            point_cloud.point_count(),
            point_cloud.applied_phase
        );
    }
}
