use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};
use constants::render_settings::VERTICES_PER_POINT;

use crate::engine::morph::error::MorphError;

/// Marker for the morphing point cloud entity. Holds the active buffer the
/// interpolator writes each frame before it is expanded into the mesh.
#[derive(Component, Debug, Default)]
pub struct MorphPointCloud {
    pub active: Vec<[f32; 3]>,
    /// Phase last written into the mesh, `None` until the first blend.
    pub applied_phase: Option<f32>,
}

impl MorphPointCloud {
    pub fn new(point_count: usize) -> Self {
        Self {
            active: vec![[0.0; 3]; point_count],
            applied_phase: None,
        }
    }

    pub fn point_count(&self) -> usize {
        self.active.len()
    }
}

const QUAD_CORNERS: [[f32; 2]; VERTICES_PER_POINT] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

/// Triangle list with six vertices per point. The main world keeps a copy so
/// positions can be rewritten every frame.
pub fn create_point_cloud_mesh(points: &[[f32; 3]]) -> Mesh {
    let positions: Vec<[f32; 3]> = points
        .iter()
        .flat_map(|point| [*point; VERTICES_PER_POINT])
        .collect();
    let corners: Vec<[f32; 2]> = (0..points.len()).flat_map(|_| QUAD_CORNERS).collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
}

/// Overwrite the point positions of a mesh built by [`create_point_cloud_mesh`].
pub fn write_point_positions(mesh: &mut Mesh, points: &[[f32; 3]]) -> Result<(), MorphError> {
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
    else {
        return Err(MorphError::LengthMismatch {
            target: "point cloud mesh".into(),
            expected: points.len(),
            actual: 0,
        });
    };

    if positions.len() != points.len() * VERTICES_PER_POINT {
        return Err(MorphError::LengthMismatch {
            target: "point cloud mesh".into(),
            expected: points.len(),
            actual: positions.len() / VERTICES_PER_POINT,
        });
    }

    for (quad, point) in positions.chunks_exact_mut(VERTICES_PER_POINT).zip(points) {
        quad.fill(*point);
    }
    Ok(())
}
