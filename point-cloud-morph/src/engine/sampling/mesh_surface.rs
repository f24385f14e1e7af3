use std::collections::HashSet;

use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::math::Affine3A;
use bevy::math::primitives::Triangle3d;
use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};

/// Append the triangles of `mesh`, transformed into world space, to `out`.
/// Returns the number of triangles added.
///
/// Only triangle lists are sampled; other topologies contribute nothing.
pub fn mesh_triangles(mesh: &Mesh, world_from_local: &Affine3A, out: &mut Vec<Triangle3d>) -> usize {
    if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
        warn!(
            "Skipping mesh primitive with {:?} topology",
            mesh.primitive_topology()
        );
        return 0;
    }

    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        warn!("Skipping mesh primitive without Float32x3 positions");
        return 0;
    };

    let world: Vec<Vec3> = positions
        .iter()
        .map(|p| world_from_local.transform_point3(Vec3::from_array(*p)))
        .collect();

    let indices: Vec<usize> = match mesh.indices() {
        Some(indices) => indices.iter().collect(),
        None => (0..world.len()).collect(),
    };

    let before = out.len();
    for corner in indices.chunks_exact(3) {
        let (Some(a), Some(b), Some(c)) = (
            world.get(corner[0]),
            world.get(corner[1]),
            world.get(corner[2]),
        ) else {
            continue;
        };
        out.push(Triangle3d::new(*a, *b, *c));
    }
    out.len() - before
}

/// Merge every mesh primitive of a loaded glTF into one world-space triangle
/// list, composing node transforms down the hierarchy.
pub fn collect_gltf_triangles(
    gltf: &Gltf,
    nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
) -> Vec<Triangle3d> {
    let mut triangles = Vec::new();

    if gltf.nodes.is_empty() {
        for gltf_mesh in gltf.meshes.iter().filter_map(|h| gltf_meshes.get(h)) {
            append_primitives(gltf_mesh, meshes, &Affine3A::IDENTITY, &mut triangles);
        }
        return triangles;
    }

    let child_ids: HashSet<AssetId<GltfNode>> = gltf
        .nodes
        .iter()
        .filter_map(|handle| nodes.get(handle))
        .flat_map(|node| node.children.iter().map(Handle::id))
        .collect();

    let mut stack: Vec<(Handle<GltfNode>, Affine3A)> = gltf
        .nodes
        .iter()
        .filter(|handle| !child_ids.contains(&handle.id()))
        .map(|handle| (handle.clone(), Affine3A::IDENTITY))
        .collect();

    while let Some((handle, world_from_parent)) = stack.pop() {
        let Some(node) = nodes.get(&handle) else {
            continue;
        };
        let world_from_local = world_from_parent * node.transform.compute_affine();

        if let Some(gltf_mesh) = node.mesh.as_ref().and_then(|h| gltf_meshes.get(h)) {
            append_primitives(gltf_mesh, meshes, &world_from_local, &mut triangles);
        }

        stack.extend(
            node.children
                .iter()
                .map(|child| (child.clone(), world_from_local)),
        );
    }

    triangles
}

fn append_primitives(
    gltf_mesh: &GltfMesh,
    meshes: &Assets<Mesh>,
    world_from_local: &Affine3A,
    out: &mut Vec<Triangle3d>,
) {
    for primitive in &gltf_mesh.primitives {
        if let Some(mesh) = meshes.get(&primitive.mesh) {
            mesh_triangles(mesh, world_from_local, out);
        }
    }
}
