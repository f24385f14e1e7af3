use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::math::primitives::Triangle3d;
use bevy::prelude::*;

use crate::engine::assets::morph_assets::MorphAssets;
use crate::engine::assets::morph_manifest::{MorphManifest, TargetDefinition};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::morph::context::MorphContext;
use crate::engine::morph::error::MorphError;
use crate::engine::morph::interpolator::TargetPointSet;
use crate::engine::sampling::mesh_surface::collect_gltf_triangles;
use crate::engine::sampling::normalize::normalize_surface;
use crate::engine::sampling::surface_sampler::SurfaceSampler;

/// Normalise a merged surface and sample exactly `point_count` points from it.
/// `index` is the target's position in the manifest and selects its seed.
pub fn sample_target(
    definition: &TargetDefinition,
    mut triangles: Vec<Triangle3d>,
    manifest: &MorphManifest,
    index: usize,
) -> Result<TargetPointSet, MorphError> {
    normalize_surface(&mut triangles, manifest.fit_size, definition.scale)?;

    let sampler = match &definition.triangle_weights {
        Some(weights) => SurfaceSampler::with_weights(triangles, weights.clone())?,
        None => SurfaceSampler::new(triangles)?,
    };
    debug!(
        "Target '{}' merged into {} triangles",
        definition.name,
        sampler.triangle_count()
    );
    let points = sampler.sample_seeded(
        manifest.point_count,
        manifest.jitter,
        manifest.target_seed(index),
    );

    Ok(TargetPointSet::new(definition.name.clone(), points))
}

// Sample every target once all glTF assets are in memory
pub fn sample_targets_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    morph_assets: Res<MorphAssets>,
    manifest: Option<Res<MorphManifest>>,
    context: Option<ResMut<MorphContext>>,
    gltfs: Res<Assets<Gltf>>,
    nodes: Res<Assets<GltfNode>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    meshes: Res<Assets<Mesh>>,
) {
    if loading_progress.targets_sampled
        || !loading_progress.targets_loaded
        || loading_progress.failure.is_some()
    {
        return;
    }
    let (Some(manifest), Some(mut context)) = (manifest, context) else {
        return;
    };

    for (index, (definition, asset)) in manifest
        .targets
        .iter()
        .zip(&morph_assets.targets)
        .enumerate()
    {
        let sampled = gltfs
            .get(&asset.handle)
            .ok_or_else(|| MorphError::MissingAsset {
                target: definition.name.clone(),
            })
            .and_then(|gltf| {
                let triangles = collect_gltf_triangles(gltf, &nodes, &gltf_meshes, &meshes);
                sample_target(definition, triangles, &manifest, index)
            })
            .and_then(|points| context.push_target(points));

        if let Err(err) = sampled {
            error!("Failed to sample target '{}': {}", definition.name, err);
            loading_progress.fail(format!("target '{}': {}", definition.name, err));
            return;
        }
        info!(
            "✓ Sampled {} points on target '{}'",
            manifest.point_count, definition.name
        );
    }

    loading_progress.targets_sampled = context.is_ready();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> MorphManifest {
        serde_json::from_str(
            r#"{
                "point_count": 200,
                "fit_size": 4.0,
                "jitter": 0.0,
                "seed": 7,
                "targets": [
                    { "name": "quad", "path": "quad.gltf" },
                    { "name": "big", "path": "big.gltf", "scale": 2.0 }
                ]
            }"#,
        )
        .unwrap()
    }

    fn quad(size: f32, offset: Vec3) -> Vec<Triangle3d> {
        let a = offset;
        let b = offset + Vec3::new(size, 0.0, 0.0);
        let c = offset + Vec3::new(size, size, 0.0);
        let d = offset + Vec3::new(0.0, size, 0.0);
        vec![Triangle3d::new(a, b, c), Triangle3d::new(a, c, d)]
    }

    #[test]
    fn samples_fitted_surface() {
        let manifest = manifest();
        let target = sample_target(
            &manifest.targets[0],
            quad(30.0, Vec3::new(100.0, -4.0, 2.0)),
            &manifest,
            0,
        )
        .unwrap();

        assert_eq!(target.name, "quad");
        assert_eq!(target.len(), 200);
        for [x, y, z] in &target.points {
            assert!(x.abs() <= 2.0 + 1e-4 && y.abs() <= 2.0 + 1e-4);
            assert!(z.abs() < 1e-4);
        }
    }

    #[test]
    fn explicit_scale_applies_once() {
        let manifest = manifest();
        let target = sample_target(&manifest.targets[1], quad(1.0, Vec3::ZERO), &manifest, 1).unwrap();
        let max_extent = target
            .points
            .iter()
            .map(|[x, y, _]| x.abs().max(y.abs()))
            .fold(0.0f32, f32::max);
        assert!(max_extent <= 4.0 + 1e-4);
        assert!(max_extent > 3.0);
    }

    #[test]
    fn reproducible_per_target_index() {
        let manifest = manifest();
        let first = sample_target(&manifest.targets[0], quad(1.0, Vec3::ZERO), &manifest, 0).unwrap();
        let again = sample_target(&manifest.targets[0], quad(1.0, Vec3::ZERO), &manifest, 0).unwrap();
        let other = sample_target(&manifest.targets[0], quad(1.0, Vec3::ZERO), &manifest, 1).unwrap();
        assert_eq!(first, again);
        assert_ne!(first.points, other.points);
    }

    #[test]
    fn weight_count_must_match_merged_surface() {
        let mut manifest = manifest();
        manifest.targets[0].triangle_weights = Some(vec![1.0]);
        let err = sample_target(&manifest.targets[0], quad(1.0, Vec3::ZERO), &manifest, 0).unwrap_err();
        assert_eq!(
            err,
            MorphError::WeightCountMismatch {
                weights: 1,
                triangles: 2
            }
        );
    }

    #[test]
    fn empty_surface_is_rejected() {
        let manifest = manifest();
        let err = sample_target(&manifest.targets[0], Vec::new(), &manifest, 0).unwrap_err();
        assert_eq!(err, MorphError::EmptySurface);
    }
}
