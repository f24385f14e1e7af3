use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::assets::morph_manifest::MorphManifest;

/// Load status of a single morph target.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetStatus {
    Loading,
    Loaded,
    /// Gave up after exhausting reload attempts.
    Failed(String),
}

/// Handle and bookkeeping for one target's glTF asset.
#[derive(Debug, Clone)]
pub struct TargetAsset {
    pub name: String,
    pub path: String,
    pub handle: Handle<Gltf>,
    pub status: TargetStatus,
    pub retries: u32,
    /// Elapsed time before which a reloading target is not polled again.
    pub retry_after: f64,
}

impl TargetAsset {
    pub fn new(name: impl Into<String>, path: impl Into<String>, handle: Handle<Gltf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            handle,
            status: TargetStatus::Loading,
            retries: 0,
            retry_after: 0.0,
        }
    }
}

/// Asset handles for the morph scene: the manifest and every target, in
/// manifest order.
#[derive(Resource, Default)]
pub struct MorphAssets {
    pub manifest: Option<Handle<MorphManifest>>,
    pub targets: Vec<TargetAsset>,
}

impl MorphAssets {
    pub fn all_loaded(&self) -> bool {
        !self.targets.is_empty()
            && self
                .targets
                .iter()
                .all(|target| target.status == TargetStatus::Loaded)
    }

    /// `(name, loaded)` pairs for progress reporting.
    pub fn loading_states(&self) -> Vec<(String, i32)> {
        self.targets
            .iter()
            .map(|target| {
                (
                    target.name.clone(),
                    i32::from(target.status == TargetStatus::Loaded),
                )
            })
            .collect()
    }
}
