use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::prelude::*;

use crate::engine::assets::morph_assets::{MorphAssets, TargetAsset, TargetStatus};
use crate::engine::assets::morph_manifest::MorphManifest;
use crate::engine::loading::progress::LoadingProgress;
use constants::morph::LOAD_RETRY_DELAY_SECS;

/// What the loading layer should do with one target this frame.
#[derive(Debug, PartialEq)]
enum LoadOutcome {
    Pending,
    Loaded,
    Failed(String),
}

fn poll_target(asset_server: &AssetServer, target: &TargetAsset) -> LoadOutcome {
    match asset_server.get_load_state(&target.handle) {
        Some(LoadState::Failed(err)) => LoadOutcome::Failed(err.to_string()),
        Some(LoadState::Loaded) => match asset_server.get_recursive_dependency_load_state(&target.handle) {
            Some(RecursiveDependencyLoadState::Loaded) => LoadOutcome::Loaded,
            Some(RecursiveDependencyLoadState::Failed(_)) => {
                LoadOutcome::Failed("a dependency failed to load".to_string())
            }
            _ => LoadOutcome::Pending,
        },
        _ => LoadOutcome::Pending,
    }
}

/// Apply a failed load to `target`: schedule a reload while retries remain,
/// otherwise mark it failed. Returns true when a reload should be issued.
fn register_failure(target: &mut TargetAsset, reason: String, max_retries: u32, now: f64) -> bool {
    if target.retries < max_retries {
        target.retries += 1;
        target.retry_after = now + LOAD_RETRY_DELAY_SECS;
        warn!(
            "Target '{}' failed to load ({}), retry {}/{}",
            target.name, reason, target.retries, max_retries
        );
        true
    } else {
        error!(
            "Target '{}' failed to load after {} retries: {}",
            target.name, max_retries, reason
        );
        target.status = TargetStatus::Failed(reason);
        false
    }
}

// Check whether every target glTF is loaded, retrying failures
pub fn check_target_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    mut morph_assets: ResMut<MorphAssets>,
    manifest: Option<Res<MorphManifest>>,
    asset_server: Res<AssetServer>,
    time: Res<Time>,
) {
    if loading_progress.targets_loaded
        || !loading_progress.manifest_loaded
        || loading_progress.failure.is_some()
    {
        return;
    }
    let Some(manifest) = manifest else {
        return;
    };

    let now = time.elapsed_secs_f64();
    for target in morph_assets.targets.iter_mut() {
        if target.status != TargetStatus::Loading || now < target.retry_after {
            continue;
        }
        match poll_target(&asset_server, target) {
            LoadOutcome::Pending => {}
            LoadOutcome::Loaded => {
                info!("✓ Target '{}' loaded from {}", target.name, target.path);
                target.status = TargetStatus::Loaded;
            }
            LoadOutcome::Failed(reason) => {
                if register_failure(target, reason, manifest.max_load_retries, now) {
                    asset_server.reload(target.path.clone());
                }
            }
        }
    }

    // Update the progress so we can send states to the frontend.
    loading_progress.target_loading_states = morph_assets.loading_states();

    if let Some(failed) = morph_assets.targets.iter().find_map(|target| match &target.status {
        TargetStatus::Failed(reason) => Some(format!("target '{}': {}", target.name, reason)),
        _ => None,
    }) {
        loading_progress.fail(failed);
        return;
    }

    if morph_assets.all_loaded() {
        info!("✓ All {} targets loaded", morph_assets.targets.len());
        loading_progress.targets_loaded = true;
    }
}
