use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::assets::morph_assets::{MorphAssets, TargetAsset};
use crate::engine::assets::morph_manifest::MorphManifest;
use crate::engine::camera::orbit_camera::{OrbitCamera, configure_orbit_camera};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::morph::context::MorphContext;
use crate::engine::morph::error::MorphError;
use constants::path::MORPH_MANIFEST_PATH;

// Start the loading process
pub fn start_loading(mut morph_assets: ResMut<MorphAssets>, asset_server: Res<AssetServer>) {
    info!("Loading morph manifest {}", MORPH_MANIFEST_PATH);
    morph_assets.manifest = Some(asset_server.load(MORPH_MANIFEST_PATH));
}

/// Build the morph context from a manifest. Configuration errors surface here,
/// before any target is loaded.
pub fn create_morph_context(manifest: &MorphManifest) -> Result<MorphContext, MorphError> {
    let plateau = manifest.validate()?;
    MorphContext::new(manifest.targets.len(), manifest.point_count, plateau)
}

// Validate the manifest and queue every target once it is available
pub fn load_manifest_system(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    mut morph_assets: ResMut<MorphAssets>,
    mut orbit: ResMut<OrbitCamera>,
    mut exit: EventWriter<AppExit>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<MorphManifest>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if loading_progress.manifest_loaded || loading_progress.failure.is_some() {
        return;
    }
    let Some(handle) = morph_assets.manifest.clone() else {
        return;
    };

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&handle) {
        error!("Failed to load morph manifest {}: {}", MORPH_MANIFEST_PATH, err);
        loading_progress.fail(err.to_string());
        exit.write(AppExit::error());
        return;
    }

    let Some(manifest) = manifests.get(&handle) else {
        return;
    };

    let context = match create_morph_context(manifest) {
        Ok(context) => context,
        Err(err) => {
            error!("Invalid morph configuration: {}", err);
            loading_progress.fail(err.to_string());
            exit.write(AppExit::error());
            return;
        }
    };

    info!(
        "✓ Morph manifest loaded: targets {:?}, {} points each",
        manifest.target_names(),
        manifest.point_count
    );

    configure_orbit_camera(manifest, &mut orbit, &windows);

    morph_assets.targets = manifest
        .targets
        .iter()
        .map(|target| {
            debug!("Queueing target '{}' from {}", target.name, target.path);
            TargetAsset::new(
                target.name.clone(),
                target.path.clone(),
                asset_server.load(target.path.clone()),
            )
        })
        .collect();
    loading_progress.target_loading_states = morph_assets.loading_states();

    commands.insert_resource(manifest.clone());
    commands.insert_resource(context);
    loading_progress.manifest_loaded = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> MorphManifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn context_matches_manifest() {
        let manifest = manifest(
            r#"{
                "point_count": 64,
                "targets": [
                    { "name": "a", "path": "a.gltf" },
                    { "name": "b", "path": "b.gltf" }
                ]
            }"#,
        );
        let context = create_morph_context(&manifest).unwrap();
        assert_eq!(context.point_count(), 64);
        assert_eq!(context.segment_count(), 1);
        assert!(!context.is_ready());
    }

    #[test]
    fn rejects_invalid_configuration() {
        let no_targets = manifest(r#"{ "targets": [] }"#);
        assert_eq!(create_morph_context(&no_targets).unwrap_err(), MorphError::NoTargets);

        let zero_points = manifest(
            r#"{ "point_count": 0, "targets": [{ "name": "a", "path": "a.gltf" }] }"#,
        );
        assert_eq!(
            create_morph_context(&zero_points).unwrap_err(),
            MorphError::ZeroPointCount
        );

        let empty_plateau = manifest(
            r#"{
                "plateau": { "start": 0.6, "end": 0.6 },
                "targets": [{ "name": "a", "path": "a.gltf" }]
            }"#,
        );
        assert!(matches!(
            create_morph_context(&empty_plateau),
            Err(MorphError::InvalidPlateau { .. })
        ));
    }
}
