use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::morph::error::MorphError;
use crate::engine::morph::phase::PlateauWindow;
use constants::{camera, morph, render_settings};

/// Morph scene description as a Bevy asset. Mirrors the JSON structure.
/// Only `targets` is required; every other field falls back to a default.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource)]
pub struct MorphManifest {
    #[serde(default = "default_point_count")]
    pub point_count: usize,
    #[serde(default = "default_fit_size")]
    pub fit_size: f32,
    #[serde(default)]
    pub plateau: PlateauSettings,
    #[serde(default = "default_jitter")]
    pub jitter: f32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_point_size")]
    pub point_size: f32,
    #[serde(default = "default_point_colour")]
    pub point_colour: [f32; 4],
    #[serde(default = "default_max_load_retries")]
    pub max_load_retries: u32,
    #[serde(default)]
    pub scroll: ScrollSettings,
    #[serde(default)]
    pub camera: CameraSettings,
    pub targets: Vec<TargetDefinition>,
}

/// One visual state of the morph: a mesh asset and how to fit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDefinition {
    pub name: String,
    /// glTF path relative to the asset root.
    pub path: String,
    /// Extra uniform scale applied after fitting to `fit_size`.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Per-triangle sampling weights replacing area weighting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triangle_weights: Option<Vec<f32>>,
}

/// Plateau window as written in the manifest, validated by
/// [`MorphManifest::validate`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlateauSettings {
    pub start: f32,
    pub end: f32,
}

impl Default for PlateauSettings {
    fn default() -> Self {
        Self {
            start: morph::DEFAULT_PLATEAU_START,
            end: morph::DEFAULT_PLATEAU_END,
        }
    }
}

/// Native scroll emulation: the mouse wheel drives a virtual page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    pub virtual_height: f32,
    pub line_height: f32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            virtual_height: morph::DEFAULT_VIRTUAL_SCROLL_HEIGHT,
            line_height: morph::DEFAULT_LINE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub initial_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping_factor: f32,
    /// Ctrl + wheel zoom. The plain wheel always drives scroll.
    pub enable_zoom: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            initial_distance: camera::INITIAL_DISTANCE,
            min_distance: camera::MIN_DISTANCE,
            max_distance: camera::MAX_DISTANCE,
            damping_factor: camera::DAMPING_FACTOR,
            enable_zoom: true,
        }
    }
}

impl MorphManifest {
    /// Check the configuration before any target is loaded.
    pub fn validate(&self) -> Result<PlateauWindow, MorphError> {
        if self.targets.is_empty() {
            return Err(MorphError::NoTargets);
        }
        if self.point_count == 0 {
            return Err(MorphError::ZeroPointCount);
        }
        PlateauWindow::new(self.plateau.start, self.plateau.end)
    }

    /// Sampling seed for the target at `index`, distinct per target.
    pub fn target_seed(&self, index: usize) -> u64 {
        self.seed.wrapping_add(index as u64)
    }

    pub fn target_names(&self) -> Vec<&str> {
        self.targets.iter().map(|t| t.name.as_str()).collect()
    }
}

fn default_point_count() -> usize {
    morph::DEFAULT_POINT_COUNT
}

fn default_fit_size() -> f32 {
    morph::DEFAULT_FIT_SIZE
}

fn default_jitter() -> f32 {
    morph::DEFAULT_JITTER
}

fn default_seed() -> u64 {
    morph::DEFAULT_SEED
}

fn default_point_size() -> f32 {
    render_settings::POINT_SIZE
}

fn default_point_colour() -> [f32; 4] {
    render_settings::POINT_COLOUR
}

fn default_max_load_retries() -> u32 {
    morph::DEFAULT_MAX_LOAD_RETRIES
}

fn default_scale() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "targets": [
            { "name": "dog", "path": "models/dog/scene.gltf" },
            { "name": "deer", "path": "models/deer/scene.gltf", "scale": 0.8 }
        ]
    }"#;

    #[test]
    fn minimal_manifest_uses_defaults() {
        let manifest: MorphManifest = serde_json::from_str(MINIMAL).unwrap();
        assert_eq!(manifest.point_count, morph::DEFAULT_POINT_COUNT);
        assert_eq!(manifest.fit_size, morph::DEFAULT_FIT_SIZE);
        assert_eq!(manifest.targets[0].scale, 1.0);
        assert_eq!(manifest.targets[1].scale, 0.8);
        assert!(manifest.targets[0].triangle_weights.is_none());
        assert_eq!(manifest.camera.min_distance, camera::MIN_DISTANCE);
        assert_eq!(manifest.target_names(), vec!["dog", "deer"]);

        let plateau = manifest.validate().unwrap();
        assert_eq!(plateau.start(), morph::DEFAULT_PLATEAU_START);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let manifest: MorphManifest = serde_json::from_str(
            r#"{
                "scroll": { "virtual_height": 900.0 },
                "camera": { "enable_zoom": false },
                "targets": [{ "name": "a", "path": "a.gltf" }]
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.scroll.virtual_height, 900.0);
        assert_eq!(manifest.scroll.line_height, morph::DEFAULT_LINE_HEIGHT);
        assert!(!manifest.camera.enable_zoom);
        assert_eq!(manifest.camera.max_distance, camera::MAX_DISTANCE);
    }

    #[test]
    fn validation_rejects_bad_configuration() {
        let mut manifest: MorphManifest = serde_json::from_str(MINIMAL).unwrap();
        manifest.plateau = PlateauSettings {
            start: 0.6,
            end: 0.6,
        };
        assert!(matches!(
            manifest.validate(),
            Err(MorphError::InvalidPlateau { .. })
        ));

        manifest.plateau = PlateauSettings::default();
        manifest.point_count = 0;
        assert_eq!(manifest.validate(), Err(MorphError::ZeroPointCount));

        manifest.point_count = 10;
        manifest.targets.clear();
        assert_eq!(manifest.validate(), Err(MorphError::NoTargets));
    }

    #[test]
    fn target_seeds_differ() {
        let manifest: MorphManifest = serde_json::from_str(MINIMAL).unwrap();
        assert_ne!(manifest.target_seed(0), manifest.target_seed(1));
    }

    #[test]
    fn bundled_manifest_is_valid() {
        let manifest: MorphManifest =
            serde_json::from_str(include_str!("../../../assets/morph/scene.morph.json")).unwrap();
        assert!(manifest.validate().is_ok());
    }
}
