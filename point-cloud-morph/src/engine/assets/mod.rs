//! Asset definitions for the morph scene.
//!
//! Holds the JSON morph manifest and the glTF handles of every target.

/// Target handles and per-target load status.
pub mod morph_assets;

/// Morph manifest describing targets, sampling, scroll and camera settings.
pub mod morph_manifest;
