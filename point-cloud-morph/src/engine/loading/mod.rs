//! Asset loading and initialisation systems for the morph scene.
//!
//! Runs while the app is in `AppState::Loading`: manifest parsing and
//! validation, glTF target loads with retries, surface sampling, and finally
//! spawning the point cloud entity.

/// Morph manifest loading, validation, and target load queueing.
pub mod manifest_loader;

/// Point cloud entity creation once every target is sampled.
pub mod point_cloud_creator;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// glTF load state polling with reload retries.
pub mod target_loader;

/// Turns loaded glTF targets into fixed-size point sets.
pub mod target_sampler;
