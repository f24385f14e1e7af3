//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the point cloud material, asset loading systems,
/// and platform-specific scroll input.
pub mod app_setup;

/// Application state machine and loading progress transitions.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds the canvas for web targets and sets vsync.
pub mod window_config;
