//! Runtime systems that run once the morph scene is ready.
//!
//! Provides the scroll-to-phase handler, the per-frame morph blend, FPS
//! tracking, and a keyboard-triggered state dump.

/// F1 dump of the morph state for debugging.
pub mod debug_morph;

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to frontend via RPC and updates native UI overlays.
pub mod fps_tracking;

/// Scroll handler and per-frame position update.
pub mod morph_update;
