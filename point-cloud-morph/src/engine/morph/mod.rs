//! Scroll-driven morphing between sampled point clouds.
//!
//! The phase mapper turns normalised scroll progress into a phase across the
//! ordered targets, the interpolator blends the two neighbouring targets into
//! the active buffer, and the context resource ties both to the app.

/// Morph state shared by the scroll handler and the per-frame update.
pub mod context;

/// Error taxonomy for configuration, precondition and loading failures.
pub mod error;

/// Pointwise blending of two neighbouring target point sets.
pub mod interpolator;

/// Scroll progress to phase mapping with plateau dwell zones.
pub mod phase;
