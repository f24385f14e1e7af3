//! Mesh surface to point cloud conversion.
//!
//! Merges mesh primitives into one world-space triangle list, normalises it
//! to a common size, and draws a fixed number of points over its area.

/// Triangle extraction from Bevy meshes and glTF node hierarchies.
pub mod mesh_surface;

/// Bounding-box centring and uniform scaling of merged surfaces.
pub mod normalize;

/// Area-weighted (or explicitly weighted) random surface sampling with jitter.
pub mod surface_sampler;
