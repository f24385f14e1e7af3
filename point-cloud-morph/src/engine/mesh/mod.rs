//! Mesh generation for point cloud rendering.
//!
//! Each point expands to a screen-aligned quad in the vertex shader, so the
//! vertex buffer holds six copies of every point position plus a corner UV.

/// Point cloud quad mesh creation and in-place position updates.
pub mod point_cloud_mesh;
