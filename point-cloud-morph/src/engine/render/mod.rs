//! Point cloud rendering through a custom Bevy material.
//!
//! The material's vertex shader expands every point into a camera-facing
//! quad, and the fragment shader trims it to a disc.

/// Point cloud material, uniform layout and vertex buffer specialisation.
pub mod point_cloud_material;
