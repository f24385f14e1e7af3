//! Orbit camera around the morphing point cloud.
//!
//! Left drag rotates, right or middle drag pans, Ctrl + wheel zooms. Motion is
//! damped so the camera keeps gliding briefly after input stops.

/// Orbit camera resource and its input/update systems.
pub mod orbit_camera;
