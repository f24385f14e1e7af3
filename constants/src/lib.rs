//! Shared configuration constants for the point-cloud morph renderer.

/// Orbit camera defaults: projection, distance limits and damping.
pub mod camera;

/// Defaults used when the morph manifest omits a field.
pub mod morph;

/// Asset locations relative to the Bevy asset root.
pub mod path;

/// Scene colours, lighting and point rendering settings.
pub mod render_settings;
