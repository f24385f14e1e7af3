use bevy::color::Color;

/// Canvas clear colour (#f0f0f0).
pub const CLEAR_COLOUR: Color = Color::srgb(0.941, 0.941, 0.941);

/// Ambient light brightness in Bevy's cd/m² units.
pub const AMBIENT_BRIGHTNESS: f32 = 250.0;

/// Directional light illuminance in lux.
pub const DIRECTIONAL_ILLUMINANCE: f32 = 3_000.0;

/// Direction the directional light shines from, before normalisation.
pub const DIRECTIONAL_LIGHT_POSITION: [f32; 3] = [1.0, 1.0, 1.0];

/// Default on-screen point colour (linear RGBA).
pub const POINT_COLOUR: [f32; 4] = [0.08, 0.08, 0.1, 1.0];

/// Default world-space edge length of each point quad.
pub const POINT_SIZE: f32 = 0.03;

/// Vertices emitted per point: two triangles forming a camera-facing quad.
pub const VERTICES_PER_POINT: usize = 6;

/// Default log filter; `RUST_LOG` takes precedence when set.
pub const LOG_FILTER: &str = "wgpu=error,naga=warn,bevy_render=info,point_cloud_morph=info";
