/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Initial distance from the orbit target along +Z.
pub const INITIAL_DISTANCE: f32 = 10.0;

/// Fraction of the pending rotation/pan applied each frame.
pub const DAMPING_FACTOR: f32 = 0.05;

pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 20.0;

/// Polar angle limits measured from +Y, in radians.
pub const MIN_POLAR_ANGLE: f32 = 0.0;
pub const MAX_POLAR_ANGLE: f32 = std::f32::consts::PI;

/// Multiplicative zoom per wheel step.
pub const ZOOM_STEP: f32 = 0.95;
