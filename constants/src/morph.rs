/// Points sampled on every target surface.
pub const DEFAULT_POINT_COUNT: usize = 8_000;

/// Largest bounding-box dimension after normalisation.
pub const DEFAULT_FIT_SIZE: f32 = 5.0;

/// Fractional progress within a segment where the blend starts.
pub const DEFAULT_PLATEAU_START: f32 = 0.5;

/// Fractional progress within a segment where the blend completes.
pub const DEFAULT_PLATEAU_END: f32 = 0.9;

/// Per-axis jitter amplitude applied to sampled points.
pub const DEFAULT_JITTER: f32 = 0.02;

pub const DEFAULT_SEED: u64 = 0x5eed;

/// Reload attempts for a target whose asset failed to load.
pub const DEFAULT_MAX_LOAD_RETRIES: u32 = 2;

/// Height of the virtual page driven by the mouse wheel on native builds (pixels).
pub const DEFAULT_VIRTUAL_SCROLL_HEIGHT: f32 = 4_000.0;

/// Pixels per wheel line on native builds.
pub const DEFAULT_LINE_HEIGHT: f32 = 40.0;

/// Seconds to wait after a reload before checking a target's load state again.
pub const LOAD_RETRY_DELAY_SECS: f64 = 0.5;
