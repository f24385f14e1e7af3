use thiserror::Error;

/// Failures raised while configuring, loading or blending morph targets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MorphError {
    /// Plateau window is empty, inverted, or outside `[0, 1]`.
    #[error("invalid plateau window: start {start}, end {end} (need 0 <= start < end <= 1)")]
    InvalidPlateau { start: f32, end: f32 },

    #[error("morph requires at least one target")]
    NoTargets,

    #[error("point count must be greater than zero")]
    ZeroPointCount,

    /// Active buffer and a referenced target disagree on length.
    #[error("target '{target}' has {actual} points, expected {expected}")]
    LengthMismatch {
        target: String,
        expected: usize,
        actual: usize,
    },

    /// No triangles, or every triangle has zero sampling weight.
    #[error("surface has no sampleable area")]
    EmptySurface,

    #[error("surface bounds have zero extent")]
    DegenerateBounds,

    #[error("{weights} triangle weights supplied for {triangles} triangles")]
    WeightCountMismatch { weights: usize, triangles: usize },

    #[error("triangle weight {index} is negative or not finite: {value}")]
    InvalidWeight { index: usize, value: f32 },

    #[error("target '{target}' failed to load: {reason}")]
    TargetLoadFailed { target: String, reason: String },

    /// An asset handle resolved as loaded but its data was missing.
    #[error("asset missing for target '{target}'")]
    MissingAsset { target: String },
}
