use super::error::MorphError;

/// Sub-range of a segment's fractional progress where the blend ramps.
///
/// Progress below `start` dwells on the lower target and progress above
/// `end` dwells on the upper target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateauWindow {
    start: f32,
    end: f32,
}

impl PlateauWindow {
    pub fn new(start: f32, end: f32) -> Result<Self, MorphError> {
        let valid = start.is_finite()
            && end.is_finite()
            && start >= 0.0
            && end <= 1.0
            && start < end;
        if !valid {
            return Err(MorphError::InvalidPlateau { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// Remap fractional segment progress into a blend weight in `[0, 1]`.
    pub fn blend_weight(&self, fractional: f32) -> f32 {
        if fractional < self.start {
            0.0
        } else if fractional > self.end {
            1.0
        } else {
            ((fractional - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
        }
    }
}

impl Default for PlateauWindow {
    fn default() -> Self {
        Self {
            start: constants::morph::DEFAULT_PLATEAU_START,
            end: constants::morph::DEFAULT_PLATEAU_END,
        }
    }
}

/// Map normalised scroll progress to a phase in `[0, segment_count]`.
///
/// `segment_count` is the number of transitions, one less than the number of
/// targets. A single target has no segments and always yields phase 0.
pub fn compute_phase(scroll_normalized: f32, segment_count: usize, plateau: &PlateauWindow) -> f32 {
    if segment_count == 0 {
        return 0.0;
    }

    let segments = segment_count as f32;
    let scroll = if scroll_normalized.is_nan() {
        0.0
    } else {
        scroll_normalized.clamp(0.0, 1.0)
    };

    let raw_phase = scroll * segments;
    let segment_index = raw_phase.floor().clamp(0.0, segments - 1.0);
    let fractional = (raw_phase - segment_index).clamp(0.0, 1.0);
    let t = plateau.blend_weight(fractional);

    (segment_index + t).clamp(0.0, segments)
}
