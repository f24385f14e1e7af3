use bevy::prelude::*;

use super::error::MorphError;
use super::interpolator::{TargetPointSet, blend_targets};
use super::phase::{PlateauWindow, compute_phase};

/// Morph state owned by the app and handed to the scroll handler and the
/// per-frame update as a system parameter.
#[derive(Resource, Debug, Clone)]
pub struct MorphContext {
    targets: Vec<TargetPointSet>,
    expected_targets: usize,
    point_count: usize,
    plateau: PlateauWindow,
    phase: f32,
}

impl MorphContext {
    pub fn new(
        expected_targets: usize,
        point_count: usize,
        plateau: PlateauWindow,
    ) -> Result<Self, MorphError> {
        if expected_targets == 0 {
            return Err(MorphError::NoTargets);
        }
        if point_count == 0 {
            return Err(MorphError::ZeroPointCount);
        }
        Ok(Self {
            targets: Vec::with_capacity(expected_targets),
            expected_targets,
            point_count,
            plateau,
            phase: 0.0,
        })
    }

    /// Register a sampled target. Targets must arrive in manifest order.
    pub fn push_target(&mut self, target: TargetPointSet) -> Result<(), MorphError> {
        if target.len() != self.point_count {
            return Err(MorphError::LengthMismatch {
                actual: target.len(),
                target: target.name,
                expected: self.point_count,
            });
        }
        self.targets.push(target);
        Ok(())
    }

    /// True once every target named in the manifest has been sampled.
    pub fn is_ready(&self) -> bool {
        self.targets.len() == self.expected_targets
    }

    pub fn targets(&self) -> &[TargetPointSet] {
        &self.targets
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn plateau(&self) -> &PlateauWindow {
        &self.plateau
    }

    /// Transitions between consecutive targets.
    pub fn segment_count(&self) -> usize {
        self.expected_targets.saturating_sub(1)
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Scroll handler: remap normalised scroll progress into the stored phase.
    /// Returns the new phase.
    pub fn apply_scroll(&mut self, scroll_normalized: f32) -> f32 {
        self.phase = compute_phase(scroll_normalized, self.segment_count(), &self.plateau);
        self.phase
    }

    /// Frame update: blend the current phase into `output`.
    pub fn blend_into(&self, output: &mut [[f32; 3]]) -> Result<(), MorphError> {
        if !self.is_ready() {
            return Err(MorphError::NoTargets);
        }
        blend_targets(self.phase, &self.targets, output)
    }
}
