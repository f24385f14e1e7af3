use super::error::MorphError;

/// Sampled surface points for one visual state.
///
/// Every target in a morph holds the same number of points so that blending
/// can proceed index by index.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPointSet {
    pub name: String,
    pub points: Vec<[f32; 3]>,
}

impl TargetPointSet {
    pub fn new(name: impl Into<String>, points: Vec<[f32; 3]>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Lower target index, upper target index and blend weight for a phase.
pub fn phase_indices(phase: f32, target_count: usize) -> (usize, usize, f32) {
    if target_count == 0 {
        return (0, 0, 0.0);
    }
    let last = target_count - 1;
    let phase = if phase.is_nan() {
        0.0
    } else {
        phase.clamp(0.0, last as f32)
    };
    let i0 = (phase.floor() as usize).min(last);
    let i1 = (i0 + 1).min(last);
    let t = (phase - i0 as f32).clamp(0.0, 1.0);
    (i0, i1, t)
}

/// Blend the two targets selected by `phase` into `output`.
///
/// Every coordinate lands on the segment between the matching coordinates of
/// the two targets.
pub fn blend_targets(
    phase: f32,
    targets: &[TargetPointSet],
    output: &mut [[f32; 3]],
) -> Result<(), MorphError> {
    if targets.is_empty() {
        return Err(MorphError::NoTargets);
    }

    let (i0, i1, t) = phase_indices(phase, targets.len());
    let from = &targets[i0];
    let to = &targets[i1];

    for target in [from, to] {
        if target.len() != output.len() {
            return Err(MorphError::LengthMismatch {
                target: target.name.clone(),
                expected: output.len(),
                actual: target.len(),
            });
        }
    }

    if t <= 0.0 {
        output.copy_from_slice(&from.points);
        return Ok(());
    }
    if t >= 1.0 {
        output.copy_from_slice(&to.points);
        return Ok(());
    }

    for ((out, a), b) in output.iter_mut().zip(&from.points).zip(&to.points) {
        for axis in 0..3 {
            out[axis] = lerp_within(a[axis], b[axis], t);
        }
    }

    Ok(())
}

// Clamped so float rounding never leaves the [a, b] segment.
fn lerp_within(a: f32, b: f32, t: f32) -> f32 {
    let value = a + (b - a) * t;
    value.clamp(a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> Vec<TargetPointSet> {
        vec![
            TargetPointSet::new("a", vec![[0.0, 0.0, 0.0], [1.0, -2.0, 0.3]]),
            TargetPointSet::new("b", vec![[10.0, 0.0, 0.0], [-4.0, 7.5, 0.1]]),
            TargetPointSet::new("c", vec![[10.0, 10.0, 0.0], [0.7, 0.7, -0.7]]),
        ]
    }

    #[test]
    fn indices_clamp_to_last_target() {
        assert_eq!(phase_indices(0.0, 3), (0, 1, 0.0));
        assert_eq!(phase_indices(1.25, 3), (1, 2, 0.25));
        assert_eq!(phase_indices(2.0, 3), (2, 2, 0.0));
        assert_eq!(phase_indices(9.0, 3), (2, 2, 0.0));
        assert_eq!(phase_indices(-1.0, 3), (0, 1, 0.0));
        assert_eq!(phase_indices(0.5, 1), (0, 0, 0.0));
    }

    #[test]
    fn integer_phase_reproduces_target_exactly() {
        let targets = targets();
        let mut output = vec![[0.0; 3]; 2];
        for (index, target) in targets.iter().enumerate() {
            blend_targets(index as f32, &targets, &mut output).unwrap();
            assert_eq!(output, target.points);
        }
    }

    #[test]
    fn output_stays_between_neighbours() {
        let targets = targets();
        let mut output = vec![[0.0; 3]; 2];
        for step in 0..=200 {
            let phase = step as f32 / 100.0;
            blend_targets(phase, &targets, &mut output).unwrap();
            let (i0, i1, _) = phase_indices(phase, targets.len());
            for (k, point) in output.iter().enumerate() {
                for axis in 0..3 {
                    let a = targets[i0].points[k][axis];
                    let b = targets[i1].points[k][axis];
                    assert!(
                        a.min(b) <= point[axis] && point[axis] <= a.max(b),
                        "phase {phase} point {k} axis {axis}"
                    );
                }
            }
        }
    }

    #[test]
    fn midpoint_blend() {
        let targets = targets();
        let mut output = vec![[0.0; 3]; 2];
        blend_targets(0.5, &targets, &mut output).unwrap();
        assert_eq!(output[0], [5.0, 0.0, 0.0]);
        blend_targets(1.5, &targets, &mut output).unwrap();
        assert_eq!(output[0], [10.0, 5.0, 0.0]);
    }

    #[test]
    fn rejects_empty_targets() {
        let mut output = vec![[0.0; 3]; 2];
        assert_eq!(
            blend_targets(0.0, &[], &mut output),
            Err(MorphError::NoTargets)
        );
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut targets = targets();
        targets[1].points.pop();
        let mut output = vec![[0.0; 3]; 2];
        let err = blend_targets(0.5, &targets, &mut output).unwrap_err();
        assert_eq!(
            err,
            MorphError::LengthMismatch {
                target: "b".into(),
                expected: 2,
                actual: 1,
            }
        );
    }
}
