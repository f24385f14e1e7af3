use bevy::math::Vec3;
use bevy::math::primitives::Triangle3d;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::engine::morph::error::MorphError;

/// Draws points distributed over a triangle surface.
///
/// Triangles are selected through a cumulative weight table, by area unless
/// explicit per-triangle weights were supplied.
#[derive(Debug, Clone)]
pub struct SurfaceSampler {
    triangles: Vec<Triangle3d>,
    cumulative: Vec<f32>,
    total: f32,
}

impl SurfaceSampler {
    /// Area-weighted sampler.
    pub fn new(triangles: Vec<Triangle3d>) -> Result<Self, MorphError> {
        let weights: Vec<f32> = triangles.iter().map(triangle_area).collect();
        Self::build(triangles, weights)
    }

    /// Sampler that picks triangles in proportion to `weights` instead of area.
    pub fn with_weights(triangles: Vec<Triangle3d>, weights: Vec<f32>) -> Result<Self, MorphError> {
        if weights.len() != triangles.len() {
            return Err(MorphError::WeightCountMismatch {
                weights: weights.len(),
                triangles: triangles.len(),
            });
        }
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(MorphError::InvalidWeight { index, value });
        }
        Self::build(triangles, weights)
    }

    fn build(triangles: Vec<Triangle3d>, weights: Vec<f32>) -> Result<Self, MorphError> {
        let mut total = 0.0_f32;
        let cumulative: Vec<f32> = weights
            .iter()
            .map(|w| {
                total += if w.is_finite() { *w } else { 0.0 };
                total
            })
            .collect();

        if triangles.is_empty() || total <= 0.0 {
            return Err(MorphError::EmptySurface);
        }

        Ok(Self {
            triangles,
            cumulative,
            total,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Sample exactly `count` points, each offset by up to `jitter / 2` per axis.
    pub fn sample(&self, count: usize, jitter: f32, rng: &mut impl Rng) -> Vec<[f32; 3]> {
        (0..count)
            .map(|_| {
                let triangle = &self.triangles[self.pick_triangle(rng.random::<f32>())];
                let mut point = point_in_triangle(triangle, rng.random(), rng.random());
                if jitter > 0.0 {
                    point += Vec3::new(
                        (rng.random::<f32>() - 0.5) * jitter,
                        (rng.random::<f32>() - 0.5) * jitter,
                        (rng.random::<f32>() - 0.5) * jitter,
                    );
                }
                point.to_array()
            })
            .collect()
    }

    /// Reproducible sampling from a seed.
    pub fn sample_seeded(&self, count: usize, jitter: f32, seed: u64) -> Vec<[f32; 3]> {
        let mut rng = Pcg32::seed_from_u64(seed);
        self.sample(count, jitter, &mut rng)
    }

    fn pick_triangle(&self, unit: f32) -> usize {
        let threshold = unit * self.total;
        // Zero-weight triangles share their predecessor's cumulative value and
        // are never selected.
        self.cumulative
            .partition_point(|&c| c <= threshold)
            .min(self.triangles.len() - 1)
    }
}

fn triangle_area(triangle: &Triangle3d) -> f32 {
    let [a, b, c] = triangle.vertices;
    0.5 * (b - a).cross(c - a).length()
}

/// Uniform point inside a triangle from two unit random numbers.
fn point_in_triangle(triangle: &Triangle3d, u: f32, v: f32) -> Vec3 {
    let [a, b, c] = triangle.vertices;
    let r1 = u.sqrt();
    a * (1.0 - r1) + b * (r1 * (1.0 - v)) + c * (r1 * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Triangle3d> {
        vec![
            Triangle3d::new(Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0)),
            Triangle3d::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::Y),
        ]
    }

    #[test]
    fn produces_exact_point_count() {
        let sampler = SurfaceSampler::new(unit_square()).unwrap();
        for count in [0, 1, 7, 1000] {
            assert_eq!(sampler.sample_seeded(count, 0.0, 1).len(), count);
            assert_eq!(sampler.sample_seeded(count, 0.5, 1).len(), count);
        }
    }

    #[test]
    fn points_without_jitter_lie_on_surface() {
        let sampler = SurfaceSampler::new(unit_square()).unwrap();
        for [x, y, z] in sampler.sample_seeded(500, 0.0, 9) {
            assert_eq!(z, 0.0);
            assert!((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn jitter_stays_within_amplitude() {
        let sampler = SurfaceSampler::new(unit_square()).unwrap();
        for [_, _, z] in sampler.sample_seeded(500, 0.2, 3) {
            assert!(z.abs() <= 0.1 + f32::EPSILON);
        }
    }

    #[test]
    fn same_seed_gives_same_points() {
        let sampler = SurfaceSampler::new(unit_square()).unwrap();
        assert_eq!(
            sampler.sample_seeded(64, 0.05, 42),
            sampler.sample_seeded(64, 0.05, 42)
        );
        assert_ne!(
            sampler.sample_seeded(64, 0.05, 42),
            sampler.sample_seeded(64, 0.05, 43)
        );
    }

    #[test]
    fn larger_triangles_receive_more_points() {
        let triangles = vec![
            Triangle3d::new(Vec3::ZERO, Vec3::X, Vec3::Y),
            Triangle3d::new(
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(19.0, 0.0, 0.0),
                Vec3::new(10.0, 9.0, 0.0),
            ),
        ];
        let sampler = SurfaceSampler::new(triangles).unwrap();
        let points = sampler.sample_seeded(2000, 0.0, 5);
        let on_large = points.iter().filter(|p| p[0] >= 10.0).count();
        // Area ratio is 81:1.
        assert!(on_large > 1900, "{on_large} points on the large triangle");
    }

    #[test]
    fn weight_override_confines_samples() {
        let sampler = SurfaceSampler::with_weights(unit_square(), vec![0.0, 1.0]).unwrap();
        for [x, y, _] in sampler.sample_seeded(300, 0.0, 11) {
            // Second triangle covers the half above the diagonal.
            assert!(y >= x - 1e-6, "({x}, {y}) below diagonal");
        }
    }

    #[test]
    fn rejects_unusable_surfaces() {
        assert_eq!(
            SurfaceSampler::new(Vec::new()).unwrap_err(),
            MorphError::EmptySurface
        );
        let flat = vec![Triangle3d::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0)];
        assert_eq!(SurfaceSampler::new(flat).unwrap_err(), MorphError::EmptySurface);
        assert_eq!(
            SurfaceSampler::with_weights(unit_square(), vec![0.0, 0.0]).unwrap_err(),
            MorphError::EmptySurface
        );
    }

    #[test]
    fn rejects_bad_weights() {
        assert_eq!(
            SurfaceSampler::with_weights(unit_square(), vec![1.0]).unwrap_err(),
            MorphError::WeightCountMismatch {
                weights: 1,
                triangles: 2
            }
        );
        assert!(matches!(
            SurfaceSampler::with_weights(unit_square(), vec![1.0, -1.0]),
            Err(MorphError::InvalidWeight { index: 1, .. })
        ));
    }
}
