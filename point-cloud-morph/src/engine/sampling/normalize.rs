use bevy::math::Vec3;
use bevy::math::primitives::Triangle3d;

use crate::engine::morph::error::MorphError;

/// Axis-aligned extent of a merged surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl SurfaceBounds {
    pub fn from_triangles(triangles: &[Triangle3d]) -> Option<Self> {
        let mut vertices = triangles.iter().flat_map(|t| t.vertices);
        let first = vertices.next()?;
        let (min, max) = vertices.fold((first, first), |(min, max), v| (min.min(v), max.max(v)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Centre the surface on the origin and scale it uniformly so its largest
/// dimension equals `fit_size * scale`.
pub fn normalize_surface(
    triangles: &mut [Triangle3d],
    fit_size: f32,
    scale: f32,
) -> Result<SurfaceBounds, MorphError> {
    let bounds = SurfaceBounds::from_triangles(triangles).ok_or(MorphError::EmptySurface)?;
    let max_dimension = bounds.size().max_element();
    if max_dimension <= 0.0 || !max_dimension.is_finite() {
        return Err(MorphError::DegenerateBounds);
    }

    let center = bounds.center();
    let factor = fit_size / max_dimension * scale;
    for triangle in triangles.iter_mut() {
        for vertex in triangle.vertices.iter_mut() {
            *vertex = (*vertex - center) * factor;
        }
    }

    Ok(bounds)
}
