//! Cube-corner vertex sets built from catalog shapes.
//!
//! Layout is cube-major: the 8 corners of cube `i` occupy rows `8i..8i+7`,
//! bottom face first (counterclockwise seen from +Z), then the top face in the
//! same XY order.

use crate::catalog::{Catalog, CubeOrigin, ShapeDefinition, UnknownShapeError};
use nalgebra::Vector3;

/// Corners per cube.
pub const CORNERS: usize = 8;

/// Dense list of 3D points; length is always a multiple of `CORNERS` when built
/// from a shape.
///
/// Transforms return new sets; a `VertexSet` is never shared between an
/// original and its derived candidates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexSet {
    points: Vec<Vector3<f64>>,
}

impl VertexSet {
    #[inline]
    pub fn from_points(points: Vec<Vector3<f64>>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<Vector3<f64>> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.points.len() / CORNERS
    }

    /// Corner groups, one slice of 8 points per cube.
    pub fn cubes(&self) -> impl Iterator<Item = &[Vector3<f64>]> {
        self.points.chunks_exact(CORNERS)
    }

    /// Arithmetic mean of all points (origin for an empty set).
    pub fn centroid(&self) -> Vector3<f64> {
        if self.points.is_empty() {
            return Vector3::zeros();
        }
        let sum = self
            .points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p);
        sum / self.points.len() as f64
    }

    /// Pointwise image under `f`.
    pub fn map<F>(&self, f: F) -> VertexSet
    where
        F: FnMut(&Vector3<f64>) -> Vector3<f64>,
    {
        VertexSet {
            points: self.points.iter().map(f).collect(),
        }
    }

    /// Axis-aligned bounds `(min, max)`; `None` for an empty set.
    pub fn bounds(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        }))
    }

    #[inline]
    pub fn same_len(&self, other: &VertexSet) -> bool {
        self.points.len() == other.points.len()
    }

    /// Largest coordinate difference between corresponding rows.
    /// `None` when the sets have different lengths.
    pub fn max_abs_diff(&self, other: &VertexSet) -> Option<f64> {
        if !self.same_len(other) {
            return None;
        }
        Some(
            self.points
                .iter()
                .zip(&other.points)
                .map(|(a, b)| (a - b).amax())
                .fold(0.0, f64::max),
        )
    }

    /// Row-wise equality within absolute tolerance `atol`; different lengths
    /// are never close.
    pub fn all_close(&self, other: &VertexSet, atol: f64) -> bool {
        self.max_abs_diff(other).is_some_and(|d| d <= atol)
    }
}

/// The 8 corners of an axis-aligned cube of edge `size` anchored at `origin`.
pub fn cube_vertices(origin: Vector3<f64>, size: f64) -> [Vector3<f64>; CORNERS] {
    let (x, y, z) = (origin.x, origin.y, origin.z);
    [
        Vector3::new(x, y, z),
        Vector3::new(x + size, y, z),
        Vector3::new(x + size, y + size, z),
        Vector3::new(x, y + size, z),
        Vector3::new(x, y, z + size),
        Vector3::new(x + size, y, z + size),
        Vector3::new(x + size, y + size, z + size),
        Vector3::new(x, y + size, z + size),
    ]
}

#[inline]
fn lattice_point(c: CubeOrigin) -> Vector3<f64> {
    Vector3::new(c[0] as f64, c[1] as f64, c[2] as f64)
}

/// Expand a shape definition into its corner vertices.
pub fn shape_vertices(shape: &ShapeDefinition, cube_size: f64) -> VertexSet {
    let mut points = Vec::with_capacity(shape.cubes.len() * CORNERS);
    for &origin in &shape.cubes {
        points.extend_from_slice(&cube_vertices(lattice_point(origin), cube_size));
    }
    VertexSet::from_points(points)
}

/// Look up `name` and expand it; fails for names outside the catalog.
pub fn build_vertices(
    catalog: &Catalog,
    name: &str,
    cube_size: f64,
) -> Result<VertexSet, UnknownShapeError> {
    Ok(shape_vertices(catalog.get(name)?, cube_size))
}
