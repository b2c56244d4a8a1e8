//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A vertex of a polygon, holding position and normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non-unit) normal; it will be **copied verbatim**, so make sure it
    ///   is oriented the way you need it for lighting / BSP tests.
    ///
    /// Non-finite components of either argument are replaced with `0.0` so that a single bad
    /// input can't poison downstream accumulations (e.g. normal averaging) with NaN.
    #[inline]
    pub fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        let sanitize = |v: Real| if v.is_finite() { v } else { 0.0 };
        let pos = Point3::new(sanitize(pos.x), sanitize(pos.y), sanitize(pos.z));
        let normal = Vector3::new(sanitize(normal.x), sanitize(normal.y), sanitize(normal.z));
        Vertex { pos, normal }
    }

    /// Flip this vertex's normal in place (used by [`crate::mesh::Mesh::flip_winding`] and by
    /// [`crate::mesh::polygon::Polygon::flip`]).
    #[inline]
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Barycentric linear interpolation between `self` (`t = 0`) and `other` (`t = 1`), for both
    /// position and normal. Used to synthesize the new vertex introduced when a BSP split slices
    /// through an edge (see [`crate::mesh::plane::Plane::split_polygon`]).
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        let new_pos = self.pos + (other.pos - self.pos) * t;
        let new_normal = self.normal + (other.normal - self.normal) * t;
        Vertex::new(new_pos, new_normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_non_finite_components() {
        let vertex = Vertex::new(
            Point3::new(Real::INFINITY, Real::NAN, Real::NEG_INFINITY),
            Vector3::new(Real::INFINITY, Real::NEG_INFINITY, Real::NAN),
        );
        assert!(vertex.pos.iter().copied().all(Real::is_finite));
        assert!(vertex.normal.iter().copied().all(Real::is_finite));
    }

    #[test]
    fn interpolate_is_affine() {
        let a = Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let b = Vertex::new(Point3::new(2.0, 4.0, 6.0), Vector3::new(0.0, 1.0, 0.0));

        let at_start = a.interpolate(&b, 0.0);
        let at_end = a.interpolate(&b, 1.0);
        let midpoint = a.interpolate(&b, 0.5);

        assert_eq!(at_start.pos, a.pos);
        assert_eq!(at_end.pos, b.pos);
        assert_eq!(midpoint.pos, Point3::new(1.0, 2.0, 3.0));
    }
}
