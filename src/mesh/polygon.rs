//! Convex polygon carrier used inside the BSP tree.
//!
//! Unlike [`crate::mesh::Mesh`], which is an indexed triangle mesh, a [`Polygon`] is the BSP
//! engine's working representation: a small convex vertex list plus its supporting face normal.
//! Polygons are produced by triangle-to-polygon conversion at CSG entry, possibly split into
//! many-sided fragments while clipped against other trees, and fanned back into triangles at
//! CSG exit (see [`crate::mesh::csg`]).

use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::Vector3;

/// A convex polygon with `>= 3` vertices and a single shared face normal.
///
/// The normal is authoritative for orientation — coplanar-polygon disambiguation during BSP
/// build/clip compares `plane.normal · polygon.normal` rather than re-deriving the normal from
/// the (possibly sliver-thin, post-split) vertex ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub normal: Vector3<Real>,
}

impl Polygon {
    /// Build a polygon from vertices and an explicit face normal. Panics if fewer than 3
    /// vertices are supplied — callers (triangle-to-polygon conversion, plane splitting) are
    /// expected to have already checked this; see [`crate::mesh::Mesh::to_bsp_polygons`] for the
    /// degenerate-input gate.
    pub fn new(vertices: Vec<Vertex>, normal: Vector3<Real>) -> Self {
        debug_assert!(vertices.len() >= 3, "degenerate polygon");
        Polygon { vertices, normal }
    }

    /// This polygon's supporting plane, `n = normal`, `w = n · v0`.
    pub fn plane(&self) -> Plane {
        Plane::from_polygon(&self.vertices, self.normal)
    }

    /// Reverse winding order, flip every vertex normal, and negate the face normal.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.normal = -self.normal;
    }

    /// Fan-triangulate from vertex 0: `(0, i, i+1)` for `i ∈ [1, k-2]`. Every resulting triangle
    /// inherits this polygon's face normal (flat shading; no smoothing is re-derived here).
    pub fn fan_triangulate(&self) -> Vec<[Vertex; 3]> {
        let k = self.vertices.len();
        if k < 3 {
            return Vec::new();
        }
        (1..k - 1)
            .map(|i| [self.vertices[0], self.vertices[i], self.vertices[i + 1]])
            .collect()
    }
}
