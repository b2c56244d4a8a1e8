//! The indexed triangle mesh ([`Mesh`]) that is this crate's external data model: the shape
//! extruders and the [`csg`] evaluator both consume and produce.
//!
//! Internally, BSP-based operations don't work on this representation directly — they convert
//! to and from the convex-polygon carrier in [`polygon`] at their boundary (see
//! [`Mesh::to_bsp_polygons`] / [`Mesh::from_bsp_polygons`]).

pub mod bsp;
pub mod csg;
pub mod plane;
pub mod polygon;
pub mod vertex;

use crate::float_types::EPSILON;
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};
use polygon::Polygon;
use vertex::Vertex;

/// An indexed triangle mesh: vertex positions, a parallel array of per-vertex normals, and a
/// list of triangles as index triples.
///
/// Triangle winding is CCW as seen from outside the solid for well-formed input; the engine
/// does not validate this on construction, only preserves it through the operations it defines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<Real>>,
    pub normals: Vec<Vector3<Real>>,
    pub triangles: Vec<[u32; 3]>,
}

/// A conservative axis-aligned bounding box, used only as a disjoint-test fast path ahead of
/// the full BSP boolean pipeline (see [`crate::mesh::csg`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<Real>,
    pub max: Point3<Real>,
}

impl Aabb {
    /// `true` unless the two boxes are separated by a gap along some axis.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

impl Mesh {
    /// An empty mesh (no vertices, no triangles).
    pub fn new() -> Self {
        Mesh::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append another mesh's geometry in place, offsetting `other`'s triangle indices by this
    /// mesh's current vertex count.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.triangles
            .extend(other.triangles.iter().map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]));
    }

    /// Reverse every triangle's winding (swap its last two indices) and negate every vertex
    /// normal. `flip_winding ∘ flip_winding == identity`.
    pub fn flip_winding(&mut self) {
        for t in &mut self.triangles {
            t.swap(1, 2);
        }
        for n in &mut self.normals {
            *n = -*n;
        }
    }

    /// Componentwise min/max over the vertex array, or `None` if the mesh has no vertices.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let mut iter = self.vertices.iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), &p| {
            (
                Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        });
        Some(Aabb { min, max })
    }

    /// Recompute every vertex normal from scratch: zero them all, accumulate each triangle's
    /// unnormalized face normal (`cross(v1−v0, v2−v0)`) into its three vertices weighted by that
    /// cross product's own magnitude, then normalize each vertex normal whose accumulated length
    /// is positive. Degenerate (zero-area) triangles contribute nothing and can't introduce NaNs.
    pub fn recompute_normals(&mut self) {
        for n in &mut self.normals {
            *n = Vector3::zeros();
        }
        for t in &self.triangles {
            let (a, b, c) = (t[0] as usize, t[1] as usize, t[2] as usize);
            let face = (self.vertices[b] - self.vertices[a]).cross(&(self.vertices[c] - self.vertices[a]));
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }
        for n in &mut self.normals {
            let len = n.norm();
            if len > 0.0 {
                *n /= len;
            }
        }
    }

    /// Convert to the BSP engine's working representation: one convex (triangular) polygon per
    /// mesh triangle, dropping any triangle whose face normal is degenerate (zero cross-product
    /// magnitude within [`EPSILON`]).
    pub fn to_bsp_polygons(&self) -> Vec<Polygon> {
        self.triangles
            .iter()
            .filter_map(|t| {
                let (a, b, c) = (t[0] as usize, t[1] as usize, t[2] as usize);
                let (pa, pb, pc) = (self.vertices[a], self.vertices[b], self.vertices[c]);
                let raw = (pb - pa).cross(&(pc - pa));
                let len = raw.norm();
                if len < EPSILON {
                    return None;
                }
                let normal = raw / len;
                let verts = vec![
                    Vertex::new(pa, self.normals.get(a).copied().unwrap_or(normal)),
                    Vertex::new(pb, self.normals.get(b).copied().unwrap_or(normal)),
                    Vertex::new(pc, self.normals.get(c).copied().unwrap_or(normal)),
                ];
                Some(Polygon::new(verts, normal))
            })
            .collect()
    }

    /// Reassemble a mesh from BSP polygons: fan-triangulate each (possibly non-triangular,
    /// post-split) polygon and flatten, with every resulting triangle's three vertices taking
    /// that polygon's face normal (flat shading — this stage does not re-derive smooth normals).
    pub fn from_bsp_polygons(polygons: &[Polygon]) -> Mesh {
        let mut mesh = Mesh::new();
        for poly in polygons {
            for tri in poly.fan_triangulate() {
                let base = mesh.vertices.len() as u32;
                for v in &tri {
                    mesh.vertices.push(v.pos);
                    mesh.normals.push(poly.normal);
                }
                mesh.triangles.push([base, base + 1, base + 2]);
            }
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh {
        Mesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::zeros(); 3],
            triangles: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn merge_offsets_indices() {
        let mut a = unit_triangle();
        let b = unit_triangle();
        a.merge(&b);
        assert_eq!(a.vertices.len(), 6);
        assert_eq!(a.triangles, vec![[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn flip_winding_is_involutive() {
        let mut m = unit_triangle();
        let original = m.clone();
        m.flip_winding();
        assert_eq!(m.triangles[0], [0, 2, 1]);
        m.flip_winding();
        assert_eq!(m.triangles, original.triangles);
    }

    #[test]
    fn recompute_normals_gives_unit_z_for_flat_triangle() {
        let mut m = unit_triangle();
        m.recompute_normals();
        for n in &m.normals {
            assert!((n.norm() - 1.0).abs() < 1e-9);
            assert!((n.z - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn recompute_normals_ignores_degenerate_triangle() {
        let mut m = Mesh {
            vertices: vec![Point3::origin(); 3],
            normals: vec![Vector3::zeros(); 3],
            triangles: vec![[0, 1, 2]],
        };
        m.recompute_normals();
        for n in &m.normals {
            assert!(n.iter().all(|c| c.is_finite()));
            assert_eq!(*n, Vector3::zeros());
        }
    }

    #[test]
    fn bounding_box_empty_mesh_is_none() {
        assert!(Mesh::new().bounding_box().is_none());
    }

    #[test]
    fn bounding_box_matches_vertex_extents() {
        let m = unit_triangle();
        let bbox = m.bounding_box().unwrap();
        assert_eq!(bbox.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.max, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn roundtrip_through_bsp_polygons_preserves_bounding_box() {
        let m = unit_triangle();
        let polys = m.to_bsp_polygons();
        assert_eq!(polys.len(), 1);
        let back = Mesh::from_bsp_polygons(&polys);
        assert_eq!(back.bounding_box(), m.bounding_box());
    }

    #[test]
    fn degenerate_triangle_dropped_by_to_bsp_polygons() {
        let m = Mesh {
            vertices: vec![Point3::origin(); 3],
            normals: vec![Vector3::zeros(); 3],
            triangles: vec![[0, 1, 2]],
        };
        assert!(m.to_bsp_polygons().is_empty());
    }

    #[test]
    fn aabb_overlap_detects_gap() {
        let a = Aabb { min: Point3::new(0.0, 0.0, 0.0), max: Point3::new(1.0, 1.0, 1.0) };
        let b = Aabb { min: Point3::new(2.0, 2.0, 2.0), max: Point3::new(3.0, 3.0, 3.0) };
        assert!(!a.overlaps(&b));
        let c = Aabb { min: Point3::new(0.5, 0.5, 0.5), max: Point3::new(1.5, 1.5, 1.5) };
        assert!(a.overlaps(&c));
    }
}
