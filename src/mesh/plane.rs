//! A plane in point-normal form, and the polygon split/classify operations that make it the
//! workhorse of the [BSP tree](crate::mesh::bsp::Node).
//!
//! ## Representation
//!
//! A plane is a unit normal `n` and a signed offset `w` such that the plane is the set
//! `{ p | n·p = w }`. Given a convex polygon, its supporting plane is derived as
//! `n = polygon.normal` (assumed unit) and `w = n · v0` for the polygon's first vertex `v0`.
//!
//! ## Numerical policy
//!
//! Every on-plane / on-edge decision in this module is governed by the single fixed
//! [`EPSILON`] — there is no exact-arithmetic fallback. A vertex with signed distance
//! `d = n·v - w` is classified [`FRONT`] if `d > EPSILON`, [`BACK`] if `d < -EPSILON`, and
//! [`COPLANAR`] otherwise.

use crate::float_types::{EPSILON, Real};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// Classification of a polygon or point that lies exactly in the plane (within `±EPSILON`).
pub const COPLANAR: i8 = 0;
/// Classification of a polygon or point strictly on the side the normal points toward.
pub const FRONT: i8 = 1;
/// Classification of a polygon or point strictly on the side opposite the normal.
pub const BACK: i8 = 2;
/// A polygon or edge that straddles the plane, producing pieces on both sides.
pub const SPANNING: i8 = 3;

/// A plane in 3D space, in point-normal form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal vector.
    pub normal: Vector3<Real>,
    /// Signed offset from the origin along `normal`, i.e. `normal · p` for any point `p` on
    /// the plane.
    pub w: Real,
}

impl Plane {
    /// Build a plane directly from a unit normal and offset.
    #[inline]
    pub const fn new(normal: Vector3<Real>, w: Real) -> Self {
        Plane { normal, w }
    }

    /// Derive a plane from a polygon's first three vertices: the polygon's own (assumed unit)
    /// normal, and `w = n · v0`.
    pub fn from_polygon(vertices: &[Vertex], normal: Vector3<Real>) -> Self {
        let w = normal.dot(&vertices[0].pos.coords);
        Plane { normal, w }
    }

    /// Flip the plane to face the opposite direction: `n ↦ -n`, `w ↦ -w`.
    #[inline]
    pub const fn flip(&mut self) {
        self.normal = Vector3::new(-self.normal.x, -self.normal.y, -self.normal.z);
        self.w = -self.w;
    }

    /// Signed distance of a point from the plane: `n·p - w`.
    #[inline]
    pub fn signed_distance(&self, point: Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a single point against the plane under [`EPSILON`].
    #[inline]
    pub fn classify_point(&self, point: Point3<Real>) -> i8 {
        let d = self.signed_distance(point);
        if d > EPSILON {
            FRONT
        } else if d < -EPSILON {
            BACK
        } else {
            COPLANAR
        }
    }

    /// Classify a polygon against the plane: the bitwise-OR of every vertex's classification.
    /// A pure [`COPLANAR`]/[`FRONT`]/[`BACK`] result means every vertex landed on that side (or
    /// on the plane); anything else is [`SPANNING`].
    pub fn classify_polygon(&self, polygon: &Polygon) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(0, |acc, v| acc | self.classify_point(v.pos))
    }

    /// Split a polygon against this plane, per the engine's duplication rule: vertices within
    /// `EPSILON` of the plane are appended to *both* the front and back vertex lists, which is
    /// what keeps each side's cut face closed. Returns four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`, where the coplanar lists hold the
    /// (unsplit) polygon itself, routed by the sign of `plane.normal · polygon.normal`.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
    ) -> (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.classify_point(v.pos))
            .collect();
        let overall = types.iter().fold(0, |acc, &t| acc | t);

        match overall {
            COPLANAR => {
                if self.normal.dot(&polygon.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let n = polygon.vertices.len();
                let mut front_verts = Vec::new();
                let mut back_verts = Vec::new();

                for i in 0..n {
                    let j = (i + 1) % n;
                    let vi = &polygon.vertices[i];
                    let vj = &polygon.vertices[j];
                    let di = self.signed_distance(vi.pos);
                    let dj = self.signed_distance(vj.pos);

                    if di >= -EPSILON {
                        front_verts.push(*vi);
                    }
                    if di <= EPSILON {
                        back_verts.push(*vi);
                    }

                    let crosses = (di > EPSILON && dj < -EPSILON) || (di < -EPSILON && dj > EPSILON);
                    if crosses {
                        let denom = self.normal.dot(&(vj.pos - vi.pos));
                        if denom.abs() > EPSILON {
                            let t = (self.w - self.normal.dot(&vi.pos.coords)) / denom;
                            let intersection = vi.interpolate(vj, t);
                            front_verts.push(intersection);
                            back_verts.push(intersection);
                        }
                    }
                }

                if front_verts.len() >= 3 {
                    front.push(Polygon::new(front_verts, polygon.normal));
                }
                if back_verts.len() >= 3 {
                    back.push(Polygon::new(back_verts, polygon.normal));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(z: Real) -> Polygon {
        let n = Vector3::z();
        Polygon::new(
            vec![
                Vertex::new(Point3::new(-1.0, -1.0, z), n),
                Vertex::new(Point3::new(1.0, -1.0, z), n),
                Vertex::new(Point3::new(1.0, 1.0, z), n),
                Vertex::new(Point3::new(-1.0, 1.0, z), n),
            ],
            n,
        )
    }

    #[test]
    fn classify_front_back_coplanar() {
        let plane = Plane::new(Vector3::z(), 0.0);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, 1.0)), FRONT);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, -1.0)), BACK);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, 0.0)), COPLANAR);
    }

    #[test]
    fn split_spanning_quad_produces_two_quads() {
        // A quad in the XZ plane straddling z=0, split by the XY plane.
        let n = Vector3::y();
        let quad = Polygon::new(
            vec![
                Vertex::new(Point3::new(-1.0, -1.0, 0.0), n),
                Vertex::new(Point3::new(1.0, -1.0, 0.0), n),
                Vertex::new(Point3::new(1.0, 1.0, 0.0), n),
                Vertex::new(Point3::new(-1.0, 1.0, 0.0), n),
            ],
            n,
        );
        let plane = Plane::new(Vector3::x(), 0.0);
        let (cf, cb, front, back) = plane.split_polygon(&quad);
        assert!(cf.is_empty() && cb.is_empty());
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        assert!(front[0].vertices.len() >= 3);
        assert!(back[0].vertices.len() >= 3);
    }

    #[test]
    fn coplanar_polygon_routes_by_normal_orientation() {
        let plane = Plane::new(Vector3::z(), 0.0);
        let same_orientation = square(0.0);
        let mut opposite = same_orientation.clone();
        opposite.flip();

        let (cf, cb, _, _) = plane.split_polygon(&same_orientation);
        assert_eq!(cf.len(), 1);
        assert_eq!(cb.len(), 0);

        let (cf2, cb2, _, _) = plane.split_polygon(&opposite);
        assert_eq!(cf2.len(), 0);
        assert_eq!(cb2.len(), 1);
    }

    #[test]
    fn flip_negates_normal_and_offset() {
        let mut plane = Plane::new(Vector3::z(), 2.0);
        plane.flip();
        assert_eq!(plane.normal, -Vector3::z());
        assert_eq!(plane.w, -2.0);
    }
}
