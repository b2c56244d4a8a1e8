//! Linear, rotational, and loft extrusion: turning [`Polygon2D`] profiles into indexed
//! [`Mesh`]es.

use crate::float_types::{EPSILON, PI, Real};
use crate::mesh::Mesh;
use crate::sketch::Polygon2D;
use nalgebra::{Point3, Vector3};

/// Parameters for [`linear_extrude`].
#[derive(Debug, Clone, Copy)]
pub struct LinearExtrudeParams {
    pub height: Real,
    pub center: bool,
    pub twist_deg: Real,
    pub scale_end: (Real, Real),
    pub slices: usize,
}

impl Default for LinearExtrudeParams {
    /// A straight, untwisted, uncentered extrusion to unit height with one slice.
    fn default() -> Self {
        LinearExtrudeParams { height: 1.0, center: false, twist_deg: 0.0, scale_end: (1.0, 1.0), slices: 1 }
    }
}

/// Parameters for [`rotate_extrude`].
#[derive(Debug, Clone, Copy)]
pub struct RotateExtrudeParams {
    pub angle_deg: Real,
    /// Segment count override; `0` asks for the angle-derived default.
    pub fn_hint: usize,
}

impl Default for RotateExtrudeParams {
    /// A full revolution with the angle-derived segment count (`fn_hint = 0`).
    fn default() -> Self {
        RotateExtrudeParams { angle_deg: 360.0, fn_hint: 0 }
    }
}

/// Parameters for [`loft`].
#[derive(Debug, Clone, Copy)]
pub struct LoftParams {
    pub slices_per_span: usize,
}

impl Default for LoftParams {
    /// One interpolated ring per span — the minimum [`loft`] accepts (`slices_per_span.max(1)`).
    fn default() -> Self {
        LoftParams { slices_per_span: 1 }
    }
}

/// Sweep `profile` (already CCW, `n ≥ 3` points) along +Z for `params.height`, with optional
/// twist, end scaling, slicing, and centering.
///
/// **Mathematical foundation.** For slice parameter `t = s/S`, `s ∈ [0, S]`:
/// ```text
/// scale(t) = (1 + (sx−1)t, 1 + (sy−1)t)
/// θ(t)     = twist · t
/// z(t)     = z₀ + height · t
/// ring(t)  = rotate_z(θ(t)) · (x·scale_x(t), y·scale_y(t)), then translate to z(t)
/// ```
/// The effective slice count `S` is at least `slices`, and at least one ring per 10° of twist
/// (`⌈|twist| / (π/18)⌉`) so a twisted extrusion never facets too coarsely regardless of the
/// caller's `slices` choice.
///
/// Side faces use a private vertex block per edge-per-ring-pair quad (not shared with
/// neighboring quads), so the subsequent normal pass can smooth within a quad's own two
/// triangles without blurring across the facet boundary the twist introduces. Caps get their
/// own shared per-ring vertex block, seeded with an explicit ±Z normal that the accumulation
/// pass below folds in alongside the fan triangles' own face normals — the documented,
/// intentional effect is that a twisted cap's corners end up slightly off from pure ±Z.
pub fn linear_extrude(profile: &Polygon2D, params: &LinearExtrudeParams) -> Mesh {
    let n = profile.points.len();
    if n < 3 {
        return Mesh::new();
    }

    let twist_rad = params.twist_deg.to_radians();
    let slice_count = if twist_rad != 0.0 {
        params.slices.max((twist_rad.abs() / (PI / 18.0)).ceil() as usize)
    } else {
        params.slices.max(1)
    };

    let z0 = if params.center { -params.height / 2.0 } else { 0.0 };
    let (sx, sy) = params.scale_end;

    let rings: Vec<Vec<Point3<Real>>> = (0..=slice_count)
        .map(|s| {
            let t = s as Real / slice_count as Real;
            let (scale_x, scale_y) = (1.0 + (sx - 1.0) * t, 1.0 + (sy - 1.0) * t);
            let theta = twist_rad * t;
            let (cos_t, sin_t) = (theta.cos(), theta.sin());
            let z = z0 + params.height * t;
            profile
                .points
                .iter()
                .map(|&(x, y)| {
                    let (xs, ys) = (x * scale_x, y * scale_y);
                    Point3::new(xs * cos_t - ys * sin_t, xs * sin_t + ys * cos_t, z)
                })
                .collect()
        })
        .collect();

    let mut mesh = Mesh::new();
    for w in 0..slice_count {
        let bottom = &rings[w];
        let top = &rings[w + 1];
        for i in 0..n {
            let j = (i + 1) % n;
            push_quad(&mut mesh, bottom[i], bottom[j], top[i], top[j]);
        }
    }
    push_cap(&mut mesh, &rings[0], -Vector3::z(), true);
    push_cap(&mut mesh, &rings[slice_count], Vector3::z(), false);
    normalize_all(&mut mesh);
    mesh
}

/// Revolve `profile` (`m ≥ 2` points, `(x, y)` read as `(radius, height)`) around the Y axis
/// through `params.angle_deg` degrees.
///
/// Segment count `K` is `fn_hint` when positive, else `max(⌊angle/10⌋, 8)`. A sweep within
/// `1e-3°` of a full `360°` closes the seam by wraparound (`R = K` rings, last segment connects
/// back to ring 0) instead of emitting a duplicate coincident ring; a partial sweep emits
/// `R = K + 1` rings and, when the profile has at least 3 points, fans start/end caps. Unlike
/// [`linear_extrude`], ring vertices here are shared across adjacent segments, so a single
/// trailing [`Mesh::recompute_normals`] call — rather than a bespoke accumulation pass — is
/// enough to produce smooth shading.
pub fn rotate_extrude(profile: &Polygon2D, params: &RotateExtrudeParams) -> Mesh {
    let m = profile.points.len();
    if m < 2 {
        return Mesh::new();
    }

    let angle_rad = params.angle_deg.to_radians();
    let k = if params.fn_hint > 0 {
        params.fn_hint
    } else {
        ((params.angle_deg / 10.0).floor() as usize).max(8)
    };
    let full_revolution = (params.angle_deg - 360.0).abs() < 1e-3;
    let ring_count = if full_revolution { k } else { k + 1 };

    let mut mesh = Mesh::new();
    for s in 0..ring_count {
        let theta = angle_rad * s as Real / k as Real;
        let (cos_t, sin_t) = (theta.cos(), theta.sin());
        for &(x, y) in &profile.points {
            mesh.vertices.push(Point3::new(x * cos_t, y, x * sin_t));
            mesh.normals.push(Vector3::new(cos_t, 0.0, sin_t));
        }
    }

    for s in 0..k {
        let s_next = if full_revolution { (s + 1) % k } else { s + 1 };
        let ring_a = s * m;
        let ring_b = s_next * m;
        for i in 0..m - 1 {
            let (a0, a1) = ((ring_a + i) as u32, (ring_a + i + 1) as u32);
            let (b0, b1) = ((ring_b + i) as u32, (ring_b + i + 1) as u32);
            mesh.triangles.push([a0, b0, b1]);
            mesh.triangles.push([a0, b1, a1]);
        }
    }

    if !full_revolution && m >= 3 {
        push_rotate_cap(&mut mesh, 0, m, true);
        push_rotate_cap(&mut mesh, (ring_count - 1) * m, m, false);
    }

    mesh.recompute_normals();
    mesh
}

fn push_rotate_cap(mesh: &mut Mesh, ring_base: usize, m: usize, reversed: bool) {
    let base = ring_base as u32;
    for i in 1..m - 1 {
        let (b, c) = ((ring_base + i) as u32, (ring_base + i + 1) as u32);
        if reversed {
            mesh.triangles.push([base, c, b]);
        } else {
            mesh.triangles.push([base, b, c]);
        }
    }
}

/// Interpolate smoothly between `≥ 2` profiles of identical point count `n ≥ 3`, each placed at
/// its corresponding `heights` entry, emitting `slices_per_span` rings per consecutive profile
/// pair. Every profile is normalized to CCW first. Returns an empty mesh if fewer than 2
/// profiles are given, the profile/height counts mismatch, or any profile has `< 3` points or a
/// point count differing from the first.
///
/// Between profiles `A` (at `zA`) and `B` (at `zB`), ring parameter `t = s / slices_per_span`
/// drives a smoothstep `t' = t²(3 − 2t)` for the XY interpolation (`lerp(A, B, t')`) while Z
/// stays linear in `t` (`lerp(zA, zB, t)`) — tangent-continuous in-plane blending with exact
/// height placement at each profile. The first span emits rings from `s = 0`; later spans start
/// at `s = 1` so the shared junction ring between spans isn't duplicated. Side triangulation and
/// cap fanning mirror [`linear_extrude`].
pub fn loft(profiles: &[Polygon2D], heights: &[Real], params: &LoftParams) -> Mesh {
    if profiles.len() < 2 || profiles.len() != heights.len() {
        return Mesh::new();
    }
    let n = profiles[0].points.len();
    if n < 3 || profiles.iter().any(|p| p.points.len() != n) {
        return Mesh::new();
    }

    let mut normalized: Vec<Polygon2D> = profiles.to_vec();
    for p in &mut normalized {
        p.ensure_ccw();
    }

    let slices = params.slices_per_span.max(1);
    let mut rings: Vec<Vec<Point3<Real>>> = Vec::new();
    for span in 0..normalized.len() - 1 {
        let (a, b) = (&normalized[span], &normalized[span + 1]);
        let (za, zb) = (heights[span], heights[span + 1]);
        let start_s = if span == 0 { 0 } else { 1 };
        for s in start_s..=slices {
            let t = s as Real / slices as Real;
            let t_smooth = t * t * (3.0 - 2.0 * t);
            let z = za + (zb - za) * t;
            let ring = (0..n)
                .map(|i| {
                    let (ax, ay) = a.points[i];
                    let (bx, by) = b.points[i];
                    Point3::new(ax + (bx - ax) * t_smooth, ay + (by - ay) * t_smooth, z)
                })
                .collect();
            rings.push(ring);
        }
    }

    let mut mesh = Mesh::new();
    for w in 0..rings.len() - 1 {
        let (bottom, top) = (&rings[w], &rings[w + 1]);
        for i in 0..n {
            let j = (i + 1) % n;
            push_quad(&mut mesh, bottom[i], bottom[j], top[i], top[j]);
        }
    }
    push_cap(&mut mesh, &rings[0], -Vector3::z(), true);
    push_cap(&mut mesh, rings.last().expect("checked non-empty above"), Vector3::z(), false);
    normalize_all(&mut mesh);
    mesh
}

/// Emit one quad (`bi, bj, tj, ti`) as two triangles `(bi, bj, tj)` and `(bi, tj, ti)` on a fresh
/// 4-vertex block, accumulating each triangle's unnormalized face normal into its own corners.
fn push_quad(mesh: &mut Mesh, bi: Point3<Real>, bj: Point3<Real>, ti: Point3<Real>, tj: Point3<Real>) {
    let base = mesh.vertices.len() as u32;
    mesh.vertices.extend_from_slice(&[bi, bj, tj, ti]);
    mesh.normals.extend(std::iter::repeat(Vector3::zeros()).take(4));
    mesh.triangles.push([base, base + 1, base + 2]);
    mesh.triangles.push([base, base + 2, base + 3]);
    accumulate_face_normal(mesh, base, base + 1, base + 2);
    accumulate_face_normal(mesh, base, base + 2, base + 3);
}

/// Fan-triangulate `ring` from its own vertex 0 onto a fresh shared vertex block, seeded with
/// `seed_normal` before face-normal accumulation (see [`linear_extrude`]'s doc comment for why
/// the seed doesn't simply get overwritten).
fn push_cap(mesh: &mut Mesh, ring: &[Point3<Real>], seed_normal: Vector3<Real>, reversed: bool) {
    let n = ring.len();
    if n < 3 {
        return;
    }
    let base = mesh.vertices.len() as u32;
    mesh.vertices.extend_from_slice(ring);
    mesh.normals.extend(std::iter::repeat(seed_normal).take(n));
    for i in 1..n - 1 {
        let (b, c) = (base + i as u32, base + i as u32 + 1);
        if reversed {
            mesh.triangles.push([base, c, b]);
            accumulate_face_normal(mesh, base, c, b);
        } else {
            mesh.triangles.push([base, b, c]);
            accumulate_face_normal(mesh, base, b, c);
        }
    }
}

fn accumulate_face_normal(mesh: &mut Mesh, a: u32, b: u32, c: u32) {
    let (pa, pb, pc) = (mesh.vertices[a as usize], mesh.vertices[b as usize], mesh.vertices[c as usize]);
    let face = (pb - pa).cross(&(pc - pa));
    if face.norm() < EPSILON {
        return;
    }
    mesh.normals[a as usize] += face;
    mesh.normals[b as usize] += face;
    mesh.normals[c as usize] += face;
}

fn normalize_all(mesh: &mut Mesh) {
    for n in &mut mesh.normals {
        let len = n.norm();
        if len > 0.0 {
            *n /= len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon2D {
        Polygon2D::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    fn triangle() -> Polygon2D {
        Polygon2D::new(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])
    }

    #[test]
    fn default_linear_extrude_params_match_eight_triangle_case() {
        let mesh = linear_extrude(&triangle(), &LinearExtrudeParams::default());
        assert_eq!(mesh.triangles.len(), 8);
    }

    #[test]
    fn default_rotate_extrude_params_is_a_full_revolution() {
        let profile = Polygon2D::new(vec![(1.0, 0.0), (1.0, 1.0)]);
        let mesh = rotate_extrude(&profile, &RotateExtrudeParams::default());
        assert!(!mesh.is_empty());
        let bbox = mesh.bounding_box().unwrap();
        assert!((bbox.min.x + 1.0).abs() < 1e-3);
    }

    #[test]
    fn default_loft_params_is_one_slice_per_span() {
        assert_eq!(LoftParams::default().slices_per_span, 1);
    }

    #[test]
    fn degenerate_profile_yields_empty_mesh() {
        let too_few = Polygon2D::new(vec![(0.0, 0.0), (1.0, 0.0)]);
        let params = LinearExtrudeParams { height: 1.0, center: false, twist_deg: 0.0, scale_end: (1.0, 1.0), slices: 1 };
        assert!(linear_extrude(&too_few, &params).is_empty());
    }

    #[test]
    fn linear_extrude_triangle_one_slice_no_twist_has_eight_triangles() {
        let params = LinearExtrudeParams { height: 1.0, center: false, twist_deg: 0.0, scale_end: (1.0, 1.0), slices: 1 };
        let mesh = linear_extrude(&triangle(), &params);
        assert_eq!(mesh.triangles.len(), 8);
    }

    #[test]
    fn linear_extrude_twist_rotates_top_face() {
        let params = LinearExtrudeParams { height: 10.0, center: false, twist_deg: 90.0, scale_end: (1.0, 1.0), slices: 10 };
        let mesh = linear_extrude(&unit_square(), &params);
        for n in &mesh.normals {
            assert!((n.norm() - 1.0).abs() < 1e-6 || n.norm() == 0.0);
        }
        // The top ring's first corner (1,0) rotated 90° in XY lands at (0,1,10).
        let expected = Point3::new(0.0, 1.0, 10.0);
        assert!(mesh.vertices.iter().any(|p| (p - expected).norm() < 1e-6));
    }

    #[test]
    fn rotate_extrude_too_few_points_yields_empty_mesh() {
        let single = Polygon2D::new(vec![(1.0, 0.0)]);
        let params = RotateExtrudeParams { angle_deg: 360.0, fn_hint: 8 };
        assert!(rotate_extrude(&single, &params).is_empty());
    }

    #[test]
    fn rotate_extrude_full_revolution_has_no_caps() {
        let profile = Polygon2D::new(vec![(1.0, 0.0), (1.0, 1.0)]);
        let params = RotateExtrudeParams { angle_deg: 360.0, fn_hint: 8 };
        let mesh = rotate_extrude(&profile, &params);
        assert_eq!(mesh.triangles.len(), 8 * (2 - 1) * 2);
        let bbox = mesh.bounding_box().unwrap();
        assert!((bbox.min.x + 1.0).abs() < 1e-3);
        assert!((bbox.max.x - 1.0).abs() < 1e-3);
    }

    #[test]
    fn rotate_extrude_partial_sweep_emits_caps() {
        let profile = Polygon2D::new(vec![(1.0, 0.0), (1.0, 1.0), (0.5, 1.0)]);
        let params = RotateExtrudeParams { angle_deg: 90.0, fn_hint: 9 };
        let mesh = rotate_extrude(&profile, &params);
        let side_triangles = 9 * (3 - 1) * 2;
        let cap_triangles = 2 * (3 - 2);
        assert_eq!(mesh.triangles.len(), side_triangles + cap_triangles);
    }

    #[test]
    fn loft_requires_at_least_two_matching_profiles() {
        let params = LoftParams { slices_per_span: 1 };
        assert!(loft(&[unit_square()], &[0.0], &params).is_empty());
        let mismatched = Polygon2D::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(loft(&[unit_square(), mismatched], &[0.0, 1.0], &params).is_empty());
    }

    #[test]
    fn loft_two_identical_unit_squares_makes_a_cube_topology() {
        let params = LoftParams { slices_per_span: 1 };
        let mesh = loft(&[unit_square(), unit_square()], &[0.0, 1.0], &params);
        assert_eq!(mesh.triangles.len(), 8 + 4);
        let bbox = mesh.bounding_box().unwrap();
        assert!((bbox.max - bbox.min - Vector3::new(1.0, 1.0, 1.0)).norm() < 1e-9);
    }
}
