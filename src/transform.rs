//! Affine transform builders (translate/scale/rotate/euler/mirror) and the companion predicate
//! that tells a caller whether applying one requires a triangle-winding flip.
//!
//! This module only *builds* matrices — applying one to a mesh (multiplying every vertex,
//! transforming every normal by the upper 3×3 block, and flipping winding when
//! [`requires_winding_flip`] says so) is the transform-feature evaluator's job, not this crate's.

use crate::float_types::Real;
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};

/// Which affine transform a [`TransformKind`] describes, for [`requires_winding_flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Translate,
    Rotate,
    Scale,
    Mirror,
}

impl Default for TransformKind {
    /// `Translate` — the only kind whose default parameters (`vector = 0`) are a true no-op.
    fn default() -> Self {
        TransformKind::Translate
    }
}

/// The inbound request shape from the feature-tree evaluator (`spec.md` §6): which transform to
/// build and its parameters. `vector` is the translation/scale vector for
/// [`TransformKind::Translate`]/[`TransformKind::Scale`] and the reflection normal for
/// [`TransformKind::Mirror`]; `angle`/`axis` are used only by [`TransformKind::Rotate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSpec {
    pub kind: TransformKind,
    pub vector: Vector3<Real>,
    pub angle: Real,
    pub axis: Vector3<Real>,
}

impl Default for TransformSpec {
    fn default() -> Self {
        TransformSpec { kind: TransformKind::default(), vector: Vector3::zeros(), angle: 0.0, axis: Vector3::z() }
    }
}

impl TransformSpec {
    /// Build the 4×4 matrix this spec describes, dispatching to [`translate`]/[`scale`]/
    /// [`rotate`]/[`mirror`] by `kind`.
    pub fn matrix(&self) -> Matrix4<Real> {
        match self.kind {
            TransformKind::Translate => translate(self.vector),
            TransformKind::Scale => scale(self.vector),
            TransformKind::Rotate => rotate(self.angle, self.axis),
            TransformKind::Mirror => mirror(self.vector),
        }
    }

    /// `true` if applying this spec's matrix requires a winding flip afterward; see
    /// [`requires_winding_flip`].
    pub fn requires_winding_flip(&self) -> bool {
        requires_winding_flip(self.kind, self.vector)
    }
}

/// `translate(v)`: identity with the translation column set to `v`.
pub fn translate(v: Vector3<Real>) -> Matrix4<Real> {
    Translation3::from(v).to_homogeneous()
}

/// `scale(v)`: diagonal scale, `(v.x, v.y, v.z, 1)`.
pub fn scale(v: Vector3<Real>) -> Matrix4<Real> {
    Matrix4::new_nonuniform_scaling(&v)
}

/// `rotate(angle_deg, axis)`: Rodrigues' rotation formula about `axis` (normalized internally),
/// by `angle_deg` degrees.
pub fn rotate(angle_deg: Real, axis: Vector3<Real>) -> Matrix4<Real> {
    let rad = angle_deg.to_radians();
    match nalgebra::Unit::try_new(axis, crate::float_types::EPSILON) {
        Some(unit_axis) => Rotation3::from_axis_angle(&unit_axis, rad).to_homogeneous(),
        None => Matrix4::identity(),
    }
}

/// `euler(angles_deg)`: `R = R_z · R_y · R_x`, each factor built from [`rotate`] about the
/// corresponding principal axis.
pub fn euler(angles_deg: Vector3<Real>) -> Matrix4<Real> {
    let rz = rotate(angles_deg.z, Vector3::z());
    let ry = rotate(angles_deg.y, Vector3::y());
    let rx = rotate(angles_deg.x, Vector3::x());
    rz * ry * rx
}

/// `mirror(normal)`: reflection across the plane through the origin with unit normal `n`,
/// `I − 2·n·nᵀ`, embedded in the upper 3×3 block. `normal` is normalized internally; a
/// near-zero normal yields the identity (nothing to reflect across).
pub fn mirror(normal: Vector3<Real>) -> Matrix4<Real> {
    let len = normal.norm();
    if len < crate::float_types::EPSILON {
        return Matrix4::identity();
    }
    let n = normal / len;
    let reflect3 = nalgebra::Matrix3::identity() - 2.0 * n * n.transpose();
    let mut m = Matrix4::identity();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(&reflect3);
    m
}

/// `true` if applying this transform flips triangle winding and so requires a
/// [`crate::mesh::Mesh::flip_winding`] afterward: always for [`TransformKind::Mirror`], and for
/// [`TransformKind::Scale`] when an odd number of `scale_vector`'s components are negative.
/// Translation and rotation never flip winding.
pub fn requires_winding_flip(kind: TransformKind, scale_vector: Vector3<Real>) -> bool {
    match kind {
        TransformKind::Mirror => true,
        TransformKind::Scale => {
            [scale_vector.x, scale_vector.y, scale_vector.z]
                .iter()
                .filter(|c| **c < 0.0)
                .count()
                % 2
                == 1
        },
        TransformKind::Translate | TransformKind::Rotate => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn translate_moves_a_point() {
        let m = translate(Vector3::new(1.0, 2.0, 3.0));
        let p = m.transform_point(&Point3::origin());
        assert_eq!(p, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn scale_scales_each_axis() {
        let m = scale(Vector3::new(2.0, 3.0, 4.0));
        let p = m.transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn rotate_90_about_z_sends_x_axis_to_y_axis() {
        let m = rotate(90.0, Vector3::z());
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p.x).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mirror_across_yz_plane_negates_x() {
        let m = mirror(Vector3::x());
        let p = m.transform_point(&Point3::new(1.0, 2.0, 3.0));
        assert!((p.x + 1.0).abs() < 1e-9);
        assert_eq!(p.y, 2.0);
        assert_eq!(p.z, 3.0);
    }

    #[test]
    fn winding_flip_predicate() {
        assert!(requires_winding_flip(TransformKind::Mirror, Vector3::zeros()));
        assert!(!requires_winding_flip(TransformKind::Translate, Vector3::zeros()));
        assert!(!requires_winding_flip(TransformKind::Rotate, Vector3::zeros()));
        assert!(requires_winding_flip(TransformKind::Scale, Vector3::new(-1.0, 1.0, 1.0)));
        assert!(requires_winding_flip(TransformKind::Scale, Vector3::new(-1.0, -1.0, -1.0)));
        assert!(!requires_winding_flip(TransformKind::Scale, Vector3::new(-1.0, -1.0, 1.0)));
        assert!(!requires_winding_flip(TransformKind::Scale, Vector3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn default_transform_spec_is_identity_translate() {
        let spec = TransformSpec::default();
        assert_eq!(spec.kind, TransformKind::Translate);
        assert_eq!(spec.matrix(), Matrix4::identity());
        assert!(!spec.requires_winding_flip());
    }

    #[test]
    fn transform_spec_mirror_matches_bare_mirror_fn() {
        let spec = TransformSpec { kind: TransformKind::Mirror, vector: Vector3::x(), ..Default::default() };
        assert_eq!(spec.matrix(), mirror(Vector3::x()));
        assert!(spec.requires_winding_flip());
    }

    #[test]
    fn transform_spec_rotate_matches_bare_rotate_fn() {
        let spec = TransformSpec { kind: TransformKind::Rotate, angle: 90.0, axis: Vector3::z(), ..Default::default() };
        assert_eq!(spec.matrix(), rotate(90.0, Vector3::z()));
    }
}
