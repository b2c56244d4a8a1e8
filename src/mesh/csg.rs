//! Constructive solid geometry: boolean evaluation of two or more meshes via the BSP protocol
//! in [`crate::mesh::bsp`].

use crate::mesh::Mesh;
use crate::mesh::bsp::Node;

/// Which boolean a call to [`perform`] / [`perform_binary`] computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
}

impl Default for BooleanOp {
    /// `Union` — the identity-friendliest op: folding it over zero or one mesh is a no-op.
    fn default() -> Self {
        BooleanOp::Union
    }
}

/// The inbound request shape from the feature-tree evaluator (`spec.md` §6): which boolean to
/// compute, over which meshes, folded left-to-right by [`perform`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanSpec {
    pub op: BooleanOp,
    pub meshes: Vec<Mesh>,
}

impl BooleanSpec {
    /// Evaluate this spec via [`perform`].
    pub fn evaluate(&self) -> Mesh {
        perform(self.op, &self.meshes)
    }
}

/// Fold a boolean left-to-right over a sequence of meshes: no inputs yields an empty mesh, a
/// single input is returned unchanged, and `N ≥ 2` inputs reduce via repeated
/// [`perform_binary`].
pub fn perform(op: BooleanOp, meshes: &[Mesh]) -> Mesh {
    match meshes {
        [] => Mesh::new(),
        [only] => only.clone(),
        [first, rest @ ..] => rest.iter().fold(first.clone(), |acc, m| perform_binary(op, &acc, m)),
    }
}

/// Evaluate a single boolean of two meshes.
///
/// Three stages, in order: (1) the empty-input shortcuts that make every op's identity element
/// behave correctly without touching the BSP machinery; (2) a bounding-box disjoint fast path,
/// which must agree with what the BSP path would have produced; (3) the full BSP clip/invert
/// sequence, reassembled back into an indexed mesh.
pub fn perform_binary(op: BooleanOp, a: &Mesh, b: &Mesh) -> Mesh {
    match op {
        BooleanOp::Union => {
            if a.is_empty() {
                return b.clone();
            }
            if b.is_empty() {
                return a.clone();
            }
        },
        BooleanOp::Difference => {
            if a.is_empty() {
                return Mesh::new();
            }
            if b.is_empty() {
                return a.clone();
            }
        },
        BooleanOp::Intersection => {
            if a.is_empty() || b.is_empty() {
                return Mesh::new();
            }
        },
    }

    if let (Some(bbox_a), Some(bbox_b)) = (a.bounding_box(), b.bounding_box()) {
        if !bbox_a.overlaps(&bbox_b) {
            return match op {
                BooleanOp::Union => {
                    let mut merged = a.clone();
                    merged.merge(b);
                    merged
                },
                BooleanOp::Difference => a.clone(),
                BooleanOp::Intersection => Mesh::new(),
            };
        }
    }

    let polys_a = a.to_bsp_polygons();
    let polys_b = b.to_bsp_polygons();

    let result_polys = match op {
        BooleanOp::Union => {
            let mut tree_a = Node::from_polygons(&polys_a);
            let mut tree_b = Node::from_polygons(&polys_b);
            tree_a.clip_to(&tree_b);
            tree_b.clip_to(&tree_a);
            tree_b.invert();
            tree_b.clip_to(&tree_a);
            tree_b.invert();
            let mut polys = tree_a.all_polygons();
            polys.extend(tree_b.all_polygons());
            polys
        },
        BooleanOp::Difference => {
            let mut tree_a = Node::from_polygons(&polys_a);
            let mut tree_b = Node::from_polygons(&polys_b);
            tree_a.invert();
            tree_a.clip_to(&tree_b);
            tree_b.clip_to(&tree_a);
            tree_b.invert();
            tree_b.clip_to(&tree_a);
            tree_b.invert();
            let mut polys = tree_a.all_polygons();
            polys.extend(tree_b.all_polygons());
            for polygon in &mut polys {
                polygon.flip();
            }
            polys
        },
        BooleanOp::Intersection => {
            // clip_to_inverse mutates the tree it's called on but only reads the "other" tree, so
            // each side needs its own pristine copy to hand to the other's clip once its own
            // tree has already been mutated.
            let pristine_a = Node::from_polygons(&polys_a);
            let mut tree_a = Node::from_polygons(&polys_a);
            let tree_b = Node::from_polygons(&polys_b);
            let mut tree_b_prime = Node::from_polygons(&polys_b);

            tree_a.clip_to_inverse(&tree_b);
            tree_b_prime.clip_to_inverse(&pristine_a);

            let mut polys = tree_a.all_polygons();
            polys.extend(tree_b_prime.all_polygons());
            polys
        },
    };

    Mesh::from_bsp_polygons(&result_polys)
}
