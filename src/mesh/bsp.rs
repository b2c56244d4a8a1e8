//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree: the recursive spatial
//! partition that carries every boolean in [`crate::mesh::csg`].

use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;

/// Recursion is capped at this depth; polygons that would split further are instead retained,
/// unsplit, at the node where the cap was hit. This bounds stack depth on pathological input at
/// the cost of leaving some geometry interpenetrating in the output — a deliberate trade, not an
/// error condition.
const MAX_DEPTH: usize = 100;

/// A node of a BSP tree: an optional splitting plane, the polygons coplanar with it (both
/// orientations — orientation is carried by each polygon's own normal), and optional front/back
/// subtrees holding everything strictly on one side.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub plane: Option<Plane>,
    pub front: Option<Box<Node>>,
    pub back: Option<Box<Node>>,
    pub polygons: Vec<Polygon>,
}

impl Node {
    /// An empty node: no plane, no polygons, no children.
    pub const fn new() -> Self {
        Node { plane: None, front: None, back: None, polygons: Vec::new() }
    }

    /// Build a tree from a polygon list in one step. Building an empty list yields an empty
    /// node (no plane), which every traversal below treats as "no geometry here."
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut node = Node::new();
        if !polygons.is_empty() {
            node.build(polygons, 0);
        }
        node
    }

    /// Split `polygons` against the node's own plane, choosing the first polygon's plane as the
    /// node's own when one hasn't been set yet, and recurse into front/back children (created
    /// lazily) with whatever fragments land strictly on each side. Coplanar fragments — already
    /// routed to front- or back-orientation by [`Plane::split_polygon`] — are stored directly at
    /// this node. Past [`MAX_DEPTH`], the remaining polygons are stored unsplit instead of
    /// recursing further.
    fn build(&mut self, polygons: &[Polygon], depth: usize) {
        if polygons.is_empty() {
            return;
        }
        if self.plane.is_none() {
            self.plane = Some(polygons[0].plane());
        }
        if depth >= MAX_DEPTH {
            self.polygons.extend_from_slice(polygons);
            return;
        }
        let plane = self.plane.unwrap();

        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) = plane.split_polygon(polygon);
            self.polygons.extend(coplanar_front);
            self.polygons.extend(coplanar_back);
            front.append(&mut front_parts);
            back.append(&mut back_parts);
        }

        if !front.is_empty() {
            self.front.get_or_insert_with(|| Box::new(Node::new())).build(&front, depth + 1);
        }
        if !back.is_empty() {
            self.back.get_or_insert_with(|| Box::new(Node::new())).build(&back, depth + 1);
        }
    }

    /// Reverse every stored polygon's winding, negate the node's own plane, and swap the front
    /// and back subtrees, recursively. After `invert`, the tree represents the complement of the
    /// solid it represented before.
    pub fn invert(&mut self) {
        for polygon in &mut self.polygons {
            polygon.flip();
        }
        if let Some(plane) = &mut self.plane {
            plane.flip();
        }
        if let Some(front) = &mut self.front {
            front.invert();
        }
        if let Some(back) = &mut self.back {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Remove the portions of `polygons` that lie **inside** this tree: split each input against
    /// this node's plane, send front fragments into the front subtree (or keep them, if there is
    /// none), and send back fragments into the back subtree — or **discard** them, if there is
    /// no back subtree, since a missing back child means "solid" on that side.
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let Some(plane) = &self.plane else {
            return polygons.to_vec();
        };

        let mut front_polys = Vec::with_capacity(polygons.len());
        let mut back_polys = Vec::with_capacity(polygons.len());
        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) = plane.split_polygon(polygon);
            front_polys.extend(coplanar_front);
            back_polys.extend(coplanar_back);
            front_polys.append(&mut front_parts);
            back_polys.append(&mut back_parts);
        }

        let mut result = match &self.front {
            Some(front) => front.clip_polygons(&front_polys),
            None => front_polys,
        };
        if let Some(back) = &self.back {
            result.extend(back.clip_polygons(&back_polys));
        }
        result
    }

    /// The dual of [`Node::clip_polygons`]: keep only the portions of `polygons` that lie
    /// **inside** this tree. A missing front subtree now discards front fragments (nothing there
    /// is inside), and a missing back subtree passes back fragments through unchanged (everything
    /// there is inside). An empty tree (no plane at all) has no interior, so it returns nothing.
    pub fn clip_polygons_inverse(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let Some(plane) = &self.plane else {
            return Vec::new();
        };

        let mut front_polys = Vec::with_capacity(polygons.len());
        let mut back_polys = Vec::with_capacity(polygons.len());
        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) = plane.split_polygon(polygon);
            front_polys.extend(coplanar_front);
            back_polys.extend(coplanar_back);
            front_polys.append(&mut front_parts);
            back_polys.append(&mut back_parts);
        }

        let mut result = match &self.front {
            Some(front) => front.clip_polygons_inverse(&front_polys),
            None => Vec::new(),
        };
        match &self.back {
            Some(back) => result.extend(back.clip_polygons_inverse(&back_polys)),
            None => result.extend(back_polys),
        }
        result
    }

    /// Replace this tree's own stored polygons with what survives `other.clip_polygons(..)`, then
    /// recurse into front and back. After this call, the tree contains no geometry lying inside
    /// `other`.
    pub fn clip_to(&mut self, other: &Node) {
        self.polygons = other.clip_polygons(&self.polygons);
        if let Some(front) = &mut self.front {
            front.clip_to(other);
        }
        if let Some(back) = &mut self.back {
            back.clip_to(other);
        }
    }

    /// The dual of [`Node::clip_to`], used for intersection: retains only geometry lying inside
    /// `other`.
    pub fn clip_to_inverse(&mut self, other: &Node) {
        self.polygons = other.clip_polygons_inverse(&self.polygons);
        if let Some(front) = &mut self.front {
            front.clip_to_inverse(other);
        }
        if let Some(back) = &mut self.back {
            back.clip_to_inverse(other);
        }
    }

    /// Flatten the whole tree's stored polygons, iteratively (no recursion, so no risk of stack
    /// overflow even near [`MAX_DEPTH`]).
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            if let Some(front) = &node.front {
                stack.push(front);
            }
            if let Some(back) = &node.back {
                stack.push(back);
            }
        }
        result
    }
}
