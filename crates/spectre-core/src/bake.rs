//! Flattening a hierarchy root into absolute-space leaf instances.

use std::sync::Arc;

use crate::geometry::{Point, Transform2D};
use crate::hidden::{HiddenSet, ROOT_PATH, child_path};
use crate::tile::{Leaf, Node};

/// A leaf resolved to an absolute transform and hierarchical path.
#[derive(Clone, Debug)]
pub struct BakedInstance {
    pub leaf: Arc<Leaf>,
    /// The local-to-world transform accumulated from the root.
    pub transform: Transform2D,
    pub path: String,
    /// Set for ghosts: instances below a hidden path kept because pruning was off.
    pub hidden: bool,
}

impl BakedInstance {
    pub fn label(&self) -> &str {
        self.leaf.label()
    }

    /// Polygon vertices in world space.
    pub fn world_polygon(&self) -> Vec<Point> {
        self.leaf.polygon().iter().map(|p| self.transform.apply(*p)).collect()
    }

    /// Vertex mean of the world polygon.
    pub fn centroid(&self) -> Point {
        self.transform.apply(Point::mean(self.leaf.polygon()))
    }

    /// Rotation of the absolute transform in whole degrees, in `[0, 360)`.
    pub fn rotation_deg(&self) -> i32 {
        (self.transform.rotation().to_degrees().round() as i32).rem_euclid(360)
    }

    /// Axis-aligned bounds of the world polygon as `(min, max)`.
    pub fn bounds(&self) -> (Point, Point) {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in self.world_polygon() {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        (min, max)
    }
}

/// Flattens `root` from the identity transform and path `"0"`.
///
/// With `prune_hidden` a hidden subtree produces nothing; without it every instance
/// below a hidden path is emitted with `hidden = true`. Instances come out depth-first
/// in child order, so the last one is topmost.
pub fn bake(root: &Node, hidden: &HiddenSet, prune_hidden: bool) -> Vec<BakedInstance> {
    let mut out = Vec::with_capacity(root.leaf_count());
    bake_into(root, Transform2D::identity(), ROOT_PATH, hidden, prune_hidden, false, &mut out);
    out
}

/// Recursive step of [`bake`], starting from an arbitrary transform and path.
pub fn bake_into(
    node: &Node,
    transform: Transform2D,
    path: &str,
    hidden: &HiddenSet,
    prune_hidden: bool,
    parent_hidden: bool,
    out: &mut Vec<BakedInstance>,
) {
    let is_hidden = parent_hidden || hidden.contains(path);
    if is_hidden && prune_hidden {
        return;
    }
    match node {
        Node::Leaf(leaf) => out.push(BakedInstance {
            leaf: Arc::clone(leaf),
            transform,
            path: path.to_string(),
            hidden: is_hidden,
        }),
        Node::Composite(comp) => {
            for (i, (child, local)) in comp.children().iter().enumerate() {
                let sub_path = child_path(path, i);
                bake_into(child, transform.concat(*local), &sub_path, hidden, prune_hidden, is_hidden, out);
            }
        }
    }
}
