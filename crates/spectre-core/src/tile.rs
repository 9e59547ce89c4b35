//! Tile hierarchy: shared leaves and composites, and the per-generation tile system.
//!
//! Nodes are reference counted. A composite built for generation g+1 holds the
//! very same `Node` handles as generation g, so the hierarchy is a DAG that grows
//! by sharing rather than copying.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::TilingError;
use crate::geometry::{Point, Transform2D};

/// Four alignment points used by the substitution rule; never rendered.
pub type Quad = [Point; 4];

/// The nine canonical roles of the substitution system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Gamma,
    Delta,
    Theta,
    Lambda,
    Xi,
    Pi,
    Sigma,
    Phi,
    Psi,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::Gamma,
        Role::Delta,
        Role::Theta,
        Role::Lambda,
        Role::Xi,
        Role::Pi,
        Role::Sigma,
        Role::Phi,
        Role::Psi,
    ];

    /// Every role except `Gamma`, which is always built as a two-leaf composite.
    pub const SINGLE: [Role; 8] = [
        Role::Delta,
        Role::Theta,
        Role::Lambda,
        Role::Xi,
        Role::Pi,
        Role::Sigma,
        Role::Phi,
        Role::Psi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Gamma => "Gamma",
            Role::Delta => "Delta",
            Role::Theta => "Theta",
            Role::Lambda => "Lambda",
            Role::Xi => "Xi",
            Role::Pi => "Pi",
            Role::Sigma => "Sigma",
            Role::Phi => "Phi",
            Role::Psi => "Psi",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TilingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TilingError::UnknownRole(s.to_string()))
    }
}

/// Boundary drawing commands, in leaf-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// How a leaf's boundary is traced between its polygon vertices.
#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    /// Straight edges between consecutive vertices.
    Polygon,
    /// Cubic segments: `[v0, c1, c2, v1, c1, c2, v2, ...]`, three points per edge.
    Curved(Vec<Point>),
}

/// An immutable tile shape. Shared by reference across every parent that places it.
#[derive(Debug)]
pub struct Leaf {
    label: String,
    polygon: Vec<Point>,
    outline: Outline,
    quad: Quad,
}

impl Leaf {
    pub fn new(label: impl Into<String>, polygon: Vec<Point>, outline: Outline, quad: Quad) -> Self {
        Self {
            label: label.into(),
            polygon,
            outline,
            quad,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Polygon vertices in local coordinates (the straight-edge skeleton even for curved leaves).
    pub fn polygon(&self) -> &[Point] {
        &self.polygon
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    pub fn is_curved(&self) -> bool {
        matches!(self.outline, Outline::Curved(_))
    }

    /// Boundary point sequence: polygon vertices, or the full Bezier control sequence.
    pub fn boundary(&self) -> &[Point] {
        match &self.outline {
            Outline::Polygon => &self.polygon,
            Outline::Curved(points) => points,
        }
    }

    /// Closed path for fill/stroke, in local coordinates.
    pub fn path(&self) -> Vec<PathCmd> {
        let mut cmds = Vec::with_capacity(self.polygon.len() + 2);
        match &self.outline {
            Outline::Polygon => {
                let mut it = self.polygon.iter();
                if let Some(first) = it.next() {
                    cmds.push(PathCmd::MoveTo(*first));
                    cmds.extend(it.map(|p| PathCmd::LineTo(*p)));
                }
            }
            Outline::Curved(points) => {
                if let Some(first) = points.first() {
                    cmds.push(PathCmd::MoveTo(*first));
                    let n = points.len();
                    for i in (0..n).step_by(3) {
                        if i + 2 >= n {
                            break;
                        }
                        let end = points[(i + 3) % n];
                        cmds.push(PathCmd::CubicTo(points[i + 1], points[i + 2], end));
                    }
                }
            }
        }
        if !cmds.is_empty() {
            cmds.push(PathCmd::Close);
        }
        cmds
    }
}

/// An ordered list of placed children plus the alignment quad of the supertile.
#[derive(Debug)]
pub struct Composite {
    children: Vec<(Node, Transform2D)>,
    quad: Quad,
}

impl Composite {
    pub fn new(children: Vec<(Node, Transform2D)>, quad: Quad) -> Self {
        Self { children, quad }
    }

    pub fn children(&self) -> &[(Node, Transform2D)] {
        &self.children
    }

    pub fn quad(&self) -> &Quad {
        &self.quad
    }
}

/// Cheap-to-clone handle to a shared hierarchy node.
#[derive(Clone, Debug)]
pub enum Node {
    Leaf(Arc<Leaf>),
    Composite(Arc<Composite>),
}

impl Node {
    pub fn leaf(leaf: Leaf) -> Self {
        Node::Leaf(Arc::new(leaf))
    }

    pub fn composite(composite: Composite) -> Self {
        Node::Composite(Arc::new(composite))
    }

    pub fn quad(&self) -> &Quad {
        match self {
            Node::Leaf(leaf) => leaf.quad(),
            Node::Composite(comp) => comp.quad(),
        }
    }

    /// Number of leaf placements reachable from this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Composite(comp) => comp.children().iter().map(|(c, _)| c.leaf_count()).sum(),
        }
    }

    /// Depth of the deepest leaf below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Composite(comp) => {
                1 + comp.children().iter().map(|(c, _)| c.depth()).max().unwrap_or(0)
            }
        }
    }

    /// Identity comparison: true when both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Leaf(a), Node::Leaf(b)) => Arc::ptr_eq(a, b),
            (Node::Composite(a), Node::Composite(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// One generation: role label → hierarchy root.
#[derive(Clone, Debug, Default)]
pub struct TileSystem {
    roles: HashMap<Role, Node>,
}

impl TileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: Role, node: Node) -> Option<Node> {
        self.roles.insert(role, node)
    }

    pub fn get(&self, role: Role) -> Option<&Node> {
        self.roles.get(&role)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains_key(&role)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Roles present in this system, in canonical order.
    pub fn roles(&self) -> impl Iterator<Item = (Role, &Node)> {
        Role::ALL.into_iter().filter_map(|r| self.roles.get(&r).map(|n| (r, n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("delta".parse::<Role>().unwrap(), Role::Delta);
        assert_eq!(" Psi ".parse::<Role>().unwrap(), Role::Psi);
        assert!(matches!("Omega".parse::<Role>(), Err(TilingError::UnknownRole(_))));
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn polygon_path_is_closed() {
        let pts = square();
        let leaf = Leaf::new("Delta", pts.clone(), Outline::Polygon, [pts[0]; 4]);
        let path = leaf.path();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], PathCmd::MoveTo(pts[0]));
        assert_eq!(path[3], PathCmd::LineTo(pts[3]));
        assert_eq!(path[4], PathCmd::Close);
    }

    #[test]
    fn curved_path_has_one_cubic_per_edge() {
        let pts = square();
        let mut ctrl = Vec::new();
        for i in 0..4 {
            let a = pts[i];
            let b = pts[(i + 1) % 4];
            ctrl.extend([a, a.lerp(b, 0.33), a.lerp(b, 0.67)]);
        }
        let leaf = Leaf::new("Delta", pts.clone(), Outline::Curved(ctrl), [pts[0]; 4]);
        let path = leaf.path();
        let cubics = path.iter().filter(|c| matches!(c, PathCmd::CubicTo(..))).count();
        assert_eq!(cubics, 4);
        assert_eq!(path[4], PathCmd::CubicTo(pts[3].lerp(pts[0], 0.33), pts[3].lerp(pts[0], 0.67), pts[0]));
    }

    #[test]
    fn composite_counts_shared_leaves() {
        let pts = square();
        let leaf = Node::leaf(Leaf::new("Delta", pts.clone(), Outline::Polygon, [pts[0]; 4]));
        let pair = Node::composite(Composite::new(
            vec![
                (leaf.clone(), Transform2D::identity()),
                (leaf.clone(), Transform2D::translate(1.0, 0.0)),
            ],
            [pts[0]; 4],
        ));
        let outer = Node::composite(Composite::new(
            vec![(pair.clone(), Transform2D::identity()), (leaf.clone(), Transform2D::translate(0.0, 1.0))],
            [pts[0]; 4],
        ));
        assert_eq!(outer.leaf_count(), 3);
        assert_eq!(outer.depth(), 2);
        if let Node::Composite(c) = &outer {
            assert!(c.children()[0].0.ptr_eq(&pair));
        }
    }
}
