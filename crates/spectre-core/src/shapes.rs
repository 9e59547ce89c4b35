//! Generation-0 tile systems for each base shape.
//!
//! The Spectre and the hat/turtle pair are members of the Tile(a, b) family: one
//! 14-edge turtle path where edges at multiples of 60° have length `a` and edges at
//! odd multiples of 30° have length `b`. A 30° turn swaps the two edge classes, so
//! the mystic partner of a Tile(a, b) is a Tile(b, a) turned by 30°.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TilingError};
use crate::geometry::{Point, Transform2D};
use crate::tile::{Composite, Leaf, Node, Outline, Quad, Role, TileSystem};

/// Edge headings of the Tile(a, b) boundary, in degrees.
const TILE_HEADINGS: [f64; 14] = [
    0.0, -60.0, 30.0, 90.0, 0.0, 60.0, 150.0, 210.0, 120.0, 180.0, 180.0, 240.0, 330.0, 270.0,
];

/// Boundary vertices used as the alignment quad of a Tile(a, b).
const TILE_QUAD: [usize; 4] = [3, 5, 7, 11];

/// Vertex of the first mystic tile where the second one is anchored.
const MYSTIC_ANCHOR: usize = 8;

const MYSTIC_TURN_DEG: f64 = 30.0;

/// Control points sit at these fractions of each edge.
const CURVE_T: (f64, f64) = (0.33, 0.67);
/// Perpendicular displacement of each control point, as a multiple of the edge vector.
const CURVE_BULGE: f64 = 0.6;

const EDGE_EPS: f64 = 1e-9;

/// The base tile family a tiling is grown from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BaseShape {
    #[default]
    Spectre,
    SpectreCurved,
    Hat,
    Hexagon,
}

impl BaseShape {
    pub const ALL: [BaseShape; 4] = [BaseShape::Spectre, BaseShape::SpectreCurved, BaseShape::Hat, BaseShape::Hexagon];

    pub fn as_str(self) -> &'static str {
        match self {
            BaseShape::Spectre => "spectre",
            BaseShape::SpectreCurved => "spectre-curved",
            BaseShape::Hat => "hat",
            BaseShape::Hexagon => "hexagon",
        }
    }

    /// Builds the generation-0 tile system for this shape.
    pub fn build(self) -> Result<TileSystem> {
        match self {
            BaseShape::Spectre => build_spectre(false),
            BaseShape::SpectreCurved => build_spectre(true),
            BaseShape::Hat => build_hat_turtle(),
            BaseShape::Hexagon => build_hexagon(),
        }
    }
}

impl fmt::Display for BaseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseShape {
    type Err = TilingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spectre" => Ok(BaseShape::Spectre),
            "spectre-curved" | "curved" | "spectre_curved" => Ok(BaseShape::SpectreCurved),
            "hat" | "hat-turtle" | "turtle" => Ok(BaseShape::Hat),
            "hexagon" | "hex" => Ok(BaseShape::Hexagon),
            _ => Err(TilingError::UnknownShape(s.to_string())),
        }
    }
}

/// Boundary of Tile(a, b), starting at the origin.
pub fn tile_ab(a: f64, b: f64) -> Vec<Point> {
    let mut pts = Vec::with_capacity(TILE_HEADINGS.len());
    let mut cursor = Point::ORIGIN;
    pts.push(cursor);
    for &heading in &TILE_HEADINGS[..TILE_HEADINGS.len() - 1] {
        let len = if heading.rem_euclid(60.0) == 0.0 { a } else { b };
        cursor = cursor + Point::from_angle_deg(heading) * len;
        pts.push(cursor);
    }
    pts
}

fn tile_quad(pts: &[Point]) -> Quad {
    TILE_QUAD.map(|i| pts[i])
}

/// Derives the cubic control sequence `[v0, c1, c2, v1, ...]` from a closed polygon.
///
/// Each edge gets control points at 0.33 and 0.67 of its length, pushed to opposite
/// sides of the edge; the side flips from one edge to the next.
pub fn curved_outline(polygon: &[Point]) -> Result<Vec<Point>> {
    let n = polygon.len();
    let mut out = Vec::with_capacity(n * 3);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let d = b - a;
        if d.length() < EDGE_EPS {
            return Err(TilingError::DegenerateGeometry { edge: i });
        }
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        let offset = d.perp() * (CURVE_BULGE * sign);
        out.push(a);
        out.push(a.lerp(b, CURVE_T.0) + offset);
        out.push(a.lerp(b, CURVE_T.1) - offset);
    }
    Ok(out)
}

fn make_leaf(label: &str, polygon: &[Point], quad: Quad, curved: bool) -> Result<Node> {
    let outline = if curved {
        Outline::Curved(curved_outline(polygon)?)
    } else {
        Outline::Polygon
    };
    Ok(Node::leaf(Leaf::new(label, polygon.to_vec(), outline, quad)))
}

/// Eight single-leaf roles plus the two-leaf `Gamma`.
fn assemble(
    main: &[Point],
    partner: &[Point],
    partner_at: Transform2D,
    quad: Quad,
    curved: bool,
) -> Result<TileSystem> {
    let mut sys = TileSystem::new();
    for role in Role::SINGLE {
        sys.insert(role, make_leaf(role.as_str(), main, quad, curved)?);
    }
    let mystic = Composite::new(
        vec![
            (make_leaf("Gamma1", main, quad, curved)?, Transform2D::identity()),
            (make_leaf("Gamma2", partner, quad, curved)?, partner_at),
        ],
        quad,
    );
    sys.insert(Role::Gamma, Node::composite(mystic));
    Ok(sys)
}

fn mystic_placement(main: &[Point]) -> Transform2D {
    let anchor = main[MYSTIC_ANCHOR];
    Transform2D::translate(anchor.x, anchor.y).concat(Transform2D::rotate_deg(MYSTIC_TURN_DEG))
}

/// Spectre: Tile(1, 1) for every role, the mystic pairs two copies.
pub fn build_spectre(curved: bool) -> Result<TileSystem> {
    let spectre = tile_ab(1.0, 1.0);
    assemble(&spectre, &spectre, mystic_placement(&spectre), tile_quad(&spectre), curved)
}

/// Hat (Tile(1, √3)) for the single roles; the mystic pairs a hat with a turtle (Tile(√3, 1)).
pub fn build_hat_turtle() -> Result<TileSystem> {
    let r3 = 3f64.sqrt();
    let hat = tile_ab(1.0, r3);
    let turtle = tile_ab(r3, 1.0);
    assemble(&hat, &turtle, mystic_placement(&hat), tile_quad(&hat), false)
}

/// Centre of the neighbouring hexagon in direction `60° * k`.
fn hex_neighbor(k: usize) -> Point {
    Point::from_angle_deg(60.0 * k as f64) * 3f64.sqrt()
}

/// Regular hexagon of circumradius 1 for every role. The quad is the centres of the
/// neighbouring cells at 0°, 60°, 120° and 180°, which keeps every placement on the
/// hexagonal lattice; the `Gamma` pair fills the cell at 60°.
pub fn build_hexagon() -> Result<TileSystem> {
    let hexagon: Vec<Point> = (0..6).map(|i| Point::from_angle_deg(30.0 + 60.0 * i as f64)).collect();
    let quad = [hex_neighbor(0), hex_neighbor(1), hex_neighbor(2), hex_neighbor(3)];
    let second = hex_neighbor(1);
    assemble(&hexagon, &hexagon, Transform2D::translate(second.x, second.y), quad, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectre_outline_closes() {
        let pts = tile_ab(1.0, 1.0);
        assert_eq!(pts.len(), 14);
        let last = pts[13];
        // closing edge heads straight down with unit length
        assert!((last - Point::new(0.0, 1.0)).length() < 1e-9);
        for i in 0..14 {
            let len = pts[i].distance(pts[(i + 1) % 14]);
            assert!((len - 1.0).abs() < 1e-9, "edge {i} has length {len}");
        }
    }

    #[test]
    fn hat_and_turtle_swap_edge_classes() {
        let r3 = 3f64.sqrt();
        for (a, b) in [(1.0, r3), (r3, 1.0)] {
            let pts = tile_ab(a, b);
            for (i, heading) in TILE_HEADINGS.iter().enumerate() {
                let len = pts[i].distance(pts[(i + 1) % pts.len()]);
                let expected = if heading.rem_euclid(60.0) == 0.0 { a } else { b };
                assert!((len - expected).abs() < 1e-9, "edge {i}: {len} != {expected}");
            }
        }
    }

    #[test]
    fn every_shape_has_nine_roles() {
        for shape in BaseShape::ALL {
            let sys = shape.build().unwrap();
            assert_eq!(sys.len(), 9, "{shape}");
            for role in Role::SINGLE {
                assert!(matches!(sys.get(role), Some(Node::Leaf(_))));
            }
            assert_eq!(sys.get(Role::Gamma).unwrap().leaf_count(), 2);
        }
    }

    #[test]
    fn only_the_curved_spectre_has_curved_leaves() {
        for shape in BaseShape::ALL {
            let sys = shape.build().unwrap();
            let Some(Node::Leaf(leaf)) = sys.get(Role::Delta) else {
                panic!("Delta is a leaf at generation 0");
            };
            assert_eq!(leaf.is_curved(), shape == BaseShape::SpectreCurved, "{shape}");
            assert_eq!(leaf.boundary().len(), if leaf.is_curved() { 42 } else { leaf.polygon().len() });
        }
    }

    #[test]
    fn mystic_partner_labels() {
        let sys = BaseShape::Hat.build().unwrap();
        let Some(Node::Composite(gamma)) = sys.get(Role::Gamma) else {
            panic!("Gamma is a composite");
        };
        let labels: Vec<&str> = gamma
            .children()
            .iter()
            .map(|(n, _)| match n {
                Node::Leaf(l) => l.label(),
                Node::Composite(_) => "",
            })
            .collect();
        assert_eq!(labels, vec!["Gamma1", "Gamma2"]);
    }

    #[test]
    fn curved_outline_is_reproducible() {
        let pts = tile_ab(1.0, 1.0);
        let a = curved_outline(&pts).unwrap();
        let b = curved_outline(&pts).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 42);
        // every third point is an original vertex
        for (i, v) in pts.iter().enumerate() {
            assert_eq!(a[i * 3], *v);
        }
        // first edge runs along +x: controls bulge up then down
        assert!((a[1] - Point::new(0.33, 0.6)).length() < 1e-12);
        assert!((a[2] - Point::new(0.67, -0.6)).length() < 1e-12);
    }

    #[test]
    fn degenerate_edge_fails_fast() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        assert_eq!(curved_outline(&pts).unwrap_err(), TilingError::DegenerateGeometry { edge: 1 });
    }

    #[test]
    fn shape_names_round_trip() {
        for shape in BaseShape::ALL {
            assert_eq!(shape.as_str().parse::<BaseShape>().unwrap(), shape);
        }
        assert!("triangle".parse::<BaseShape>().is_err());
    }
}
