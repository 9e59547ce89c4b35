use crate::bake::BakedInstance;
use crate::geometry::{Point, Transform2D};

/// Result of a hit test for a single topmost instance.
#[derive(Clone, Debug)]
pub struct HitResult {
    /// Index into the baked instance list (bake order; larger is on top).
    pub index: usize,
    /// Hierarchical path of the hit instance.
    pub path: String,
    /// Leaf label of the hit instance.
    pub label: String,
    /// The local-to-world transform of the hit instance.
    pub transform: Transform2D,
    /// Hit point in the leaf's local space (after inverse transform).
    pub local_pos: Option<Point>,
    /// True when the hit landed on a ghost.
    pub hidden: bool,
}

/// Preprocessed hit-test item built from a baked instance.
#[derive(Clone, Debug)]
struct HitItem {
    polygon: Vec<Point>,
    min: Point,
    max: Point,
}

/// Hit-test index over a baked instance list. A flat list walked back to front,
/// which is exactly the painter's order produced by `bake`.
pub struct HitIndex<'a> {
    instances: &'a [BakedInstance],
    items: Vec<HitItem>,
}

impl<'a> HitIndex<'a> {
    /// Build the index, caching world polygons and bounds per instance.
    pub fn build(instances: &'a [BakedInstance]) -> Self {
        let items = instances
            .iter()
            .map(|inst| {
                let (min, max) = inst.bounds();
                HitItem {
                    polygon: inst.world_polygon(),
                    min,
                    max,
                }
            })
            .collect();
        Self { instances, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Topmost instance whose polygon contains `p`, if any.
    pub fn topmost_at(&self, p: Point) -> Option<HitResult> {
        let index = self
            .items
            .iter()
            .enumerate()
            .rev()
            .find(|(_, item)| {
                p.x >= item.min.x
                    && p.x <= item.max.x
                    && p.y >= item.min.y
                    && p.y <= item.max.y
                    && point_in_polygon(p, &item.polygon)
            })
            .map(|(i, _)| i)?;
        let inst = &self.instances[index];
        Some(HitResult {
            index,
            path: inst.path.clone(),
            label: inst.label().to_string(),
            transform: inst.transform,
            local_pos: inst.transform.invert().ok().map(|inv| inv.apply(p)),
            hidden: inst.hidden,
        })
    }

    /// All instances under `p`, topmost first.
    pub fn all_at(&self, p: Point) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, item)| point_in_polygon(p, &item.polygon))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Convenience wrapper for a one-off query.
pub fn hit_test(instances: &[BakedInstance], p: Point) -> Option<HitResult> {
    HitIndex::build(instances).topmost_at(p)
}

/// Even-odd point-in-polygon test.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bake::bake;
    use crate::hidden::HiddenSet;
    use crate::shapes::BaseShape;
    use crate::substitution::substitute;
    use crate::tile::Role;

    #[test]
    fn square_containment() {
        let sq = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        assert!(point_in_polygon(Point::new(1.0, 1.0), &sq));
        assert!(!point_in_polygon(Point::new(3.0, 1.0), &sq));
        assert!(!point_in_polygon(Point::new(1.0, 1.0), &sq[..2]));
    }

    #[test]
    fn centroid_hits_its_own_instance() {
        let sys = substitute(&BaseShape::Spectre.build().unwrap()).unwrap();
        let out = bake(sys.get(Role::Delta).unwrap(), &HiddenSet::new(), true);
        let index = HitIndex::build(&out);
        assert_eq!(index.len(), out.len());
        for (i, inst) in out.iter().enumerate() {
            let hit = index.topmost_at(inst.centroid()).expect("centroid inside tile");
            assert_eq!(hit.index, i);
            assert_eq!(hit.path, inst.path);
            let local = hit.local_pos.unwrap();
            assert!(local.distance(Point::mean(inst.leaf.polygon())) < 1e-9);
        }
    }

    #[test]
    fn miss_far_away() {
        let sys = BaseShape::Hexagon.build().unwrap();
        let out = bake(sys.get(Role::Delta).unwrap(), &HiddenSet::new(), true);
        assert!(hit_test(&out, Point::new(100.0, 100.0)).is_none());
    }

    #[test]
    fn later_instance_is_on_top() {
        let sys = BaseShape::Hexagon.build().unwrap();
        let leaf = sys.get(Role::Delta).unwrap();
        let mut out = bake(leaf, &HiddenSet::new(), true);
        let mut second = out[0].clone();
        second.path = "0:1".into();
        out.push(second);
        let hit = hit_test(&out, out[0].centroid()).unwrap();
        assert_eq!(hit.index, 1);
        assert_eq!(HitIndex::build(&out).all_at(out[0].centroid()), vec![1, 0]);
    }
}
