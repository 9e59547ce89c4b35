//! Edge-adjacency between baked instances via a uniform spatial grid.

use std::collections::HashMap;

use spectre_core::{BakedInstance, Point};
use tracing::debug;

/// Vertices closer than this are treated as the same point.
pub const VERTEX_EPSILON: f64 = 0.1;

/// Two instances sharing at least this many vertices share an edge.
pub const SHARED_VERTEX_MIN: usize = 2;

type CellKey = (i64, i64);

/// Undirected neighbor lists indexed like the instance slice they were built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjacencyGraph {
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    /// Instances are bucketed by their translation on a grid wide enough that any two
    /// touching tiles fall in neighboring cells; only the 3×3 block around each cell
    /// is compared, and each unordered pair once.
    pub fn build(instances: &[BakedInstance], eps: f64) -> Self {
        let n = instances.len();
        let mut neighbors = vec![Vec::new(); n];
        if n < 2 {
            return Self { neighbors };
        }

        let polygons: Vec<Vec<Point>> = instances.iter().map(BakedInstance::world_polygon).collect();
        let cell = cell_size(instances, eps);

        let mut grid: HashMap<CellKey, Vec<usize>> = HashMap::new();
        for (i, inst) in instances.iter().enumerate() {
            grid.entry(cell_key(inst.transform.translation(), cell)).or_default().push(i);
        }

        let mut pairs = 0usize;
        for (i, inst) in instances.iter().enumerate() {
            let (cx, cy) = cell_key(inst.transform.translation(), cell);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let Some(bucket) = grid.get(&(cx + dx, cy + dy)) else {
                        continue;
                    };
                    for &j in bucket {
                        if j <= i {
                            continue;
                        }
                        pairs += 1;
                        if shared_vertices(&polygons[i], &polygons[j], eps) >= SHARED_VERTEX_MIN {
                            neighbors[i].push(j);
                            neighbors[j].push(i);
                        }
                    }
                }
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        let graph = Self { neighbors };
        debug!(instances = n, cell, pairs, edges = graph.edge_count(), "adjacency graph built");
        graph
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[i]
    }

    pub fn are_adjacent(&self, i: usize, j: usize) -> bool {
        self.neighbors[i].binary_search(&j).is_ok()
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Every `(i, j)` edge with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(i, list)| list.iter().filter(move |&&j| j > i).map(move |&j| (i, j)))
    }
}

/// Twice the largest leaf-vertex distance from its local origin, plus `eps`.
fn cell_size(instances: &[BakedInstance], eps: f64) -> f64 {
    let radius = instances
        .iter()
        .flat_map(|inst| inst.leaf.polygon().iter())
        .map(|p| p.length())
        .fold(0.0_f64, f64::max);
    2.0 * radius + eps
}

fn cell_key(p: Point, cell: f64) -> CellKey {
    ((p.x / cell).floor() as i64, (p.y / cell).floor() as i64)
}

/// Vertices of `a` with some vertex of `b` within `eps`.
fn shared_vertices(a: &[Point], b: &[Point], eps: f64) -> usize {
    a.iter().filter(|p| b.iter().any(|q| p.distance(*q) < eps)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectre_core::{BaseShape, HiddenSet, Role, Tiling};

    fn baked(shape: BaseShape, generations: usize) -> Vec<BakedInstance> {
        let mut tiling = Tiling::new(shape).unwrap();
        tiling.grow_to(generations).unwrap();
        tiling.bake(generations, Role::Delta, &HiddenSet::new(), true).unwrap()
    }

    #[test]
    fn single_instance_has_no_edges() {
        let graph = AdjacencyGraph::build(&baked(BaseShape::Spectre, 0), VERTEX_EPSILON);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn gen1_spectres_are_connected() {
        let instances = baked(BaseShape::Spectre, 1);
        let graph = AdjacencyGraph::build(&instances, VERTEX_EPSILON);
        for i in 0..graph.len() {
            assert!(!graph.neighbors(i).is_empty(), "{} is isolated", instances[i].path);
        }
    }

    #[test]
    fn grid_matches_brute_force() {
        let instances = baked(BaseShape::Hat, 2);
        let graph = AdjacencyGraph::build(&instances, VERTEX_EPSILON);
        let polygons: Vec<_> = instances.iter().map(BakedInstance::world_polygon).collect();
        for i in 0..instances.len() {
            for j in (i + 1)..instances.len() {
                let expected = shared_vertices(&polygons[i], &polygons[j], VERTEX_EPSILON) >= SHARED_VERTEX_MIN;
                assert_eq!(graph.are_adjacent(i, j), expected, "{i} {j}");
            }
        }
    }

    #[test]
    fn edges_are_symmetric() {
        let graph = AdjacencyGraph::build(&baked(BaseShape::Hexagon, 2), VERTEX_EPSILON);
        assert!(graph.edge_count() > 0);
        for (i, j) in graph.edges() {
            assert!(graph.are_adjacent(j, i));
        }
        assert_eq!(graph.edges().count(), graph.edge_count());
    }
}
