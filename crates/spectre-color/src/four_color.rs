//! Randomized greedy coloring of the adjacency graph.
//!
//! Best effort: each pass is locally proper (no two neighbors share a slot) but may
//! need more slots than the target. A few reshuffled passes are tried and the
//! first one within the target wins, otherwise the pass using the fewest slots.

use std::collections::HashMap;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use spectre_core::BakedInstance;
use tracing::{debug, warn};

use crate::adjacency::{AdjacencyGraph, VERTEX_EPSILON};
use crate::color::{ColorPalette, to_hex};
use crate::order::canonical_order;

/// Upper bound on distinct colors regardless of palette size.
pub const MAX_COLOR_SLOTS: usize = 6;

/// Shuffled greedy passes tried before settling on the best one.
pub const GREEDY_ATTEMPTS: usize = 16;

/// Slot per instance, from one seeded shuffle of the canonical order.
pub fn greedy_slots(graph: &AdjacencyGraph, order: &[usize]) -> Vec<usize> {
    let mut slots: Vec<Option<usize>> = vec![None; graph.len()];
    let mut taken = Vec::new();
    for &i in order {
        taken.clear();
        taken.extend(graph.neighbors(i).iter().filter_map(|&j| slots[j]));
        let mut slot = 0;
        while taken.contains(&slot) {
            slot += 1;
        }
        slots[i] = Some(slot);
    }
    slots.into_iter().map(|s| s.unwrap_or(0)).collect()
}

/// Slot assignment targeting `target` distinct slots.
pub fn color_graph(graph: &AdjacencyGraph, base_order: &[usize], target: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut best: Option<(usize, Vec<usize>)> = None;
    for attempt in 0..GREEDY_ATTEMPTS {
        let mut order = base_order.to_vec();
        order.shuffle(&mut rng);
        let slots = greedy_slots(graph, &order);
        let used = slot_count(&slots);
        if used <= target {
            debug!(attempt, used, target, "greedy coloring within target");
            return slots;
        }
        if best.as_ref().is_none_or(|(n, _)| used < *n) {
            best = Some((used, slots));
        }
    }
    let (used, slots) = best.unwrap_or_default();
    warn!(used, target, attempts = GREEDY_ATTEMPTS, "greedy coloring exceeded target slot count");
    slots
}

/// Path → color with no two edge-adjacent instances sharing a color.
pub fn four_colors(instances: &[BakedInstance], palette: &ColorPalette, seed: u64) -> HashMap<String, String> {
    let graph = AdjacencyGraph::build(instances, VERTEX_EPSILON);
    let target = palette.distinct_len().min(MAX_COLOR_SLOTS);
    let slots = color_graph(&graph, &canonical_order(instances), target, seed);
    let colors: Vec<String> = palette.slot_colors(slot_count(&slots)).into_iter().map(to_hex).collect();
    instances
        .iter()
        .zip(slots)
        .map(|(inst, slot)| (inst.path.clone(), colors[slot].clone()))
        .collect()
}

fn slot_count(slots: &[usize]) -> usize {
    slots.iter().max().map_or(0, |m| m + 1)
}
