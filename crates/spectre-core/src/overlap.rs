//! Centroid-distance self-check for the substitution engine.

use std::fmt;

use tracing::info;

use crate::bake::{BakedInstance, bake};
use crate::error::{Result, TilingError};
use crate::hidden::HiddenSet;
use crate::shapes::BaseShape;
use crate::substitution::substitute;
use crate::tile::Role;

/// Two leaf centroids closer than this count as an overlap.
pub const OVERLAP_THRESHOLD: f64 = 0.1;

/// Generations grown by [`run_overlap_test`].
pub const OVERLAP_TEST_GENERATIONS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlapReport {
    Passed { tiles: usize },
    Failed { overlaps: usize },
}

impl OverlapReport {
    pub fn passed(&self) -> bool {
        matches!(self, OverlapReport::Passed { .. })
    }
}

impl fmt::Display for OverlapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapReport::Passed { tiles } => write!(f, "PASSED: checked {tiles} tiles"),
            OverlapReport::Failed { overlaps } => write!(f, "FAILED: {overlaps} overlaps detected"),
        }
    }
}

/// Number of unordered instance pairs whose centroids are closer than `threshold`.
pub fn count_overlaps(instances: &[BakedInstance], threshold: f64) -> usize {
    let centroids: Vec<_> = instances.iter().map(BakedInstance::centroid).collect();
    let mut overlaps = 0;
    for (i, a) in centroids.iter().enumerate() {
        for b in &centroids[i + 1..] {
            if a.distance(*b) < threshold {
                overlaps += 1;
            }
        }
    }
    overlaps
}

/// Builds `shape`, substitutes twice, flattens `Delta` and checks every leaf pair.
pub fn run_overlap_test(shape: BaseShape) -> Result<OverlapReport> {
    let mut system = shape.build()?;
    for _ in 0..OVERLAP_TEST_GENERATIONS {
        system = substitute(&system)?;
    }
    let root = system
        .get(Role::Delta)
        .ok_or(TilingError::MissingRole(Role::Delta.as_str()))?;
    let instances = bake(root, &HiddenSet::new(), true);
    let overlaps = count_overlaps(&instances, OVERLAP_THRESHOLD);
    let report = if overlaps == 0 {
        OverlapReport::Passed { tiles: instances.len() }
    } else {
        OverlapReport::Failed { overlaps }
    };
    info!(shape = %shape, %report, "overlap test");
    Ok(report)
}
