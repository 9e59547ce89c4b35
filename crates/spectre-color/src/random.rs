use std::collections::HashMap;

use rand::{Rng, SeedableRng, rngs::StdRng};
use spectre_core::BakedInstance;

use crate::color::{ColorPalette, to_hex};
use crate::order::canonical_order;

/// Independent uniform palette draw per instance, in path order, from a seeded stream.
pub fn random_colors(instances: &[BakedInstance], palette: &ColorPalette, seed: u64) -> HashMap<String, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = HashMap::with_capacity(instances.len());
    for i in canonical_order(instances) {
        let pick = rng.random_range(0..palette.len());
        out.insert(instances[i].path.clone(), to_hex(palette.cyclic(pick)));
    }
    out
}
