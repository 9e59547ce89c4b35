use std::cmp::Ordering;

use spectre_core::{BakedInstance, PATH_SEPARATOR};

/// Compares two paths segment by segment, numerically where both segments are indices.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    let mut sa = a.split(PATH_SEPARATOR);
    let mut sb = b.split(PATH_SEPARATOR);
    loop {
        match (sa.next(), sb.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(nx), Ok(ny)) => nx.cmp(&ny),
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Instance indices sorted by path: an ordering independent of how the list was built.
pub fn canonical_order(instances: &[BakedInstance]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..instances.len()).collect();
    order.sort_by(|&i, &j| compare_paths(&instances[i].path, &instances[j].path));
    order
}
