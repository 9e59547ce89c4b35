//! Coloring by tile rotation: discrete buckets or a 360° gradient ring.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use palette::Srgb;
use spectre_core::BakedInstance;

use crate::color::{ColorPalette, mix, parse_color, to_hex};
use crate::error::{ColorError, Result};
use crate::options::GradientStop;

/// Parses override keys into angles in `[0, 360)`.
pub fn parse_overrides(overrides: &BTreeMap<String, String>) -> Result<HashMap<i32, Srgb<f32>>> {
    overrides
        .iter()
        .map(|(angle, color)| {
            let degrees = angle
                .trim()
                .parse::<i32>()
                .map_err(|_| ColorError::InvalidAngle(angle.clone()))?;
            Ok((degrees.rem_euclid(360), parse_color(color)?))
        })
        .collect()
}

/// One palette color per distinct whole-degree rotation, assigned cyclically in angle order.
/// Angles present in `overrides` use that color instead.
pub fn orientation_colors(
    instances: &[BakedInstance],
    palette: &ColorPalette,
    overrides: &BTreeMap<String, String>,
) -> Result<HashMap<String, String>> {
    let overrides = parse_overrides(overrides)?;
    let buckets: BTreeSet<i32> = instances.iter().map(BakedInstance::rotation_deg).collect();
    let mut by_angle = HashMap::with_capacity(buckets.len());
    for (rank, angle) in buckets.into_iter().enumerate() {
        let color = match overrides.get(&angle) {
            Some(c) => to_hex(*c),
            None => to_hex(palette.cyclic(rank)),
        };
        by_angle.insert(angle, color);
    }
    Ok(instances
        .iter()
        .map(|inst| (inst.path.clone(), by_angle[&inst.rotation_deg()].clone()))
        .collect())
}

/// Parsed stops sorted by angle in `[0, 360)`.
#[derive(Clone, Debug)]
pub struct GradientRing {
    stops: Vec<(f64, Srgb<f32>)>,
}

impl GradientRing {
    /// Uses `stops` when given, else spreads the palette evenly around the ring.
    pub fn new(stops: &[GradientStop], palette: &ColorPalette) -> Result<Self> {
        let mut parsed: Vec<(f64, Srgb<f32>)> = if stops.is_empty() {
            let n = palette.len() as f64;
            palette
                .colors()
                .iter()
                .enumerate()
                .map(|(i, c)| (360.0 * i as f64 / n, *c))
                .collect()
        } else {
            stops
                .iter()
                .map(|s| Ok((s.angle.rem_euclid(360.0), parse_color(&s.color)?)))
                .collect::<Result<_>>()?
        };
        parsed.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { stops: parsed })
    }

    /// Color at `angle` degrees, interpolated between the surrounding stops across the 0/360 seam.
    pub fn sample(&self, angle: f64) -> Srgb<f32> {
        let n = self.stops.len();
        if n == 1 {
            return self.stops[0].1;
        }
        let angle = angle.rem_euclid(360.0);
        // last stop at or below the angle; wraps to the final stop when below the first
        let lo = self
            .stops
            .iter()
            .rposition(|(a, _)| *a <= angle)
            .unwrap_or(n - 1);
        let hi = (lo + 1) % n;
        let (a0, c0) = self.stops[lo];
        let (a1, c1) = self.stops[hi];
        let span = (a1 - a0).rem_euclid(360.0);
        if span == 0.0 {
            return c0;
        }
        let t = (angle - a0).rem_euclid(360.0) / span;
        mix(c0, c1, t as f32)
    }
}

/// Each instance colored by its continuous rotation angle on the gradient ring.
pub fn gradient_colors(
    instances: &[BakedInstance],
    palette: &ColorPalette,
    stops: &[GradientStop],
) -> Result<HashMap<String, String>> {
    let ring = GradientRing::new(stops, palette)?;
    Ok(instances
        .iter()
        .map(|inst| {
            let degrees = inst.transform.rotation().to_degrees();
            (inst.path.clone(), to_hex(ring.sample(degrees)))
        })
        .collect())
}
