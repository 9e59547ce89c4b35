//! Supertile substitution: grows generation g into generation g+1.
//!
//! Eight placements are derived from the `Delta` quad by vertex matching, mirrored,
//! and then filled per output role from a fixed combinatorial table. Children of the
//! new composites are the generation-g nodes themselves.

use tracing::{debug, warn};

use crate::error::{Result, TilingError};
use crate::geometry::Transform2D;
use crate::tile::{Composite, Node, Quad, Role, TileSystem};

/// `(angle in degrees, quad index on the previous tile, quad index on the new tile)`.
pub const PLACEMENT_STEPS: [(f64, usize, usize); 7] = [
    (60.0, 3, 1),
    (0.0, 2, 0),
    (60.0, 3, 1),
    (60.0, 3, 1),
    (0.0, 2, 0),
    (60.0, 3, 1),
    (-120.0, 3, 3),
];

/// Output role → the eight input roles placed at `T[0..8]`. `None` leaves the slot empty.
pub const SUPER_RULES: [(Role, [Option<Role>; 8]); 9] = {
    use Role::*;
    [
        (Gamma, [Some(Pi), Some(Delta), None, Some(Theta), Some(Sigma), Some(Xi), Some(Phi), Some(Gamma)]),
        (Delta, [Some(Xi), Some(Delta), Some(Xi), Some(Phi), Some(Sigma), Some(Pi), Some(Phi), Some(Gamma)]),
        (Theta, [Some(Psi), Some(Delta), Some(Pi), Some(Phi), Some(Sigma), Some(Pi), Some(Phi), Some(Gamma)]),
        (Lambda, [Some(Psi), Some(Delta), Some(Xi), Some(Phi), Some(Sigma), Some(Pi), Some(Phi), Some(Gamma)]),
        (Xi, [Some(Psi), Some(Delta), Some(Pi), Some(Phi), Some(Sigma), Some(Psi), Some(Phi), Some(Gamma)]),
        (Pi, [Some(Psi), Some(Delta), Some(Xi), Some(Phi), Some(Sigma), Some(Psi), Some(Phi), Some(Gamma)]),
        (Sigma, [Some(Xi), Some(Delta), Some(Xi), Some(Phi), Some(Sigma), Some(Pi), Some(Lambda), Some(Gamma)]),
        (Phi, [Some(Psi), Some(Delta), Some(Psi), Some(Phi), Some(Sigma), Some(Pi), Some(Phi), Some(Gamma)]),
        (Psi, [Some(Psi), Some(Delta), Some(Psi), Some(Phi), Some(Sigma), Some(Psi), Some(Phi), Some(Gamma)]),
    ]
};

/// New quad point i = `T[SUPER_QUAD[i].0]` applied to old quad point `SUPER_QUAD[i].1`.
const SUPER_QUAD: [(usize, usize); 4] = [(6, 2), (5, 1), (3, 2), (0, 1)];

/// The eight mirrored placement transforms for a given alignment quad.
pub fn placement_transforms(quad: &Quad) -> [Transform2D; 8] {
    let mut ts = [Transform2D::identity(); 8];
    let mut total_angle = 0.0;
    let mut rotation = Transform2D::identity();
    let mut rotated = *quad;

    for (i, &(angle, from, to)) in PLACEMENT_STEPS.iter().enumerate() {
        if angle != 0.0 {
            total_angle += angle;
            rotation = Transform2D::rotate_deg(total_angle);
            for (dst, src) in rotated.iter_mut().zip(quad.iter()) {
                *dst = rotation.apply(*src);
            }
        }
        let target = ts[i].apply(quad[from]);
        ts[i + 1] = Transform2D::translate_to(rotated[to], target).concat(rotation);
    }

    for t in ts.iter_mut() {
        *t = Transform2D::REFLECT.concat(*t);
    }
    ts
}

/// Alignment quad of every supertile built from `quad` with placements `ts`.
pub fn super_quad(quad: &Quad, ts: &[Transform2D; 8]) -> Quad {
    SUPER_QUAD.map(|(t, q)| ts[t].apply(quad[q]))
}

/// Builds generation g+1 from generation g. Generation g is left untouched.
///
/// Fails only when the `Delta` role, which provides the alignment frame, is absent.
/// Any other missing role is logged and its slot skipped.
pub fn substitute(system: &TileSystem) -> Result<TileSystem> {
    let frame = system
        .get(Role::Delta)
        .ok_or(TilingError::MissingRole(Role::Delta.as_str()))?;
    let quad = *frame.quad();
    let ts = placement_transforms(&quad);
    let next_quad = super_quad(&quad, &ts);

    let mut next = TileSystem::new();
    for (role, slots) in SUPER_RULES.iter() {
        let mut children = Vec::with_capacity(slots.len());
        for (slot, (sub, t)) in slots.iter().zip(ts.iter()).enumerate() {
            let Some(sub) = sub else { continue };
            match system.get(*sub) {
                Some(node) => children.push((node.clone(), *t)),
                None => {
                    warn!(output = %role, input = %sub, slot, "substitution input role missing; slot skipped");
                }
            }
        }
        next.insert(*role, Node::composite(Composite::new(children, next_quad)));
    }
    debug!(roles = next.len(), "built supertile generation");
    Ok(next)
}
