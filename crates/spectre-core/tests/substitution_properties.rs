use anyhow::Result;
use spectre_core::{
    BaseShape, HiddenSet, OVERLAP_THRESHOLD, Point, Role, Tiling, Transform2D, bake, count_overlaps,
    path_prefixes, placement_transforms,
};

const MAX_CHECKED_GENERATION: usize = 3;

#[test]
fn no_two_leaves_share_a_centroid() -> Result<()> {
    for shape in BaseShape::ALL {
        let mut tiling = Tiling::new(shape)?;
        tiling.grow_to(MAX_CHECKED_GENERATION)?;
        for generation in 0..=MAX_CHECKED_GENERATION {
            for role in Role::ALL {
                let instances = tiling.bake(generation, role, &HiddenSet::new(), true)?;
                let overlaps = count_overlaps(&instances, OVERLAP_THRESHOLD);
                assert_eq!(overlaps, 0, "{shape} generation {generation} role {role}");
            }
        }
    }
    Ok(())
}

#[test]
fn substitution_never_shrinks_a_role() -> Result<()> {
    for shape in BaseShape::ALL {
        let mut tiling = Tiling::new(shape)?;
        tiling.grow_to(MAX_CHECKED_GENERATION)?;
        for role in Role::ALL {
            let mut previous = 0;
            for generation in 0..=MAX_CHECKED_GENERATION {
                let count = tiling.bake(generation, role, &HiddenSet::new(), true)?.len();
                assert!(count >= previous, "{shape} {role}: {count} < {previous}");
                previous = count;
            }
        }
    }
    Ok(())
}

#[test]
fn hexagon_baseline_counts() -> Result<()> {
    let mut tiling = Tiling::new(BaseShape::Hexagon)?;
    let gen0 = tiling.bake(0, Role::Delta, &HiddenSet::new(), true)?;
    assert_eq!(gen0.len(), 1);
    assert!(gen0[0].transform.approx_eq(&Transform2D::identity(), 0.0));

    tiling.substitute()?;
    let gen1 = tiling.bake(1, Role::Delta, &HiddenSet::new(), true)?;
    assert_eq!(gen1.len(), 9);
    for (i, a) in gen1.iter().enumerate() {
        for b in &gen1[i + 1..] {
            assert!(a.centroid().distance(b.centroid()) >= OVERLAP_THRESHOLD);
        }
    }
    Ok(())
}

#[test]
fn hexagon_cells_stay_on_the_lattice() -> Result<()> {
    // Every placement is a whole number of cell steps away from the origin cell,
    // and distinct cells are at least one cell apart.
    let mut tiling = Tiling::new(BaseShape::Hexagon)?;
    tiling.grow_to(2)?;
    let cells = tiling.bake(2, Role::Psi, &HiddenSet::new(), true)?;
    let step = 3f64.sqrt();
    for (i, a) in cells.iter().enumerate() {
        for b in &cells[i + 1..] {
            assert!(a.centroid().distance(b.centroid()) > step - 1e-6);
        }
    }
    Ok(())
}

#[test]
fn pruning_removes_every_hidden_descendant() -> Result<()> {
    let mut tiling = Tiling::new(BaseShape::Spectre)?;
    tiling.grow_to(2)?;
    let hidden: HiddenSet = ["0:3", "0:7:1", "0:0:7:0"].into_iter().collect();

    let visible = tiling.bake(2, Role::Delta, &hidden, true)?;
    for inst in &visible {
        assert!(
            path_prefixes(&inst.path).all(|p| !hidden.contains(p)),
            "{} survived pruning",
            inst.path
        );
        assert!(!inst.hidden);
    }

    let ghosts = tiling.bake(2, Role::Delta, &hidden, false)?;
    assert_eq!(ghosts.len(), tiling.bake(2, Role::Delta, &HiddenSet::new(), true)?.len());
    for inst in &ghosts {
        assert_eq!(inst.hidden, hidden.is_hidden(&inst.path), "{}", inst.path);
    }
    assert_eq!(visible.len(), ghosts.iter().filter(|i| !i.hidden).count());
    Ok(())
}

#[test]
fn bake_is_repeatable() -> Result<()> {
    let mut tiling = Tiling::new(BaseShape::Hat)?;
    tiling.grow_to(2)?;
    let hidden: HiddenSet = ["0:2"].into_iter().collect();
    let a = tiling.bake(2, Role::Gamma, &hidden, false)?;
    let b = tiling.bake(2, Role::Gamma, &hidden, false)?;
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.path, y.path);
        assert_eq!(x.hidden, y.hidden);
        assert!(x.transform.approx_eq(&y.transform, 0.0));
    }
    assert_eq!(hidden.len(), 1);
    Ok(())
}

#[test]
fn substitution_transforms_invert_cleanly() -> Result<()> {
    for shape in BaseShape::ALL {
        let mut tiling = Tiling::new(shape)?;
        tiling.grow_to(MAX_CHECKED_GENERATION)?;
        for generation in 0..=MAX_CHECKED_GENERATION {
            let quad = *tiling.root(generation, Role::Delta)?.quad();
            for t in placement_transforms(&quad) {
                let round_trip = t.invert()?.concat(t);
                assert!(round_trip.approx_eq(&Transform2D::identity(), 1e-9), "{shape} g{generation}");
            }
        }
        let instances = tiling.bake(MAX_CHECKED_GENERATION, Role::Delta, &HiddenSet::new(), true)?;
        for inst in instances {
            let round_trip = inst.transform.invert()?.concat(inst.transform);
            assert!(round_trip.approx_eq(&Transform2D::identity(), 1e-9));
        }
    }
    Ok(())
}

#[test]
fn leaves_keep_their_shape_under_placement() -> Result<()> {
    // Placements are isometries, so every world edge keeps its local length.
    let mut tiling = Tiling::new(BaseShape::Hat)?;
    tiling.grow_to(2)?;
    for inst in tiling.bake(2, Role::Sigma, &HiddenSet::new(), true)? {
        let local = inst.leaf.polygon();
        let world = inst.world_polygon();
        for i in 0..local.len() {
            let j = (i + 1) % local.len();
            let dl = local[i].distance(local[j]);
            let dw = world[i].distance(world[j]);
            assert!((dl - dw).abs() < 1e-9);
        }
    }
    Ok(())
}

#[test]
fn hidden_paths_are_carried_as_is_across_generations() -> Result<()> {
    // Known approximation: a hidden path keeps its string across a substitution, but
    // the node it names changes. "0:1" is a single leaf in generation 1 and a whole
    // supertile in generation 2.
    let mut tiling = Tiling::new(BaseShape::Spectre)?;
    tiling.grow_to(2)?;
    let hidden: HiddenSet = ["0:1"].into_iter().collect();
    let g1 = tiling.bake(1, Role::Delta, &hidden, false)?;
    let g2 = tiling.bake(2, Role::Delta, &hidden, false)?;
    assert_eq!(g1.iter().filter(|i| i.hidden).count(), 1);
    assert_eq!(g2.iter().filter(|i| i.hidden).count(), 9);
    Ok(())
}

#[test]
fn spectre_tiles_meet_edge_to_edge() -> Result<()> {
    // Every generation-1 Delta leaf shares at least one full edge (two vertices) with another.
    let mut tiling = Tiling::new(BaseShape::Spectre)?;
    tiling.substitute()?;
    let instances = tiling.bake(1, Role::Delta, &HiddenSet::new(), true)?;
    let polys: Vec<Vec<Point>> = instances.iter().map(|i| i.world_polygon()).collect();
    for (i, a) in polys.iter().enumerate() {
        let touching = polys.iter().enumerate().any(|(j, b)| {
            j != i && a.iter().filter(|p| b.iter().any(|q| p.distance(*q) < 1e-6)).count() >= 2
        });
        assert!(touching, "instance {} is isolated", instances[i].path);
    }
    Ok(())
}
