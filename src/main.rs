use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result, bail};
use spectre_color::compute_colors;
use spectre_config::SpectreConfig;
use spectre_core::{BaseShape, BakedInstance, Point, Tiling, hit_test, run_overlap_test};

fn arg_value(prefix: &str) -> Option<String> {
    std::env::args().find_map(|a| a.strip_prefix(prefix).map(|s| s.to_string()))
}

fn has_flag(flag: &str) -> bool {
    std::env::args().any(|a| a == flag)
}

fn parse_point(s: &str) -> Result<Point> {
    let (x, y) = s.split_once(',').context("expected --hit=x,y")?;
    Ok(Point::new(
        x.trim().parse().context("hit x coordinate")?,
        y.trim().parse().context("hit y coordinate")?,
    ))
}

fn overlap_check() -> Result<()> {
    let mut failed = Vec::new();
    for shape in BaseShape::ALL {
        let report = run_overlap_test(shape)?;
        println!("{:>15}: {report}", shape.as_str());
        if !report.passed() {
            failed.push(shape);
        }
    }
    if !failed.is_empty() {
        bail!("overlap test failed for {failed:?}");
    }
    Ok(())
}

fn print_summary(config: &SpectreConfig, generation: usize, instances: &[BakedInstance]) {
    let ghosts = instances.iter().filter(|i| i.hidden).count();
    let mut labels: BTreeMap<&str, usize> = BTreeMap::new();
    let mut rotations = HashSet::new();
    for inst in instances {
        *labels.entry(inst.label()).or_default() += 1;
        rotations.insert(inst.rotation_deg());
    }
    println!(
        "{} generation {} role {}: {} tiles ({} hidden), {} orientations",
        config.tiling.shape,
        generation,
        config.tiling.role,
        instances.len(),
        ghosts,
        rotations.len()
    );
    for (label, count) in labels {
        println!("  {label:<8} {count}");
    }
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    if has_flag("--overlap-test") {
        return overlap_check();
    }

    let config = match arg_value("--config=") {
        Some(path) => {
            let mut config = SpectreConfig::load_from_file(&path).with_context(|| format!("loading {path}"))?;
            config.merge_with_env();
            config
        }
        None => SpectreConfig::load(),
    };

    let shape = config.tiling.base_shape()?;
    let role = config.tiling.active_role()?;
    let generation = config.tiling.target_generation()?;
    let mut hidden = config.view.hidden_set();

    let mut tiling = Tiling::new(shape)?.with_max_generations(config.tiling.max_generations);
    tiling.grow_to(generation)?;
    log::info!("grew {} to generation {}", shape, tiling.generation());

    let mut instances = tiling.bake(generation, role, &hidden, config.view.prune_hidden)?;
    print_summary(&config, generation, &instances);

    if let Some(raw) = arg_value("--hit=") {
        let point = parse_point(&raw)?;
        match hit_test(&instances, point) {
            Some(hit) => {
                let (path, now_hidden) = hidden.toggle_for_hit(&hit.path);
                println!(
                    "hit {} ({}) at {:?}; {} {}",
                    hit.path,
                    hit.label,
                    point,
                    if now_hidden { "hid" } else { "showed" },
                    path
                );
                println!("hidden: {:?}", hidden.to_sorted_vec());
                instances = tiling.bake(generation, role, &hidden, config.view.prune_hidden)?;
                print_summary(&config, generation, &instances);
            }
            None => println!("no tile at {point:?}"),
        }
    }

    let colors = compute_colors(&instances, &config.coloring).context("computing colors")?;
    match &colors {
        Some(map) => {
            let distinct: HashSet<&String> = map.values().collect();
            println!("coloring {}: {} colors", config.coloring.mode, distinct.len());
        }
        None => println!("coloring default: by label"),
    }

    if has_flag("--list") {
        for inst in &instances {
            let color = colors
                .as_ref()
                .and_then(|m| m.get(&inst.path))
                .map(String::as_str)
                .unwrap_or("-");
            let c = inst.centroid();
            println!(
                "{:<16} {:<8} {:>4}° {:>9.3} {:>9.3} {}{}",
                inst.path,
                inst.label(),
                inst.rotation_deg(),
                c.x,
                c.y,
                color,
                if inst.hidden { " (hidden)" } else { "" }
            );
        }
    }

    Ok(())
}
