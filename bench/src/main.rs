use std::time::Instant;

use anyhow::{Context, Result};
use cayley_graph_core::{
    cayley_graph, cheeger_constant, complete_graph, cycle_graph, diameter, fellow_traveler_report,
    group_generators, random_regular_graph, replacement_product, rotation_map, zig_zag_product,
    AnalysisLimits, CyclicGroup, DihedralGroup, FellowTravelerConfig, Graph, Vertex,
};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(
    name = "cayley-graph-bench",
    about = "Explore fellow-traveler constants and graph products"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Run every mode with small defaults (default)
    All,
    /// Fellow-traveler constant of the cycle graphs C_min ..= C_max
    Cycles {
        #[arg(long, default_value_t = 3)]
        min: usize,
        #[arg(long, default_value_t = 50)]
        max: usize,
        #[arg(long)]
        exclude_non_disjoint: bool,
    },
    /// Fellow-traveler constant of random regular graphs
    Regular {
        #[arg(long, default_value_t = 3)]
        degree: usize,
        #[arg(long, default_value_t = 10)]
        order: usize,
        #[arg(long, default_value_t = 10)]
        count: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        exclude_non_disjoint: bool,
    },
    /// Replacement and zig-zag products of K_{3,3} with K_3
    Products,
    /// Cayley graphs of the cyclic and dihedral groups of order n and 2n
    Cayley {
        #[arg(long, default_value_t = 6)]
        n: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    println!("cayley-graph-bench");
    println!("==================");
    println!();

    match cli.mode.unwrap_or(Mode::All) {
        Mode::All => {
            run_cycles(3, 10, false)?;
            run_products()?;
            run_cayley(6)?;
            run_regular(3, 10, 3, 42, false)?;
        }
        Mode::Cycles {
            min,
            max,
            exclude_non_disjoint,
        } => run_cycles(min, max, exclude_non_disjoint)?,
        Mode::Regular {
            degree,
            order,
            count,
            seed,
            exclude_non_disjoint,
        } => run_regular(degree, order, count, seed, exclude_non_disjoint)?,
        Mode::Products => run_products()?,
        Mode::Cayley { n } => run_cayley(n)?,
    }

    Ok(())
}

fn fellow_config(exclude_non_disjoint: bool) -> FellowTravelerConfig {
    FellowTravelerConfig {
        exclude_non_disjoint_paths: exclude_non_disjoint,
        ..FellowTravelerConfig::default()
    }
}

/// One table row: diameter, constant, pairs compared, elapsed time.
fn report_row<V: Vertex>(
    name: &str,
    graph: &Graph<V>,
    config: &FellowTravelerConfig,
) -> Result<()> {
    let t = Instant::now();
    let report =
        fellow_traveler_report(graph, config).with_context(|| format!("evaluating {}", name))?;
    let elapsed = t.elapsed();
    let k = match report.constant() {
        Ok(k) => k.to_string(),
        Err(e) => {
            warn!("{}: {}", name, e);
            "-".to_string()
        }
    };
    let diameter = report.diameter.map(|d| d.to_string()).unwrap_or_else(|| "inf".to_string());
    println!(
        "{:>12} {:>10} {:>8} {:>12} {:>8.1}ms",
        name,
        diameter,
        k,
        report.pairs_compared,
        elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}

fn table_header() {
    println!("{:>12} {:>10} {:>8} {:>12} {:>10}", "graph", "diameter", "k", "pairs", "time");
    println!("{:->12} {:->10} {:->8} {:->12} {:->10}", "", "", "", "", "");
}

fn run_cycles(min: usize, max: usize, exclude_non_disjoint: bool) -> Result<()> {
    println!("--- Cycle graphs C_{}..C_{} ---", min, max);
    table_header();
    let config = fellow_config(exclude_non_disjoint);
    for n in min.max(3)..=max {
        report_row(&format!("C_{}", n), &cycle_graph(n), &config)?;
    }
    println!();
    Ok(())
}

fn run_regular(
    degree: usize,
    order: usize,
    count: usize,
    seed: u64,
    exclude_non_disjoint: bool,
) -> Result<()> {
    println!("--- Random {}-regular graphs on {} vertices (seed {}) ---", degree, order, seed);
    table_header();
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = fellow_config(exclude_non_disjoint);
    for i in 0..count {
        let graph = random_regular_graph(degree, order, &mut rng)?;
        report_row(&format!("#{}", i), &graph, &config)?;
    }
    println!();
    Ok(())
}

fn run_products() -> Result<()> {
    println!("--- Products of K_3,3 with K_3 ---");
    let base = Graph::from_adjacency(vec![
        (0usize, vec![1, 3, 5]),
        (1, vec![0, 2, 4]),
        (2, vec![1, 3, 5]),
        (3, vec![0, 2, 4]),
        (4, vec![1, 3, 5]),
        (5, vec![0, 2, 4]),
    ]);
    let motif = complete_graph(3);

    let rotation = rotation_map(&base);
    println!("rotation map: {} entries, involution: {}", rotation.len(), rotation.is_involution());

    let t = Instant::now();
    let replacement = replacement_product(&base, &motif)?;
    let zig_zag = zig_zag_product(&base, &motif)?;
    info!("products built in {:.1}ms", t.elapsed().as_secs_f64() * 1000.0);

    println!(
        "replacement: {} vertices, {} edges, degrees {:?}",
        replacement.order(),
        replacement.size(),
        replacement.regular_degree()
    );
    println!(
        "zig-zag:     {} vertices, {} edges, degrees {:?}",
        zig_zag.order(),
        zig_zag.size(),
        zig_zag.degree_sequence()
    );

    let limits = AnalysisLimits::default();
    for (name, value) in [
        ("h(G1)", cheeger_constant(&base, &limits)?),
        ("h(G2)", cheeger_constant(&motif, &limits)?),
        ("h(Z)", cheeger_constant(&zig_zag, &limits)?),
    ] {
        match value {
            Some(h) => println!("{}: {:.4}", name, h),
            None => println!("{}: undefined", name),
        }
    }
    println!();
    Ok(())
}

fn run_cayley(n: usize) -> Result<()> {
    println!("--- Cayley graphs, n = {} ---", n);
    table_header();
    let config = FellowTravelerConfig::default();

    let cyclic = CyclicGroup::new(n);
    let graph = cayley_graph(&cyclic, &group_generators(&cyclic), None)?.to_undirected();
    report_row(&format!("Z_{}", n), &graph, &config)?;

    let dihedral = DihedralGroup::new(n);
    let graph = cayley_graph(&dihedral, &group_generators(&dihedral), None)?.to_undirected();
    report_row(&format!("D_{}", n), &graph, &config)?;
    println!("D_{} diameter: {:?}", n, diameter(&graph));
    println!();
    Ok(())
}
