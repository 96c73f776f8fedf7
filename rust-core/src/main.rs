use alloy_cvm::cmatrix::build_cmatrix;
use alloy_cvm::config::CvmConfig;
use alloy_cvm::identification::{identify, Identification};
use alloy_cvm::lattice;
use alloy_cvm::thermo::{sweep_temperatures, SolverOptions};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};

#[derive(Parser)]
#[command(name = "alloy-cvm")]
#[command(about = "Cluster Variation Method free energies of multicomponent alloys")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Disordered BCC, pair approximation
    A2Pair,
    /// Disordered BCC, tetrahedron approximation
    A2Tetrahedron,
    /// B2 order on BCC, tetrahedron approximation
    B2Tetrahedron,
    /// Disordered FCC, tetrahedron approximation
    A1Tetrahedron,
}

impl Preset {
    fn config(self, components: usize) -> alloy_cvm::Result<CvmConfig> {
        match self {
            Preset::A2Pair => CvmConfig::disordered(lattice::a2_pair()?, components),
            Preset::A2Tetrahedron => CvmConfig::disordered(lattice::a2_tetrahedron()?, components),
            Preset::B2Tetrahedron => lattice::b2_on_a2_tetrahedron(components),
            Preset::A1Tetrahedron => CvmConfig::disordered(lattice::a1_tetrahedron()?, components),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print cluster and correlation-function data for a preset
    Identify {
        #[arg(short, long, value_enum, default_value = "a2-tetrahedron")]
        preset: Preset,

        /// Number of components
        #[arg(short = 'k', long, default_value = "2")]
        components: usize,
    },
    /// Minimise the free energy for a preset
    Solve {
        #[arg(short, long, value_enum, default_value = "a2-tetrahedron")]
        preset: Preset,

        #[arg(short = 'k', long, default_value = "2")]
        components: usize,

        /// Temperatures, comma separated
        #[arg(short = 'T', long, value_delimiter = ',', required = true)]
        temperature: Vec<f64>,

        /// Mole fractions, comma separated (default: equimolar)
        #[arg(short = 'x', long, value_delimiter = ',')]
        composition: Vec<f64>,

        /// One ECI per independent correlation function (default: all zero)
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        eci: Vec<f64>,

        /// Convergence threshold on the gradient norm
        #[arg(long, default_value = "1e-10")]
        tolerance: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            warn!(
                "Thread count {} specified but parallel feature not enabled. Ignoring.",
                threads
            );
        }
    }

    info!("Starting alloy-cvm v{}", alloy_cvm::VERSION);

    match cli.command {
        Commands::Identify { preset, components } => {
            let identification = identify(&preset.config(components)?)?;
            print_identification(&identification);
            Ok(())
        }
        Commands::Solve {
            preset,
            components,
            temperature,
            composition,
            eci,
            tolerance,
        } => run_solve(preset, components, &temperature, composition, eci, tolerance),
    }
}

fn print_identification(identification: &Identification) {
    let clusters = identification.clusters();
    let cfs = identification.cfs();
    println!(
        "{} on {} ({} components)",
        identification.config().ordered().name,
        identification.config().reference().name,
        identification.config().components()
    );
    println!("  tcdis = {}, tc = {}", clusters.tcdis(), clusters.tc());
    for t in 0..clusters.tcdis() {
        println!(
            "  type {}: {} sites, mhdis = {}, kb = {}, lc = {}, mh = {:?}",
            t,
            clusters.num_sites(t),
            clusters.mhdis()[t],
            clusters.kb()[t],
            clusters.lc()[t],
            clusters.mh_table()[t]
        );
    }
    println!(
        "  tcf = {}, ncf = {}, nxcf = {}, tcfdis = {}",
        cfs.tcf(),
        cfs.ncf(),
        cfs.nxcf(),
        cfs.tcfdis()
    );
    for cf in cfs.functions() {
        println!(
            "  cf {:>3} ({}, {}, {}): powers {:?}, multiplicity {}",
            cf.column,
            cf.index.cluster_type,
            cf.index.group,
            cf.index.index,
            cf.basis_powers(),
            cf.multiplicity
        );
    }
}

fn run_solve(
    preset: Preset,
    components: usize,
    temperatures: &[f64],
    composition: Vec<f64>,
    eci: Vec<f64>,
    tolerance: f64,
) -> Result<()> {
    let identification = identify(&preset.config(components)?)?;
    let cmatrix = build_cmatrix(&identification)?;
    let ncf = identification.cfs().ncf();

    let composition = if composition.is_empty() {
        vec![1.0 / components as f64; components]
    } else {
        composition
    };
    let eci = if eci.is_empty() { vec![0.0; ncf] } else { eci };
    if eci.len() != ncf {
        bail!("{:?} needs {} ECI values, got {}", preset, ncf, eci.len());
    }

    let options = SolverOptions::with_tolerance(tolerance);
    let results = sweep_temperatures(
        &composition,
        temperatures,
        &eci,
        &identification,
        &cmatrix,
        &options,
    )
    .with_context(|| format!("solving {:?} at x = {:?}", preset, composition))?;

    println!(
        "{:>10} {:>16} {:>16} {:>12} {:>6} {:>10}",
        "T", "G", "H", "S", "iter", "converged"
    );
    for result in &results {
        println!(
            "{:>10.4} {:>16.10} {:>16.10} {:>12.8} {:>6} {:>10}",
            result.temperature,
            result.gibbs_energy,
            result.enthalpy,
            result.entropy,
            result.iterations,
            result.converged
        );
    }
    Ok(())
}
