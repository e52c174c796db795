//! Metropolis temperature scan for the 2D Ising model
//! (see `Cli` below for all run parameters).

use std::io;
use std::path::PathBuf;

use clap::Parser;
use csv::WriterBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use ising_scan::lattice::{Init, Topology};
use ising_scan::sweep::{run_scan_on, ScanConfig};

/// Sweep temperature from `max-t` down to `min-t`, writing one
/// tab-separated row of observables per temperature.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Output file for the per-temperature observable rows
    output: PathBuf,

    /// Lattice side length
    #[arg(long, default_value_t = 32)]
    size: usize,

    /// Coupling constant J (>0 ferromagnetic, <0 antiferromagnetic)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    coupling: f64,

    /// Highest temperature of the scan
    #[arg(long, default_value_t = 5.0)]
    max_t: f64,

    /// Lowest temperature of the scan
    #[arg(long, default_value_t = 0.5)]
    min_t: f64,

    /// Temperature decrement per step
    #[arg(long, default_value_t = 0.1)]
    t_step: f64,

    /// Thermalization sweeps discarded at each temperature
    #[arg(long, default_value_t = 1000)]
    therm: usize,

    /// Measurement sweeps accumulated at each temperature
    #[arg(long, default_value_t = 10000)]
    sweeps: usize,

    /// Start from an all-up lattice instead of a random one
    #[arg(long)]
    cold: bool,

    /// Neighbor topology
    #[arg(long, default_value = "square", value_parser = ["square", "triangular"])]
    topology: String,

    /// Seed for the RNG (entropy-seeded when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Echo the initial spin configuration to stdout
    #[arg(long)]
    show_lattice: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cfg = ScanConfig {
        size: cli.size,
        topology: match cli.topology.as_str() {
            "triangular" => Topology::Triangular,
            _ => Topology::Square,
        },
        coupling: cli.coupling,
        max_t: cli.max_t,
        min_t: cli.min_t,
        t_step: cli.t_step,
        therm_sweeps: cli.therm,
        measure_sweeps: cli.sweeps,
        init: if cli.cold { Init::Cold } else { Init::Hot },
    };
    if let Err(msg) = cfg.validate() {
        eprintln!("error: {msg}");
        std::process::exit(2);
    }
    println!("Configuration:\n{cfg:#?}");

    let mut rng = match cli.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let mut lattice = cfg.build_lattice(&mut rng);
    if cli.show_lattice {
        print!("{}", lattice.render());
    }

    let bar = ProgressBar::new(cfg.temperatures().len() as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&cli.output)?;
    wtr.write_record(["T", "mag_abs", "energy", "specific_heat", "chi"])?;

    run_scan_on(&mut lattice, &cfg, &mut rng, |r| {
        wtr.write_record(&[
            r.t.to_string(),
            r.mag_abs.to_string(),
            r.energy.to_string(),
            r.specific_heat.to_string(),
            r.chi.to_string(),
        ])
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        bar.inc(1);
        Ok(())
    })?;

    wtr.flush()?;
    bar.finish();
    println!("Scan complete → {}", cli.output.display());
    Ok(())
}
