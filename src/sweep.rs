//! Descending temperature scan: thermalize, measure, report.

use crate::lattice::{Init, Lattice, Topology};
use crate::metropolis;
use crate::observables::{Accumulator, Record};
use rand::Rng;
use std::io;

/// Run-time configuration for one scan (single source of truth).
///
/// Defaults match the reference parameter set: a 32×32 square lattice at
/// J = 1 swept from T = 5.0 down to 0.5 in steps of 0.1, with 1000
/// thermalization sweeps and 10000 measurement sweeps per temperature.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub size: usize,
    pub topology: Topology,
    pub coupling: f64,
    pub max_t: f64,
    pub min_t: f64,
    pub t_step: f64,
    pub therm_sweeps: usize,
    pub measure_sweeps: usize,
    pub init: Init,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            size: 32,
            topology: Topology::Square,
            coupling: 1.0,
            max_t: 5.0,
            min_t: 0.5,
            t_step: 0.1,
            therm_sweeps: 1000,
            measure_sweeps: 10000,
            init: Init::Hot,
        }
    }
}

impl ScanConfig {
    pub fn n_sites(&self) -> usize {
        self.size * self.size
    }

    /// Temperatures in strictly descending order, `max_t` down to `min_t`
    /// inclusive. Index-based so repeated subtraction cannot drift past
    /// the endpoint.
    pub fn temperatures(&self) -> Vec<f64> {
        let n_steps = ((self.max_t - self.min_t) / self.t_step + 1e-9).floor() as usize;
        (0..=n_steps).map(|i| self.max_t - i as f64 * self.t_step).collect()
    }

    /// Reject configurations the engine cannot run meaningfully.
    pub fn validate(&self) -> Result<(), String> {
        if self.size < 2 {
            return Err(format!("lattice size must be at least 2, got {}", self.size));
        }
        if !(self.t_step > 0.0) {
            return Err(format!("temperature step must be positive, got {}", self.t_step));
        }
        if !(self.min_t > 0.0) {
            return Err(format!("min temperature must be positive, got {}", self.min_t));
        }
        if self.max_t < self.min_t {
            return Err(format!(
                "max temperature {} below min temperature {}",
                self.max_t, self.min_t
            ));
        }
        Ok(())
    }

    /// Build the initial lattice for this scan.
    pub fn build_lattice(&self, rng: &mut impl Rng) -> Lattice {
        Lattice::new(self.size, self.topology, self.coupling, self.init, rng)
    }
}

/// Drive a prepared lattice through the full descending temperature scan,
/// calling `report` once per temperature.
///
/// Per temperature: `therm_sweeps` discarded sweeps, then `measure_sweeps`
/// sweeps each feeding the accumulator. The running energy is seeded from
/// one `total_energy` evaluation at the start of the measurement phase and
/// updated incrementally from the per-sweep ΔE. The lattice is deliberately
/// not reset between temperatures: the equilibrated state at T is the
/// starting point for T − ΔT.
pub fn run_scan_on(
    lattice: &mut Lattice,
    cfg: &ScanConfig,
    rng: &mut impl Rng,
    mut report: impl FnMut(&Record) -> io::Result<()>,
) -> io::Result<()> {
    for t in cfg.temperatures() {
        for _ in 0..cfg.therm_sweeps {
            metropolis::sweep(lattice, t, rng);
        }

        let mut acc = Accumulator::new(t, lattice.n_sites());
        let mut energy = lattice.total_energy();
        for _ in 0..cfg.measure_sweeps {
            let info = metropolis::sweep(lattice, t, rng);
            energy += info.delta_e;
            acc.push(lattice.magnetization(), energy);
        }

        report(&acc.finish())?;
    }
    Ok(())
}

/// Build a lattice from the config and run the scan on it.
pub fn run_scan(
    cfg: &ScanConfig,
    rng: &mut impl Rng,
    report: impl FnMut(&Record) -> io::Result<()>,
) -> io::Result<()> {
    let mut lattice = cfg.build_lattice(rng);
    run_scan_on(&mut lattice, cfg, rng, report)
}

/// Convenience wrapper that collects all records (tests, parallel driver).
pub fn run_scan_collect(cfg: &ScanConfig, rng: &mut impl Rng) -> Vec<Record> {
    let mut records = Vec::new();
    // The collecting reporter cannot fail.
    let result = run_scan(cfg, rng, |r| {
        records.push(*r);
        Ok(())
    });
    debug_assert!(result.is_ok());
    records
}
