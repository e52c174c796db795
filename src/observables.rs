//! Per-temperature accumulation of thermodynamic observables.

/// One output row of the temperature scan, all quantities per spin.
#[derive(Debug, Clone, Copy)]
pub struct Record {
    pub t: f64,
    /// Mean signed magnetization (not written to the output file; kept for
    /// diagnostics and symmetry checks).
    pub mag: f64,
    pub mag_abs: f64,
    pub energy: f64,
    pub specific_heat: f64,
    pub chi: f64,
}

/// Running sums over one temperature's measurement sweeps.
///
/// `push` takes whole-lattice values: Σ spins and the bond energy with
/// double counting already halved. `finish` converts the sums to per-spin
/// observables via the fluctuation-dissipation relations
/// `C = (⟨E²⟩ - ⟨E⟩²) / (n T²)` and `χ = (⟨M²⟩ - ⟨|M|⟩²) / (n T)`.
#[derive(Debug, Clone)]
pub struct Accumulator {
    t: f64,
    n_sites: usize,
    samples: u64,
    sum_m: f64,
    sum_m_abs: f64,
    sum_m_sq: f64,
    sum_e: f64,
    sum_e_sq: f64,
}

impl Accumulator {
    pub fn new(t: f64, n_sites: usize) -> Self {
        Self {
            t,
            n_sites,
            samples: 0,
            sum_m: 0.0,
            sum_m_abs: 0.0,
            sum_m_sq: 0.0,
            sum_e: 0.0,
            sum_e_sq: 0.0,
        }
    }

    /// Record one sweep sample.
    pub fn push(&mut self, magnetization: i64, energy: f64) {
        let m = magnetization as f64;
        self.samples += 1;
        self.sum_m += m;
        self.sum_m_abs += m.abs();
        self.sum_m_sq += m * m;
        self.sum_e += energy;
        self.sum_e_sq += energy * energy;
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Normalize the sums into one per-spin record.
    pub fn finish(self) -> Record {
        let n = self.n_sites as f64;
        let t = self.t;
        if self.samples == 0 {
            return Record { t, mag: 0.0, mag_abs: 0.0, energy: 0.0, specific_heat: 0.0, chi: 0.0 };
        }
        let s = self.samples as f64;

        // Whole-lattice means first; variances stay non-negative because
        // ⟨E²⟩ ≥ ⟨E⟩² and ⟨M²⟩ ≥ ⟨|M|⟩².
        let m = self.sum_m / s;
        let m_abs = self.sum_m_abs / s;
        let m_sq = self.sum_m_sq / s;
        let e = self.sum_e / s;
        let e_sq = self.sum_e_sq / s;

        Record {
            t,
            mag: m / n,
            mag_abs: m_abs / n,
            energy: e / n,
            specific_heat: (e_sq - e * e) / (n * t * t),
            chi: (m_sq - m_abs * m_abs) / (n * t),
        }
    }
}
