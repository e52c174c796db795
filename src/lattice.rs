//! Periodic 2D spin lattice and its local energy.

use rand::Rng;
use std::fmt::Write as _;

/// Neighbor topology of the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// 4 nearest neighbors (up, down, left, right).
    Square,
    /// 6 nearest neighbors: the square set plus the (x+1, y+1) and
    /// (x-1, y-1) diagonals of the offset triangular lattice.
    Triangular,
}

impl Topology {
    pub fn n_neighbors(self) -> usize {
        match self {
            Topology::Square => 4,
            Topology::Triangular => 6,
        }
    }
}

/// Initial spin configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Init {
    /// Each site independently ±1 with probability 1/2.
    Hot,
    /// Every site +1.
    Cold,
}

/// A `size × size` grid of ±1 spins with periodic boundaries.
///
/// Built once per run and only ever mutated through single-site flips;
/// coordinates are 0-based and wrap per axis.
#[derive(Debug, Clone)]
pub struct Lattice {
    size: usize,
    topology: Topology,
    coupling: f64,
    spins: Vec<i8>,
}

impl Lattice {
    /// Build a lattice with an explicit RNG (preferred for reproducibility).
    pub fn new(
        size: usize,
        topology: Topology,
        coupling: f64,
        init: Init,
        rng: &mut impl Rng,
    ) -> Self {
        let spins = match init {
            Init::Hot => (0..size * size)
                .map(|_| if rng.gen::<f64>() < 0.5 { 1 } else { -1 })
                .collect(),
            Init::Cold => vec![1; size * size],
        };
        Self { size, topology, coupling, spins }
    }

    /// Lattice side length.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of sites, `size²`.
    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        self.size * self.size
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    /// Spin at (x, y), always ±1.
    #[inline(always)]
    pub fn spin(&self, x: usize, y: usize) -> i8 {
        self.spins[y * self.size + x]
    }

    /// Negate the spin at (x, y). The only mutator besides `new`.
    #[inline(always)]
    pub fn flip(&mut self, x: usize, y: usize) {
        self.spins[y * self.size + x] = -self.spins[y * self.size + x];
    }

    /// Neighbor coordinates of (x, y) under periodic wraparound.
    ///
    /// Yields 4 sites for `Square`, 6 for `Triangular`; every coordinate
    /// is in `[0, size)` by construction.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        let s = self.size;
        let right = if x + 1 == s { 0 } else { x + 1 };
        let left = if x == 0 { s - 1 } else { x - 1 };
        let upper = if y + 1 == s { 0 } else { y + 1 };
        let lower = if y == 0 { s - 1 } else { y - 1 };

        let axis = [(x, upper), (x, lower), (right, y), (left, y)];
        let diagonal = [(right, upper), (left, lower)];
        axis.into_iter()
            .chain(diagonal)
            .take(self.topology.n_neighbors())
    }

    /// Energy of one site under its local field:
    /// `-J * s(x,y) * Σ s(neighbor)`.
    ///
    /// Each bond is counted from both endpoints, so a lattice-wide sum of
    /// this quantity double-counts; `total_energy` halves it once.
    #[inline]
    pub fn local_field_energy(&self, x: usize, y: usize) -> f64 {
        let field: i32 = self
            .neighbors(x, y)
            .map(|(nx, ny)| self.spin(nx, ny) as i32)
            .sum();
        -self.coupling * (self.spin(x, y) as i32 * field) as f64
    }

    /// Whole-lattice magnetization, Σ spins.
    pub fn magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    /// Whole-lattice energy with each bond counted once.
    pub fn total_energy(&self) -> f64 {
        let mut e = 0.0;
        for y in 0..self.size {
            for x in 0..self.size {
                e += self.local_field_energy(x, y);
            }
        }
        e / 2.0
    }

    /// Render the configuration as rows of `+1`/`-1` tokens (diagnostic).
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.n_sites() * 3);
        for y in (0..self.size).rev() {
            for x in 0..self.size {
                let _ = write!(out, "{:+2} ", self.spin(x, y));
            }
            out.push('\n');
        }
        out
    }
}
