pub mod lattice;
pub mod metropolis;
pub mod observables;
pub mod sweep;
pub mod utils;
