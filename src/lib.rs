#[macro_use] extern crate log;
extern crate rand;
extern crate serde_json;
extern crate pathfinding;
extern crate thiserror;

mod data;
mod disjoint_set;
mod grid;
mod percolation;
mod monte_carlo;
pub mod config;
pub mod error;

pub use data::{Site, Direction};
pub use disjoint_set::DisjointSet;
pub use grid::GridState;
pub use percolation::Percolation;
pub use monte_carlo::{MonteCarlo, ThresholdStats, run_monte_carlo, run_trial, seeded_rng};
pub use config::SimulationConfig;
pub use error::{PercolationError, Result};
