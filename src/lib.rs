//! **backtracker_mazes** carves perfect mazes with the recursive backtracker and solves them
//! with a breadth first search, reporting every step to an observer that may cancel the run.

pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod observers;
pub mod pathing;
pub mod renderers;
pub mod session;
pub mod units;
mod utils;
