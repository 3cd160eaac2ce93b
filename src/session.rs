use rand_xorshift::XorShiftRng;

use crate::cells::Cartesian2DCoordinate;
use crate::config::MazeConfig;
use crate::errors::*;
use crate::generators::{self, GenerationOutcome};
use crate::grid::Grid;
use crate::observers::MazeObserver;
use crate::pathing::{self, PathOutcome};

/// One maze: its grid, the random source that carves it and where the path runs.
///
/// The session owns the grid for its lifetime; observers only ever see coordinates.
#[derive(Debug)]
pub struct MazeSession {
    config: MazeConfig,
    grid: Grid,
    rng: XorShiftRng,
}

impl MazeSession {
    pub fn new(config: MazeConfig) -> Result<MazeSession> {
        let grid = Grid::new(config.width(), config.height())?;
        for coord in &[config.start(), config.end()] {
            if !grid.is_valid_coordinate(*coord) {
                return Err(ErrorKind::InvalidCoordinate(*coord).into());
            }
        }
        let rng = match config.seed() {
            Some(seed) => generators::seeded_rng(seed),
            None => generators::entropy_rng(),
        };
        Ok(MazeSession {
            config,
            grid,
            rng,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for attaching a text display.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn start(&self) -> Cartesian2DCoordinate {
        self.config.start()
    }

    pub fn end(&self) -> Cartesian2DCoordinate {
        self.config.end()
    }

    /// Carve a new maze. A previously generated maze is walled up again first, the random
    /// stream carries on from where it left off.
    pub fn generate<O: MazeObserver>(&mut self, observer: O) -> GenerationOutcome {
        generators::recursive_backtracker(&mut self.grid, &mut self.rng, observer)
    }

    pub fn solve<O: MazeObserver>(&self, observer: O) -> Result<PathOutcome> {
        pathing::breadth_first_search(&self.grid, self.start(), self.end(), observer)
    }

    /// Generate then solve, both phases reporting to the same observer.
    ///
    /// Cancelling generation skips the solve.
    pub fn run<O: MazeObserver>(&mut self, mut observer: O) -> Result<PathOutcome> {
        match self.generate(&mut observer) {
            GenerationOutcome::Cancelled => Ok(PathOutcome::Cancelled),
            GenerationOutcome::Complete { .. } => self.solve(&mut observer),
        }
    }
}
