use error_chain::bail;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::units::{ColumnLength, RowLength};

pub const DEFAULT_GRID_WIDTH: usize = 20;
pub const DEFAULT_GRID_HEIGHT: usize = 20;

/// Everything needed to set up one generate-then-solve run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MazeConfig {
    width: RowLength,
    height: ColumnLength,
    start: Option<Cartesian2DCoordinate>,
    end: Option<Cartesian2DCoordinate>,
    seed: Option<u64>,
}

impl MazeConfig {
    pub fn width(&self) -> RowLength {
        self.width
    }
    pub fn height(&self) -> ColumnLength {
        self.height
    }

    /// The path start, the top left cell unless overridden.
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start.unwrap_or_else(|| Cartesian2DCoordinate::new(0, 0))
    }

    /// The path end, the bottom right cell unless overridden.
    pub fn end(&self) -> Cartesian2DCoordinate {
        self.end.unwrap_or_else(|| {
            Cartesian2DCoordinate::new((self.width.0 - 1) as u32, (self.height.0 - 1) as u32)
        })
    }

    /// None means every run draws a fresh random maze.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            width: RowLength(DEFAULT_GRID_WIDTH),
            height: ColumnLength(DEFAULT_GRID_HEIGHT),
            start: None,
            end: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MazeConfigBuilder {
    config: MazeConfig,
}

impl MazeConfigBuilder {
    pub fn new() -> MazeConfigBuilder {
        MazeConfigBuilder::default()
    }
    pub fn width(mut self, width: usize) -> Self {
        self.config.width = RowLength(width);
        self
    }
    pub fn height(mut self, height: usize) -> Self {
        self.config.height = ColumnLength(height);
        self
    }
    pub fn grid_size(self, size: usize) -> Self {
        self.width(size).height(size)
    }
    pub fn start(mut self, start: Option<Cartesian2DCoordinate>) -> Self {
        self.config.start = start;
        self
    }
    pub fn end(mut self, end: Option<Cartesian2DCoordinate>) -> Self {
        self.config.end = end;
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// Fails on a zero sized grid or a start/end override that is not on it.
    pub fn build(self) -> Result<MazeConfig> {
        let config = self.config;
        let (w, h) = (config.width.0, config.height.0);
        if w == 0 || h == 0 || w > u32::MAX as usize || h > u32::MAX as usize {
            bail!(ErrorKind::InvalidGridDimensions(w, h));
        }
        for coord in config.start.iter().chain(config.end.iter()) {
            if coord.x as usize >= w || coord.y as usize >= h {
                bail!(ErrorKind::InvalidCoordinate(*coord));
            }
        }
        Ok(config)
    }
}
