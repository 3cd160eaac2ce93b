use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

use crate::units::{ColumnIndex, RowIndex, RowLength};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<Cartesian2DCoordinate>; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

/// Column (`x`) and row (`y`) of a cell, the origin being the top left of the grid.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_length: RowLength) -> Cartesian2DCoordinate {
        let RowLength(width) = row_length;
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex,
                                   row_index: RowIndex)
                                   -> Cartesian2DCoordinate {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// The coordinate one step away in `dir`, or None if that would need a negative component.
    /// The result may still be off the grid to the east or south, only the grid knows its extent.
    pub fn offset(self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => {
                if y > 0 {
                    Some(Cartesian2DCoordinate::new(x, y - 1))
                } else {
                    None
                }
            }
            CompassPrimary::East => x.checked_add(1).map(|east| Cartesian2DCoordinate::new(east, y)),
            CompassPrimary::South => y.checked_add(1).map(|south| Cartesian2DCoordinate::new(x, south)),
            CompassPrimary::West => {
                if x > 0 {
                    Some(Cartesian2DCoordinate::new(x - 1, y))
                } else {
                    None
                }
            }
        }
    }

    /// Which direction `other` lies in when it is exactly one orthogonal step away.
    pub fn direction_to(self, other: Cartesian2DCoordinate) -> Option<CompassPrimary> {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        match (dx, dy) {
            (0, -1) => Some(CompassPrimary::North),
            (1, 0) => Some(CompassPrimary::East),
            (0, 1) => Some(CompassPrimary::South),
            (-1, 0) => Some(CompassPrimary::West),
            _ => None,
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    /// Every direction, clockwise from north: the top, right, bottom, left wall order.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    #[inline]
    fn wall_index(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::East => 1,
            CompassPrimary::South => 2,
            CompassPrimary::West => 3,
        }
    }
}

/// The four boundary walls of a cell: top, right, bottom and left.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Walls {
    present: [bool; 4],
}

impl Walls {
    pub fn all() -> Walls {
        Walls { present: [true; 4] }
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        self.present[dir.wall_index()]
    }

    #[inline]
    pub fn remove(&mut self, dir: CompassPrimary) {
        self.present[dir.wall_index()] = false;
    }

    pub fn top(&self) -> bool {
        self.has_wall(CompassPrimary::North)
    }

    pub fn right(&self) -> bool {
        self.has_wall(CompassPrimary::East)
    }

    pub fn bottom(&self) -> bool {
        self.has_wall(CompassPrimary::South)
    }

    pub fn left(&self) -> bool {
        self.has_wall(CompassPrimary::West)
    }

    /// Directions without a wall, in top, right, bottom, left order.
    pub fn open_directions(&self) -> DirectionSmallVec {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .filter(|dir| !self.has_wall(*dir))
            .collect()
    }

    pub fn walled_directions(&self) -> DirectionSmallVec {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .filter(|dir| self.has_wall(*dir))
            .collect()
    }
}

impl Default for Walls {
    fn default() -> Walls {
        Walls::all()
    }
}

/// One grid position. Cells only ever change through the grid that owns them.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeCell {
    coord: Cartesian2DCoordinate,
    walls: Walls,
    visited: bool,
}

impl MazeCell {
    pub fn new(coord: Cartesian2DCoordinate) -> MazeCell {
        MazeCell {
            coord,
            walls: Walls::all(),
            visited: false,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        self.coord
    }

    #[inline]
    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    /// Has maze generation incorporated this cell into the spanning tree yet?
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub(crate) fn remove_wall(&mut self, dir: CompassPrimary) {
        self.walls.remove(dir);
    }
}
