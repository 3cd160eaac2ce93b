use std::fmt;

use crate::cells::{Cartesian2DCoordinate, MazeCell, Walls};
use crate::grid::Grid;
use crate::pathing::{Distances, MaxDistance};
use crate::utils::{self, FnvHashSet};


pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}

impl<MaxDistanceT: MaxDistance> GridDisplay for Distances<MaxDistanceT> {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}


#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
    start: Option<Cartesian2DCoordinate>,
    end: Option<Cartesian2DCoordinate>,
}
impl PathDisplay {
    /// Dots along the path, with its first and last cells marked S and E.
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay {
            on_path_coordinates,
            start: path.first().cloned(),
            end: path.last().cloned(),
        }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.start == Some(coord) {
            String::from(" S ")
        } else if self.end == Some(coord) {
            String::from(" E ")
        } else if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}


// Box drawing glyph for the point where up to four wall segments meet, indexed by the arms
// present: up 1, right 2, down 4, left 8.
const JUNCTIONS: [&str; 16] = [
    " ", "╵", "╶", "└", "╷", "│", "┌", "├",
    "╴", "┘", "─", "┴", "┐", "┤", "┬", "┼",
];

/// Wall lookups on the lattice of cell boundaries: `(w + 1) x h` vertical segments and
/// `w x (h + 1)` horizontal ones, read from the wall flags of the cell on either side.
struct WallLattice<'a> {
    cells: &'a [MazeCell],
    width: usize,
    height: usize,
}

impl<'a> WallLattice<'a> {
    fn walls(&self, x: usize, y: usize) -> &Walls {
        self.cells[y * self.width + x].walls()
    }

    /// The segment on the west side of column `x` in row `y`.
    fn vertical(&self, x: usize, y: usize) -> bool {
        if x == self.width {
            self.walls(x - 1, y).right()
        } else {
            self.walls(x, y).left()
        }
    }

    /// The segment on the north side of row `y` in column `x`.
    fn horizontal(&self, x: usize, y: usize) -> bool {
        if y == self.height {
            self.walls(x, y - 1).bottom()
        } else {
            self.walls(x, y).top()
        }
    }

    /// The glyph at the top left corner of cell `(x, y)`, which may lie past the east or south edge.
    fn junction(&self, x: usize, y: usize) -> &'static str {
        let up = y > 0 && self.vertical(x, y - 1);
        let right = x < self.width && self.horizontal(x, y);
        let down = y < self.height && self.vertical(x, y);
        let left = x > 0 && self.horizontal(x - 1, y);
        let arms = up as usize | (right as usize) << 1 | (down as usize) << 2 | (left as usize) << 3;
        JUNCTIONS[arms]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lattice = WallLattice {
            cells: self.cells(),
            width: self.row_length().0,
            height: self.column_length().0,
        };

        for y in 0..=lattice.height {
            let mut boundary = String::new();
            for x in 0..=lattice.width {
                boundary.push_str(lattice.junction(x, y));
                if x < lattice.width {
                    boundary.push_str(if lattice.horizontal(x, y) { "───" } else { "   " });
                }
            }
            writeln!(f, "{}", boundary)?;

            if y == lattice.height {
                break;
            }
            let mut bodies = String::new();
            for x in 0..=lattice.width {
                bodies.push_str(if lattice.vertical(x, y) { "│" } else { " " });
                if x < lattice.width {
                    let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
                    match *self.grid_display() {
                        Some(ref displayer) => bodies.push_str(&displayer.render_cell_body(coord)),
                        None => bodies.push_str("   "),
                    }
                }
            }
            writeln!(f, "{}", bodies)?;
        }
        Ok(())
    }
}
