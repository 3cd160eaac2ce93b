use std::fmt;
use std::rc::Rc;
use std::u32;

use error_chain::bail;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateOptionSmallVec,
                   CoordinateSmallVec, MazeCell};
use crate::errors::*;
use crate::grid_displays::GridDisplay;
use crate::grid_iterators::{BatchIter, BatchIterType, CellIter};
use crate::units::{ColumnLength, ColumnsCount, RowLength, RowsCount};

// Each passage is reported from its west or north cell only.
static LINK_DIRECTIONS: [CompassPrimary; 2] = [CompassPrimary::East, CompassPrimary::South];

/// A rectangular grid of cells stored row-major in one flat vec.
///
/// Cells never reference each other: adjacency is index arithmetic and connectivity is the
/// wall flags on each cell, which `carve` keeps symmetric.
#[derive(Clone)]
pub struct Grid {
    row_length: RowLength,
    column_length: ColumnLength,
    cells: Vec<MazeCell>,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CarveError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Display for CarveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match *self {
            CarveError::InvalidGridCoordinate => "coordinate is not on the grid",
            CarveError::SelfLink => "a cell cannot be linked to itself",
            CarveError::NotAdjacent => "cells are not orthogonally adjacent",
        };
        write!(f, "cannot carve passage: {}", reason)
    }
}

impl ::std::error::Error for CarveError {}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, passages: {:?}",
               self.rows(), self.columns(), self.links_count())
    }
}

impl Grid {
    /// Creates a fully walled grid `row_length` cells wide and `column_length` cells high.
    ///
    /// Fails with `InvalidGridDimensions` if either side is zero or the grid is too large to
    /// address every cell with a `Cartesian2DCoordinate`.
    pub fn new(row_length: RowLength, column_length: ColumnLength) -> Result<Grid> {

        let (RowLength(width), ColumnLength(height)) = (row_length, column_length);
        let too_wide = width > u32::MAX as usize || height > u32::MAX as usize;
        let cells_count = match width.checked_mul(height) {
            Some(count) if count > 0 && !too_wide => count,
            _ => bail!(ErrorKind::InvalidGridDimensions(width, height)),
        };

        let cells = (0..cells_count)
            .map(|index| MazeCell::new(Cartesian2DCoordinate::from_row_major_index(index, row_length)))
            .collect();

        Ok(Grid {
            row_length,
            column_length,
            cells,
            grid_display: None,
        })
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.column_length.0)
    }

    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.row_length
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.row_length.0)
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.column_length
    }

    /// The top left cell.
    #[inline]
    pub fn first_cell(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// The bottom right cell, diagonally opposite `first_cell`.
    #[inline]
    pub fn last_cell(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::from_row_major_index(self.size() - 1, self.row_length)
    }

    #[inline]
    pub fn cells(&self) -> &[MazeCell] {
        &self.cells
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&MazeCell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.row_length.0 && (coord.y as usize) < self.column_length.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.x as usize + coord.y as usize * self.row_length.0)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_grid_coordinate(&self, index: usize) -> Option<Cartesian2DCoordinate> {
        if index < self.size() {
            Some(Cartesian2DCoordinate::from_row_major_index(index, self.row_length))
        } else {
            None
        }
    }

    /// The adjacent cell in `direction`, ignoring walls. None if it would be off the grid.
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction).and_then(|neighbour_coord| {
            if self.is_valid_coordinate(neighbour_coord) {
                Some(neighbour_coord)
            } else {
                None
            }
        })
    }

    pub fn neighbours_at_directions(&self,
                                    coord: Cartesian2DCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    /// Cells to the North, East, South or West of a cell, but not necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Neighbours that maze generation has not reached yet, in North, East, South, West order.
    pub fn unvisited_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|neighbour_coord| !self.is_visited(*neighbour_coord))
            .collect()
    }

    #[inline]
    pub fn is_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord).map_or(false, MazeCell::is_visited)
    }

    /// Returns false if the coordinate is invalid.
    pub(crate) fn mark_visited(&mut self, coord: Cartesian2DCoordinate) -> bool {
        if let Some(index) = self.grid_coordinate_to_index(coord) {
            self.cells[index].mark_visited();
            true
        } else {
            false
        }
    }

    /// Back to every wall standing and no cell visited.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = MazeCell::new(cell.coordinate());
        }
    }

    /// Remove the wall between two adjacent cells, on both sides.
    ///
    /// Carving an already open boundary changes nothing.
    pub fn carve(&mut self,
                 a: Cartesian2DCoordinate,
                 b: Cartesian2DCoordinate)
                 -> ::std::result::Result<(), CarveError> {

        let a_index_opt = self.grid_coordinate_to_index(a);
        let b_index_opt = self.grid_coordinate_to_index(b);
        match (a_index_opt, b_index_opt) {
            (Some(a_index), Some(b_index)) => {
                if a_index == b_index {
                    return Err(CarveError::SelfLink);
                }
                let a_to_b = a.direction_to(b).ok_or(CarveError::NotAdjacent)?;
                self.cells[a_index].remove_wall(a_to_b);
                self.cells[b_index].remove_wall(a_to_b.opposite());
                Ok(())
            }
            _ => Err(CarveError::InvalidGridCoordinate),
        }
    }

    /// Can we step from `coord` to its neighbour in `direction`?
    ///
    /// Always false across the grid boundary.
    pub fn is_open(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction).is_some() &&
        self.cell(coord).map_or(false, |cell| !cell.walls().has_wall(direction))
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        a.direction_to(b).map_or(false, |dir| self.is_open(a, dir))
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let linked_cells = CompassPrimary::ALL
            .iter()
            .filter(|dir| self.is_open(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect();
        Some(linked_cells)
    }

    /// Number of passages in the grid, each counted once.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Every passage once, as a (west or north cell, east or south cell) pair.
    pub fn iter_links<'a>(&'a self)
                          -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + 'a {
        self.iter().flat_map(move |coord| {
            LINK_DIRECTIONS.iter()
                .filter(move |dir| self.is_open(coord, **dir))
                .filter_map(move |dir| self.neighbour_at_direction(coord, *dir))
                .map(move |neighbour_coord| (coord, neighbour_coord))
        })
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.size(), self.row_length)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::new(BatchIterType::Row, self.row_length, self.column_length)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::new(BatchIterType::Column, self.row_length, self.column_length)
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools; // a trait
    use std::u32;

    use super::*;
    use crate::cells::Cartesian2DCoordinate;

    fn small_grid(w: usize, h: usize) -> Grid {
        Grid::new(RowLength(w), ColumnLength(h)).expect("valid grid dimensions")
    }

    #[test]
    fn zero_sized_grids_are_rejected() {
        for &(w, h) in &[(0, 0), (0, 5), (5, 0)] {
            let err = Grid::new(RowLength(w), ColumnLength(h)).unwrap_err();
            match *err.kind() {
                ErrorKind::InvalidGridDimensions(ew, eh) => assert_eq!((ew, eh), (w, h)),
                ref other => panic!("unexpected error kind {:?}", other),
            }
        }
    }

    #[test]
    fn new_grid_is_fully_walled_and_unvisited() {
        let g = small_grid(3, 2);
        assert_eq!(g.links_count(), 0);
        for cell in g.cells() {
            assert!(!cell.is_visited());
            assert!(cell.walls().open_directions().is_empty());
        }
    }

    #[test]
    fn reset_restores_all_walls() {
        let mut g = small_grid(3, 3);
        let pristine = g.cells().to_vec();
        g.carve(Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(0, 1)).unwrap();
        assert!(g.mark_visited(Cartesian2DCoordinate::new(2, 2)));
        g.reset();
        assert_eq!(g.cells(), &pristine[..]);
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[Cartesian2DCoordinate]| {
            let node_indices: Vec<Cartesian2DCoordinate> =
                g.neighbours(coord).iter().cloned().sorted().collect();
            let expected_indices: Vec<Cartesian2DCoordinate> = expected_neighbours.iter()
                .cloned()
                .sorted()
                .collect();
            assert_eq!(node_indices, expected_indices);
        };
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);
        check_expected_neighbours(gc(9, 8), &[gc(9, 7), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);

        // off the grid entirely
        check_expected_neighbours(gc(10, 10), &[]);
    }

    #[test]
    fn neighbours_at_dirs() {
        let g = small_grid(2, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        let check_neighbours =
            |coord, dirs: &[CompassPrimary], neighbour_opts: &[Option<Cartesian2DCoordinate>]| {
                let neighbour_options = g.neighbours_at_directions(coord, dirs);
                assert_eq!(&*neighbour_options, neighbour_opts);
            };
        check_neighbours(gc(0, 0), &[], &[]);
        check_neighbours(gc(0, 0), &[CompassPrimary::North], &[None]);
        check_neighbours(gc(0, 0), &[CompassPrimary::West], &[None]);
        check_neighbours(gc(0, 0),
                         &[CompassPrimary::East, CompassPrimary::South],
                         &[Some(gc(1, 0)), Some(gc(0, 1))]);
        check_neighbours(gc(1, 1),
                         &[CompassPrimary::South, CompassPrimary::East],
                         &[None, None]);
        check_neighbours(gc(1, 1),
                         &[CompassPrimary::West, CompassPrimary::North],
                         &[Some(gc(0, 1)), Some(gc(1, 0))]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small_grid(2, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let check_neighbour = |coord, dir: CompassPrimary, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), CompassPrimary::North, None);
        check_neighbour(gc(0, 0), CompassPrimary::South, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), CompassPrimary::East, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), CompassPrimary::West, None);

        check_neighbour(gc(1, 1), CompassPrimary::North, Some(gc(1, 0)));
        check_neighbour(gc(1, 1), CompassPrimary::South, None);
        check_neighbour(gc(1, 1), CompassPrimary::East, None);
        check_neighbour(gc(1, 1), CompassPrimary::West, Some(gc(0, 1)));
    }

    #[test]
    fn grid_size() {
        let g = small_grid(10, 4);
        assert_eq!(g.size(), 40);
        assert_eq!(g.rows().0, 4);
        assert_eq!(g.columns().0, 10);
        assert_eq!(g.first_cell(), Cartesian2DCoordinate::new(0, 0));
        assert_eq!(g.last_cell(), Cartesian2DCoordinate::new(9, 3));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = small_grid(3, 3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let coords = &[gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                       gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        for (index, coord) in coords.iter().enumerate() {
            assert_eq!(g.index_to_grid_coordinate(index), Some(*coord));
        }
        assert_eq!(g.index_to_grid_coordinate(9), None);

        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn cell_iter() {
        let g = small_grid(2, 2);
        assert_eq!(g.iter().collect::<Vec<Cartesian2DCoordinate>>(),
                   &[Cartesian2DCoordinate::new(0, 0),
                     Cartesian2DCoordinate::new(1, 0),
                     Cartesian2DCoordinate::new(0, 1),
                     Cartesian2DCoordinate::new(1, 1)]);
    }

    #[test]
    fn row_iter() {
        let g = small_grid(2, 2);
        assert_eq!(g.iter_row().collect::<Vec<Vec<Cartesian2DCoordinate>>>(),
                   &[&[Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(1, 0)],
                     &[Cartesian2DCoordinate::new(0, 1), Cartesian2DCoordinate::new(1, 1)]]);
    }

    #[test]
    fn column_iter() {
        let g = small_grid(2, 2);
        assert_eq!(g.iter_column().collect::<Vec<Vec<Cartesian2DCoordinate>>>(),
                   &[&[Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(0, 1)],
                     &[Cartesian2DCoordinate::new(1, 0), Cartesian2DCoordinate::new(1, 1)]]);
    }

    #[test]
    fn carving_cells() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 1);
        let b = Cartesian2DCoordinate::new(0, 2);
        let c = Cartesian2DCoordinate::new(1, 2);

        let links_sorted = |grid: &Grid, coord| -> Vec<Cartesian2DCoordinate> {
            grid.links(coord).expect("coordinate is invalid").iter().cloned().sorted().collect()
        };

        // Testing that the order of the arguments to `is_linked` does not matter
        macro_rules! bi_check_linked {
            ($x:expr, $y:expr) => (g.is_linked($x, $y) && g.is_linked($y, $x))
        }

        assert!(!bi_check_linked!(a, b));
        assert!(!bi_check_linked!(b, c));
        assert_eq!(links_sorted(&g, a), vec![]);

        g.carve(a, b).expect("carve failed");
        assert!(bi_check_linked!(a, b));
        assert!(g.is_open(a, CompassPrimary::South));
        assert!(g.is_open(b, CompassPrimary::North));
        assert!(!g.cell(a).unwrap().walls().bottom());
        assert!(!g.cell(b).unwrap().walls().top());
        assert!(g.cell(b).unwrap().walls().right());

        g.carve(c, b).expect("carve failed");
        assert!(bi_check_linked!(b, c));
        assert!(!bi_check_linked!(a, c));
        assert!(!g.cell(b).unwrap().walls().right());
        assert!(!g.cell(c).unwrap().walls().left());
        assert_eq!(links_sorted(&g, a), vec![b]);
        assert_eq!(links_sorted(&g, b), vec![a, c]);
        assert_eq!(links_sorted(&g, c), vec![b]);
        assert_eq!(g.links_count(), 2);
    }

    #[test]
    fn carving_is_idempotent() {
        let mut g = small_grid(2, 2);
        let a = Cartesian2DCoordinate::new(0, 0);
        let b = Cartesian2DCoordinate::new(1, 0);
        g.carve(a, b).expect("carve failed");
        let after_first = g.cells().to_vec();
        g.carve(b, a).expect("carve failed");
        assert_eq!(g.cells(), &after_first[..]);
        assert_eq!(g.links_count(), 1);
    }

    #[test]
    fn no_self_linked_cycles() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(g.carve(a, a), Err(CarveError::SelfLink));
    }

    #[test]
    fn no_links_to_invalid_coordinates() {
        let mut g = small_grid(4, 4);
        let good_coord = Cartesian2DCoordinate::new(3, 0);
        let invalid_coord = Cartesian2DCoordinate::new(4, 0);
        assert_eq!(g.carve(good_coord, invalid_coord),
                   Err(CarveError::InvalidGridCoordinate));
        assert!(g.cell(good_coord).unwrap().walls().right());
    }

    #[test]
    fn no_links_between_distant_cells() {
        let mut g = small_grid(4, 4);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(g.carve(gc(0, 0), gc(1, 1)), Err(CarveError::NotAdjacent));
        assert_eq!(g.carve(gc(0, 0), gc(2, 0)), Err(CarveError::NotAdjacent));
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn boundaries_are_never_open() {
        let g = small_grid(1, 1);
        let only = Cartesian2DCoordinate::new(0, 0);
        for dir in CompassPrimary::ALL.iter() {
            assert!(!g.is_open(only, *dir));
        }
        assert_eq!(g.links(only).map(|links| links.len()), Some(0));
        assert_eq!(g.links(Cartesian2DCoordinate::new(1, 0)), None);
    }

    #[test]
    fn links_iter_lists_each_passage_once() {
        let mut g = small_grid(2, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        g.carve(gc(0, 0), gc(1, 0)).unwrap();
        g.carve(gc(1, 1), gc(1, 0)).unwrap();
        assert_eq!(g.iter_links().collect::<Vec<_>>(),
                   vec![(gc(0, 0), gc(1, 0)), (gc(1, 0), gc(1, 1))]);
    }
}
