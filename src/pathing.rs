use std::collections::VecDeque;
use std::fmt::{Debug, Display, LowerHex};

use bit_set::BitSet;
use error_chain::bail;
use itertools::Itertools;
use num::traits::{Bounded, CheckedAdd, One, Unsigned, Zero};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid::Grid;
use crate::observers::{CellRole, MazeObserver};
use crate::utils;
use crate::utils::FnvHashMap;


// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this out each time
// Note generic parameter type aliases are not in the langauge.
// `type X = Y;` only works with concrete types.
pub trait MaxDistance
    : Zero + One + Bounded + CheckedAdd + Unsigned + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T: Zero + One + Bounded + CheckedAdd + Unsigned + Debug + Clone + Copy + Display + LowerHex + Ord> MaxDistance for T {}


/// Flood fill distances, in passages walked, from one start cell to every cell it can reach.
///
/// Distances saturate at `MaxDistanceT::max_value()`, so a narrow type such as `u8` reports
/// every cell 255 or more passages away as 255.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT: MaxDistance> Distances<MaxDistanceT> {

    /// None if the start coordinate is not on the grid.
    pub fn for_grid(grid: &Grid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances<MaxDistanceT>> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let mut distances: FnvHashMap<Cartesian2DCoordinate, MaxDistanceT> =
            utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, Zero::zero());

        // Every step is just one from the previous cell, so the first distance set for a cell is
        // already its shortest. The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &*links {
                    if !distances.contains_key(link_coordinate) {
                        let link_distance = distance_to_cell
                            .checked_add(&One::one())
                            .unwrap_or_else(MaxDistanceT::max_value);
                        distances.insert(*link_coordinate, link_distance);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// None for cells that cannot be reached, or are not on the grid.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum PathOutcome {
    /// Start to end inclusive. Consecutive cells are linked by a passage.
    Found(Vec<Cartesian2DCoordinate>),
    /// The end cannot be reached from the start.
    NoPathFound,
    /// The observer asked to stop.
    Cancelled,
}

impl PathOutcome {
    pub fn path(&self) -> Option<&[Cartesian2DCoordinate]> {
        match *self {
            PathOutcome::Found(ref path) => Some(path),
            _ => None,
        }
    }
}

/// Shortest path from `start` to `end` by breadth first search through the carved passages.
///
/// Cells are expanded in order of their distance from the start, so the first time the end cell
/// is dequeued the parent links back to the start form a shortest path. Neighbours are checked
/// north, east, south then west which makes the choice between equally short paths
/// deterministic.
///
/// Each newly reached cell is reported as `BfsVisited`, then once the end is found the path is
/// reported cell by cell from the end back to the start as `SolutionPath`. The visited set and
/// parent links live only for this call, the grid is never modified.
///
/// Errors with `InvalidCoordinate` if either cell is off the grid.
pub fn breadth_first_search<O>(grid: &Grid,
                               start: Cartesian2DCoordinate,
                               end: Cartesian2DCoordinate,
                               mut observer: O)
                               -> Result<PathOutcome>
    where O: MazeObserver
{
    let start_index = match grid.grid_coordinate_to_index(start) {
        Some(index) => index,
        None => bail!(ErrorKind::InvalidCoordinate(start)),
    };
    if !grid.is_valid_coordinate(end) {
        bail!(ErrorKind::InvalidCoordinate(end));
    }

    let mut queue = VecDeque::with_capacity(grid.size());
    let mut visited = BitSet::with_capacity(grid.size());
    let mut parents: FnvHashMap<Cartesian2DCoordinate, Cartesian2DCoordinate> =
        utils::fnv_hashmap(grid.size());

    queue.push_back(start);
    visited.insert(start_index);

    loop {
        if observer.poll_cancel() {
            return Ok(PathOutcome::Cancelled);
        }

        let current = match queue.pop_front() {
            Some(coord) => coord,
            None => return Ok(PathOutcome::NoPathFound),
        };

        if current == end {
            break;
        }

        for dir in CompassPrimary::ALL.iter() {
            if !grid.is_open(current, *dir) {
                continue;
            }
            let neighbour = match grid.neighbour_at_direction(current, *dir) {
                Some(coord) => coord,
                None => continue,
            };
            let neighbour_index = match grid.grid_coordinate_to_index(neighbour) {
                Some(index) => index,
                None => continue,
            };
            if visited.insert(neighbour_index) {
                parents.insert(neighbour, current);
                queue.push_back(neighbour);
                observer.notify_cell_state(neighbour, CellRole::BfsVisited);
            }
        }
    }

    Ok(trace_path_back(&parents, start, end, &mut observer))
}

/// Follow parent links from `end` back to `start`, reporting each cell as it is reached.
fn trace_path_back<O>(parents: &FnvHashMap<Cartesian2DCoordinate, Cartesian2DCoordinate>,
                      start: Cartesian2DCoordinate,
                      end: Cartesian2DCoordinate,
                      observer: &mut O)
                      -> PathOutcome
    where O: MazeObserver
{
    let mut path = vec![];
    let mut next = Some(end);

    while let Some(current) = next {
        if observer.poll_cancel() {
            return PathOutcome::Cancelled;
        }
        observer.notify_cell_state(current, CellRole::SolutionPath);
        path.push(current);

        next = if current == start {
            None
        } else {
            match parents.get(&current) {
                Some(parent) => Some(*parent),
                None => return PathOutcome::NoPathFound,
            }
        };
    }

    path.reverse();
    PathOutcome::Found(path)
}

/// Is every cell connected to every other by exactly one route?
///
/// True when the passages form a spanning tree: one fewer passage than cells and no passage
/// joins two cells that are already connected.
pub fn is_perfect_maze(grid: &Grid) -> bool {
    let mut components = UnionFind::<usize>::new(grid.size());
    let mut passages = 0;

    for (a, b) in grid.iter_links() {
        let indices = (grid.grid_coordinate_to_index(a), grid.grid_coordinate_to_index(b));
        if let (Some(a_index), Some(b_index)) = indices {
            if !components.union(a_index, b_index) {
                return false;
            }
            passages += 1;
        }
    }

    passages + 1 == grid.size()
}
