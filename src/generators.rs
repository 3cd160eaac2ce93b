use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::Grid;
use crate::observers::{CellRole, MazeObserver};

/// A source of uniformly random choices: "give me an index below `len`".
///
/// Every `rand::Rng` is one, so generation can be driven by a seeded `XorShiftRng` for
/// reproducible mazes or by an entropy seeded one for fresh mazes.
pub trait RandomIndex {
    /// `len` must be greater than zero.
    fn random_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomIndex for R {
    #[inline]
    fn random_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Same seed, same maze.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

pub fn entropy_rng() -> XorShiftRng {
    XorShiftRng::from_entropy()
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationOutcome {
    /// Every cell was reached. `passages` walls were carved.
    Complete { passages: usize },
    /// The observer asked to stop. The grid keeps whatever was carved before the request.
    Cancelled,
}

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid.
///
/// It is a randomised depth first search: from the current cell carve into a random unvisited
/// neighbour and move there, remembering where we came from on a stack. When a cell has no
/// unvisited neighbours left we pop the stack and backtrack until some earlier cell does.
/// Generation is finished when the stack empties, and as the grid graph is connected every cell
/// has been visited by then, so the passages form a spanning tree - a perfect maze.
///
/// Any earlier carving on the grid is walled up again first, unless cancelled before starting.
///
/// Starts from the top left cell. After every step the cell being stood on is reported to the
/// observer as the generation head, and before every step the observer may cancel.
pub fn recursive_backtracker<R, O>(grid: &mut Grid, rng: &mut R, mut observer: O) -> GenerationOutcome
    where R: RandomIndex + ?Sized,
          O: MazeObserver
{
    if observer.poll_cancel() {
        return GenerationOutcome::Cancelled;
    }

    grid.reset();
    let start = grid.first_cell();
    let marked = grid.mark_visited(start);
    debug_assert!(marked, "the first cell is on every grid");
    observer.notify_cell_state(start, CellRole::GenerationHead);

    let mut current: Cartesian2DCoordinate = start;
    let mut stack: Vec<Cartesian2DCoordinate> = Vec::with_capacity(grid.size());
    let mut passages = 0;

    loop {
        if observer.poll_cancel() {
            return GenerationOutcome::Cancelled;
        }

        let unvisited = grid.unvisited_neighbours(current);
        if !unvisited.is_empty() {

            let next = unvisited[rng.random_index(unvisited.len())];
            let marked = grid.mark_visited(next);
            debug_assert!(marked, "unvisited neighbours are grid cells");
            stack.push(current);
            let carved = grid.carve(current, next);
            debug_assert!(carved.is_ok(), "unvisited neighbours are adjacent grid cells");
            passages += 1;
            current = next;

        } else if let Some(previous) = stack.pop() {
            current = previous;
        } else {
            break;
        }

        observer.notify_cell_state(current, CellRole::GenerationHead);
    }

    GenerationOutcome::Complete { passages }
}
