//! The boundary between the maze algorithms and whatever presents them.
//!
//! Generation and solving report every step to a `MazeObserver` and ask it, between steps,
//! whether the host wants to stop. Observers only see coordinates and roles, never the grid
//! itself, so they cannot change the maze.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cells::Cartesian2DCoordinate;

/// What a cell notification means.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CellRole {
    /// The cell the recursive backtracker is currently standing on.
    GenerationHead,
    /// A cell newly reached by the breadth first search flood.
    BfsVisited,
    /// A cell on the reconstructed shortest path.
    SolutionPath,
}

impl fmt::Display for CellRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            CellRole::GenerationHead => "generation_head",
            CellRole::BfsVisited => "bfs_visited",
            CellRole::SolutionPath => "solution_path",
        };
        f.write_str(name)
    }
}

pub trait MazeObserver {
    fn notify_cell_state(&mut self, coord: Cartesian2DCoordinate, role: CellRole);

    /// Checked between algorithm steps; returning true abandons the current phase.
    fn poll_cancel(&mut self) -> bool {
        false
    }
}

/// Watches nothing and never cancels.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullObserver;

impl MazeObserver for NullObserver {
    fn notify_cell_state(&mut self, _: Cartesian2DCoordinate, _: CellRole) {}
}

impl<'a, O: MazeObserver + ?Sized> MazeObserver for &'a mut O {
    fn notify_cell_state(&mut self, coord: Cartesian2DCoordinate, role: CellRole) {
        (**self).notify_cell_state(coord, role)
    }

    fn poll_cancel(&mut self) -> bool {
        (**self).poll_cancel()
    }
}

/// Both observers see every notification; either one can cancel.
impl<A: MazeObserver, B: MazeObserver> MazeObserver for (A, B) {
    fn notify_cell_state(&mut self, coord: Cartesian2DCoordinate, role: CellRole) {
        self.0.notify_cell_state(coord, role);
        self.1.notify_cell_state(coord, role);
    }

    fn poll_cancel(&mut self) -> bool {
        // Poll both so neither misses a step count.
        let first = self.0.poll_cancel();
        let second = self.1.poll_cancel();
        first || second
    }
}

/// Keeps every notification in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<(Cartesian2DCoordinate, CellRole)>,
}

impl EventLog {
    pub fn new() -> EventLog {
        EventLog::default()
    }

    pub fn events(&self) -> &[(Cartesian2DCoordinate, CellRole)] {
        &self.events
    }

    pub fn cells_in_role(&self, role: CellRole) -> Vec<Cartesian2DCoordinate> {
        self.events
            .iter()
            .filter(|&&(_, event_role)| event_role == role)
            .map(|&(coord, _)| coord)
            .collect()
    }
}

impl MazeObserver for EventLog {
    fn notify_cell_state(&mut self, coord: Cartesian2DCoordinate, role: CellRole) {
        self.events.push((coord, role));
    }
}

/// Lets a fixed number of steps run, then asks for cancellation.
///
/// `CancelAfter::steps(0)` cancels before the first step.
#[derive(Debug, Copy, Clone)]
pub struct CancelAfter {
    remaining_steps: usize,
}

impl CancelAfter {
    pub fn steps(steps: usize) -> CancelAfter {
        CancelAfter { remaining_steps: steps }
    }
}

impl MazeObserver for CancelAfter {
    fn notify_cell_state(&mut self, _: Cartesian2DCoordinate, _: CellRole) {}

    fn poll_cancel(&mut self) -> bool {
        if self.remaining_steps == 0 {
            true
        } else {
            self.remaining_steps -= 1;
            false
        }
    }
}

/// Cancels once its shared flag is raised, e.g. from an interrupt handler on another thread.
#[derive(Debug, Default, Clone)]
pub struct CancelFlag {
    raised: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> CancelFlag {
        CancelFlag::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

impl MazeObserver for CancelFlag {
    fn notify_cell_state(&mut self, _: Cartesian2DCoordinate, _: CellRole) {}

    fn poll_cancel(&mut self) -> bool {
        self.is_raised()
    }
}
