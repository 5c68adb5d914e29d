//! Exhaustive backtracking search. The first complete path is not necessarily the shortest:
//! the search keeps going after every hit and cuts any branch whose depth already reaches the
//! best distance found so far, so the surviving best path is a shortest one.
//!
//! The recursion is run on an explicit stack of frames so large mazes cannot overflow the call
//! stack. The emitted event order is the same as that of the recursive formulation.
use grid_util::point::Point;
use log::{debug, info};

use super::{emit_meta, finish, Algorithm, SearchEngine, SearchOutcome};
use crate::error::RecordError;
use crate::events::{EventKind, EventRecorder, Step};
use crate::maze::{Maze, NEIGHBOUR_OFFSETS};
use crate::state::SearchState;

#[derive(Clone, Copy, Debug, Default)]
pub struct DfsEngine;

/// A cell on the current branch and the index of the next neighbour to try.
#[derive(Clone, Copy, Debug)]
struct Frame {
    cell: Point,
    depth: usize,
    next: usize,
}

enum Entry {
    /// Out of bounds, a wall, on the current branch, or pruned.
    Rejected,
    /// The end was reached and already backed out of.
    Goal,
    /// The cell was entered and its neighbours still need exploring.
    Expand(Frame),
}

struct Dfs<'a> {
    maze: &'a Maze,
    state: SearchState,
    recorder: &'a mut dyn EventRecorder,
}

impl Dfs<'_> {
    fn enter(&mut self, cell: Point, depth: usize) -> Result<Entry, RecordError> {
        if !self.maze.can_move_to(cell)
            || self.state.is_visited(cell)
            || self.state.cannot_improve(depth)
        {
            return Ok(Entry::Rejected);
        }
        self.state.set_visited(cell, true);
        self.state.current_path.push(cell);
        let step = Step::at(cell, depth);
        self.recorder.emit(EventKind::SetCurrent(step))?;
        self.recorder.emit(EventKind::PathPush(step))?;
        self.recorder.emit(EventKind::VisitedAdd(step))?;

        if cell == self.maze.end() {
            debug!("Reached {} at depth {}", cell, depth);
            self.state.best_distance = Some(depth);
            self.state.best_path = self.state.current_path.clone();
            self.recorder.emit(EventKind::Found(step))?;
            self.leave(cell, depth)?;
            return Ok(Entry::Goal);
        }
        Ok(Entry::Expand(Frame {
            cell,
            depth,
            next: 0,
        }))
    }

    /// Backs out of `cell`, releasing it for alternate branches.
    fn leave(&mut self, cell: Point, depth: usize) -> Result<(), RecordError> {
        self.recorder
            .emit(EventKind::PathPop(Step::at(cell, depth)))?;
        self.state.set_visited(cell, false);
        self.state.current_path.pop();
        Ok(())
    }

    fn explore(&mut self) -> Result<(), RecordError> {
        let mut stack: Vec<Frame> = Vec::new();
        if let Entry::Expand(frame) = self.enter(self.maze.start(), 0)? {
            stack.push(frame);
        }
        while let Some(frame) = stack.last_mut() {
            if let Some(&(dx, dy)) = NEIGHBOUR_OFFSETS.get(frame.next) {
                frame.next += 1;
                let neighbour = Point::new(frame.cell.x + dx, frame.cell.y + dy);
                let depth = frame.depth + 1;
                if let Entry::Expand(child) = self.enter(neighbour, depth)? {
                    stack.push(child);
                }
            } else {
                let Frame { cell, depth, .. } = *frame;
                stack.pop();
                self.leave(cell, depth)?;
            }
        }
        Ok(())
    }
}

impl SearchEngine for DfsEngine {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }

    fn search(
        &self,
        maze: &Maze,
        state: SearchState,
        recorder: &mut dyn EventRecorder,
    ) -> Result<SearchOutcome, RecordError> {
        emit_meta(maze, recorder)?;
        let mut dfs = Dfs {
            maze,
            state,
            recorder,
        };
        dfs.explore()?;
        let Dfs {
            state, recorder, ..
        } = dfs;
        match state.best_distance {
            Some(d) => info!("DFS found a path of length {d}"),
            None => info!("DFS found no path"),
        }
        finish(
            Algorithm::Dfs,
            state.best_distance,
            state.best_path,
            recorder,
        )
    }
}
