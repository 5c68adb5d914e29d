use core::fmt;

use grid_util::point::Point;
use itertools::Itertools;

use crate::error::RecordError;
use crate::events::{EventKind, EventRecorder, Meta, Step};
use crate::maze::Maze;
use crate::state::SearchState;

pub mod astar;
pub mod bfs;
pub mod dfs;

pub use astar::AstarEngine;
pub use bfs::BfsEngine;
pub use dfs::DfsEngine;

/// The three strategies, in the order the driver runs them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dfs,
    Bfs,
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dfs, Algorithm::Bfs, Algorithm::Astar];

    /// Name used in the human-readable summary.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Dfs => "DFS",
            Algorithm::Bfs => "BFS",
            Algorithm::Astar => "A*",
        }
    }
    /// Name of the visualizer pane showing this algorithm.
    pub fn pane_name(self) -> &'static str {
        match self {
            Algorithm::Dfs => "DFS",
            Algorithm::Bfs => "BFS",
            Algorithm::Astar => "ASTAR",
        }
    }
    pub fn log_file_name(self) -> &'static str {
        match self {
            Algorithm::Dfs => "dfs_events.jsonl",
            Algorithm::Bfs => "bfs_events.jsonl",
            Algorithm::Astar => "astar_events.jsonl",
        }
    }
    /// Runs the engine for this algorithm with a fresh [SearchState].
    pub fn run(
        self,
        maze: &Maze,
        recorder: &mut dyn EventRecorder,
    ) -> Result<SearchOutcome, RecordError> {
        match self {
            Algorithm::Dfs => DfsEngine.run(maze, recorder),
            Algorithm::Bfs => BfsEngine.run(maze, recorder),
            Algorithm::Astar => AstarEngine.run(maze, recorder),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one engine run. A missing distance means the end was not reached; that is an
/// ordinary outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub algorithm: Algorithm,
    pub distance: Option<usize>,
    /// Start-to-end path, empty when unreachable.
    pub path: Vec<Point>,
    /// Number of events the run emitted.
    pub ticks: u64,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.distance.is_some()
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.distance {
            Some(d) => write!(f, "Shortest length({}) = {}", self.algorithm, d),
            None => write!(f, "No path"),
        }
    }
}

/// An instrumented search strategy. Engines emit `meta` first and `done` last; closing the
/// recorder is left to the caller.
pub trait SearchEngine {
    fn algorithm(&self) -> Algorithm;

    /// Searches `maze` from its start to its end, consuming a fresh `state`.
    fn search(
        &self,
        maze: &Maze,
        state: SearchState,
        recorder: &mut dyn EventRecorder,
    ) -> Result<SearchOutcome, RecordError>;

    fn run(
        &self,
        maze: &Maze,
        recorder: &mut dyn EventRecorder,
    ) -> Result<SearchOutcome, RecordError> {
        self.search(maze, SearchState::new(maze), recorder)
    }
}

pub(crate) fn emit_meta(maze: &Maze, recorder: &mut dyn EventRecorder) -> Result<u64, RecordError> {
    recorder.emit(EventKind::Meta(Meta::of(maze)))
}

pub(crate) fn finish(
    algorithm: Algorithm,
    distance: Option<usize>,
    path: Vec<Point>,
    recorder: &mut dyn EventRecorder,
) -> Result<SearchOutcome, RecordError> {
    let ticks = recorder.emit(EventKind::Done(Step::done(distance)))?;
    Ok(SearchOutcome {
        algorithm,
        distance,
        path,
        ticks,
    })
}

/// Checks that consecutive points of `path` are exactly one axis-aligned unit step apart.
pub fn path_is_contiguous(path: &[Point]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(a, b)| a.manhattan_distance(b) == 1)
}

/// Checks that `path` is a contiguous walk over passable cells from the maze's start to its end.
pub fn path_is_valid(maze: &Maze, path: &[Point]) -> bool {
    path.first() == Some(&maze.start())
        && path.last() == Some(&maze.end())
        && path.iter().all(|&p| maze.can_move_to(p))
        && path_is_contiguous(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguity() {
        let straight = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        let diagonal = [Point::new(0, 0), Point::new(1, 1)];
        let jump = [Point::new(0, 0), Point::new(0, 2)];
        assert!(path_is_contiguous(&straight));
        assert!(!path_is_contiguous(&diagonal));
        assert!(!path_is_contiguous(&jump));
        assert!(path_is_contiguous(&[]));
    }

    #[test]
    fn summary_lines() {
        let found = SearchOutcome {
            algorithm: Algorithm::Astar,
            distance: Some(12),
            path: Vec::new(),
            ticks: 3,
        };
        let missing = SearchOutcome {
            distance: None,
            ..found.clone()
        };
        assert_eq!(found.to_string(), "Shortest length(A*) = 12");
        assert_eq!(missing.to_string(), "No path");
    }

    #[test]
    fn log_names() {
        let names: Vec<_> = Algorithm::ALL.iter().map(|a| a.log_file_name()).collect();
        assert_eq!(
            names,
            ["dfs_events.jsonl", "bfs_events.jsonl", "astar_events.jsonl"]
        );
    }
}
