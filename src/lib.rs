//! # maze_search
//!
//! Searches a 2-D grid maze from its start cell to its end cell with three classical
//! strategies and records every step as a replayable event log:
//!
//! - [DFS](search::DfsEngine): exhaustive backtracking that keeps searching after each hit
//!   and prunes branches that can no longer beat the best length found.
//! - [BFS](search::BfsEngine): frontier-queue search, stopping at the first arrival.
//! - [A*](search::AstarEngine): best-first search with the
//!   [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//!
//! Movement is 4-connected with unit cost. Each engine writes its milestones through an
//! [EventRecorder](events::EventRecorder); [run::run_all] runs all three in the order DFS,
//! BFS, A* and writes one JSON Lines log per algorithm for an external visualizer.
//!
//! ```
//! use maze_search::events::MemoryRecorder;
//! use maze_search::loader::parse_maze;
//! use maze_search::search::{BfsEngine, SearchEngine};
//!
//! let maze = parse_maze("2 2\n4 0\n1 3\n").unwrap();
//! let outcome = BfsEngine.run(&maze, &mut MemoryRecorder::new()).unwrap();
//! assert_eq!(outcome.distance, Some(2));
//! ```
pub mod config;
pub mod error;
pub mod events;
pub mod loader;
pub mod maze;
pub mod run;
pub mod search;
pub mod state;
pub mod visualizer;

pub use error::{LoadError, RecordError, RunError, VisualizerError};
pub use grid_util::point::Point;
pub use maze::{Cell, Maze};
pub use search::{Algorithm, SearchEngine, SearchOutcome};
