//! Error types for loading mazes, writing event logs and launching the visualizer.
//!
//! Search-time conditions (walls, bounds, an unreachable end) are not errors:
//! they surface as a [SearchOutcome](crate::search::SearchOutcome) without a distance.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a maze description into a [Maze](crate::maze::Maze).
/// Fatal to a run: no engine starts when loading fails.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open maze file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read maze source: {0}")]
    Read(#[from] io::Error),
    #[error("malformed header: {0}")]
    Header(String),
    #[error("unparsable cell value {token:?} at ({row}, {col})")]
    BadCell { row: usize, col: usize, token: String },
    #[error("maze data ends early at ({row}, {col})")]
    Truncated { row: usize, col: usize },
    #[error("maze has no start cell (code 4)")]
    MissingStart,
    #[error("maze has no end cell (code 3)")]
    MissingEnd,
}

/// Failure while appending to or reading back an event log.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("event log I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("malformed event on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("event emitted after the log was closed")]
    Closed,
}

/// Failure of the driver that runs all three engines against one maze.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: RecordError,
    },
}

/// Failure to hand the event logs to the external visualizer. Reported, never fatal.
#[derive(Debug, Error)]
pub enum VisualizerError {
    #[error("cannot save maze for the visualizer to {}: {source}", .path.display())]
    SaveMaze {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("visualizer script not found: {}", .0.display())]
    ScriptMissing(PathBuf),
    #[error("event log not found: {}", .0.display())]
    LogMissing(PathBuf),
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("visualizer exited with {0}")]
    Exit(std::process::ExitStatus),
}
