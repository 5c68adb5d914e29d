//! Runs DFS, BFS and A* one after another against one maze, each into its own event log.
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{RecordError, RunError};
use crate::events::{EventRecorder, JsonLinesRecorder};
use crate::maze::Maze;
use crate::search::{Algorithm, SearchOutcome};

/// Outcome of one algorithm together with the log it wrote.
#[derive(Clone, Debug)]
pub struct AlgorithmRun {
    pub outcome: SearchOutcome,
    pub log_path: PathBuf,
}

#[derive(Clone, Debug, Default)]
pub struct RunReport {
    pub runs: Vec<AlgorithmRun>,
}

impl RunReport {
    pub fn get(&self, algorithm: Algorithm) -> Option<&AlgorithmRun> {
        self.runs.iter().find(|r| r.outcome.algorithm == algorithm)
    }
    pub fn log_path(&self, algorithm: Algorithm) -> Option<&Path> {
        self.get(algorithm).map(|r| r.log_path.as_path())
    }
    /// One summary line per algorithm, in run order.
    pub fn summary_lines(&self) -> Vec<String> {
        self.runs.iter().map(|r| r.outcome.to_string()).collect()
    }
}

/// Runs a single algorithm into `<out_dir>/<algorithm log name>`, closing the log afterwards.
pub fn run_algorithm(
    algorithm: Algorithm,
    maze: &Maze,
    out_dir: &Path,
) -> Result<AlgorithmRun, RunError> {
    let log_path = out_dir.join(algorithm.log_file_name());
    let wrap = |source: RecordError| RunError::Log {
        path: log_path.clone(),
        source,
    };
    debug!("Running {} into {}", algorithm, log_path.display());
    let mut recorder = JsonLinesRecorder::create(&log_path).map_err(wrap)?;
    let outcome = algorithm.run(maze, &mut recorder).map_err(wrap)?;
    recorder.close().map_err(wrap)?;
    info!("{} emitted {} events", algorithm, outcome.ticks);
    Ok(AlgorithmRun { outcome, log_path })
}

/// Creates `out_dir` if needed and runs all algorithms in the fixed order DFS, BFS, A*.
pub fn run_all(maze: &Maze, out_dir: &Path) -> Result<RunReport, RunError> {
    fs::create_dir_all(out_dir).map_err(|source| RunError::OutputDir {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let runs = Algorithm::ALL
        .iter()
        .map(|&algorithm| run_algorithm(algorithm, maze, out_dir))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RunReport { runs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::read_event_log;

    #[test]
    fn writes_one_log_per_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let maze = Maze::from_codes(2, 2, &[4, 0, 0, 3]).unwrap();
        let report = run_all(&maze, &out).unwrap();
        assert_eq!(report.runs.len(), 3);
        for algorithm in Algorithm::ALL {
            let path = report.log_path(algorithm).unwrap();
            assert_eq!(path, out.join(algorithm.log_file_name()));
            let events = read_event_log(path).unwrap();
            assert_eq!(events.len() as u64, report.get(algorithm).unwrap().outcome.ticks);
        }
        assert_eq!(
            report.summary_lines(),
            vec![
                "Shortest length(DFS) = 2",
                "Shortest length(BFS) = 2",
                "Shortest length(A*) = 2"
            ]
        );
    }

    #[test]
    fn unwritable_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let maze = Maze::from_codes(1, 2, &[4, 3]).unwrap();
        let err = run_all(&maze, &blocker.join("out")).unwrap_err();
        assert!(matches!(err, RunError::OutputDir { .. }));
    }
}
