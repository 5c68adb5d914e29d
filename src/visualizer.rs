//! Launches the external replay GUI on the finished logs. Failures here are reported by the
//! caller and never affect the search results, which are complete by the time this runs.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::config::VisualizerConfig;
use crate::error::VisualizerError;
use crate::loader::save_maze;
use crate::maze::Maze;
use crate::run::RunReport;
use crate::search::Algorithm;

/// Pane order of the GUI window.
const PANES: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Astar, Algorithm::Dfs];

/// Maze path argument meaning "read the maze from stdin".
pub const STDIN_PATH: &str = "-";
/// File in the output directory receiving a maze that was read from stdin.
pub const STDIN_MAZE_FILE: &str = "stdin_maze.txt";

/// The maze file the GUI should open. The GUI reads the maze itself, so a maze read from stdin
/// is first saved into `out_dir`.
pub fn gui_maze_path(
    maze: &Maze,
    maze_path: &Path,
    out_dir: &Path,
) -> Result<PathBuf, VisualizerError> {
    if maze_path != Path::new(STDIN_PATH) {
        return Ok(maze_path.to_path_buf());
    }
    let saved = out_dir.join(STDIN_MAZE_FILE);
    save_maze(maze, &saved).map_err(|source| VisualizerError::SaveMaze {
        path: saved.clone(),
        source,
    })?;
    Ok(saved)
}

/// Builds `<python> <script> --maze <maze> --pane BFS:<log> --pane ASTAR:<log> --pane DFS:<log>`
/// after checking that the script and every log exist.
pub fn visualizer_command(
    config: &VisualizerConfig,
    maze_path: &Path,
    report: &RunReport,
) -> Result<Command, VisualizerError> {
    if !config.script.exists() {
        return Err(VisualizerError::ScriptMissing(config.script.clone()));
    }
    let mut command = Command::new(&config.python);
    command.arg(&config.script).arg("--maze").arg(maze_path);
    for algorithm in PANES {
        let log = report
            .log_path(algorithm)
            .map_or_else(|| PathBuf::from(algorithm.log_file_name()), Path::to_path_buf);
        if !log.exists() {
            return Err(VisualizerError::LogMissing(log));
        }
        let mut pane = OsString::from(format!("{}:", algorithm.pane_name()));
        pane.push(log.as_os_str());
        command.arg("--pane").arg(pane);
    }
    Ok(command)
}

/// Runs the visualizer and waits for it to exit.
pub fn launch_visualizer(
    config: &VisualizerConfig,
    maze_path: &Path,
    report: &RunReport,
) -> Result<(), VisualizerError> {
    let mut command = visualizer_command(config, maze_path, report)?;
    info!("Launching visualizer: {:?}", command);
    let status = command.status().map_err(|source| VisualizerError::Spawn {
        program: config.python.display().to_string(),
        source,
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(VisualizerError::Exit(status))
    }
}
