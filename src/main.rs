//! Command-line driver: loads a maze, runs DFS, BFS and A* into `<out>/<algo>_events.jsonl`,
//! prints one summary line per algorithm and hands the logs to the replay GUI.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use maze_search::config::{
    RunConfig, VisualizerConfig, DEFAULT_MAZE_PATH, DEFAULT_OUT_DIR, DEFAULT_PYTHON,
    DEFAULT_VISUALIZER_SCRIPT,
};
use maze_search::loader::{load_maze, read_maze};
use maze_search::run::run_all;
use maze_search::visualizer::{gui_maze_path, launch_visualizer, STDIN_PATH};

/// Explore a grid maze with DFS, BFS and A* and record every step for replay.
#[derive(Parser, Debug)]
#[command(name = "maze_search")]
#[command(version)]
struct Cli {
    /// Maze file (`-` for stdin): `height width` followed by the cell codes
    /// (0 free, 1 wall, 3 end, 4 start)
    #[arg(default_value = DEFAULT_MAZE_PATH)]
    maze: PathBuf,

    /// Directory receiving the event logs, created if absent
    #[arg(default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Python interpreter running the visualizer
    #[arg(long, default_value = DEFAULT_PYTHON)]
    python: PathBuf,

    /// Visualizer script
    #[arg(long, default_value = DEFAULT_VISUALIZER_SCRIPT)]
    visualizer: PathBuf,

    /// Do not launch the visualizer
    #[arg(long)]
    no_gui: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> RunConfig {
        RunConfig {
            maze_path: cli.maze,
            out_dir: cli.out_dir,
            visualizer: VisualizerConfig {
                enabled: !cli.no_gui,
                python: cli.python,
                script: cli.visualizer,
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::from(cli);

    let loaded = if config.maze_path == Path::new(STDIN_PATH) {
        read_maze(std::io::stdin().lock())
    } else {
        load_maze(&config.maze_path)
    };
    let maze = match loaded {
        Ok(maze) => maze,
        Err(err) => {
            error!("{err}");
            eprintln!("Failed to load maze: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Loaded {}x{} maze from {}",
        maze.height(),
        maze.width(),
        config.maze_path.display()
    );

    let report = match run_all(&maze, &config.out_dir) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    for line in report.summary_lines() {
        println!("{line}");
    }

    if config.visualizer.enabled {
        let launched = gui_maze_path(&maze, &config.maze_path, &config.out_dir)
            .and_then(|maze_path| launch_visualizer(&config.visualizer, &maze_path, &report));
        if let Err(err) = launched {
            eprintln!("Visualizer: {err}");
        }
    }
    ExitCode::SUCCESS
}
