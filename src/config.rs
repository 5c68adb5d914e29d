use std::path::PathBuf;

pub const DEFAULT_MAZE_PATH: &str = "data/ScannedMaze.txt";
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_VISUALIZER_SCRIPT: &str = "python/GUI_Animation.py";

/// How to hand the finished event logs to the external replay GUI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualizerConfig {
    pub enabled: bool,
    /// Interpreter used to run the script.
    pub python: PathBuf,
    pub script: PathBuf,
}

impl Default for VisualizerConfig {
    fn default() -> VisualizerConfig {
        VisualizerConfig {
            enabled: true,
            python: PathBuf::from(DEFAULT_PYTHON),
            script: PathBuf::from(DEFAULT_VISUALIZER_SCRIPT),
        }
    }
}

/// Settings for one invocation of the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub maze_path: PathBuf,
    /// Directory receiving the three event logs; created if absent.
    pub out_dir: PathBuf,
    pub visualizer: VisualizerConfig,
}

impl Default for RunConfig {
    fn default() -> RunConfig {
        RunConfig {
            maze_path: PathBuf::from(DEFAULT_MAZE_PATH),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            visualizer: VisualizerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RunConfig::default();
        assert_eq!(config.maze_path, PathBuf::from("data/ScannedMaze.txt"));
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert!(config.visualizer.enabled);
    }
}
