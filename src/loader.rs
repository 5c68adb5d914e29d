//! Reads the text maze format: a `height width` header followed by `height * width`
//! whitespace-separated cell codes in row-major order (`0` free, `1` wall, `3` end, `4` start).
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use log::{debug, warn};

use grid_util::point::Point;

use crate::error::LoadError;
use crate::maze::{Cell, Maze};

/// Loads a maze from a file on disk.
pub fn load_maze<P: AsRef<Path>>(path: P) -> Result<Maze, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Reading maze from {}", path.display());
    read_maze(file)
}

/// Loads a maze from any byte stream, e.g. standard input.
pub fn read_maze<R: Read>(mut reader: R) -> Result<Maze, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_maze(&text)
}

/// Parses a maze description. Partial cell data is rejected rather than padded.
pub fn parse_maze(text: &str) -> Result<Maze, LoadError> {
    let mut tokens = text.split_whitespace();
    let mut header_value = |name: &str| -> Result<usize, LoadError> {
        let token = tokens
            .next()
            .ok_or_else(|| LoadError::Header(format!("missing {name}")))?;
        token
            .parse::<usize>()
            .map_err(|_| LoadError::Header(format!("{name} is not a size: {token:?}")))
    };
    let height = header_value("height")?;
    let width = header_value("width")?;
    let max_side = i32::MAX as usize;
    if height > max_side || width > max_side {
        return Err(LoadError::Header(format!(
            "{height}x{width} exceeds the largest addressable side of {max_side}"
        )));
    }
    if height.checked_mul(width).is_none() {
        return Err(LoadError::Header(format!(
            "{height}x{width} cells overflow the address space"
        )));
    }

    // Grows with the data; the header alone never decides an allocation.
    let mut cells = Vec::new();
    let (mut starts, mut ends) = (0, 0);
    for row in 0..height {
        for col in 0..width {
            let token = tokens.next().ok_or(LoadError::Truncated { row, col })?;
            let code = token.parse::<i64>().map_err(|_| LoadError::BadCell {
                row,
                col,
                token: token.to_owned(),
            })?;
            if !Cell::is_known_code(code) {
                warn!("Unrecognized cell code {code} at ({row}, {col}) treated as free");
            }
            let cell = Cell::from_code(code);
            match cell {
                Cell::Start => starts += 1,
                Cell::End => ends += 1,
                _ => {}
            }
            cells.push(cell);
        }
    }
    if starts == 0 {
        return Err(LoadError::MissingStart);
    }
    if ends == 0 {
        return Err(LoadError::MissingEnd);
    }
    if starts > 1 || ends > 1 {
        warn!("Maze has {starts} start and {ends} end cells, using the last of each");
    }
    debug!("Parsed {height}x{width} maze");
    Maze::from_cells(height, width, cells).ok_or(LoadError::MissingStart)
}

/// Renders `maze` in the text format [parse_maze] reads, one row per line.
pub fn format_maze(maze: &Maze) -> String {
    let mut text = format!("{} {}\n", maze.height(), maze.width());
    for x in 0..maze.height() as i32 {
        let row = (0..maze.width() as i32)
            .filter_map(|y| maze.cell(Point::new(x, y)))
            .map(|cell| cell.code().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        text.push_str(&row);
        text.push('\n');
    }
    text
}

/// Writes `maze` to `path` so it can be loaded again, e.g. by the visualizer.
pub fn save_maze<P: AsRef<Path>>(maze: &Maze, path: P) -> io::Result<()> {
    let path = path.as_ref();
    debug!("Writing maze to {}", path.display());
    fs::write(path, format_maze(maze))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_cells() {
        let maze = parse_maze("2 3\n4 0 1\n1 0 3\n").unwrap();
        assert_eq!(maze.height(), 2);
        assert_eq!(maze.width(), 3);
        assert_eq!(maze.start(), Point::new(0, 0));
        assert_eq!(maze.end(), Point::new(1, 2));
        assert!(maze.is_wall(Point::new(0, 2)));
    }

    #[test]
    fn layout_whitespace_is_irrelevant() {
        let maze = parse_maze("2 2 4 0\n\n 0   3").unwrap();
        assert_eq!(maze.end(), Point::new(1, 1));
    }

    #[test]
    fn rejects_bad_header() {
        assert!(matches!(parse_maze(""), Err(LoadError::Header(_))));
        assert!(matches!(parse_maze("x 2"), Err(LoadError::Header(_))));
        assert!(matches!(parse_maze("2"), Err(LoadError::Header(_))));
    }

    #[test]
    fn rejects_truncated_cells() {
        let err = parse_maze("2 2\n4 0\n0").unwrap_err();
        assert!(matches!(err, LoadError::Truncated { row: 1, col: 1 }));
    }

    #[test]
    fn unaddressable_header_is_a_header_error() {
        for text in [
            "18446744073709551615 2\n4 3",
            "2 18446744073709551615\n4 3",
            "3000000000 3000000000\n4 3",
        ] {
            assert!(matches!(parse_maze(text), Err(LoadError::Header(_))), "{text}");
        }
    }

    #[test]
    fn huge_header_with_few_cells_is_truncated() {
        let err = parse_maze("2000000000 2000000000\n4 3").unwrap_err();
        assert!(matches!(err, LoadError::Truncated { row: 0, col: 2 }));
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let err = parse_maze("1 2\n4 x").unwrap_err();
        assert!(matches!(err, LoadError::BadCell { row: 0, col: 1, .. }));
    }

    #[test]
    fn rejects_missing_start_or_end() {
        assert!(matches!(parse_maze("1 2 0 3"), Err(LoadError::MissingStart)));
        assert!(matches!(parse_maze("1 2 4 0"), Err(LoadError::MissingEnd)));
    }

    #[test]
    fn unknown_codes_load_as_free() {
        let maze = parse_maze("1 3 4 9 3").unwrap();
        assert!(!maze.is_wall(Point::new(0, 1)));
    }

    #[test]
    fn reads_from_stream() {
        let maze = read_maze("1 2 4 3".as_bytes()).unwrap();
        assert_eq!(maze.len(), 2);
    }

    #[test]
    fn saved_maze_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maze.txt");
        let maze = parse_maze("2 3\n4 0 1\n1 0 3\n").unwrap();
        save_maze(&maze, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "2 3\n4 0 1\n1 0 3\n");
        let loaded = load_maze(&path).unwrap();
        assert_eq!(loaded.to_string(), maze.to_string());
        assert_eq!(loaded.start(), maze.start());
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_maze("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
