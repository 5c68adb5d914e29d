use core::fmt;

use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Row/column deltas of the 4-neighbourhood. The order (+row, +col, -row, -col) fixes the
/// exploration order of every engine and with it the exact contents of the event logs.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Classification of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Free,
    Wall,
    Start,
    End,
}

impl Cell {
    pub const FREE_CODE: i64 = 0;
    pub const WALL_CODE: i64 = 1;
    pub const END_CODE: i64 = 3;
    pub const START_CODE: i64 = 4;

    /// Maps a numeric cell code to a [Cell]. Codes other than 0, 1, 3 and 4 are treated as free;
    /// use [Cell::is_known_code] to detect them.
    pub fn from_code(code: i64) -> Cell {
        match code {
            Self::WALL_CODE => Cell::Wall,
            Self::START_CODE => Cell::Start,
            Self::END_CODE => Cell::End,
            _ => Cell::Free,
        }
    }
    pub fn is_known_code(code: i64) -> bool {
        matches!(
            code,
            Self::FREE_CODE | Self::WALL_CODE | Self::END_CODE | Self::START_CODE
        )
    }
    pub fn code(self) -> i64 {
        match self {
            Cell::Free => Self::FREE_CODE,
            Cell::Wall => Self::WALL_CODE,
            Cell::Start => Self::START_CODE,
            Cell::End => Self::END_CODE,
        }
    }
}

/// [Maze] is the immutable grid every engine searches. Cells live in a [SimpleGrid] addressed
/// directly by [Point], whose `x` is the row index and `y` the column index, so the grid's first
/// axis spans the maze's height. Connected components of the passable cells are kept in a
/// [UnionFind] so reachability of the end can be reported without searching.
#[derive(Clone, Debug)]
pub struct Maze {
    cells: SimpleGrid<Cell>,
    start: Point,
    end: Point,
    components: UnionFind<usize>,
}

impl Maze {
    /// Builds a maze from `height * width` cell codes in row-major order. The last start and
    /// end codes win; callers wanting stricter checks go through [crate::loader].
    /// Returns [None] if the code count does not match or the maze lacks a start or end.
    pub fn from_codes(height: usize, width: usize, codes: &[i64]) -> Option<Maze> {
        if height.checked_mul(width) != Some(codes.len()) {
            return None;
        }
        let cells: Vec<Cell> = codes.iter().map(|&c| Cell::from_code(c)).collect();
        Maze::from_cells(height, width, cells)
    }

    /// `cells` holds exactly `height * width` entries in row-major order.
    pub(crate) fn from_cells(height: usize, width: usize, cells: Vec<Cell>) -> Option<Maze> {
        let to_point = |ix: usize| Point::new((ix / width) as i32, (ix % width) as i32);
        let start = cells.iter().rposition(|&c| c == Cell::Start).map(to_point)?;
        let end = cells.iter().rposition(|&c| c == Cell::End).map(to_point)?;
        let mut grid = SimpleGrid::new(height, width, Cell::Free);
        for (ix, cell) in cells.into_iter().enumerate() {
            grid.set_point(to_point(ix), cell);
        }
        let mut maze = Maze {
            cells: grid,
            start,
            end,
            components: UnionFind::new(0),
        };
        maze.generate_components();
        Some(maze)
    }

    pub fn width(&self) -> usize {
        self.cells.height()
    }
    pub fn height(&self) -> usize {
        self.cells.width()
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Point {
        self.end
    }
    pub fn len(&self) -> usize {
        self.cells.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.values.is_empty()
    }

    pub fn in_bounds(&self, pos: Point) -> bool {
        self.cells.point_in_bounds(pos)
    }
    /// Out-of-bounds positions are not walls; check [in_bounds](Self::in_bounds) first.
    pub fn is_wall(&self, pos: Point) -> bool {
        self.cell(pos) == Some(Cell::Wall)
    }
    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos) && !self.is_wall(pos)
    }
    pub fn cell(&self, pos: Point) -> Option<Cell> {
        self.in_bounds(pos).then(|| self.cells.get_point(pos))
    }
    /// Grid index of `pos`, or [None] when it lies outside the maze.
    pub fn index_of(&self, pos: Point) -> Option<usize> {
        self.in_bounds(pos).then(|| self.cells.get_ix_point(&pos))
    }

    /// All four neighbours of `pos` in exploration order, including out-of-bounds ones.
    pub fn neighbours(&self, pos: Point) -> SmallVec<[Point; 4]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
            .collect()
    }
    /// The in-bounds, non-wall neighbours of `pos` in exploration order.
    pub fn passable_neighbours(&self, pos: Point) -> SmallVec<[Point; 4]> {
        self.neighbours(pos)
            .into_iter()
            .filter(|&p| self.can_move_to(p))
            .collect()
    }

    /// Checks if start and end are on the same connected component.
    pub fn reachable(&self, from: Point, to: Point) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) => !self.is_wall(from) && self.components.equiv(a, b),
            _ => false,
        }
    }
    pub fn end_reachable(&self) -> bool {
        self.reachable(self.start, self.end)
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours into components.
    /// Only the +row and +col neighbours are joined; the others are covered from their side.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.len());
        for x in 0..self.height() as i32 {
            for y in 0..self.width() as i32 {
                let point = Point::new(x, y);
                if !self.can_move_to(point) {
                    continue;
                }
                let parent_ix = self.cells.get_ix_point(&point);
                for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if let Some(ix) = self.index_of(n).filter(|_| !self.is_wall(n)) {
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
        let verdict = if self.end_reachable() { "is" } else { "is not" };
        info!("{} {} reachable from {}", self.end, verdict, self.start);
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for x in 0..self.height() {
            let line: String = (0..self.width())
                .map(|y| match self.cells.get(x, y) {
                    Cell::Free => '.',
                    Cell::Wall => '#',
                    Cell::Start => 'S',
                    Cell::End => 'E',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
