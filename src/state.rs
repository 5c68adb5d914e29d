use fxhash::FxBuildHasher;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;

use crate::maze::Maze;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Per-run mutable search state. Every engine invocation builds a fresh one, so nothing leaks
/// between the DFS, BFS and A* runs.
///
/// The parent tree is an insertion-ordered map from a cell to `(parent index, cost)`, where the
/// parent index points back into the same map. The root is its own parent.
#[derive(Clone, Debug)]
pub struct SearchState {
    visited: BoolGrid,
    /// Best complete distance found so far; [None] stands for +inf.
    pub best_distance: Option<usize>,
    parents: FxIndexMap<Point, (usize, usize)>,
    /// Live DFS recursion stack.
    pub current_path: Vec<Point>,
    /// Best DFS path found so far.
    pub best_path: Vec<Point>,
}

impl SearchState {
    pub fn new(maze: &Maze) -> SearchState {
        SearchState {
            visited: BoolGrid::new(maze.height(), maze.width(), false),
            best_distance: None,
            parents: FxIndexMap::default(),
            current_path: Vec::new(),
            best_path: Vec::new(),
        }
    }

    /// `pos` must be inside the maze the state was built for.
    pub fn is_visited(&self, pos: Point) -> bool {
        debug_assert!(self.visited.point_in_bounds(pos));
        self.visited.get_point(pos)
    }
    pub fn set_visited(&mut self, pos: Point, visited: bool) {
        debug_assert!(self.visited.point_in_bounds(pos));
        self.visited.set_point(pos, visited);
    }
    pub fn visited_count(&self) -> usize {
        self.visited
            .values
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Whether a distance would be pruned by the best complete distance found so far.
    pub fn cannot_improve(&self, dist: usize) -> bool {
        self.best_distance.is_some_and(|best| dist >= best)
    }

    /// Makes `root` the self-parented root of the parent tree with cost 0.
    pub fn set_root(&mut self, root: Point) {
        let (ix, _) = self.parents.insert_full(root, (0, 0));
        self.parents[ix] = (ix, 0);
    }
    /// Records `parent` as the predecessor of `node` if `cost` beats the stored cost. Returns
    /// whether the tree changed. The parent must already be in the tree.
    pub fn relax(&mut self, node: Point, parent: Point, cost: usize) -> bool {
        let Some(parent_ix) = self.parents.get_index_of(&parent) else {
            return false;
        };
        match self.parents.entry(node) {
            Vacant(e) => {
                e.insert((parent_ix, cost));
                true
            }
            Occupied(mut e) => {
                if e.get().1 > cost {
                    e.insert((parent_ix, cost));
                    true
                } else {
                    false
                }
            }
        }
    }
    pub fn is_discovered(&self, pos: Point) -> bool {
        self.parents.contains_key(&pos)
    }
    /// The best known cost to `pos`, [None] (+inf) if it was never reached.
    pub fn cost(&self, pos: Point) -> Option<usize> {
        self.parents.get(&pos).map(|&(_, c)| c)
    }
    pub fn parent(&self, pos: Point) -> Option<Point> {
        let &(parent_ix, _) = self.parents.get(&pos)?;
        self.parents.get_index(parent_ix).map(|(p, _)| *p)
    }

    /// Walks parent pointers from `end` back to the root and returns the path root-first.
    /// Empty when `end` was never reached.
    pub fn reverse_path(&self, end: Point) -> Vec<Point> {
        let Some(end_ix) = self.parents.get_index_of(&end) else {
            return Vec::new();
        };
        let mut path: Vec<Point> = std::iter::successors(Some(end_ix), |&ix| {
            let &(parent_ix, _) = self.parents.get_index(ix)?.1;
            (parent_ix != ix).then_some(parent_ix)
        })
        .filter_map(|ix| self.parents.get_index(ix).map(|(p, _)| *p))
        .collect();
        path.reverse();
        path
    }
}
