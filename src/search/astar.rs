use std::cmp::Ordering;
use std::collections::BinaryHeap;

use grid_util::point::Point;
use log::{info, warn};

use super::{emit_meta, finish, Algorithm, SearchEngine, SearchOutcome};
use crate::error::RecordError;
use crate::events::{EventKind, EventRecorder, Step};
use crate::maze::Maze;
use crate::state::SearchState;

/// Heap entry; `estimated_cost = cost + heuristic(point)`.
#[derive(Clone, Copy, Debug)]
struct SmallestCostHolder {
    estimated_cost: usize,
    cost: usize,
    point: Point,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.cost == other.cost
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: lowest estimated cost first, ties to the lowest cost
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.cost.cmp(&self.cost),
            s => s,
        }
    }
}

/// Best-first search guided by the Manhattan distance to the end, which is admissible and
/// consistent on a 4-connected unit-cost grid. Superseded heap entries are skipped lazily
/// when popped.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarEngine;

impl AstarEngine {
    pub fn heuristic(&self, point: &Point, goal: &Point) -> usize {
        point.manhattan_distance(goal) as usize
    }
}

impl SearchEngine for AstarEngine {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Astar
    }

    fn search(
        &self,
        maze: &Maze,
        mut state: SearchState,
        recorder: &mut dyn EventRecorder,
    ) -> Result<SearchOutcome, RecordError> {
        emit_meta(maze, recorder)?;
        let (start, goal) = (maze.start(), maze.end());
        let mut to_see = BinaryHeap::new();
        state.set_root(start);
        to_see.push(SmallestCostHolder {
            estimated_cost: self.heuristic(&start, &goal),
            cost: 0,
            point: start,
        });
        recorder.emit(EventKind::FrontierAdd(Step::at(start, 0)))?;

        while let Some(SmallestCostHolder { cost, point, .. }) = to_see.pop() {
            recorder.emit(EventKind::SetCurrent(Step::at(point, cost)))?;
            if !maze.can_move_to(point) || state.is_visited(point) {
                continue;
            }
            // Superseded by a cheaper entry; unreachable while the heuristic stays consistent.
            if state.cost(point) != Some(cost) {
                continue;
            }
            state.set_visited(point, true);
            recorder.emit(EventKind::VisitedAdd(Step::at(point, cost)))?;
            if point == goal {
                state.best_distance = Some(cost);
                recorder.emit(EventKind::Found(Step::at(point, cost)))?;
                break;
            }
            for next in maze.passable_neighbours(point) {
                let new_cost = cost + 1;
                if state.relax(next, point, new_cost) {
                    to_see.push(SmallestCostHolder {
                        estimated_cost: new_cost + self.heuristic(&next, &goal),
                        cost: new_cost,
                        point: next,
                    });
                    recorder.emit(EventKind::Relax(Step::with_parent(next, new_cost, point)))?;
                }
            }
        }

        let path = match state.best_distance {
            Some(d) => {
                info!("A* found a path of length {d}");
                state.reverse_path(goal)
            }
            None => {
                if state.is_discovered(goal) {
                    warn!("A* discovered {goal} but never finalized it");
                } else {
                    info!("A* found no path to {goal}");
                }
                Vec::new()
            }
        };
        finish(Algorithm::Astar, state.best_distance, path, recorder)
    }
}
