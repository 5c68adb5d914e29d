use std::collections::VecDeque;

use grid_util::point::Point;
use log::info;

use super::{emit_meta, finish, Algorithm, SearchEngine, SearchOutcome};
use crate::error::RecordError;
use crate::events::{EventKind, EventRecorder, Step};
use crate::maze::Maze;
use crate::state::SearchState;

/// Frontier-queue search. With unit edge weights the first time the end is dequeued its
/// distance is the shortest one.
///
/// Two marks are kept apart: a cell is *discovered* when it enters the queue (this
/// de-duplicates the frontier) and *visited* once it has been dequeued.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsEngine;

impl SearchEngine for BfsEngine {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn search(
        &self,
        maze: &Maze,
        mut state: SearchState,
        recorder: &mut dyn EventRecorder,
    ) -> Result<SearchOutcome, RecordError> {
        emit_meta(maze, recorder)?;
        let start = maze.start();
        let mut frontier: VecDeque<(Point, usize)> = VecDeque::new();
        frontier.push_back((start, 0));
        state.set_root(start);
        recorder.emit(EventKind::FrontierAdd(Step::with_parent(start, 0, start)))?;

        while let Some((current, dist)) = frontier.pop_front() {
            let step = Step::at(current, dist);
            recorder.emit(EventKind::SetCurrent(step))?;
            recorder.emit(EventKind::VisitedAdd(step))?;
            if current == maze.end() {
                state.best_distance = Some(dist);
                recorder.emit(EventKind::Found(step))?;
                break;
            }
            state.set_visited(current, true);
            for next in maze.passable_neighbours(current) {
                if state.is_discovered(next) {
                    continue;
                }
                state.relax(next, current, dist + 1);
                frontier.push_back((next, dist + 1));
                recorder.emit(EventKind::FrontierAdd(Step::with_parent(
                    next,
                    dist + 1,
                    current,
                )))?;
            }
        }

        let path = match state.best_distance {
            Some(d) => {
                info!("BFS found a path of length {d}, {} cells visited", state.visited_count());
                state.reverse_path(maze.end())
            }
            None => {
                info!("BFS exhausted the frontier without reaching {}", maze.end());
                Vec::new()
            }
        };
        finish(Algorithm::Bfs, state.best_distance, path, recorder)
    }
}
