use std::path::Path;

use maze_search::events::{read_event_log, Event, EventKind, MemoryRecorder, Step};
use maze_search::loader::{load_maze, parse_maze};
use maze_search::run::run_all;
use maze_search::search::{path_is_valid, AstarEngine, BfsEngine, DfsEngine, SearchEngine};
use maze_search::{Algorithm, Maze, Point};

const SCANNED_MAZE: &str = "7 7
4 0 0 0 1 0 0
1 1 1 0 1 0 1
0 0 0 0 0 0 0
0 1 1 1 1 1 0
0 0 0 0 0 1 0
1 1 1 1 0 1 0
0 0 0 0 0 0 3
";

fn scanned_maze() -> Maze {
    parse_maze(SCANNED_MAZE).unwrap()
}

fn run_in_memory(algorithm: Algorithm, maze: &Maze) -> (maze_search::SearchOutcome, Vec<Event>) {
    let mut recorder = MemoryRecorder::new();
    let outcome = algorithm.run(maze, &mut recorder).unwrap();
    (outcome, recorder.into_events())
}

#[test]
fn all_algorithms_agree_on_scanned_maze() {
    let maze = scanned_maze();
    assert_eq!(maze.start(), Point::new(0, 0));
    assert_eq!(maze.end(), Point::new(6, 6));
    for algorithm in Algorithm::ALL {
        let (outcome, _) = run_in_memory(algorithm, &maze);
        assert_eq!(outcome.distance, Some(12), "{algorithm}");
        assert_eq!(outcome.path.len(), 13, "{algorithm}");
        assert_eq!(outcome.path.first(), Some(&Point::new(0, 0)));
        assert_eq!(outcome.path.last(), Some(&Point::new(6, 6)));
        assert!(path_is_valid(&maze, &outcome.path), "{algorithm}");
    }
}

#[test]
fn shipped_maze_file_matches_literal() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/ScannedMaze.txt");
    let maze = load_maze(path).unwrap();
    assert_eq!(maze.to_string(), scanned_maze().to_string());
}

#[test]
fn meta_event_describes_the_maze() {
    let maze = scanned_maze();
    let (_, events) = run_in_memory(Algorithm::Bfs, &maze);
    match events[0].kind {
        EventKind::Meta(meta) => {
            assert_eq!((meta.n, meta.m), (7, 7));
            assert_eq!((meta.sx, meta.sy, meta.ex, meta.ey), (0, 0, 6, 6));
        }
        other => panic!("first event is {other:?}"),
    }
    assert_eq!(events[0].t, 1);
}

#[test]
fn reruns_are_identical() {
    let maze = scanned_maze();
    for algorithm in Algorithm::ALL {
        let (first_outcome, first) = run_in_memory(algorithm, &maze);
        let (second_outcome, second) = run_in_memory(algorithm, &maze);
        assert_eq!(first, second);
        assert_eq!(first_outcome, second_outcome);
    }
}

#[test]
fn engines_do_not_share_state() {
    let maze = scanned_maze();
    let mut recorder = MemoryRecorder::new();
    let dfs = DfsEngine.run(&maze, &mut recorder).unwrap();
    let bfs = BfsEngine.run(&maze, &mut MemoryRecorder::new()).unwrap();
    let astar = AstarEngine.run(&maze, &mut MemoryRecorder::new()).unwrap();
    assert_eq!(dfs.distance, bfs.distance);
    assert_eq!(bfs.distance, astar.distance);
}

#[test]
fn blocked_maze_reports_no_path_everywhere() {
    let maze = parse_maze("3 3\n4 0 1\n0 1 0\n1 0 3\n").unwrap();
    assert!(!maze.end_reachable());
    for algorithm in Algorithm::ALL {
        let (outcome, events) = run_in_memory(algorithm, &maze);
        assert_eq!(outcome.distance, None);
        assert!(outcome.path.is_empty());
        assert_eq!(outcome.to_string(), "No path");
        assert_eq!(
            events.last().map(|e| e.kind),
            Some(EventKind::Done(Step::done(None)))
        );
        assert!(!events
            .iter()
            .any(|e| matches!(e.kind, EventKind::Found(_))));
    }
}

#[test]
fn dfs_only_events_stay_in_dfs() {
    let maze = scanned_maze();
    let (_, bfs) = run_in_memory(Algorithm::Bfs, &maze);
    let (_, astar) = run_in_memory(Algorithm::Astar, &maze);
    let (_, dfs) = run_in_memory(Algorithm::Dfs, &maze);
    let has = |events: &[Event], op: &str| events.iter().any(|e| e.kind.op() == op);
    assert!(has(&dfs, "path_push") && has(&dfs, "path_pop"));
    assert!(!has(&bfs, "path_push") && !has(&astar, "path_push"));
    assert!(has(&astar, "relax"));
    assert!(!has(&bfs, "relax") && !has(&dfs, "relax"));
}

#[test]
fn files_round_trip_through_run_all() {
    let dir = tempfile::tempdir().unwrap();
    let maze = scanned_maze();
    let report = run_all(&maze, dir.path()).unwrap();
    assert_eq!(
        report.summary_lines(),
        vec![
            "Shortest length(DFS) = 12",
            "Shortest length(BFS) = 12",
            "Shortest length(A*) = 12"
        ]
    );
    for algorithm in Algorithm::ALL {
        let from_file = read_event_log(dir.path().join(algorithm.log_file_name())).unwrap();
        let (_, in_memory) = run_in_memory(algorithm, &maze);
        assert_eq!(from_file, in_memory);
    }
}

#[test]
fn astar_finalizes_fewer_cells_than_bfs() {
    let maze = scanned_maze();
    let count = |events: &[Event]| {
        events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::VisitedAdd(_)))
            .count()
    };
    let (_, bfs) = run_in_memory(Algorithm::Bfs, &maze);
    let (_, astar) = run_in_memory(Algorithm::Astar, &maze);
    assert!(count(&astar) <= count(&bfs));
}
