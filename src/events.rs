//! The event protocol shared by all engines.
//!
//! Every search milestone becomes one [Event] carrying a per-log tick. Ticks start at 1 with
//! a `meta` event and grow by exactly one per emitted event; the order of a log is its only
//! timeline. Logs are written as JSON Lines, one object per event:
//!
//! ```text
//! {"t":1,"op":"meta","n":7,"m":7,"sx":0,"sy":0,"ex":6,"ey":6}
//! {"t":2,"op":"frontier_add","x":0,"y":0,"dist":0,"px":0,"py":0}
//! {"t":3,"op":"set_current","x":0,"y":0,"dist":0}
//! ```
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use grid_util::point::Point;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::maze::Maze;

/// Grid dimensions and endpoints, emitted once at the head of every log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Height (number of rows).
    pub n: usize,
    /// Width (number of columns).
    pub m: usize,
    pub sx: i32,
    pub sy: i32,
    pub ex: i32,
    pub ey: i32,
}

impl Meta {
    pub fn of(maze: &Maze) -> Meta {
        let (start, end) = (maze.start(), maze.end());
        Meta {
            n: maze.height(),
            m: maze.width(),
            sx: start.x,
            sy: start.y,
            ex: end.x,
            ey: end.y,
        }
    }
}

/// A cell-level milestone. `dist` is the search distance of the cell, not the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub x: i32,
    pub y: i32,
    pub dist: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub px: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub py: Option<i32>,
}

impl Step {
    pub fn at(pos: Point, dist: usize) -> Step {
        Step {
            x: pos.x,
            y: pos.y,
            dist: dist as i64,
            px: None,
            py: None,
        }
    }
    pub fn with_parent(pos: Point, dist: usize, parent: Point) -> Step {
        Step {
            px: Some(parent.x),
            py: Some(parent.y),
            ..Step::at(pos, dist)
        }
    }
    /// The terminal step: no cell, and the resolved distance or `-1` when unreachable.
    pub fn done(distance: Option<usize>) -> Step {
        Step {
            x: -1,
            y: -1,
            dist: distance.map_or(-1, |d| d as i64),
            px: None,
            py: None,
        }
    }
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
    pub fn parent(&self) -> Option<Point> {
        self.px.zip(self.py).map(|(x, y)| Point::new(x, y))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EventKind {
    Meta(Meta),
    /// A cell entered the to-visit set.
    FrontierAdd(Step),
    /// A cell is now being processed.
    SetCurrent(Step),
    /// A cell's exploration is finalized.
    VisitedAdd(Step),
    PathPush(Step),
    PathPop(Step),
    /// A cheaper cost was found for a cell; carries the relaxing parent.
    Relax(Step),
    Found(Step),
    Done(Step),
}

impl EventKind {
    pub fn op(&self) -> &'static str {
        match self {
            EventKind::Meta(_) => "meta",
            EventKind::FrontierAdd(_) => "frontier_add",
            EventKind::SetCurrent(_) => "set_current",
            EventKind::VisitedAdd(_) => "visited_add",
            EventKind::PathPush(_) => "path_push",
            EventKind::PathPop(_) => "path_pop",
            EventKind::Relax(_) => "relax",
            EventKind::Found(_) => "found",
            EventKind::Done(_) => "done",
        }
    }
    pub fn step(&self) -> Option<&Step> {
        match self {
            EventKind::Meta(_) => None,
            EventKind::FrontierAdd(s)
            | EventKind::SetCurrent(s)
            | EventKind::VisitedAdd(s)
            | EventKind::PathPush(s)
            | EventKind::PathPop(s)
            | EventKind::Relax(s)
            | EventKind::Found(s)
            | EventKind::Done(s) => Some(s),
        }
    }
}

/// One immutable entry of an event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub t: u64,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Hands out strictly increasing ticks starting at 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickCounter {
    last: u64,
}

impl TickCounter {
    pub fn next_tick(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
    /// The most recently issued tick, 0 before the first event.
    pub fn last(&self) -> u64 {
        self.last
    }
}

/// Append-only sink for the events of a single engine run.
pub trait EventRecorder {
    /// Appends an event and returns the tick assigned to it.
    fn emit(&mut self, kind: EventKind) -> Result<u64, RecordError>;
    /// Flushes and closes the log. Further emits fail with [RecordError::Closed].
    fn close(&mut self) -> Result<(), RecordError>;
    /// Number of events emitted so far.
    fn ticks(&self) -> u64;
}

/// Writes events as JSON Lines to any [Write].
pub struct JsonLinesRecorder<W: Write> {
    out: W,
    ticks: TickCounter,
    closed: bool,
}

impl JsonLinesRecorder<BufWriter<File>> {
    /// Creates (or truncates) the log file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        Ok(JsonLinesRecorder::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonLinesRecorder<W> {
    pub fn new(out: W) -> Self {
        JsonLinesRecorder {
            out,
            ticks: TickCounter::default(),
            closed: false,
        }
    }
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventRecorder for JsonLinesRecorder<W> {
    fn emit(&mut self, kind: EventKind) -> Result<u64, RecordError> {
        if self.closed {
            return Err(RecordError::Closed);
        }
        let event = Event {
            t: self.ticks.next_tick(),
            kind,
        };
        serde_json::to_writer(&mut self.out, &event).map_err(std::io::Error::from)?;
        self.out.write_all(b"\n")?;
        Ok(event.t)
    }
    fn close(&mut self) -> Result<(), RecordError> {
        if !self.closed {
            self.closed = true;
            self.out.flush()?;
        }
        Ok(())
    }
    fn ticks(&self) -> u64 {
        self.ticks.last()
    }
}

/// Keeps events in memory. Used for verification and benchmarking.
#[derive(Clone, Debug, Default)]
pub struct MemoryRecorder {
    events: Vec<Event>,
    ticks: TickCounter,
    closed: bool,
}

impl MemoryRecorder {
    pub fn new() -> MemoryRecorder {
        MemoryRecorder::default()
    }
    pub fn events(&self) -> &[Event] {
        &self.events
    }
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl EventRecorder for MemoryRecorder {
    fn emit(&mut self, kind: EventKind) -> Result<u64, RecordError> {
        if self.closed {
            return Err(RecordError::Closed);
        }
        let t = self.ticks.next_tick();
        self.events.push(Event { t, kind });
        Ok(t)
    }
    fn close(&mut self) -> Result<(), RecordError> {
        self.closed = true;
        Ok(())
    }
    fn ticks(&self) -> u64 {
        self.ticks.last()
    }
}

/// Parses a JSON Lines event log. Blank lines are skipped.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<Event>, RecordError> {
    let mut events = Vec::new();
    for (ix, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|source| RecordError::Json {
            line: ix + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

pub fn read_event_log<P: AsRef<Path>>(path: P) -> Result<Vec<Event>, RecordError> {
    read_events(BufReader::new(File::open(path)?))
}
