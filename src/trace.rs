//! Optional diagnostic record of a search.
//!
//! A traced run emits one [`TraceEvent::Start`], one [`TraceEvent::Pop`] per
//! node popped from the fringe, and one [`TraceEvent::Finish`], whether or not
//! the goal was reached. Tracing only observes; it never changes which nodes
//! are popped or what the search returns.
use crate::engine::Board;
use crate::error::{Error, Result};
use crate::fringe::FringeEntry;
use crate::solver::{SearchStats, Strategy};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// State of the search right after a node was popped and closed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceRecord {
    pub popped: FringeEntry,
    /// Depth limit of the current iteration, for depth-bounded strategies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_limit: Option<u32>,
    /// Remaining fringe, in pop order.
    pub fringe: Vec<FringeEntry>,
    /// Closed boards, in the order they were closed.
    pub closed: Vec<Board>,
    pub stats: SearchStats,
}

/// How a traced run ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceSummary {
    pub solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
    pub stats: SearchStats,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Start {
        strategy: Strategy,
        start: Board,
        goal: Board,
    },
    Pop(TraceRecord),
    Finish(TraceSummary),
}

/// Destination for trace events.
pub trait TraceSink {
    fn emit(&mut self, event: &TraceEvent) -> Result<()>;
}

/// Writes each event as one line of JSON and flushes after every line, so a
/// trace is complete up to the last event even if the process dies mid-search.
#[derive(Debug)]
pub struct JsonLinesTrace<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesTrace<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesTrace { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesTrace<BufWriter<File>> {
    /// Creates (or truncates) the trace file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create trace file {}", path.display()),
            source,
        })?;
        Ok(JsonLinesTrace::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceSink for JsonLinesTrace<W> {
    fn emit(&mut self, event: &TraceEvent) -> Result<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');
        self.writer
            .write_all(&line)
            .and_then(|()| self.writer.flush())
            .map_err(|source| Error::Io {
                operation: "write trace event".to_string(),
                source,
            })
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemoryTrace {
    pub events: Vec<TraceEvent>,
}

impl MemoryTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// The per-pop records, in order.
    pub fn records(&self) -> impl Iterator<Item = &TraceRecord> {
        self.events.iter().filter_map(|event| match event {
            TraceEvent::Pop(record) => Some(record),
            _ => None,
        })
    }
}

impl TraceSink for MemoryTrace {
    fn emit(&mut self, event: &TraceEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// The optional sink a driver reports to.
///
/// Events are built lazily, so an untraced search never pays for snapshots.
pub(crate) struct Tracer<'a> {
    sink: Option<&'a mut dyn TraceSink>,
}

impl<'a> Tracer<'a> {
    pub(crate) fn new(sink: Option<&'a mut dyn TraceSink>) -> Self {
        Tracer { sink }
    }

    pub(crate) fn emit_with(&mut self, event: impl FnOnce() -> TraceEvent) -> Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.emit(&event()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> TraceEvent {
        TraceEvent::Finish(TraceSummary {
            solved: false,
            depth: None,
            cost: None,
            stats: SearchStats::default(),
        })
    }

    #[test]
    fn test_json_lines_one_event_per_line() {
        let mut trace = JsonLinesTrace::new(Vec::new());
        trace.emit(&summary()).unwrap();
        trace.emit(&summary()).unwrap();
        let text = String::from_utf8(trace.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["event"], "finish");
        assert_eq!(value["solved"], false);
        assert_eq!(value["stats"]["nodes_popped"], 0);
        assert!(value.get("cost").is_none());
    }

    /// A writer whose every write fails.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_lines_write_failure_names_operation() {
        let mut trace = JsonLinesTrace::new(ClosedPipe);
        match trace.emit(&summary()) {
            Err(Error::Io { operation, source }) => {
                assert_eq!(operation, "write trace event");
                assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe);
            }
            other => panic!("expected an io error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_reports_missing_directory() {
        let path = Path::new("/nonexistent-trace-dir/trace.jsonl");
        match JsonLinesTrace::create(path) {
            Err(Error::Io { operation, .. }) => {
                assert!(operation.starts_with("create trace file"));
            }
            other => panic!("expected an io error, got {other:?}"),
        }
    }

    #[test]
    fn test_start_event_names_strategy() {
        let board = Board::from_grid([[1, 2, 3], [4, 0, 5], [6, 7, 8]]).unwrap();
        let event = TraceEvent::Start {
            strategy: Strategy::AStar,
            start: board,
            goal: board,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "start");
        assert_eq!(value["strategy"], "a-star");
        assert_eq!(value["start"][1][1], 0);
    }

    #[test]
    fn test_untraced_emit_skips_event_construction() {
        let mut tracer = Tracer::new(None);
        let mut built = false;
        tracer
            .emit_with(|| {
                built = true;
                summary()
            })
            .unwrap();
        assert!(!built);
    }

    #[test]
    fn test_memory_trace_filters_records() {
        let mut memory = MemoryTrace::new();
        let mut tracer = Tracer::new(Some(&mut memory));
        tracer.emit_with(summary).unwrap();
        assert_eq!(memory.events.len(), 1);
        assert_eq!(memory.records().count(), 0);
    }
}
