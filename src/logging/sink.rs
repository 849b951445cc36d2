//! Process-wide logging sink.
//!
//! # Responsibilities
//! - Own the configured format, minimum severity, and output stream
//! - Drop events below the minimum severity, write the rest as one line each
//! - Replace itself wholesale on reconfiguration, never accumulate outputs
//!
//! # Design Decisions
//! - The installed sink lives behind an arc-swap handle so reconfiguration
//!   is an atomic pointer swap, not a mutation
//! - A mutex around the writer gives line-granularity atomicity between
//!   concurrent request tasks
//! - A failed write is fatal to that single write only; it never reaches
//!   the request being logged

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;

use crate::logging::format::{self, LogFormat};
use crate::logging::record::{Level, Record};

struct Sink {
    min_level: Level,
    format: LogFormat,
    out: Mutex<Box<dyn Write + Send>>,
}

static SINK: ArcSwapOption<Sink> = ArcSwapOption::const_empty();

/// Install a sink, replacing any previously installed one.
pub(crate) fn install(min_level: Level, format: LogFormat, out: Box<dyn Write + Send>) {
    SINK.store(Some(Arc::new(Sink {
        min_level,
        format,
        out: Mutex::new(out),
    })));
}

/// Route a record through the installed sink. Before setup runs, falls back
/// to text format at INFO on stdout.
pub(crate) fn submit(record: &Record<'_>) {
    match SINK.load_full() {
        Some(sink) => {
            if record.level < sink.min_level {
                return;
            }
            let line = format::render(sink.format, record);
            if let Ok(mut out) = sink.out.lock() {
                let _ = writeln!(out, "{line}");
                let _ = out.flush();
            }
        }
        None => {
            if record.level < Level::Info {
                return;
            }
            let line = format::render(LogFormat::Text, record);
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{line}");
        }
    }
}

/// Buffer-backed writer for capturing sink output in tests.
#[derive(Debug, Clone, Default)]
pub struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl SharedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buffer| String::from_utf8_lossy(&buffer).into_owned())
            .unwrap_or_default()
    }

    /// Non-empty lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut buffer) = self.0.lock() {
            buffer.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
