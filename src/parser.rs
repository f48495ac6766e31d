//! Push-driven streaming CSV parser
//!
//! This module provides the core incremental parser. Text fragments go in
//! through [`StreamingParser::feed`], complete logical lines are assembled by
//! the [`LineScanner`](crate::LineScanner), tokenized, run through header
//! resolution, and materialized into [`RowRecord`](crate::RowRecord)s.
//! Fragment boundaries carry no meaning: a quoted field, an escaped quote,
//! or a `\r\n` pair may split anywhere.
//!
//! The parser never buffers more than one pending logical line, so memory
//! usage is constant regardless of input size.
//!
//! # Basic Usage
//!
//! ```
//! use csvstream::{HeaderMode, ParseEvent, ParserConfig, StreamingParser};
//!
//! let config = ParserConfig::new().header_mode(HeaderMode::Capture);
//! let mut parser = StreamingParser::new(config);
//!
//! let mut events = parser.feed("name,age\nAli");
//! events.extend(parser.feed("ce,30\n"));
//! events.extend(parser.finish());
//!
//! for event in &events {
//!     match event {
//!         ParseEvent::Headers { headers, .. } => println!("headers: {:?}", headers),
//!         ParseEvent::Row(record) => println!("row: {:?}", record.values),
//!         ParseEvent::End { rows, lines } => println!("{} rows, {} lines", rows, lines),
//!         _ => {}
//!     }
//! }
//! ```

use crate::config::{HeaderMode, ParserConfig};
use crate::error::CsvError;
use crate::event::ParseEvent;
use crate::header::{FirstLine, HeaderResolver};
use crate::record::{materialize, Materialized};
use crate::scanner::LineScanner;
use crate::tokenizer::Tokenizer;

/// Incremental CSV parser with a push interface
///
/// One instance owns all scanning state; instances are fully independent.
/// Fragments are processed to completion synchronously, and events are
/// returned strictly in line order.
pub struct StreamingParser {
    config: ParserConfig,
    tokenizer: Tokenizer,
    scanner: LineScanner,
    resolver: HeaderResolver,

    // Counters
    lines: u64,
    rows: u64,
    bytes: u64,
    last_progress_row: u64,

    // Lifecycle flags
    halted: bool,
    finished: bool,
    fixed_headers_pending: bool,
}

impl StreamingParser {
    /// Create a parser from a configuration
    pub fn new(config: ParserConfig) -> Self {
        let tokenizer = Tokenizer::new(config.delimiter, config.quote_char);
        let scanner = LineScanner::new(config.quote_char);
        let resolver = HeaderResolver::new(config.header_mode.clone());
        let fixed_headers_pending = matches!(config.header_mode, HeaderMode::Fixed(_));
        StreamingParser {
            config,
            tokenizer,
            scanner,
            resolver,
            lines: 0,
            rows: 0,
            bytes: 0,
            last_progress_row: 0,
            halted: false,
            finished: false,
            fixed_headers_pending,
        }
    }

    /// Consume one fragment and return the events it produced
    ///
    /// Returns an empty vector after a terminal error, after `finish`, or
    /// once cancellation has been requested.
    pub fn feed(&mut self, fragment: &str) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        if self.halted || self.finished || self.is_cancelled() {
            return events;
        }
        self.announce_fixed_headers(&mut events);

        self.bytes += fragment.len() as u64;
        for line in self.scanner.push(fragment) {
            if self.halted || self.is_cancelled() {
                break;
            }
            self.process_line(line, &mut events);
        }
        events
    }

    /// Signal end-of-input: flush the final partial line and emit `End`
    ///
    /// Idempotent; later calls return nothing. `End` is suppressed after a
    /// terminal error or cancellation.
    pub fn finish(&mut self) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }
        self.finished = true;
        if self.halted || self.is_cancelled() {
            return events;
        }
        self.announce_fixed_headers(&mut events);

        if let Some(line) = self.scanner.finish() {
            self.process_line(line, &mut events);
        }
        if !self.halted && !self.is_cancelled() {
            events.push(ParseEvent::End {
                rows: self.rows,
                lines: self.lines,
            });
        }
        events
    }

    /// Logical lines seen so far, blank and header lines included
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Data rows materialized so far
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Cumulative UTF-8 bytes consumed
    pub fn bytes_seen(&self) -> u64 {
        self.bytes
    }

    /// The resolved header list, if any
    pub fn headers(&self) -> Option<&[String]> {
        self.resolver.headers()
    }

    /// True once a terminal error has halted the pipeline
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    fn is_cancelled(&self) -> bool {
        self.config
            .cancel
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }

    /// Fixed headers resolve at construction; announce them once, before any
    /// line is processed, with line number 0
    fn announce_fixed_headers(&mut self, events: &mut Vec<ParseEvent>) {
        if self.fixed_headers_pending {
            self.fixed_headers_pending = false;
            if let Some(headers) = self.resolver.headers() {
                events.push(ParseEvent::Headers {
                    headers: headers.to_vec(),
                    line: 0,
                });
            }
        }
    }

    /// Run one logical line through the pipeline:
    /// count -> blank skip -> tokenize -> header resolution -> materialize
    fn process_line(&mut self, line: String, events: &mut Vec<ParseEvent>) {
        self.lines += 1;

        if line.trim().is_empty() {
            return;
        }

        let fields = match self.tokenizer.tokenize(&line, self.lines) {
            Ok(fields) => fields,
            Err(error) => {
                self.halted = true;
                events.push(ParseEvent::Error {
                    error,
                    raw: Some(line),
                });
                return;
            }
        };

        if !self.resolver.is_resolved() {
            match self.resolver.first_line(&fields) {
                FirstLine::Headers(headers) => {
                    events.push(ParseEvent::Headers {
                        headers,
                        line: self.lines,
                    });
                    return;
                }
                FirstLine::Mismatch { expected, actual } => {
                    self.halted = true;
                    events.push(ParseEvent::Error {
                        error: CsvError::HeaderMismatch { expected, actual },
                        raw: Some(line),
                    });
                    return;
                }
                FirstLine::Data => {}
            }
        }

        match materialize(
            self.resolver.headers(),
            fields,
            line,
            self.rows + 1,
            self.lines,
            self.config.strict_columns,
        ) {
            Materialized::Row(record) => {
                self.rows += 1;
                events.push(ParseEvent::Row(record));
                self.maybe_progress(events);
            }
            Materialized::ColumnMismatch {
                expected,
                actual,
                raw,
            } => {
                let error = CsvError::ColumnCount {
                    row: self.rows + 1,
                    line: self.lines,
                    expected,
                    actual,
                };
                if self.config.halt_on_column_mismatch {
                    self.halted = true;
                }
                events.push(ParseEvent::Error {
                    error,
                    raw: Some(raw),
                });
            }
        }
    }

    fn maybe_progress(&mut self, events: &mut Vec<ParseEvent>) {
        let interval = self.config.progress_interval;
        if interval > 0 && self.rows - self.last_progress_row >= interval {
            self.last_progress_row = self.rows;
            events.push(ParseEvent::Progress {
                bytes: self.bytes,
                total_bytes: self.config.total_bytes,
                line: self.lines,
                row: self.rows,
            });
        }
    }
}
