//! Subscription and row-sink layer over the push parser
//!
//! [`CsvStream`] wraps a [`StreamingParser`] and fans its events out to any
//! number of subscribers, forwards materialized rows to a downstream sink,
//! and runs an optional per-row validation callback. The stream itself stays
//! push-driven: the host delivers fragments with [`CsvStream::push`] and
//! signals end-of-input with [`CsvStream::end`].
//!
//! # Examples
//!
//! ```
//! use csvstream::{CsvStream, HeaderMode, ParseEvent, ParserConfig};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let config = ParserConfig::new().header_mode(HeaderMode::Capture);
//! let mut stream = CsvStream::new(config);
//!
//! let names = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&names);
//! stream.on_row(move |record| {
//!     sink.borrow_mut()
//!         .push(record.get("name").unwrap_or("").to_string());
//! });
//!
//! stream.push("name,age\nAlice,30\nBob,25");
//! stream.end();
//!
//! assert_eq!(*names.borrow(), vec!["Alice", "Bob"]);
//! ```

use crate::config::ParserConfig;
use crate::event::ParseEvent;
use crate::parser::StreamingParser;
use crate::record::RowRecord;

type Subscriber = Box<dyn FnMut(&ParseEvent)>;
type RowSink = Box<dyn FnMut(RowRecord)>;
type Validator = Box<dyn Fn(&RowRecord) -> Vec<String>>;

/// Push-driven CSV stream with subscribers, a row sink, and row validation
///
/// Subscribers observe every event by reference, in registration order; the
/// row sink receives each [`RowRecord`] by value after all subscribers have
/// seen its event. Validation errors are only counted, never interpreted.
pub struct CsvStream {
    parser: StreamingParser,
    subscribers: Vec<Subscriber>,
    sink: Option<RowSink>,
    validator: Option<Validator>,
    validation_errors: u64,
}

impl CsvStream {
    /// Create a stream from a parser configuration
    pub fn new(config: ParserConfig) -> Self {
        CsvStream {
            parser: StreamingParser::new(config),
            subscribers: Vec::new(),
            sink: None,
            validator: None,
            validation_errors: 0,
        }
    }

    /// Attach a subscriber observing every event
    ///
    /// Multiple subscribers may attach; each sees events in pipeline order.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&ParseEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Set the downstream row sink; records are moved into it
    pub fn on_row(&mut self, sink: impl FnMut(RowRecord) + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Set the per-row validation callback
    ///
    /// The callback returns a list of error strings for each row; the stream
    /// counts them and exposes the total via [`validation_errors`].
    ///
    /// [`validation_errors`]: CsvStream::validation_errors
    pub fn set_validator(&mut self, validator: impl Fn(&RowRecord) -> Vec<String> + 'static) {
        self.validator = Some(Box::new(validator));
    }

    /// Deliver one fragment
    pub fn push(&mut self, fragment: &str) {
        let events = self.parser.feed(fragment);
        self.dispatch(events);
    }

    /// Signal end-of-input
    pub fn end(&mut self) {
        let events = self.parser.finish();
        self.dispatch(events);
    }

    /// Total validation error strings returned by the callback so far
    pub fn validation_errors(&self) -> u64 {
        self.validation_errors
    }

    /// Data rows emitted so far
    pub fn rows(&self) -> u64 {
        self.parser.rows()
    }

    /// Logical lines seen so far
    pub fn lines(&self) -> u64 {
        self.parser.lines()
    }

    /// The resolved header list, if any
    pub fn headers(&self) -> Option<&[String]> {
        self.parser.headers()
    }

    /// True once a terminal error has halted the pipeline
    pub fn is_halted(&self) -> bool {
        self.parser.is_halted()
    }

    fn dispatch(&mut self, events: Vec<ParseEvent>) {
        for event in events {
            for subscriber in &mut self.subscribers {
                subscriber(&event);
            }
            if let ParseEvent::Row(record) = event {
                if let Some(validator) = &self.validator {
                    self.validation_errors += validator(&record).len() as u64;
                }
                if let Some(sink) = &mut self.sink {
                    sink(record);
                }
            }
        }
    }
}
