//! # csvstream
//!
//! Incremental streaming CSV parser with constant memory usage.
//!
//! Text arrives as arbitrarily-sized fragments - from a network response, a
//! file read in chunks, or any other source - and rows come out as keyed
//! records. Fragment boundaries carry no meaning: a quoted field, an escaped
//! quote, or a `\r\n` pair may split anywhere and the output is identical to
//! a single-fragment delivery.
//!
//! **Features:**
//! - Quote-aware, chunk-boundary-safe line splitting (embedded newlines in
//!   quoted fields never break a row)
//! - Four header modes: capture, validate against an expected list, numeric
//!   positional keys, or a fixed caller-supplied list
//! - Keyed row records with column order preserved
//! - Structured events: headers, row, error, progress, end
//! - Strict column enforcement with a configurable halt policy
//! - Cooperative cancellation at fragment/line boundaries
//!
//! # Push parsing
//!
//! ```
//! use csvstream::{HeaderMode, ParseEvent, ParserConfig, StreamingParser};
//!
//! let mut parser = StreamingParser::new(
//!     ParserConfig::new().header_mode(HeaderMode::Capture),
//! );
//!
//! // Fragments may split anywhere, even inside a quoted field
//! let mut events = parser.feed("name,ci");
//! events.extend(parser.feed("ty\nAlice,\"Pa"));
//! events.extend(parser.feed("ris\"\n"));
//! events.extend(parser.finish());
//!
//! let rows: Vec<_> = events
//!     .iter()
//!     .filter_map(|event| match event {
//!         ParseEvent::Row(record) => Some(record),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(rows[0].get("city"), Some("Paris"));
//! ```
//!
//! # Reading files
//!
//! ```no_run
//! use csvstream::{CsvReader, HeaderMode};
//!
//! let mut reader = CsvReader::open("data.csv")
//!     .unwrap()
//!     .header_mode(HeaderMode::Capture);
//!
//! for record in reader.rows() {
//!     let record = record.unwrap();
//!     println!("{:?}", record.values);
//! }
//! ```
//!
//! # Subscriptions and sinks
//!
//! ```
//! use csvstream::{CsvStream, ParseEvent, ParserConfig};
//!
//! let mut stream = CsvStream::new(ParserConfig::new());
//! stream.subscribe(|event| {
//!     if let ParseEvent::End { rows, lines } = event {
//!         println!("done: {} rows over {} lines", rows, lines);
//!     }
//! });
//! stream.on_row(|record| println!("{:?}", record.fields));
//!
//! stream.push("a,b\nc,d\n");
//! stream.end();
//! ```

pub mod config;
pub mod error;
pub mod event;
mod header;
pub mod parser;
pub mod reader;
pub mod record;
pub mod scanner;
pub mod stream;
pub mod tokenizer;

#[cfg(feature = "async")]
pub mod async_reader;

pub use config::{CancelToken, HeaderMode, ParserConfig};
pub use error::{CsvError, Result};
pub use event::ParseEvent;
pub use parser::StreamingParser;
pub use reader::CsvReader;
pub use record::RowRecord;
pub use scanner::LineScanner;
pub use stream::CsvStream;
pub use tokenizer::Tokenizer;
