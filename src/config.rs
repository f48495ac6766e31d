//! Parser configuration and cancellation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// How the first meaningful line of input is interpreted
///
/// The four modes are mutually exclusive; the parser dispatches on the mode
/// once at construction and once when the first non-blank line arrives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Capture the first non-blank row as the header list
    Capture,
    /// Validate the first non-blank row against an expected header list;
    /// a mismatch is a terminal error
    Validate(Vec<String>),
    /// No header row; fields are keyed by 1-based position ("1", "2", ...)
    #[default]
    NumericKeys,
    /// No header row; the supplied list keys every row, including the first
    Fixed(Vec<String>),
}

/// Cooperative cancellation handle
///
/// Clone the token and hand one copy to [`ParserConfig::cancel_token`]; any
/// clone may cancel. The parser observes the flag at fragment and line
/// boundaries only, so in-flight single-line processing always completes.
///
/// # Examples
///
/// ```
/// use csvstream::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, un-cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the cancellation flag
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Configuration for a streaming CSV parser
///
/// Built with chained setters, then handed to
/// [`StreamingParser::new`](crate::StreamingParser::new) or
/// [`CsvStream::new`](crate::CsvStream::new).
///
/// # Examples
///
/// ```
/// use csvstream::{HeaderMode, ParserConfig};
///
/// let config = ParserConfig::new()
///     .delimiter(b';')
///     .header_mode(HeaderMode::Capture)
///     .strict_columns(true)
///     .progress_interval(500);
/// ```
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub(crate) delimiter: u8,
    pub(crate) quote_char: u8,
    pub(crate) header_mode: HeaderMode,
    pub(crate) strict_columns: bool,
    pub(crate) halt_on_column_mismatch: bool,
    pub(crate) progress_interval: u64,
    pub(crate) total_bytes: Option<u64>,
    pub(crate) cancel: Option<CancelToken>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            delimiter: b',',
            quote_char: b'"',
            header_mode: HeaderMode::default(),
            strict_columns: false,
            halt_on_column_mismatch: true,
            progress_interval: 1000,
            total_bytes: None,
            cancel: None,
        }
    }
}

impl ParserConfig {
    /// Create a configuration with defaults: comma delimiter, double-quote
    /// quoting, numeric keys, strict columns off, progress every 1000 rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter (single ASCII byte, default `b','`)
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }

    /// Set the quote character (single ASCII byte, default `b'"'`)
    pub fn quote_char(mut self, quote: u8) -> Self {
        self.quote_char = quote;
        self
    }

    /// Set how the first meaningful line is interpreted
    pub fn header_mode(mut self, mode: HeaderMode) -> Self {
        self.header_mode = mode;
        self
    }

    /// Reject rows whose field count exceeds the header count with non-blank
    /// overflow content (default off)
    pub fn strict_columns(mut self, strict: bool) -> Self {
        self.strict_columns = strict;
        self
    }

    /// Whether a strict-column violation halts the whole pipeline (default)
    /// or suppresses only the offending row
    pub fn halt_on_column_mismatch(mut self, halt: bool) -> Self {
        self.halt_on_column_mismatch = halt;
        self
    }

    /// Emit a progress event every `interval` rows; 0 disables (default 1000)
    pub fn progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Declare the total input size in bytes, reported back in progress
    /// events so consumers can compute a completion ratio
    pub fn total_bytes(mut self, total: u64) -> Self {
        self.total_bytes = Some(total);
        self
    }

    /// Attach a cancellation token
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
