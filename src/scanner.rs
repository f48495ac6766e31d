//! Chunk-boundary-safe logical line scanning
//!
//! This module splits an incrementally-delivered text stream into logical
//! CSV lines. Splitting is quote-aware: a line terminator inside a quoted
//! field does not end the line, so the scanner replays the same quote state
//! machine the tokenizer uses, carried across fragment boundaries. Fragment
//! boundaries themselves have no meaning - a closing quote, an escaped
//! quote, or the `\n` of a `\r\n` pair may arrive in a later fragment than
//! the text it completes.

/// Incremental scanner that assembles logical lines from text fragments
///
/// Any text not yet resolved into a complete line stays buffered; resolved
/// prefixes are drained so memory stays proportional to one pending line.
/// The scan cursor persists across calls, so each character is examined
/// exactly once regardless of how the input is fragmented.
pub struct LineScanner {
    quote_char: u8,

    // Pending text and scan state
    buffer: String,
    scan_pos: usize,
    in_quotes: bool,
}

impl LineScanner {
    /// Create a scanner with the given quote character
    pub fn new(quote_char: u8) -> Self {
        LineScanner {
            quote_char,
            buffer: String::with_capacity(1024),
            scan_pos: 0,
            in_quotes: false,
        }
    }

    /// Append a fragment and return the logical lines it completes
    ///
    /// Returned lines have their terminator removed, along with one trailing
    /// carriage return if present. A line may span many fragments, and one
    /// fragment may complete many lines.
    pub fn push(&mut self, fragment: &str) -> Vec<String> {
        self.buffer.push_str(fragment);
        self.scan()
    }

    /// Consume the final, possibly unterminated, logical line
    ///
    /// Returns `None` when the last fragment ended exactly on a line
    /// terminator. Quote balance is not judged here; the tokenizer reports
    /// unclosed quotes when it sees the line.
    pub fn finish(&mut self) -> Option<String> {
        self.scan_pos = 0;
        self.in_quotes = false;
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }

    /// True while text is buffered awaiting a terminator or more input
    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Scan newly-appended bytes for unquoted terminators
    ///
    /// Quote, terminator, and carriage-return are all ASCII, so byte-wise
    /// scanning never lands inside a multi-byte UTF-8 sequence.
    fn scan(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line_start = 0usize;
        let mut i = self.scan_pos;

        while i < self.buffer.len() {
            let b = self.buffer.as_bytes()[i];

            if b == self.quote_char {
                if self.in_quotes {
                    match self.buffer.as_bytes().get(i + 1) {
                        // Escaped quote ("") stays inside the field
                        Some(&next) if next == self.quote_char => {
                            i += 2;
                            continue;
                        }
                        Some(_) => {
                            self.in_quotes = false;
                            i += 1;
                            continue;
                        }
                        // Buffer ends on a quote: the escaped-quote decision
                        // needs the next fragment, so stop scanning here
                        None => break,
                    }
                } else {
                    self.in_quotes = true;
                    i += 1;
                    continue;
                }
            }

            if b == b'\n' && !self.in_quotes {
                let mut end = i;
                if end > line_start && self.buffer.as_bytes()[end - 1] == b'\r' {
                    end -= 1;
                }
                lines.push(self.buffer[line_start..end].to_string());
                line_start = i + 1;
            }

            i += 1;
        }

        // Drain the resolved prefix, keep the pending tail
        if line_start > 0 {
            self.buffer.drain(..line_start);
            i -= line_start;
        }
        self.scan_pos = i;

        lines
    }
}
