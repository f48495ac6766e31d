//! CSV field tokenizing with RFC 4180-like behavior

use crate::error::{CsvError, Result};

/// Tokenizer for splitting one logical line into fields
///
/// A logical line has already had its terminator removed by the
/// [`LineScanner`](crate::LineScanner); it may still contain line-ending
/// characters inside quoted fields. Tokenizing is stateless across calls.
pub struct Tokenizer {
    delimiter: u8,
    quote_char: u8,
}

impl Tokenizer {
    /// Create a new tokenizer with custom delimiter and quote character
    pub fn new(delimiter: u8, quote_char: u8) -> Self {
        Self {
            delimiter,
            quote_char,
        }
    }

    /// Split a logical line into fields
    ///
    /// Returns [`CsvError::UnbalancedQuotes`] when a quoted field is still
    /// open at the end of the line; `line_number` is only used for that
    /// error's context.
    ///
    /// An empty line yields a single empty field, and two consecutive
    /// delimiters yield an empty field between them.
    pub fn tokenize(&self, line: &str, line_number: u64) -> Result<Vec<String>> {
        let mut fields = Vec::new();
        let mut current_field = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == self.quote_char as char {
                if in_quotes {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&(self.quote_char as char)) {
                        current_field.push(self.quote_char as char);
                        chars.next(); // Skip second quote
                    } else {
                        // End of quoted field
                        in_quotes = false;
                    }
                } else {
                    // Start of quoted field
                    in_quotes = true;
                }
            } else if ch == self.delimiter as char && !in_quotes {
                // Field separator
                fields.push(std::mem::take(&mut current_field));
            } else {
                // Regular character
                current_field.push(ch);
            }
        }

        if in_quotes {
            // The line was never actually complete
            return Err(CsvError::UnbalancedQuotes { line: line_number });
        }

        // Add last field
        fields.push(current_field);
        Ok(fields)
    }
}
