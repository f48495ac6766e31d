//! Header resolution for the first meaningful line of input

use crate::config::HeaderMode;

/// Resolution state: transitions out of `Unresolved` exactly once
enum HeaderState {
    Unresolved,
    Resolved(Vec<String>),
    Errored,
}

/// What the first non-blank line turned out to be
pub(crate) enum FirstLine {
    /// A header row; carries the resolved list (no data row is produced)
    Headers(Vec<String>),
    /// A header row that failed validation
    Mismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    /// Ordinary data
    Data,
}

/// Normalize header names: trim surrounding whitespace on every field, and
/// strip a single leading byte-order-mark codepoint from the first field only
pub(crate) fn normalize_headers(fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let field = if i == 0 {
                field.strip_prefix('\u{feff}').unwrap_or(field)
            } else {
                field.as_str()
            };
            field.trim().to_string()
        })
        .collect()
}

/// Header resolution state machine
///
/// `Fixed` headers resolve at construction; `Capture` and `Validate` resolve
/// on the first non-blank line; `NumericKeys` never resolves and every line
/// is data.
pub(crate) struct HeaderResolver {
    mode: HeaderMode,
    state: HeaderState,
}

impl HeaderResolver {
    pub fn new(mode: HeaderMode) -> Self {
        let state = match &mode {
            HeaderMode::Fixed(list) => HeaderState::Resolved(normalize_headers(list)),
            _ => HeaderState::Unresolved,
        };
        HeaderResolver { mode, state }
    }

    /// The resolved header list, if any
    pub fn headers(&self) -> Option<&[String]> {
        match &self.state {
            HeaderState::Resolved(headers) => Some(headers),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, HeaderState::Resolved(_))
    }

    /// Classify the first non-blank line and transition the state machine
    ///
    /// Must only be called while unresolved; once resolved the caller treats
    /// every line as data without consulting this again.
    pub fn first_line(&mut self, fields: &[String]) -> FirstLine {
        match &self.mode {
            HeaderMode::Capture => {
                let headers = normalize_headers(fields);
                self.state = HeaderState::Resolved(headers.clone());
                FirstLine::Headers(headers)
            }
            HeaderMode::Validate(expected) => {
                let expected = normalize_headers(expected);
                let actual = normalize_headers(fields);
                // Count mismatch wins before any content comparison
                if expected.len() != actual.len() || expected != actual {
                    self.state = HeaderState::Errored;
                    FirstLine::Mismatch { expected, actual }
                } else {
                    self.state = HeaderState::Resolved(expected.clone());
                    FirstLine::Headers(expected)
                }
            }
            HeaderMode::NumericKeys | HeaderMode::Fixed(_) => FirstLine::Data,
        }
    }
}
