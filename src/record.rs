//! Keyed row records and row materialization

use indexmap::IndexMap;

/// One materialized data row
///
/// `values` maps header names (or synthetic "1", "2", ... keys when no
/// headers are resolved) to field strings, preserving column order. Short
/// rows are padded with empty strings in the mapping; fields beyond the
/// header count are kept only in the ordered `fields` list.
///
/// Ownership transfers to whoever consumes the record; the parser keeps no
/// reference after emission.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RowRecord {
    /// Header name (or positional key) to field value, in column order
    pub values: IndexMap<String, String>,
    /// The un-mapped ordered field list, overflow fields included
    pub fields: Vec<String>,
    /// 1-based data row number (header and blank lines not counted)
    pub row: u64,
    /// 1-based logical line number
    pub line: u64,
    /// Raw line text as extracted by the scanner
    pub raw: String,
}

impl RowRecord {
    /// Look up a field value by header name or positional key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// Number of fields actually parsed from the line
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of keyed entries in the mapping
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the mapping has no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Outcome of materializing one field list into a record
pub(crate) enum Materialized {
    Row(RowRecord),
    /// Strict column enforcement rejected the row
    ColumnMismatch {
        expected: usize,
        actual: usize,
        raw: String,
    },
}

/// Combine parsed fields with the active header state into a keyed record
///
/// With headers resolved, `headers[i]` pairs with `fields[i]`; header indexes
/// past the field list map to empty strings. In strict mode, overflow fields
/// that are non-blank after trimming reject the row; purely blank overflow is
/// tolerated. Without headers, keys are "1".."K" for K fields.
pub(crate) fn materialize(
    headers: Option<&[String]>,
    fields: Vec<String>,
    raw: String,
    row: u64,
    line: u64,
    strict: bool,
) -> Materialized {
    let mut values;
    match headers {
        Some(headers) => {
            if strict && fields.len() > headers.len() {
                let overflow_nonblank = fields[headers.len()..]
                    .iter()
                    .any(|field| !field.trim().is_empty());
                if overflow_nonblank {
                    return Materialized::ColumnMismatch {
                        expected: headers.len(),
                        actual: fields.len(),
                        raw,
                    };
                }
            }
            values = IndexMap::with_capacity(headers.len());
            for (i, header) in headers.iter().enumerate() {
                values.insert(
                    header.clone(),
                    fields.get(i).cloned().unwrap_or_default(),
                );
            }
        }
        None => {
            values = IndexMap::with_capacity(fields.len());
            let mut key = itoa::Buffer::new();
            for (i, field) in fields.iter().enumerate() {
                values.insert(key.format(i as u64 + 1).to_string(), field.clone());
            }
        }
    }

    Materialized::Row(RowRecord {
        values,
        fields,
        row,
        line,
        raw,
    })
}
