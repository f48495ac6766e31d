//! CSV file reading that drives the push parser in fixed-size chunks
//!
//! The reader is a convenience adapter: it owns a byte source, reads it in
//! chunks, and feeds each chunk to a [`StreamingParser`] as one fragment.
//! Because the parser is chunk-boundary-safe, the chunk size has no effect
//! on the rows produced. Chunks are raw bytes, so a multi-byte UTF-8
//! sequence can split across two reads; the reader holds the incomplete
//! tail back until the rest arrives.

use crate::config::{HeaderMode, ParserConfig};
use crate::error::{CsvError, Result};
use crate::event::ParseEvent;
use crate::parser::StreamingParser;
use crate::record::RowRecord;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Length of the longest prefix of `bytes` that is complete UTF-8
///
/// An incomplete trailing sequence is excluded (to be retried with more
/// bytes); a byte sequence that can never become valid is an error.
pub(crate) fn valid_utf8_prefix(bytes: &[u8]) -> Result<usize> {
    match std::str::from_utf8(bytes) {
        Ok(_) => Ok(bytes.len()),
        Err(e) if e.error_len().is_none() => Ok(e.valid_up_to()),
        Err(e) => Err(CsvError::ReadError(format!("invalid UTF-8 in input: {}", e))),
    }
}

/// CSV file reader with streaming row records
///
/// Reads row by row using an iterator pattern; memory usage is constant
/// and low regardless of file size.
///
/// # Examples
///
/// ```no_run
/// use csvstream::{CsvReader, HeaderMode};
///
/// let mut reader = CsvReader::open("data.csv")
///     .unwrap()
///     .header_mode(HeaderMode::Capture);
///
/// for record in reader.rows() {
///     let record = record.unwrap();
///     println!("{:?}", record.values);
/// }
/// ```
pub struct CsvReader<R: Read> {
    reader: R,

    // Parser state
    config: ParserConfig,
    parser: StreamingParser,
    pending: VecDeque<ParseEvent>,
    headers: Vec<String>,

    // Chunked decode state
    chunk: Vec<u8>,
    carry: Vec<u8>,
    eof: bool,
    errored: bool,
}

impl CsvReader<BufReader<File>> {
    /// Open a CSV file for streaming read
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| CsvError::ReadError(format!("failed to open CSV file: {}", e)))?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: Read> CsvReader<R> {
    /// Wrap any byte source
    pub fn from_reader(reader: R) -> Self {
        let config = ParserConfig::default();
        CsvReader {
            reader,
            parser: StreamingParser::new(config.clone()),
            config,
            pending: VecDeque::new(),
            headers: Vec::new(),
            chunk: vec![0u8; DEFAULT_CHUNK_SIZE],
            carry: Vec::new(),
            eof: false,
            errored: false,
        }
    }

    /// Set a custom delimiter (builder pattern, before reading)
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.config = self.config.delimiter(delim);
        self.parser = StreamingParser::new(self.config.clone());
        self
    }

    /// Set a custom quote character (builder pattern, before reading)
    pub fn quote_char(mut self, quote: u8) -> Self {
        self.config = self.config.quote_char(quote);
        self.parser = StreamingParser::new(self.config.clone());
        self
    }

    /// Set the header mode (builder pattern, before reading)
    pub fn header_mode(mut self, mode: HeaderMode) -> Self {
        self.config = self.config.header_mode(mode);
        self.parser = StreamingParser::new(self.config.clone());
        self
    }

    /// Enable strict column enforcement (builder pattern, before reading)
    pub fn strict_columns(mut self, strict: bool) -> Self {
        self.config = self.config.strict_columns(strict);
        self.parser = StreamingParser::new(self.config.clone());
        self
    }

    /// Set the read chunk size in bytes (builder pattern, before reading)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk = vec![0u8; size.max(4)];
        self
    }

    /// Header row, once resolved
    ///
    /// Populated after the first row has been read in a header mode.
    pub fn headers(&self) -> Option<&[String]> {
        if self.headers.is_empty() {
            None
        } else {
            Some(&self.headers)
        }
    }

    /// Number of data rows read so far
    pub fn row_count(&self) -> u64 {
        self.parser.rows()
    }

    /// Read the next row record
    ///
    /// Returns `Ok(None)` at end of input. A parse error ends the stream;
    /// later calls return `Ok(None)`.
    pub fn read_row(&mut self) -> Result<Option<RowRecord>> {
        if self.errored {
            return Ok(None);
        }
        loop {
            while let Some(event) = self.pending.pop_front() {
                match event {
                    ParseEvent::Row(record) => return Ok(Some(record)),
                    ParseEvent::Headers { headers, .. } => self.headers = headers,
                    ParseEvent::Error { error, .. } => {
                        self.errored = true;
                        return Err(error);
                    }
                    ParseEvent::Progress { .. } | ParseEvent::End { .. } => {}
                }
            }
            if self.eof {
                return Ok(None);
            }
            self.fill()?;
        }
    }

    /// Get an iterator over row records
    pub fn rows(&mut self) -> RowRecordIterator<'_, R> {
        RowRecordIterator { reader: self }
    }

    /// Read one chunk from the source and feed it to the parser
    fn fill(&mut self) -> Result<()> {
        let n = self
            .reader
            .read(&mut self.chunk)
            .map_err(|e| CsvError::ReadError(format!("failed to read chunk: {}", e)))?;

        if n == 0 {
            if !self.carry.is_empty() {
                self.errored = true;
                return Err(CsvError::ReadError(
                    "input ended inside a UTF-8 sequence".to_string(),
                ));
            }
            self.eof = true;
            let events = self.parser.finish();
            self.pending.extend(events);
            return Ok(());
        }

        self.carry.extend_from_slice(&self.chunk[..n]);
        let valid_len = valid_utf8_prefix(&self.carry)?;
        let text = std::str::from_utf8(&self.carry[..valid_len])
            .map_err(|e| CsvError::ReadError(format!("invalid UTF-8 in input: {}", e)))?;
        let events = self.parser.feed(text);
        self.pending.extend(events);
        self.carry.drain(..valid_len);
        Ok(())
    }
}

/// Iterator over row records
pub struct RowRecordIterator<'a, R: Read> {
    reader: &'a mut CsvReader<R>,
}

impl<'a, R: Read> Iterator for RowRecordIterator<'a, R> {
    type Item = Result<RowRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_row() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
