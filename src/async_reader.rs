//! Async input adapter (requires the `async` feature)
//!
//! Drives a [`CsvStream`] from any `tokio::io::AsyncRead`, reading in
//! chunks and pushing each decoded chunk as one fragment. Row and event
//! handling is identical to the synchronous path; only the byte source is
//! asynchronous.

use crate::error::{CsvError, Result};
use crate::reader::valid_utf8_prefix;
use crate::stream::CsvStream;
use tokio::io::{AsyncRead, AsyncReadExt};

const CHUNK_SIZE: usize = 64 * 1024;

/// Read an async byte source to completion through a [`CsvStream`]
///
/// Fragments are pushed as they arrive and `end` is signalled when the
/// source is exhausted, so subscribers and the row sink observe the same
/// event sequence a synchronous delivery would produce.
///
/// # Examples
///
/// ```
/// use csvstream::{CsvStream, HeaderMode, ParserConfig};
/// use csvstream::async_reader::read_async;
///
/// # async fn example() -> csvstream::Result<()> {
/// let data = "id,name\n1,Alice\n";
/// let mut stream = CsvStream::new(ParserConfig::new().header_mode(HeaderMode::Capture));
/// stream.on_row(|record| println!("{:?}", record.values));
/// read_async(data.as_bytes(), &mut stream).await?;
/// # Ok(())
/// # }
/// ```
pub async fn read_async<R>(mut reader: R, stream: &mut CsvStream) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut carry: Vec<u8> = Vec::new();

    loop {
        let n = reader
            .read(&mut chunk)
            .await
            .map_err(|e| CsvError::ReadError(format!("failed to read chunk: {}", e)))?;
        if n == 0 {
            break;
        }

        carry.extend_from_slice(&chunk[..n]);
        let valid_len = valid_utf8_prefix(&carry)?;
        let text = std::str::from_utf8(&carry[..valid_len])
            .map_err(|e| CsvError::ReadError(format!("invalid UTF-8 in input: {}", e)))?;
        stream.push(text);
        carry.drain(..valid_len);
    }

    if !carry.is_empty() {
        return Err(CsvError::ReadError(
            "input ended inside a UTF-8 sequence".to_string(),
        ));
    }
    stream.end();
    Ok(())
}
