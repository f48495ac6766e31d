//! Async input example (requires the `async` feature)
//!
//! Drives a CsvStream from an async byte source; rows arrive through the
//! same sink interface as the synchronous path.

use csvstream::async_reader::read_async;
use csvstream::{CsvStream, HeaderMode, ParseEvent, ParserConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> csvstream::Result<()> {
    println!("=== Async Parsing Example ===\n");

    let input = "id,name\n1,Alice\n2,\"Bo\nb\"\n3,Carol\n";

    let mut stream = CsvStream::new(
        ParserConfig::new().header_mode(HeaderMode::Capture),
    );
    stream.subscribe(|event| {
        if let ParseEvent::End { rows, lines } = event {
            println!("   end: {} rows over {} lines", rows, lines);
        }
    });
    stream.on_row(|record| {
        println!(
            "   row {}: {}",
            record.row,
            record.get("name").unwrap_or("")
        );
    });

    read_async(input.as_bytes(), &mut stream).await?;

    println!("\n=== Done! ===");
    Ok(())
}
