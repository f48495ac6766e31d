//! Basic push-parsing examples
//!
//! Demonstrates the core StreamingParser API:
//! - Feeding fragments and collecting events
//! - Captured headers and keyed records
//! - Progress and end notifications

use csvstream::{HeaderMode, ParseEvent, ParserConfig, StreamingParser};

fn main() {
    println!("=== Basic Parsing Examples ===\n");

    // Example 1: parse a small document in one fragment
    println!("1. Single fragment with captured headers...");
    {
        let mut parser = StreamingParser::new(
            ParserConfig::new().header_mode(HeaderMode::Capture),
        );
        let mut events = parser.feed("name,age,city\nAlice,30,NYC\nBob,25,SF\n");
        events.extend(parser.finish());

        for event in &events {
            match event {
                ParseEvent::Headers { headers, .. } => {
                    println!("   Headers: {:?}", headers)
                }
                ParseEvent::Row(record) => {
                    println!(
                        "   Row {}: {} lives in {}",
                        record.row,
                        record.get("name").unwrap_or(""),
                        record.get("city").unwrap_or("")
                    );
                }
                ParseEvent::End { rows, lines } => {
                    println!("   Done: {} rows over {} lines", rows, lines)
                }
                _ => {}
            }
        }
    }

    // Example 2: quoted fields with embedded delimiters and newlines
    println!("\n2. Quoted fields...");
    {
        let mut parser = StreamingParser::new(ParserConfig::new());
        let mut events =
            parser.feed("\"Smith, John\",\"123 Main St\nApt 4\",\"said \"\"hi\"\"\"\n");
        events.extend(parser.finish());

        for event in &events {
            if let ParseEvent::Row(record) = event {
                for (key, value) in &record.values {
                    println!("   field {}: {:?}", key, value);
                }
            }
        }
    }

    // Example 3: progress notifications
    println!("\n3. Progress every 500 rows...");
    {
        let mut data = String::from("id,value\n");
        for i in 0..2000 {
            data.push_str(&format!("{},{}\n", i, i * 3));
        }

        let mut parser = StreamingParser::new(
            ParserConfig::new()
                .header_mode(HeaderMode::Capture)
                .progress_interval(500)
                .total_bytes(data.len() as u64),
        );
        let mut events = parser.feed(&data);
        events.extend(parser.finish());

        for event in &events {
            if let ParseEvent::Progress {
                bytes,
                total_bytes,
                row,
                ..
            } = event
            {
                println!(
                    "   progress: row {} ({} / {:?} bytes)",
                    row, bytes, total_bytes
                );
            }
        }
    }

    println!("\n=== All examples completed successfully! ===");
}
