//! Chunk-boundary safety examples
//!
//! Feeds the same document in wildly different fragmentations and shows the
//! output never changes: fragments may split inside quoted fields, inside
//! escaped quotes, even between the \r and \n of a line ending.

use csvstream::{HeaderMode, ParseEvent, ParserConfig, StreamingParser};

fn parse_fragments(fragments: &[&str]) -> Vec<String> {
    let mut parser = StreamingParser::new(
        ParserConfig::new().header_mode(HeaderMode::Capture),
    );
    let mut names = Vec::new();
    for fragment in fragments {
        for event in parser.feed(fragment) {
            if let ParseEvent::Row(record) = event {
                names.push(record.get("name").unwrap_or("").to_string());
            }
        }
    }
    for event in parser.finish() {
        if let ParseEvent::Row(record) = event {
            names.push(record.get("name").unwrap_or("").to_string());
        }
    }
    names
}

fn main() {
    println!("=== Chunked Parsing Examples ===\n");

    let input = "id,name\r\n1,\"Al\nice\"\r\n2,Bob\r\n";

    // Example 1: whole document at once
    println!("1. Single fragment...");
    let whole = parse_fragments(&[input]);
    println!("   names: {:?}", whole);

    // Example 2: split mid-field
    println!("\n2. Split mid-field...");
    let mid_field = parse_fragments(&["id,na", "me\r\n1,\"Al\nice\"\r\n2,Bob\r\n"]);
    println!("   names: {:?}", mid_field);
    assert_eq!(whole, mid_field);

    // Example 3: split between \r and \n, and inside the quoted newline
    println!("\n3. Split inside the line ending and the quoted field...");
    let nasty = parse_fragments(&["id,name\r", "\n1,\"Al", "\nice\"\r\n2,B", "ob\r\n"]);
    println!("   names: {:?}", nasty);
    assert_eq!(whole, nasty);

    // Example 4: one character at a time
    println!("\n4. One character per fragment...");
    let chars: Vec<String> = input.chars().map(|c| c.to_string()).collect();
    let refs: Vec<&str> = chars.iter().map(|s| s.as_str()).collect();
    let trickle = parse_fragments(&refs);
    println!("   names: {:?}", trickle);
    assert_eq!(whole, trickle);

    println!("\n=== All deliveries produced identical rows! ===");
}
