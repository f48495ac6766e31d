//! Header mode examples
//!
//! Walks through the four mutually exclusive header behaviors:
//! capture, validate, numeric keys, and fixed headers.

use csvstream::{HeaderMode, ParseEvent, ParserConfig, StreamingParser};

fn run(mode: HeaderMode, input: &str) -> Vec<ParseEvent> {
    let mut parser = StreamingParser::new(ParserConfig::new().header_mode(mode));
    let mut events = parser.feed(input);
    events.extend(parser.finish());
    events
}

fn show(events: &[ParseEvent]) {
    for event in events {
        match event {
            ParseEvent::Headers { headers, line } => {
                println!("   headers (line {}): {:?}", line, headers)
            }
            ParseEvent::Row(record) => println!("   row {}: {:?}", record.row, record.values),
            ParseEvent::Error { error, .. } => println!("   error: {}", error),
            ParseEvent::End { rows, .. } => println!("   end: {} rows", rows),
            _ => {}
        }
    }
}

fn main() {
    println!("=== Header Mode Examples ===\n");

    let input = "name,age\nAlice,30\nBob,25\n";

    println!("1. Capture: first row becomes the header list...");
    show(&run(HeaderMode::Capture, input));

    println!("\n2. Validate (matching): first row checked against the expected list...");
    show(&run(
        HeaderMode::Validate(vec!["name".to_string(), "age".to_string()]),
        input,
    ));

    println!("\n3. Validate (mismatched): terminal error, no rows...");
    show(&run(
        HeaderMode::Validate(vec!["id".to_string(), "total".to_string()]),
        input,
    ));

    println!("\n4. NumericKeys: no header row, positional keys...");
    show(&run(HeaderMode::NumericKeys, input));

    println!("\n5. Fixed: supplied headers, every line is data...");
    show(&run(
        HeaderMode::Fixed(vec!["col_a".to_string(), "col_b".to_string()]),
        input,
    ));

    println!("\n=== All examples completed successfully! ===");
}
