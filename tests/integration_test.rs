//! Integration tests for csvstream

use csvstream::{
    CancelToken, CsvError, CsvReader, CsvStream, HeaderMode, ParseEvent, ParserConfig,
    StreamingParser,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn collect_events(config: ParserConfig, fragments: &[&str]) -> Vec<ParseEvent> {
    let mut parser = StreamingParser::new(config);
    let mut events = Vec::new();
    for fragment in fragments {
        events.extend(parser.feed(fragment));
    }
    events.extend(parser.finish());
    events
}

fn row_events(events: &[ParseEvent]) -> Vec<&csvstream::RowRecord> {
    events
        .iter()
        .filter_map(|event| match event {
            ParseEvent::Row(record) => Some(record),
            _ => None,
        })
        .collect()
}

/// Split `input` into fragments of `size` characters
fn fragment(input: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[test]
fn test_fragmentation_invariance() {
    let input = "id,name,note\n1,Alice,\"line one\nline two\"\n2,\"Bo,b\",\"say \"\"hi\"\"\"\n3,Eve,plain\n";
    let config = || ParserConfig::new().header_mode(HeaderMode::Capture);

    let whole = collect_events(config(), &[input]);
    for size in [1, 2, 3, 5, 7, 11] {
        let fragments = fragment(input, size);
        let refs: Vec<&str> = fragments.iter().map(|s| s.as_str()).collect();
        let chunked = collect_events(config(), &refs);
        assert_eq!(whole, chunked, "fragment size {} diverged", size);
    }

    let rows = row_events(&whole);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].get("note"), Some("line one\nline two"));
    assert_eq!(rows[1].get("name"), Some("Bo,b"));
    assert_eq!(rows[1].get("note"), Some("say \"hi\""));
}

#[test]
fn test_three_fragment_split_matches_single_delivery() {
    let config = || ParserConfig::new().header_mode(HeaderMode::Capture);
    let whole = collect_events(config(), &["id,name\n1,Alice\n2,Bob"]);
    let split = collect_events(config(), &["id,na", "me\n1,Al", "ice\n2,Bob"]);
    assert_eq!(whole, split);

    let rows = row_events(&split);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("name"), Some("Alice"));
    assert_eq!(rows[1].get("name"), Some("Bob"));
    assert!(matches!(
        split.last(),
        Some(ParseEvent::End { rows: 2, lines: 3 })
    ));
}

#[test]
fn test_header_modes_end_to_end() {
    let input = "name,age\nAlice,30\n";

    // Capture
    let captured = collect_events(
        ParserConfig::new().header_mode(HeaderMode::Capture),
        &[input],
    );
    assert!(matches!(
        &captured[0],
        ParseEvent::Headers { headers, line: 1 } if headers == &["name", "age"]
    ));
    let rows = row_events(&captured);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("name"), Some("Alice"));
    assert_eq!(rows[0].get("age"), Some("30"));

    // Validate, matching
    let validated = collect_events(
        ParserConfig::new().header_mode(HeaderMode::Validate(vec![
            "name".to_string(),
            "age".to_string(),
        ])),
        &[input],
    );
    assert_eq!(row_events(&validated).len(), 1);

    // Validate, mismatched: error, zero rows, no End
    let mismatched = collect_events(
        ParserConfig::new().header_mode(HeaderMode::Validate(vec![
            "x".to_string(),
            "y".to_string(),
        ])),
        &[input],
    );
    assert_eq!(row_events(&mismatched).len(), 0);
    assert!(mismatched.iter().any(|event| matches!(
        event,
        ParseEvent::Error {
            error: CsvError::HeaderMismatch { .. },
            ..
        }
    )));
    assert!(!mismatched
        .iter()
        .any(|event| matches!(event, ParseEvent::End { .. })));

    // Numeric keys: every line is data
    let numeric = collect_events(ParserConfig::new(), &[input]);
    let rows = row_events(&numeric);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("1"), Some("name"));

    // Fixed headers: every line is data, keyed by the supplied list
    let fixed = collect_events(
        ParserConfig::new().header_mode(HeaderMode::Fixed(vec![
            "col_a".to_string(),
            "col_b".to_string(),
        ])),
        &[input],
    );
    let rows = row_events(&fixed);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("col_a"), Some("name"));
    assert_eq!(rows[1].get("col_b"), Some("30"));
}

#[test]
fn test_counters_with_blank_lines() {
    let events = collect_events(
        ParserConfig::new().header_mode(HeaderMode::Capture),
        &["a,b\n\n1,2\n\n3,4"],
    );
    assert!(matches!(
        events.last(),
        Some(ParseEvent::End { rows: 2, lines: 5 })
    ));
    let rows = row_events(&events);
    assert_eq!(rows[0].row, 1);
    assert_eq!(rows[0].line, 3);
    assert_eq!(rows[1].row, 2);
    assert_eq!(rows[1].line, 5);
}

#[test]
fn test_strict_columns_halt_policy() {
    let events = collect_events(
        ParserConfig::new()
            .header_mode(HeaderMode::Capture)
            .strict_columns(true),
        &["name,age\nAlice,30,extra\nBob,25\n"],
    );
    let message = events
        .iter()
        .find_map(|event| match event {
            ParseEvent::Error { error, .. } => Some(error.to_string()),
            _ => None,
        })
        .expect("expected a column error");
    assert!(message.contains('3'));
    assert!(message.contains('2'));

    // The whole pipeline halts: Bob never parses and End is suppressed
    assert_eq!(row_events(&events).len(), 0);
    assert!(!events
        .iter()
        .any(|event| matches!(event, ParseEvent::End { .. })));
}

#[test]
fn test_strict_columns_continue_policy() {
    let events = collect_events(
        ParserConfig::new()
            .header_mode(HeaderMode::Capture)
            .strict_columns(true)
            .halt_on_column_mismatch(false),
        &["name,age\nAlice,30,extra\nBob,25\n"],
    );
    let rows = row_events(&events);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("name"), Some("Bob"));
    assert!(matches!(
        events.last(),
        Some(ParseEvent::End { rows: 1, lines: 3 })
    ));
}

#[test]
fn test_strict_columns_blank_overflow_is_tolerated() {
    let events = collect_events(
        ParserConfig::new()
            .header_mode(HeaderMode::Capture)
            .strict_columns(true),
        &["name,age\nAlice,30,,  \n"],
    );
    let rows = row_events(&events);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[0].field_count(), 4);
}

#[test]
fn test_short_rows_pad_mapping() {
    let events = collect_events(
        ParserConfig::new().header_mode(HeaderMode::Capture),
        &["a,b,c\n1\n"],
    );
    let rows = row_events(&events);
    assert_eq!(rows[0].get("a"), Some("1"));
    assert_eq!(rows[0].get("b"), Some(""));
    assert_eq!(rows[0].get("c"), Some(""));
}

#[test]
fn test_unbalanced_quotes_at_end_of_input() {
    let events = collect_events(ParserConfig::new(), &["good,row\n\"unterminated"]);
    assert_eq!(row_events(&events).len(), 1);
    assert!(events.iter().any(|event| matches!(
        event,
        ParseEvent::Error {
            error: CsvError::UnbalancedQuotes { line: 2 },
            ..
        }
    )));
    assert!(!events
        .iter()
        .any(|event| matches!(event, ParseEvent::End { .. })));
}

#[test]
fn test_cancellation_mid_stream() {
    let token = CancelToken::new();
    let mut stream = CsvStream::new(ParserConfig::new().cancel_token(token.clone()));

    stream.push("1,a\n2,b\n");
    assert_eq!(stream.rows(), 2);

    token.cancel();
    stream.push("3,c\n4,d\n");
    assert_eq!(stream.rows(), 2); // nothing after cancellation
    stream.end();
    assert_eq!(stream.rows(), 2);
}

#[test]
fn test_stream_subscribers_and_validator() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut stream = CsvStream::new(ParserConfig::new().header_mode(HeaderMode::Capture));
    let kinds = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&kinds);
    stream.subscribe(move |event| log.borrow_mut().push(event.kind()));
    stream.set_validator(|record| {
        if record.get("age") == Some("unknown") {
            vec!["age missing".to_string()]
        } else {
            Vec::new()
        }
    });

    stream.push("name,age\nAlice,30\nBob,unknown\n");
    stream.end();

    assert_eq!(*kinds.borrow(), vec!["headers", "row", "row", "end"]);
    assert_eq!(stream.validation_errors(), 1);
}

#[test]
fn test_progress_against_declared_total() {
    let input = "h\n1\n2\n3\n4\n";
    let events = collect_events(
        ParserConfig::new()
            .header_mode(HeaderMode::Capture)
            .progress_interval(2)
            .total_bytes(input.len() as u64),
        &[input],
    );
    let progress: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            ParseEvent::Progress {
                bytes, total_bytes, ..
            } => Some((*bytes, *total_bytes)),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 2);
    for (bytes, total) in progress {
        assert_eq!(total, Some(input.len() as u64));
        assert!(bytes <= input.len() as u64);
    }
}

#[test]
fn test_read_plain_csv_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "name,age,city\nAlice,30,NYC\nBob,25,SF\n").unwrap();

    let mut reader = CsvReader::open(file.path())
        .unwrap()
        .header_mode(HeaderMode::Capture);
    let rows: Vec<_> = reader
        .rows()
        .collect::<csvstream::Result<Vec<_>>>()
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("city"), Some("NYC"));
    assert_eq!(rows[1].get("name"), Some("Bob"));
    assert_eq!(
        reader.headers(),
        Some(&["name".to_string(), "age".to_string(), "city".to_string()][..])
    );
    assert_eq!(reader.row_count(), 2);
}

#[test]
fn test_file_with_quoted_newlines_small_chunks() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "id,comment\n1,\"first\nsecond\"\n2,\"third, with comma\"\n"
    )
    .unwrap();

    // A chunk size small enough that every row spans several chunks
    let mut reader = CsvReader::open(file.path())
        .unwrap()
        .header_mode(HeaderMode::Capture)
        .chunk_size(5);
    let rows: Vec<_> = reader
        .rows()
        .collect::<csvstream::Result<Vec<_>>>()
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("comment"), Some("first\nsecond"));
    assert_eq!(rows[1].get("comment"), Some("third, with comma"));
}

#[test]
fn test_bom_and_whitespace_header_normalization() {
    let events = collect_events(
        ParserConfig::new().header_mode(HeaderMode::Capture),
        &["\u{feff} name , age \nAlice,30\n"],
    );
    assert!(matches!(
        &events[0],
        ParseEvent::Headers { headers, .. } if headers == &["name", "age"]
    ));
    let rows = row_events(&events);
    assert_eq!(rows[0].get("name"), Some("Alice"));
}

#[test]
fn test_validate_normalizes_both_sides() {
    let events = collect_events(
        ParserConfig::new().header_mode(HeaderMode::Validate(vec![
            " name ".to_string(),
            "age".to_string(),
        ])),
        &["\u{feff}name, age \nAlice,30\n"],
    );
    assert_eq!(row_events(&events).len(), 1);
}

#[cfg(feature = "async")]
mod async_tests {
    use super::*;
    use csvstream::async_reader::read_async;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_async_delivery_matches_sync() {
        let input = "id,name\n1,Alice\n2,\"Bo\nb\"\n";

        let rows = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&rows);
        let mut stream =
            CsvStream::new(ParserConfig::new().header_mode(HeaderMode::Capture));
        stream.on_row(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        read_async(input.as_bytes(), &mut stream).await.unwrap();

        assert_eq!(rows.load(Ordering::Relaxed), 2);
        assert_eq!(stream.lines(), 3);
    }
}
