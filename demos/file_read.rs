//! CSV file reading examples
//!
//! Demonstrates the CsvReader adapter:
//! - Iterating row records from a file
//! - Custom delimiters and strict columns
//! - Small chunk sizes (output is identical regardless)

use csvstream::{CsvReader, HeaderMode};
use std::error::Error;
use std::io::Write;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== CSV File Reading Examples ===\n");

    // Write a small file to read back
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        "name,age,city\nAlice,30,NYC\nBob,25,SF\n\"Carol, PhD\",41,\"Los\nAngeles\"\n"
    )?;
    let path = file.path();

    // Example 1: iterate records with captured headers
    println!("1. Reading with captured headers...");
    {
        let mut reader = CsvReader::open(path)?.header_mode(HeaderMode::Capture);
        for record in reader.rows() {
            let record = record?;
            println!(
                "   {} ({}) from {}",
                record.get("name").unwrap_or(""),
                record.get("age").unwrap_or(""),
                record.get("city").unwrap_or("")
            );
        }
        println!("   Total rows read: {}", reader.row_count());
    }

    // Example 2: tiny chunks still produce the same rows
    println!("\n2. Reading with an 8-byte chunk size...");
    {
        let mut reader = CsvReader::open(path)?
            .header_mode(HeaderMode::Capture)
            .chunk_size(8);
        let count = reader.rows().filter_map(|record| record.ok()).count();
        println!("   Rows: {}", count);
    }

    // Example 3: semicolon-delimited data
    println!("\n3. Reading with a custom delimiter...");
    {
        let mut semicolons = tempfile::NamedTempFile::new()?;
        write!(semicolons, "country;capital\nFrance;Paris\nJapan;Tokyo\n")?;

        let mut reader = CsvReader::open(semicolons.path())?
            .delimiter(b';')
            .header_mode(HeaderMode::Capture);
        for record in reader.rows() {
            let record = record?;
            println!(
                "   {} -> {}",
                record.get("country").unwrap_or(""),
                record.get("capital").unwrap_or("")
            );
        }
    }

    // Example 4: error handling
    println!("\n4. Error handling...");
    {
        match CsvReader::open("nonexistent.csv") {
            Ok(_) => println!("   File opened"),
            Err(e) => println!("   Expected error: {}", e),
        }
    }

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}
