//! # Receipt Preview
//!
//! Renders receipt options from a JSON file as plain text, for checking
//! layouts without a printer.
//!
//! ## Usage
//! ```bash
//! # Preview a full receipt payload
//! cargo run -p kasa-core --bin receipt-preview -- --file ./sale.json
//!
//! # Plain sale (paid defaults to total), payload on stdin
//! cat sale.json | cargo run -p kasa-core --bin receipt-preview -- --sale
//!
//! # Dump the line sequence the renderer would receive
//! cargo run -p kasa-core --bin receipt-preview -- -f ./sale.json --json
//! ```

use std::env;
use std::fs;
use std::io::{self, Read};

use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kasa_core::preview::render_plain_text;
use kasa_core::receipt::{build_receipt_lines, build_sale_receipt_lines, format_receipt_date};
use kasa_core::BuildReceiptLinesOptions;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut file: Option<String> = None;
    let mut sale = false;
    let mut json = false;
    let mut stamp = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    file = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--sale" | "-s" => sale = true,
            "--json" | "-j" => json = true,
            "--now" | "-n" => stamp = true,
            "--help" | "-h" => {
                println!("Kasa Receipt Preview");
                println!();
                println!("Usage: receipt-preview [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>  Options JSON file (default: stdin)");
                println!("  -s, --sale         Plain sale: paid defaults to total");
                println!("  -j, --json         Print the line sequence as JSON");
                println!("  -n, --now          Fill an empty date row with the current time");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let payload = match &file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut options = BuildReceiptLinesOptions::from_json(&payload)?;
    if stamp && options.date.is_none() {
        options.date = Some(format_receipt_date(&Local::now()));
    }

    info!(
        source = file.as_deref().unwrap_or("stdin"),
        items = options.items.len(),
        sale,
        "Building preview"
    );

    let lines = if sale {
        build_sale_receipt_lines(&options)
    } else {
        build_receipt_lines(&options)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        print!("{}", render_plain_text(&lines));
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kasa_core=trace` - Also show column fallbacks
/// - Default: INFO level, debug for this crate
///
/// Logs go to stderr so the preview on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kasa_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
