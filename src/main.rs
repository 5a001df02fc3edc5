// Scanorigin CLI
// Resolves the country of origin for barcode values decoded by an external
// scanner. With barcode arguments it resolves them one-shot; without, it
// reads scan-event JSON lines from stdin until EOF, the stand-in for the
// scanner's result callback.

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;

use scanorigin::display;
use scanorigin::reference::{CountryTable, UNKNOWN_CODE};
use scanorigin::scan::ScanEvent;

#[derive(Parser, Debug)]
#[command(
    name = "scanorigin",
    version,
    about = "Country-of-origin lookup for scanned barcodes"
)]
struct Args {
    /// Path to the semicolon-delimited country prefix table
    #[arg(long, env = "SCANORIGIN_TABLE", default_value = "assets/countries.csv")]
    table: PathBuf,

    /// Barcode values to resolve; omit to read scan events from stdin
    barcodes: Vec<String>,
}

fn main() {
    // Default to info level for our crate
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("scanorigin=info"),
    )
    .init();

    let args = Args::parse();

    let table = CountryTable::load(&args.table);
    if table.is_empty() {
        log::warn!("Country table is empty; every lookup will report '{}'", UNKNOWN_CODE);
    }

    if args.barcodes.is_empty() {
        run_stream(&table);
    } else {
        for barcode in &args.barcodes {
            log::debug!("Barcode read: {}", barcode);
            println!("{}\t{}", barcode, table.display_country(barcode));
        }
    }
}

/// Consume scan-event JSON lines from stdin until EOF
fn run_stream(table: &CountryTable) {
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read scan event: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let event = match ScanEvent::parse(&line) {
            Ok(event) => event,
            Err(e) => {
                log::warn!("Ignoring unparseable scan event: {}", e);
                continue;
            }
        };

        let outcome = event.outcome();
        println!("{}", display::status_line(&outcome));
        if let Some(country) = display::country_line(&outcome, table) {
            println!("{}", country);
        }
    }
}
