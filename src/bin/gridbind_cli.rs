//! CLI tool for gridbind - normalizes a grid payload and outputs the canonical model
//!
//! Usage:
//!   gridbind_cli <input.json>                          # Output JSON to stdout
//!   gridbind_cli <input.json> -o model.json            # Output JSON to file
//!   gridbind_cli <input.json> --width 800 --max-width 200 -v

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use gridbind::config::DEFAULT_MAX_COLUMN_WIDTH;
use gridbind::{normalize, DataInput};
use simplelog::{Config, LevelFilter, WriteLogger};

const DEFAULT_WIDTH: f64 = 600.0;

const USAGE: &str =
    "Usage: gridbind_cli <input.json> [--width PX] [--max-width PX] [-o output.json] [-v]";

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn parse_px(flag: &str, value: Option<&String>) -> f64 {
    match value.map(|v| v.parse::<f64>()) {
        Some(Ok(px)) if px.is_finite() && px >= 0.0 => px,
        _ => fail(&format!("{flag} expects a pixel width\n{USAGE}")),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        fail(USAGE);
    }

    let input_path = &args[1];
    let mut output_path = None;
    let mut width = DEFAULT_WIDTH;
    let mut max_width = DEFAULT_MAX_COLUMN_WIDTH;
    let mut verbose = false;

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-o" => output_path = Some(rest.next().unwrap_or_else(|| fail(USAGE))),
            "--width" => width = parse_px("--width", rest.next()),
            "--max-width" => max_width = parse_px("--max-width", rest.next()),
            "-v" => verbose = true,
            other => fail(&format!("Unknown argument: {other}\n{USAGE}")),
        }
    }

    if verbose {
        WriteLogger::init(LevelFilter::Debug, Config::default(), io::stderr())
            .expect("Failed to initialize logger");
    }

    // Read input file
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => fail(&format!("Error reading {input_path}: {e}")),
    };

    // Decode payload
    let input = match DataInput::from_json(&text) {
        Ok(input) => input,
        Err(e) => fail(&format!("Error decoding {input_path}: {e}")),
    };

    let model = normalize(&input, width, max_width);
    log::debug!(
        "normalized {} rows x {} columns ({:?})",
        model.rows.len(),
        model.columns.len(),
        model.shape
    );

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&model) {
        Ok(j) => j,
        Err(e) => fail(&format!("Error serializing JSON: {e}")),
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
