//! CLI tool for galleryview - packs a JSON item list and prints the columns
//!
//! Usage:
//!   galleryview_cli <items.json>                      # Columns for the default width
//!   galleryview_cli <items.json> --columns 3          # Fixed column count
//!   galleryview_cli <items.json> --width 1280         # Column count from breakpoints
//!   galleryview_cli <items.json> --config cfg.json    # Custom breakpoints/span rules
//!   galleryview_cli <items.json> -o layout.json       # Write to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use galleryview::layout::pack;
use galleryview::gallery::render_columns;
use galleryview::{GalleryConfig, GalleryItem};

const DEFAULT_WIDTH: f64 = 1280.0;

struct Args {
    input: String,
    columns: Option<usize>,
    width: f64,
    config: Option<String>,
    output: Option<String>,
}

fn usage() -> ! {
    eprintln!(
        "Usage: galleryview_cli <items.json> [--columns N | --width PX] [--config cfg.json] [-o out.json]"
    );
    std::process::exit(1);
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }
    let mut parsed = Args {
        input: args[1].clone(),
        columns: None,
        width: DEFAULT_WIDTH,
        config: None,
        output: None,
    };
    let mut i = 2;
    while i < args.len() {
        let value = args.get(i + 1).cloned().unwrap_or_else(|| usage());
        match args[i].as_str() {
            "--columns" => parsed.columns = Some(value.parse().unwrap_or_else(|_| usage())),
            "--width" => parsed.width = value.parse().unwrap_or_else(|_| usage()),
            "--config" => parsed.config = Some(value),
            "-o" => parsed.output = Some(value),
            _ => usage(),
        }
        i += 2;
    }
    parsed
}

fn fail(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("Error {context}: {error}");
    std::process::exit(1);
}

fn main() {
    galleryview::logging::init();
    let args = parse_args();

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| fail(&format!("reading {path}"), e));
            GalleryConfig::from_json(&text).unwrap_or_else(|e| fail("loading config", e))
        }
        None => GalleryConfig::default(),
    };

    let text = fs::read_to_string(&args.input)
        .unwrap_or_else(|e| fail(&format!("reading {}", args.input), e));
    let items: Vec<GalleryItem> =
        serde_json::from_str(&text).unwrap_or_else(|e| fail("parsing items", e));

    let columns = args
        .columns
        .unwrap_or_else(|| config.columns_for_width(args.width));
    tracing::info!(items = items.len(), columns, "packing");

    let layout = pack(items, columns, config.span_rules).unwrap_or_else(|e| fail("packing", e));
    let rendered = render_columns(&layout);

    let json = serde_json::to_string_pretty(&rendered).unwrap_or_else(|e| fail("serializing JSON", e));

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                fail(&format!("writing {path}"), e);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
