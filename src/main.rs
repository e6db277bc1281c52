//! Command-line region lookup: loads the home map from the configured maps directory
//! and reports which region lies under each given pixel.

use anyhow::Context;
use clap::Parser;
use electionmap::{app, init_logging, Config, BUILD_DATE, VERSION};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Report the map regions under panel pixels")]
struct Args {
    /// Configuration file (.toml or .json); defaults to the platform config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pixels to test, as X,Y
    #[arg(value_name = "X,Y", value_parser = parse_pixel, allow_hyphen_values = true)]
    pixels: Vec<(i32, i32)>,
}

fn parse_pixel(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad X in '{s}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad Y in '{s}': {e}"))?;
    Ok((x, y))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging()?;
    tracing::info!(version = VERSION, build_date = BUILD_DATE, "Starting ElectionMap");

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::load_or_default(&Config::default_path()?)?,
    };

    let mut navigator = app::navigator(&config)?;
    navigator
        .load_home()
        .with_context(|| format!("loading home map '{}'", config.maps.home_map))?;

    if let Some(collection) = navigator.collection() {
        println!("{}: {} regions", collection.identity(), collection.len());
    }
    println!("{}", navigator.viewport());

    for (x, y) in args.pixels {
        navigator.pointer_moved(x, y);
        let record = navigator
            .highlight()
            .highlighted()
            .and_then(|index| navigator.collection()?.shape(index))
            .map(|shape| shape.record_number());
        match record {
            Some(record) => println!("({x}, {y}) -> record {record}"),
            None => println!("({x}, {y}) -> none"),
        }
    }

    Ok(())
}
