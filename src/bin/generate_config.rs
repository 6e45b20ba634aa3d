//! Generate the default configuration file
//!
//! Writes a JSON config with every default parameter, ready to be edited
//! and passed back through `--config`.

use clap::Parser;
use colorcrop::Config;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "colorcrop-config", version, about = "Write the default configuration")]
struct Args {
    /// Destination JSON file
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Some(parent) = args.output.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = Config::default();
    match config.to_json_file(&args.output) {
        Ok(()) => {
            log::info!("Configuration saved to {}", args.output.display());
            eprintln!("Config summary:");
            eprintln!(
                "  Masker: center ({}, {}), radius {}, format {:?}, extensions {:?}",
                config.masker.center_x,
                config.masker.center_y,
                config.masker.radius,
                config.masker.output_format,
                config.masker.extensions
            );
            eprintln!(
                "  Segmenter: {} ranges, bands {:?}, extensions {:?}",
                config.segmenter.bands.len(),
                config
                    .segmenter
                    .band_table()
                    .map(|t| t.names().to_vec())
                    .unwrap_or_default(),
                config.segmenter.extensions
            );
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}

