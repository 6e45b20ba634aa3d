//! Report the HSV band composition of every image in a directory

use clap::Parser;
use colorcrop::batch::{run_segmenter, ErrorPolicy};
use colorcrop::Config;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "segment-colors",
    version,
    about = "Write per-image color band percentages to a CSV report"
)]
struct Args {
    /// Directory containing the images
    input_dir: PathBuf,

    /// Report file; truncated if it exists
    output_file: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save one binary mask per band and image into this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Skip unreadable images instead of stopping
    #[arg(long)]
    keep_going: bool,
}

fn run(args: &Args) -> colorcrop::Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    let policy = if args.keep_going {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Abort
    };

    let summary = run_segmenter(
        &args.input_dir,
        &args.output_file,
        &config.segmenter,
        args.debug_dir.as_deref(),
        policy,
    )?;
    log::info!(
        "Wrote {} rows to {}",
        summary.processed.len(),
        args.output_file.display()
    );
    summary.into_result().map(|_| ())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        eprintln!("{}", e.user_message());
        process::exit(1);
    }
}
