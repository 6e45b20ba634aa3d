//! Mask every JPEG in a directory to a fixed circle
//!
//! Writes `<stem>_cropped.JPG` (black outside) or `<stem>_cropped.png`
//! (transparent outside) for each input.

use clap::{Parser, ValueEnum};
use colorcrop::batch::{run_masker, ErrorPolicy};
use colorcrop::{ColorCropError, Config, OutputFormat};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// PNG with alpha for PNG inputs, black JPEG otherwise
    Auto,
    Jpeg,
    Png,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => OutputFormat::Auto,
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Png => OutputFormat::Png,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "circle-mask", version, about = "Crop images to a circle")]
struct Args {
    /// Directory containing the images
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Circle center column in pixels
    #[arg(long, allow_negative_numbers = true)]
    center_x: Option<i64>,

    /// Circle center row in pixels
    #[arg(long, allow_negative_numbers = true)]
    center_y: Option<i64>,

    /// Circle radius in pixels
    #[arg(long)]
    radius: Option<u32>,

    /// Output encoding
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Write masked images here instead of next to the inputs
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip unreadable images instead of stopping
    #[arg(long)]
    keep_going: bool,
}

fn run(args: Args) -> colorcrop::Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    let masker = &mut config.masker;
    if let Some(x) = args.center_x {
        masker.center_x = x;
    }
    if let Some(y) = args.center_y {
        masker.center_y = y;
    }
    if let Some(r) = args.radius {
        masker.radius = r;
    }
    if let Some(format) = args.format {
        masker.output_format = format.into();
    }
    if args.output_dir.is_some() {
        masker.output_dir = args.output_dir;
    }
    config.validate()?;

    let policy = if args.keep_going {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Abort
    };

    let summary = run_masker(&args.dir, &config.masker, policy)?;
    log::info!(
        "Masked {} of {} images",
        summary.processed.len(),
        summary.total()
    );
    summary.into_result().map(|_| ())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        report_error(&e);
        process::exit(1);
    }
}

fn report_error(e: &ColorCropError) {
    eprintln!("Error: {}", e);
    eprintln!("{}", e.user_message());
}
