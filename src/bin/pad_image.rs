use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use store_assets::fit::{self, FitOptions};
use store_assets::TargetSize;

/// Fit a single image onto a white canvas and save it as JPEG
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Args {
    input: PathBuf,
    output: PathBuf,

    #[arg(long, default_value_t = TargetSize::SCREENSHOT.width)]
    width: u32,

    #[arg(long, default_value_t = TargetSize::SCREENSHOT.height)]
    height: u32,

    #[arg(short, long, default_value_t = 95)]
    quality: u8,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let options = FitOptions {
        jpeg_quality: args.quality,
        ..Default::default()
    };
    let target = TargetSize::new(args.width, args.height);

    match fit::process_file(&args.input, &args.output, target, &options) {
        Ok(outcome) => {
            println!(
                "Created padded image at: {} ({}x{} inside {}x{})",
                args.output.display(),
                outcome.fitted_size.0,
                outcome.fitted_size.1,
                outcome.canvas_size.0,
                outcome.canvas_size.1
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
