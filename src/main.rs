use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use store_assets::{AssetConfig, BatchRunner, Result};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Builds store listing screenshots and promo tiles",
    long_about = None
)]
struct Args {
    /// Config file (default: <config dir>/StoreAssets/config.json if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the config's base directory
    #[arg(short, long)]
    base_dir: Option<PathBuf>,

    /// Only process these locales
    #[arg(short, long = "locale")]
    locales: Vec<String>,

    /// Report what would be written without touching the output directory
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write a JSON report of every processed file
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process all locales (default)
    Run,

    /// Write the default config so it can be edited
    InitConfig,
}

fn init_config(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(AssetConfig::default_path);
    if path.exists() {
        println!("Config already exists at: {}", path.display());
        return Ok(());
    }
    AssetConfig::default().save(&path)?;
    println!("Created config at: {}", path.display());
    Ok(())
}

fn run(args: Args) -> Result<bool> {
    let mut config = AssetConfig::resolve(args.config.as_deref())?;
    if let Some(base_dir) = args.base_dir {
        config.base_dir = base_dir;
    }
    config.select_locales(&args.locales)?;

    let report = BatchRunner::new(config).dry_run(args.dry_run).run()?;

    let stats = report.get_stats();
    println!(
        "Done: {} processed, {} skipped, {} failed, {} locale(s) failed",
        stats.processed, stats.skipped, stats.failed, stats.failed_locales
    );

    if let Some(path) = args.report {
        report.write_json(&path)?;
        println!("Report written to: {}", path.display());
    }

    Ok(!report.has_failures())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    log::debug!("{:?}", args);

    let result = match args.command {
        Some(Commands::InitConfig) => init_config(args.config).map(|_| true),
        Some(Commands::Run) | None => run(args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{:?}", e);
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
