use clap::Parser;
use std::path::PathBuf;

use goldicons::{DEFAULT_OUT_DIR, IconConfig, IconGenerator};

#[derive(Parser)]
#[command(name = "goldicons")]
#[command(about = "Generate the gold \"Au\" extension icons")]
struct Cli {
    /// Directory the icons are written to
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save intermediate canvases to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut generator = IconGenerator::new(args.out_dir, IconConfig::default());
    if let Some(debug_dir) = args.debug_out {
        generator = generator.with_debug(debug_dir)?;
    }

    let paths = generator.generate_all()?;
    log::debug!("{} icons written to {}", paths.len(), generator.out_dir().display());

    Ok(())
}
