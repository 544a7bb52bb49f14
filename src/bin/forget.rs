use anyhow::Result;
use clap::Parser;
use physio_prep::default_progress_path;
use physio_prep::progress::load_progress;
use physio_prep::progress::save_progress;
use std::path::PathBuf;

/// Drop the scheduling state for one or more items, so they count as
/// never reviewed again.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Item ids as stored in the progress file
    #[arg(required = true)]
    ids: Vec<String>,

    /// Progress store location
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args = Args::parse();
    let store = args.store.unwrap_or_else(default_progress_path);

    let mut progress = load_progress(&store)?;
    for id in &args.ids {
        if progress.remove(id).is_none() {
            eprintln!("{id}: not tracked");
        }
    }
    save_progress(&progress, &store)
}
