use anyhow::anyhow;
use anyhow::Result;
use chrono::Local;
use clap::Parser;
use physio_prep::content::load_content;
use physio_prep::default_progress_path;
use physio_prep::progress::load_progress;
use physio_prep::review_queue::due_cards;
use physio_prep::review_queue::review_cards;
use physio_prep::review_queue::ReviewKind;
use rand::prelude::IndexedRandom;
use std::path::PathBuf;

/// Print the id of one due item, chosen at random.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Filter by topic
    #[arg(long)]
    topic: Option<String>,

    /// Restrict to one content kind
    #[arg(long, value_enum)]
    kind: Option<ReviewKind>,

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
    let today = Local::now().date_naive();

    let content = load_content()?;
    let progress = load_progress(&store)?;
    let due = due_cards(
        review_cards(&content, args.kind, args.topic.as_deref()),
        &progress,
        today,
    );

    match due.choose(&mut rand::rng()) {
        Some(card) => {
            println!("{}", card.id);
            Ok(())
        }
        None => {
            eprintln!("all reviewed");
            Err(anyhow!("nothing due"))
        }
    }
}
