use anyhow::Result;
use chrono::Local;
use chrono::NaiveDate;
use clap::Parser;
use cursive::style::BorderStyle;
use cursive::style::Palette;
use cursive::traits::*;
use cursive::views::Button;
use cursive::views::Dialog;
use cursive::views::LinearLayout;
use cursive::views::TextView;
use cursive::Cursive;
use cursive::CursiveExt;
use log::error;
use physio_prep::content::load_content;
use physio_prep::default_progress_path;
use physio_prep::progress::load_progress;
use physio_prep::progress::save_progress;
use physio_prep::progress::ProgressStore;
use physio_prep::review_queue::due_cards;
use physio_prep::review_queue::review_cards;
use physio_prep::review_queue::ReviewCard;
use physio_prep::review_queue::ReviewKind;
use physio_prep::sm2::update_sm2;
use physio_prep::wrap;
use rand::prelude::SliceRandom;
use rand::rng;
use std::path::PathBuf;

static DECK: &str = "deck";

#[derive(Parser)]
#[command(version, about = "Spaced-repetition review session")]
struct Args {
    /// Filter reviewable items by topic
    #[arg(long)]
    topic: Option<String>,

    /// Restrict the session to one content kind
    #[arg(long, value_enum)]
    kind: Option<ReviewKind>,

    /// Progress store location
    #[arg(long)]
    store: Option<PathBuf>,

    /// Review everything, ignoring due dates
    #[arg(long, default_value_t = false)]
    cram: bool,
}

struct Session {
    queue: Vec<ReviewCard>,
    idx: usize,
    progress: ProgressStore,
    store: PathBuf,
    today: NaiveDate,
}

impl Session {
    fn current(&self) -> Option<&ReviewCard> {
        self.queue.get(self.idx)
    }

    /// Rate the current card and save the store right away, so an
    /// interrupted session loses at most the card on screen.
    fn rate_current(&mut self, rating: i32) -> Result<()> {
        let Some(card) = self.queue.get(self.idx) else {
            return Ok(());
        };
        let next = update_sm2(self.progress.get(&card.id), rating, self.today);
        self.progress.insert(card.id.clone(), next);
        save_progress(&self.progress, &self.store)
    }
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

    let mut queue = review_cards(&content, args.kind, args.topic.as_deref());
    if !args.cram {
        queue = due_cards(queue, &progress, today);
    }
    if queue.is_empty() {
        println!("nothing to review");
        return Ok(());
    }
    queue.shuffle(&mut rng());

    let first = queue[0].clone();
    let mut siv = Cursive::default();
    siv.set_user_data(Session {
        queue,
        idx: 0,
        progress,
        store,
        today,
    });

    siv.set_theme(cursive::theme::Theme {
        shadow: true,
        borders: BorderStyle::Simple,
        palette: Palette::retro().with(|palette| {
            use cursive::style::BaseColor::*;
            use cursive::style::Color::TerminalDefault;
            use cursive::style::PaletteColor::*;

            palette[Background] = TerminalDefault;
            palette[View] = TerminalDefault;
            palette[Primary] = White.dark();
            palette[TitlePrimary] = Blue.light();
            palette[Secondary] = Blue.light();
            palette[Highlight] = Blue.dark();
        }),
    });

    siv.add_fullscreen_layer(
        Dialog::around(TextView::new(" ".repeat(120)))
            .title(first.front)
            .content(front_layout())
            .h_align(cursive::align::HAlign::Center)
            .with_name(DECK),
    );

    siv.run();
    Ok(())
}

fn front_layout() -> LinearLayout {
    LinearLayout::horizontal()
        .child(Button::new("Skip", advance))
        .child(TextView::new(" ".repeat(20)))
        .child(Button::new("Show answer", show_answer))
        .child(TextView::new(" ".repeat(20)))
        .child(Button::new("Quit", |s| s.quit()))
}

fn show_answer(s: &mut Cursive) {
    let Some(card) = s
        .with_user_data(|session: &mut Session| session.current().cloned())
        .flatten()
    else {
        return;
    };
    s.call_on_name(DECK, |view: &mut Dialog| {
        view.set_content(answer_layout(&card));
    });
}

fn answer_layout(card: &ReviewCard) -> LinearLayout {
    let mut ratings = LinearLayout::horizontal();
    let grades = [
        (0, "0 Blank"),
        (1, "1 Wrong"),
        (2, "2 Almost"),
        (3, "3 Hard"),
        (4, "4 Good"),
        (5, "5 Easy"),
    ];
    for (rating, label) in grades {
        ratings.add_child(Button::new(label, move |s| rate(s, rating)));
        ratings.add_child(TextView::new(" "));
    }
    ratings.add_child(TextView::new(" ".repeat(8)));
    ratings.add_child(Button::new("Quit", |s| s.quit()));

    LinearLayout::vertical()
        .child(TextView::new(wrap(&card.back, 76)))
        .child(TextView::new(" "))
        .child(ratings)
}

fn rate(s: &mut Cursive, rating: i32) {
    if let Some(Err(err)) = s.with_user_data(|session: &mut Session| session.rate_current(rating)) {
        error!("failed to record rating: {err:#}");
    }
    advance(s);
}

fn advance(s: &mut Cursive) {
    let next = s
        .with_user_data(|session: &mut Session| {
            session.idx += 1;
            session.current().cloned()
        })
        .flatten();
    match next {
        Some(card) => {
            s.call_on_name(DECK, |view: &mut Dialog| {
                view.set_title(card.front);
                view.set_content(front_layout());
            });
        }
        None => s.quit(),
    }
}
