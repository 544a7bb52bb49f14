use anyhow::Result;
use chrono::Local;
use chrono::NaiveDate;
use clap::Parser;
use clap::Subcommand;
use physio_prep::content;
use physio_prep::content::ensure_available;
use physio_prep::content::topic_matches;
use physio_prep::content::ContentBundle;
use physio_prep::content::Flashcard;
use physio_prep::content::Mnemonic;
use physio_prep::content::Question;
use physio_prep::content::QuestionKind;
use physio_prep::default_progress_path;
use physio_prep::plan::build_plan;
use physio_prep::progress::load_progress;
use physio_prep::progress::ProgressStore;
use physio_prep::quiz::evaluate_keywords;
use physio_prep::quiz::question_pool;
use physio_prep::quiz::sample;
use physio_prep::quiz::short_answer_passes;
use physio_prep::quiz::QuizMode;
use physio_prep::review_queue::review_cards;
use physio_prep::sm2::is_due;
use physio_prep::wrap;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

const WIDTH: usize = 80;

#[derive(Parser)]
#[command(version, about = "Interactive PHYL2002 exam preparation aid")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse mnemonics with explanations
    Mnemonics {
        /// Filter by topic
        #[arg(long)]
        topic: Option<String>,

        /// Keyword search in mnemonic titles or phrases
        #[arg(long)]
        search: Option<String>,
    },

    /// Practice questions
    Quiz {
        /// Question type
        #[arg(long, value_enum, default_value = "mixed")]
        mode: QuizMode,

        /// How many questions to attempt
        #[arg(long, default_value_t = 5)]
        count: usize,

        /// Filter questions by topic
        #[arg(long)]
        topic: Option<String>,

        /// Seed for reproducible question order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Flip through flashcards
    Flashcards {
        /// Filter flashcards by topic
        #[arg(long)]
        topic: Option<String>,

        /// Number of flashcards to show
        #[arg(long, default_value_t = 4)]
        count: usize,

        /// Seed for reproducible ordering
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a focused study plan
    Plan {
        /// Topic to prioritize
        #[arg(long)]
        focus: Option<String>,

        /// Total minutes available
        #[arg(long, default_value_t = 60)]
        minutes: u32,
    },

    /// List available topics
    Topics,

    /// Show content counts and review progress
    Stats {
        /// Progress store location
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args = Args::parse();
    let content = content::load_content()?;

    match args.command {
        Command::Mnemonics { topic, search } => {
            render_mnemonics(&content, topic.as_deref(), search.as_deref())
        }
        Command::Quiz {
            mode,
            count,
            topic,
            seed,
        } => run_quiz(&content, mode, count, topic.as_deref(), seed),
        Command::Flashcards { topic, count, seed } => {
            run_flashcards(&content, topic.as_deref(), count, seed)
        }
        Command::Plan { focus, minutes } => {
            let plan = build_plan(&content.study_blocks, focus.as_deref(), minutes)?;
            render_plan(&plan);
            Ok(())
        }
        Command::Topics => {
            show_topics(&content);
            Ok(())
        }
        Command::Stats { store } => {
            render_stats(&content, &store.unwrap_or_else(default_progress_path))
        }
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

fn render_mnemonics(
    content: &ContentBundle,
    topic: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    let selected: Vec<&Mnemonic> = content
        .mnemonics
        .iter()
        .filter(|item| topic.is_none_or(|t| topic_matches(&item.topic, t)))
        .filter(|item| {
            search.is_none_or(|s| {
                let needle = s.to_lowercase();
                item.title.to_lowercase().contains(&needle)
                    || item.mnemonic.to_lowercase().contains(&needle)
            })
        })
        .collect();
    let selected = ensure_available(selected, "No mnemonics found for that selection.")?;

    for item in selected {
        println!("\n[{}] {}", item.topic, item.title);
        println!("  Mnemonic : {}", wrap(&item.mnemonic, WIDTH));
        println!("  Why it helps: {}", wrap(&item.explanation, WIDTH));
    }
    Ok(())
}

fn run_quiz(
    content: &ContentBundle,
    mode: QuizMode,
    count: usize,
    topic: Option<&str>,
    seed: Option<u64>,
) -> Result<()> {
    let pool = question_pool(content, mode, topic)?;
    let selected = sample(&pool, count, seed);

    let mut correct = 0usize;
    for question in &selected {
        let passed = match question.kind {
            QuestionKind::Mcq => ask_mcq(question)?,
            QuestionKind::Short => ask_short(question)?,
        };
        if passed {
            correct += 1;
        }
    }
    println!("Score: {correct}/{} correct", selected.len());
    Ok(())
}

const CHOICE_LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

fn ask_mcq(question: &Question) -> Result<bool> {
    println!("\n{}", wrap(&question.stem, WIDTH));
    for (idx, choice) in question.choices.iter().enumerate() {
        println!("  {}. {choice}", CHOICE_LETTERS[idx]);
    }
    let user = prompt("Your answer (letter): ")?.to_uppercase();
    let correct = user == question.answer.to_uppercase();
    println!("Answer: {} - {}\n", question.answer, question.explanation);
    Ok(correct)
}

fn ask_short(question: &Question) -> Result<bool> {
    println!("\n{}", wrap(&question.stem, WIDTH));
    let response = prompt("Your answer: ")?;
    let (hits, matched) = evaluate_keywords(&response, &question.keywords);

    println!("Key points: {}", question.keywords.join(", "));
    if matched.is_empty() {
        println!("You mentioned: none of the expected keywords");
    } else {
        println!("You mentioned: {}", matched.join(", "));
    }
    println!("Explanation: {}\n", question.explanation);
    Ok(short_answer_passes(hits, question.keywords.len()))
}

fn run_flashcards(
    content: &ContentBundle,
    topic: Option<&str>,
    count: usize,
    seed: Option<u64>,
) -> Result<()> {
    let cards: Vec<Flashcard> = content
        .flashcards
        .iter()
        .filter(|card| topic.is_none_or(|t| topic_matches(&card.topic, t)))
        .cloned()
        .collect();
    let cards = ensure_available(cards, "No flashcards found for that selection.")?;

    for card in sample(&cards, count, seed) {
        println!("\n[{}] {}", card.topic, wrap(&card.front, WIDTH));
        prompt("Press Enter to reveal...")?;
        println!("  -> {}", wrap(&card.back, WIDTH));
    }
    Ok(())
}

fn render_plan(plan: &[content::StudyBlock]) {
    println!("\nStudy Plan");
    println!("{}", "-".repeat(40));
    for (idx, block) in plan.iter().enumerate() {
        println!(
            "{}. {} ({} min) - Focus: {}",
            idx + 1,
            block.title,
            block.duration,
            block.focus
        );
        for action in &block.actions {
            println!("   - {action}");
        }
    }
}

fn show_topics(content: &ContentBundle) {
    println!("Available topics:");
    for topic in content::topics(content) {
        println!(" * {topic}");
    }
}

fn render_stats(content: &ContentBundle, store: &Path) -> Result<()> {
    let progress = load_progress(store)?;
    let today = Local::now().date_naive();
    print!("{}", stats_report(content, &progress, today));
    Ok(())
}

fn stats_report(content: &ContentBundle, progress: &ProgressStore, today: NaiveDate) -> String {
    let due = review_cards(content, None, None)
        .iter()
        .filter(|card| is_due(progress.get(&card.id), today))
        .count();

    let mut out = String::new();
    out.push_str(&format!("Mnemonics   : {}\n", content.mnemonics.len()));
    out.push_str(&format!("Questions   : {}\n", content.questions.len()));
    out.push_str(&format!("Flashcards  : {}\n", content.flashcards.len()));
    out.push_str(&format!("Study blocks: {}\n", content.study_blocks.len()));

    let topics = content::topics(content);
    if topics.is_empty() {
        out.push_str("Topics      : No topics available\n");
    } else {
        out.push_str(&format!("Topics      : {}\n", topics.join(", ")));
    }

    out.push_str(&format!("Tracked     : {}\n", progress.len()));
    out.push_str(&format!("Due today   : {due}\n"));
    out
}
