//! Static study content, embedded at build time.

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

static CONTENT_JSON: &str = include_str!("../data/content.json");

#[derive(Debug, Clone, Deserialize)]
pub struct Mnemonic {
    pub id: String,
    pub topic: String,
    pub title: String,
    pub mnemonic: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Mcq,
    Short,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub stem: String,
    /// MCQ only.
    #[serde(default)]
    pub choices: Vec<String>,
    /// MCQ only: the correct choice letter.
    #[serde(default)]
    pub answer: String,
    /// Short-answer only: expected key points.
    #[serde(default)]
    pub keywords: Vec<String>,
    pub explanation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub topic: String,
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyBlock {
    pub title: String,
    pub focus: String,
    pub duration: u32,
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentBundle {
    #[serde(default)]
    pub mnemonics: Vec<Mnemonic>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default)]
    pub study_blocks: Vec<StudyBlock>,
}

pub fn load_content() -> Result<ContentBundle> {
    serde_json::from_str(CONTENT_JSON).context("embedded content bundle is malformed")
}

/// Sorted union of topics across every content kind.
pub fn topics(content: &ContentBundle) -> Vec<String> {
    content
        .mnemonics
        .iter()
        .map(|item| item.topic.as_str())
        .chain(content.questions.iter().map(|item| item.topic.as_str()))
        .chain(content.flashcards.iter().map(|item| item.topic.as_str()))
        .chain(content.study_blocks.iter().map(|item| item.focus.as_str()))
        .filter(|topic| !topic.is_empty())
        .map(str::to_owned)
        .sorted()
        .dedup()
        .collect()
}

/// A selection that filtered down to nothing is a user-facing error.
pub fn ensure_available<T>(items: Vec<T>, message: &str) -> Result<Vec<T>> {
    if items.is_empty() {
        bail!("{message}");
    }
    Ok(items)
}

/// Case-insensitive substring match, used by every `--topic` filter.
pub fn topic_matches(topic: &str, filter: &str) -> bool {
    topic.to_lowercase().contains(&filter.to_lowercase())
}
