//! Question selection and grading.

use crate::content::ensure_available;
use crate::content::topic_matches;
use crate::content::ContentBundle;
use crate::content::Question;
use crate::content::QuestionKind;
use anyhow::Result;
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuizMode {
    Mcq,
    Short,
    Mixed,
}

/// Questions matching the requested mode and topic filter.
pub fn question_pool(
    content: &ContentBundle,
    mode: QuizMode,
    topic: Option<&str>,
) -> Result<Vec<Question>> {
    let pool: Vec<Question> = content
        .questions
        .iter()
        .filter(|question| topic.is_none_or(|t| topic_matches(&question.topic, t)))
        .filter(|question| match mode {
            QuizMode::Mcq => question.kind == QuestionKind::Mcq,
            QuizMode::Short => question.kind == QuestionKind::Short,
            QuizMode::Mixed => true,
        })
        .cloned()
        .collect();
    ensure_available(pool, "No questions available for that selection.")
}

/// Take up to `count` items at random; a seed makes the draw reproducible.
pub fn sample<T: Clone>(pool: &[T], count: usize, seed: Option<u64>) -> Vec<T> {
    let k = count.min(pool.len());
    match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            pool.choose_multiple(&mut rng, k).cloned().collect()
        }
        None => pool.choose_multiple(&mut rand::rng(), k).cloned().collect(),
    }
}

/// Which expected keywords appear (case-insensitively) in the answer.
pub fn evaluate_keywords<'a>(answer: &str, keywords: &'a [String]) -> (usize, Vec<&'a str>) {
    let normalized = answer.to_lowercase();
    let matched: Vec<&str> = keywords
        .iter()
        .filter(|keyword| normalized.contains(&keyword.to_lowercase()))
        .map(String::as_str)
        .collect();
    (matched.len(), matched)
}

/// A short answer passes when it mentions at least half the expected
/// keywords (minimum one). No expected keywords means nothing to miss.
pub fn short_answer_passes(hits: usize, expected: usize) -> bool {
    expected == 0 || hits >= std::cmp::max(1, expected / 2)
}
