//! A uniform front/back card view over every reviewable content kind,
//! plus due-filtering against the progress store.

use crate::content::topic_matches;
use crate::content::ContentBundle;
use crate::content::QuestionKind;
use crate::progress::ProgressStore;
use crate::sm2::is_due;
use chrono::NaiveDate;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReviewKind {
    Mnemonics,
    Questions,
    Flashcards,
}

/// One reviewable item. `id` is the stable key into the progress store.
#[derive(Debug, Clone)]
pub struct ReviewCard {
    pub id: String,
    pub topic: String,
    pub front: String,
    pub back: String,
}

/// Flatten the bundle into cards. Questions show their stem and reveal
/// the answer and explanation; mnemonics show their title and reveal the
/// phrase.
pub fn review_cards(
    content: &ContentBundle,
    kind: Option<ReviewKind>,
    topic: Option<&str>,
) -> Vec<ReviewCard> {
    let mut cards = Vec::new();

    if matches!(kind, None | Some(ReviewKind::Mnemonics)) {
        for item in &content.mnemonics {
            cards.push(ReviewCard {
                id: item.id.clone(),
                topic: item.topic.clone(),
                front: item.title.clone(),
                back: format!("{}\n\n{}", item.mnemonic, item.explanation),
            });
        }
    }

    if matches!(kind, None | Some(ReviewKind::Questions)) {
        for question in &content.questions {
            let back = match question.kind {
                QuestionKind::Mcq => {
                    format!("Answer: {}\n\n{}", question.answer, question.explanation)
                }
                QuestionKind::Short => format!(
                    "Key points: {}\n\n{}",
                    question.keywords.join(", "),
                    question.explanation
                ),
            };
            cards.push(ReviewCard {
                id: question.id.clone(),
                topic: question.topic.clone(),
                front: question.stem.clone(),
                back,
            });
        }
    }

    if matches!(kind, None | Some(ReviewKind::Flashcards)) {
        for card in &content.flashcards {
            cards.push(ReviewCard {
                id: card.id.clone(),
                topic: card.topic.clone(),
                front: card.front.clone(),
                back: card.back.clone(),
            });
        }
    }

    if let Some(topic) = topic {
        cards.retain(|card| topic_matches(&card.topic, topic));
    }
    cards
}

/// Keep only cards whose scheduling state says they are due today.
pub fn due_cards(
    cards: Vec<ReviewCard>,
    progress: &ProgressStore,
    today: NaiveDate,
) -> Vec<ReviewCard> {
    cards
        .into_iter()
        .filter(|card| is_due(progress.get(&card.id), today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::load_content;
    use crate::sm2::update_sm2;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn every_content_kind_becomes_cards() {
        let content = load_content().unwrap();
        let all = review_cards(&content, None, None);
        let expected =
            content.mnemonics.len() + content.questions.len() + content.flashcards.len();
        assert_eq!(all.len(), expected);
    }

    #[test]
    fn kind_filter_selects_one_collection() {
        let content = load_content().unwrap();
        let flashcards = review_cards(&content, Some(ReviewKind::Flashcards), None);
        assert_eq!(flashcards.len(), content.flashcards.len());
    }

    #[test]
    fn topic_filter_applies_across_kinds() {
        let content = load_content().unwrap();
        let cards = review_cards(&content, None, Some("membrane"));
        assert!(!cards.is_empty());
        assert!(cards.iter().all(|card| topic_matches(&card.topic, "membrane")));
    }

    #[test]
    fn unreviewed_cards_are_all_due() {
        let content = load_content().unwrap();
        let cards = review_cards(&content, None, None);
        let total = cards.len();
        let due = due_cards(cards, &ProgressStore::new(), date(2024, 1, 2));
        assert_eq!(due.len(), total);
    }

    #[test]
    fn freshly_rated_cards_drop_out_until_due() {
        let content = load_content().unwrap();
        let cards = review_cards(&content, None, None);
        let today = date(2024, 1, 2);

        let mut progress = ProgressStore::new();
        let scheduled = cards[0].id.clone();
        progress.insert(scheduled.clone(), update_sm2(None, 5, today));

        let due = due_cards(cards.clone(), &progress, today);
        assert!(due.iter().all(|card| card.id != scheduled));

        let due_tomorrow = due_cards(cards, &progress, date(2024, 1, 3));
        assert!(due_tomorrow.iter().any(|card| card.id == scheduled));
    }
}
