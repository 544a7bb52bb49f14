//! SM-2 review scheduling.
//!
//! Each study item carries a [`ReviewState`]; every rating event maps the
//! old state to a new one. `repetitions` discriminates which interval rule
//! applies (0 = new or just failed, 1 = one success, >=2 = established),
//! while `efactor` is carried forward continuously regardless of branch.

use chrono::Duration;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// Ease factors never drop below this; smaller values would collapse
/// the interval growth into daily reviews forever.
pub const MIN_EFACTOR: f64 = 1.3;

/// Ratings below this count as a failed recall.
pub const PASSING_RATING: i32 = 3;

fn default_efactor() -> f64 {
    2.5
}

/// Scheduling record for one study item.
///
/// Value type, construct-and-replace: [`update_sm2`] never mutates its
/// input. Fields missing from a persisted entry deserialize to the
/// first-ever-review defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default)]
    pub interval: u32,
    #[serde(default = "default_efactor")]
    pub efactor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            repetitions: 0,
            interval: 0,
            efactor: default_efactor(),
            due: None,
        }
    }
}

/// An item with no entry, or no recorded due date, is always due.
pub fn is_due(entry: Option<&ReviewState>, today: NaiveDate) -> bool {
    match entry.and_then(|state| state.due) {
        Some(due) => due <= today,
        None => true,
    }
}

/// Apply one rating event and produce the next state.
///
/// The rating is clamped into `[0, 5]`. The ease factor is adjusted
/// before the repetition branch, so interval growth for established
/// items uses the ease factor updated by this same rating.
pub fn update_sm2(entry: Option<&ReviewState>, rating: i32, today: NaiveDate) -> ReviewState {
    let prior = entry.cloned().unwrap_or_default();

    let rating = rating.clamp(0, 5);
    let q = f64::from(rating);
    let efactor = (prior.efactor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02))).max(MIN_EFACTOR);

    let (repetitions, interval) = if rating < PASSING_RATING {
        // failed recall: back to tomorrow, whatever the history was
        (0, 1)
    } else {
        let interval = match prior.repetitions {
            0 => 1,
            1 => 6,
            _ => ((prior.interval as f64 * efactor).round() as u32).max(1),
        };
        (prior.repetitions + 1, interval)
    };

    ReviewState {
        repetitions,
        interval,
        efactor,
        due: Some(today + Duration::days(i64::from(interval))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn low_rating_resets_repetitions() {
        let entry = ReviewState {
            repetitions: 2,
            interval: 6,
            efactor: 2.5,
            due: Some(date(2024, 1, 1)),
        };
        let today = date(2024, 1, 2);

        let state = update_sm2(Some(&entry), 2, today);

        assert_eq!(state.repetitions, 0);
        assert_eq!(state.interval, 1);
        assert_eq!(state.due, Some(date(2024, 1, 3)));
    }

    #[test]
    fn every_failing_rating_schedules_tomorrow() {
        let entry = ReviewState {
            repetitions: 7,
            interval: 40,
            efactor: 2.8,
            due: Some(date(2024, 1, 1)),
        };
        for rating in 0..3 {
            let state = update_sm2(Some(&entry), rating, date(2024, 1, 2));
            assert_eq!(state.repetitions, 0);
            assert_eq!(state.interval, 1);
        }
    }

    #[test]
    fn first_review_schedules_tomorrow() {
        let state = update_sm2(None, 5, date(2024, 1, 2));

        assert_eq!(state.repetitions, 1);
        assert_eq!(state.interval, 1);
        assert_eq!(state.due, Some(date(2024, 1, 3)));
    }

    #[test]
    fn second_success_uses_fixed_six_day_interval() {
        let entry = ReviewState {
            repetitions: 1,
            interval: 1,
            efactor: 2.5,
            due: Some(date(2024, 1, 1)),
        };
        let today = date(2024, 1, 2);

        let state = update_sm2(Some(&entry), 5, today);

        assert_eq!(state.repetitions, 2);
        assert_eq!(state.interval, 6);
        assert_eq!(state.due, Some(date(2024, 1, 8)));
    }

    #[test]
    fn established_item_grows_by_updated_efactor() {
        let entry = ReviewState {
            repetitions: 2,
            interval: 6,
            efactor: 2.5,
            due: Some(date(2024, 1, 1)),
        };

        let state = update_sm2(Some(&entry), 5, date(2024, 1, 2));

        // rating 5 lifts the ease factor to 2.6 before growth applies
        assert_eq!(state.repetitions, 3);
        assert_eq!(state.interval, 16);
        assert!((state.efactor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn efactor_never_drops_below_floor() {
        let mut entry = ReviewState {
            efactor: 1.35,
            ..ReviewState::default()
        };
        for _ in 0..5 {
            entry = update_sm2(Some(&entry), 0, date(2024, 1, 2));
            assert!(entry.efactor >= MIN_EFACTOR);
        }
        assert_eq!(entry.efactor, MIN_EFACTOR);
    }

    #[test]
    fn ratings_are_clamped_into_range() {
        let entry = ReviewState {
            repetitions: 1,
            interval: 1,
            efactor: 2.5,
            due: Some(date(2024, 1, 1)),
        };
        let today = date(2024, 1, 2);

        assert_eq!(
            update_sm2(Some(&entry), -5, today),
            update_sm2(Some(&entry), 0, today)
        );
        assert_eq!(
            update_sm2(Some(&entry), 99, today),
            update_sm2(Some(&entry), 5, today)
        );
    }

    #[test]
    fn missing_entry_is_due() {
        assert!(is_due(None, date(2024, 1, 5)));
    }

    #[test]
    fn entry_without_due_date_is_due() {
        let entry = ReviewState::default();
        assert!(is_due(Some(&entry), date(2024, 1, 5)));
    }

    #[test]
    fn due_date_gates_eligibility() {
        let today = date(2024, 1, 5);
        let entry = ReviewState {
            due: Some(today + Duration::days(2)),
            ..ReviewState::default()
        };

        assert!(!is_due(Some(&entry), today));
        assert!(!is_due(Some(&entry), today + Duration::days(1)));
        assert!(is_due(Some(&entry), today + Duration::days(2)));
        assert!(is_due(Some(&entry), today + Duration::days(3)));
    }

    #[test]
    fn state_round_trips_through_json() {
        let state = update_sm2(None, 4, date(2024, 1, 2));

        let raw = serde_json::to_string(&state).unwrap();
        assert!(raw.contains("\"due\":\"2024-01-03\""));

        let back: ReviewState = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, state);
    }
}
