//! Timed study-plan assembly.

use crate::content::ensure_available;
use crate::content::topic_matches;
use crate::content::StudyBlock;
use anyhow::Result;

/// Slice blocks into the available minutes, in bundle order. A focus that
/// matches nothing falls back to every block rather than failing, and any
/// leftover time becomes a self-quiz block.
pub fn build_plan(
    blocks: &[StudyBlock],
    focus: Option<&str>,
    minutes: u32,
) -> Result<Vec<StudyBlock>> {
    let mut filtered: Vec<StudyBlock> = match focus {
        Some(focus) => blocks
            .iter()
            .filter(|block| topic_matches(&block.focus, focus))
            .cloned()
            .collect(),
        None => blocks.to_vec(),
    };
    if filtered.is_empty() {
        filtered = blocks.to_vec();
    }
    let filtered = ensure_available(filtered, "No study blocks available.")?;

    let mut remaining = minutes;
    let mut plan = Vec::new();
    for block in filtered {
        if remaining == 0 {
            break;
        }
        let duration = block.duration.min(remaining);
        remaining -= duration;
        plan.push(StudyBlock { duration, ..block });
    }

    if remaining > 0 {
        plan.push(StudyBlock {
            title: "Self-quiz and teach-back".to_owned(),
            focus: focus.unwrap_or("Mixed").to_owned(),
            duration: remaining,
            actions: vec![
                "Write three questions you missed recently".to_owned(),
                "Teach a tough concept aloud or to a peer".to_owned(),
            ],
        });
    }
    Ok(plan)
}
