pub mod content;
pub mod plan;
pub mod progress;
pub mod quiz;
pub mod review_queue;
pub mod sm2;

use std::path::PathBuf;

/// Default location of the progress store.
///
/// This is configuration, not state: every load/save takes the path
/// explicitly, so tests and the `--store` flag can point elsewhere.
pub fn default_progress_path() -> PathBuf {
    dirs::home_dir()
        .unwrap()
        .join(".phyl2002_exam_progress.json")
}

/// Fold `text` into lines of at most `width` columns, breaking on spaces.
pub fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::wrap;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let wrapped = wrap("sodium potassium pump moves three sodium out", 20);
        assert!(wrapped.lines().all(|line| line.len() <= 20));
        assert_eq!(
            wrapped.replace('\n', " "),
            "sodium potassium pump moves three sodium out"
        );
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap("resting potential", 80), "resting potential");
    }
}
