// SPDX-License-Identifier: Apache-2.0

//! Text utility functions for stalewatch.

/// Truncates text to a maximum length with an ellipsis suffix "...".
///
/// Uses character count (not byte count) to safely handle multi-byte UTF-8.
/// The suffix is included in the max length calculation.
///
/// # Examples
///
/// ```
/// use stalewatch_core::utils::truncate;
///
/// assert_eq!(truncate("Hello", 10), "Hello");
///
/// let long = "Crash when the config directory is a symlink to another volume";
/// let result = truncate(long, 20);
/// assert!(result.ends_with("..."));
/// assert_eq!(result.chars().count(), 20);
/// ```
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    const SUFFIX: &str = "...";

    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(SUFFIX.len());
    let truncated: String = text.chars().take(keep).collect();
    format!("{truncated}{SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("Short", 60), "Short");
        assert_eq!(truncate("", 60), "");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        let text = "a".repeat(60);
        assert_eq!(truncate(&text, 60), text);
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "b".repeat(61);
        let result = truncate(&text, 60);
        assert_eq!(result.chars().count(), 60);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "日本語のタイトルがとても長い";
        let result = truncate(text, 8);
        assert_eq!(result, "日本語のタ...");
    }
}
