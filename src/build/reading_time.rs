//! Reading-time estimate for lesson content.

use crate::content::ReadingTime;

/// Average adult reading speed
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Estimate reading time of plain text, rounding minutes up.
///
/// Returns `None` for text without any words.
pub fn estimate(text: &str, words_per_minute: u32) -> Option<ReadingTime> {
    let words = text.split_whitespace().count();
    if words == 0 {
        return None;
    }

    let wpm = words_per_minute.max(1) as usize;
    let minutes = words.div_ceil(wpm) as u32;

    Some(ReadingTime { minutes, words })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_rounds_up() {
        let text = "word ".repeat(201);
        let rt = estimate(&text, 200).unwrap();
        assert_eq!(rt.words, 201);
        assert_eq!(rt.minutes, 2);
    }

    #[test]
    fn test_short_text_is_one_minute() {
        assert_eq!(estimate("Sleep tight", 200).unwrap().minutes, 1);
    }

    #[test]
    fn test_empty_text() {
        assert!(estimate("   ", 200).is_none());
    }
}
