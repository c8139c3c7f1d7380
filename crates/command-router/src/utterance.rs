//! Utterance normalisation and wake-word handling

/// Wake words recognised out of the box, tried in this order
pub const DEFAULT_WAKE_WORDS: &[&str] = &["jarvis", "hey jarvis"];

/// Trim and lowercase raw recognised or typed text
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Remove the first wake word that prefixes `text`.
///
/// Wake words are optional: text without one is returned unchanged. The
/// remainder is trimmed, so `"jarvis open google"` becomes `"open google"`.
pub fn strip_wake_word<'a, S: AsRef<str>>(text: &'a str, wake_words: &[S]) -> &'a str {
    for word in wake_words {
        let word = word.as_ref().trim().to_lowercase();
        if word.is_empty() {
            continue;
        }
        if let Some(rest) = text.strip_prefix(word.as_str()) {
            return rest.trim();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Open YouTube \n"), "open youtube");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn strips_configured_prefix() {
        assert_eq!(strip_wake_word("jarvis open google", DEFAULT_WAKE_WORDS), "open google");
        assert_eq!(strip_wake_word("hey jarvis tell me a joke", DEFAULT_WAKE_WORDS), "tell me a joke");
        assert_eq!(strip_wake_word("open google", DEFAULT_WAKE_WORDS), "open google");
    }

    #[test]
    fn wake_word_must_be_a_prefix() {
        assert_eq!(strip_wake_word("ask jarvis the time", DEFAULT_WAKE_WORDS), "ask jarvis the time");
    }

    #[test]
    fn bare_wake_word_leaves_nothing() {
        assert_eq!(strip_wake_word("jarvis", DEFAULT_WAKE_WORDS), "");
    }

    #[test]
    fn configured_words_are_case_normalised() {
        let words = vec!["Friday".to_string(), " ".to_string()];
        assert_eq!(strip_wake_word("friday what is rust", &words), "what is rust");
    }
}
