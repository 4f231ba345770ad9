//! Address suggestions for partially typed locations.

use crate::location::input_len;

/// Minimum input length, in UTF-16 units, before suggestions are requested.
pub const MIN_SUGGESTION_INPUT_CHARS: usize = 3;

/// Default country restriction for suggestions (ISO 3166-1 alpha-2).
pub const DEFAULT_COUNTRY: &str = "in";

/// Source of candidate addresses. Implementations return an empty list on any
/// failure; suggestions are best-effort.
pub trait PlaceSuggester: Send + Sync {
    fn suggest(&self, partial: &str, country: &str) -> Vec<String>;
}

/// Suggester used when no mapping credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPlaceSuggester;

impl PlaceSuggester for DisabledPlaceSuggester {
    fn suggest(&self, _partial: &str, _country: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Ask `suggester` for candidates, skipping the call entirely for input
/// shorter than [`MIN_SUGGESTION_INPUT_CHARS`].
pub fn suggest_places(suggester: &dyn PlaceSuggester, partial: &str, country: &str) -> Vec<String> {
    if input_len(partial) < MIN_SUGGESTION_INPUT_CHARS {
        return Vec::new();
    }
    suggester.suggest(partial, country)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingSuggester {
        calls: AtomicUsize,
    }

    impl PlaceSuggester for RecordingSuggester {
        fn suggest(&self, partial: &str, country: &str) -> Vec<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            vec![format!("{partial}, {country}")]
        }
    }

    #[test]
    fn short_input_never_reaches_suggester() {
        let suggester = RecordingSuggester::default();
        assert!(suggest_places(&suggester, "MG", DEFAULT_COUNTRY).is_empty());
        assert_eq!(suggester.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn three_characters_are_enough() {
        let suggester = RecordingSuggester::default();
        let suggestions = suggest_places(&suggester, "Koh", DEFAULT_COUNTRY);
        assert_eq!(suggestions, vec!["Koh, in".to_string()]);
    }

    #[test]
    fn length_is_counted_in_utf16_units() {
        let suggester = RecordingSuggester::default();
        // Two units, six bytes.
        assert!(suggest_places(&suggester, "दि", DEFAULT_COUNTRY).is_empty());
        // A surrogate pair plus one letter is three units.
        assert_eq!(suggest_places(&suggester, "🚕a", DEFAULT_COUNTRY).len(), 1);
        assert_eq!(suggester.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn disabled_suggester_is_empty() {
        assert!(suggest_places(&DisabledPlaceSuggester, "Indiranagar", "in").is_empty());
    }
}
