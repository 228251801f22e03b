//! Syllable estimation via a fixed vowel-group heuristic
//!
//! The estimate feeds the complex-word count and the Fog Index, so the
//! heuristic is frozen: changing it silently changes every readability
//! score ever produced. No dictionary lookup, no exception list.

/// Estimate the syllable count of a single word.
///
/// The word is lowercased; a syllable is a maximal run of vowels
/// (`aeiouy`). Words ending in "es" or "ed" lose one syllable for the
/// usually-silent suffix. The result is clamped to at least 1, and an
/// empty word reports 1.
pub fn count_syllables(word: &str) -> usize {
    let lowered = word.to_lowercase();

    if lowered.is_empty() {
        return 1;
    }

    let mut groups: usize = 0;
    let mut in_vowel_group = false;

    for c in lowered.chars() {
        if is_vowel(c) {
            if !in_vowel_group {
                groups += 1;
                in_vowel_group = true;
            }
        } else {
            in_vowel_group = false;
        }
    }

    if lowered.ends_with("es") || lowered.ends_with("ed") {
        groups = groups.saturating_sub(1);
    }

    groups.max(1)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_values() {
        assert_eq!(count_syllables("cake"), 2);
        assert_eq!(count_syllables("cakes"), 1);
    }

    #[test]
    fn test_vowel_groups() {
        assert_eq!(count_syllables("cat"), 1);
        // "eau", "i", "u" are the three vowel groups
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("queue"), 1);
        assert_eq!(count_syllables("rhythm"), 1);
    }

    #[test]
    fn test_silent_suffixes() {
        // Trailing "ed" subtracts one group
        assert_eq!(count_syllables("walked"), 1);
        // Subtraction never drops below one
        assert_eq!(count_syllables("bed"), 1);
        assert_eq!(count_syllables("yes"), 1);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(count_syllables("CAKE"), count_syllables("cake"));
        assert_eq!(count_syllables("Beautiful"), count_syllables("beautiful"));
    }

    #[test]
    fn test_degenerate_words() {
        assert_eq!(count_syllables(""), 1);
        assert_eq!(count_syllables("b"), 1);
        assert_eq!(count_syllables("a"), 1);
    }
}
