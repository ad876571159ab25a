//! Sentence splitting for bullet-list slides.

/// Separator between bullet candidates.
pub const BULLET_SEPARATOR: &str = ". ";

/// Split `body` into bullets.
///
/// Candidates are separated by `". "`, trimmed, and empties dropped. A body
/// without a separator yields one bullet (the trimmed body); a blank body
/// yields none.
///
/// ```
/// use deckwright::deck::split_bullets;
///
/// assert_eq!(split_bullets("A. B. C"), vec!["A", "B", "C"]);
/// assert_eq!(split_bullets("Just one sentence"), vec!["Just one sentence"]);
/// assert!(split_bullets("  ").is_empty());
/// ```
pub fn split_bullets(body: &str) -> Vec<String> {
    body.split(BULLET_SEPARATOR)
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trailing_period_is_kept() {
        // Only ". " separates; a final period stays on its bullet.
        assert_eq!(
            split_bullets("Fast. Cheap.  . Reliable."),
            vec!["Fast", "Cheap", "Reliable."]
        );
    }

    #[test]
    fn test_newlines_are_not_separators() {
        assert_eq!(split_bullets("one\ntwo. three"), vec!["one\ntwo", "three"]);
    }

    proptest! {
        #[test]
        fn prop_bullets_are_trimmed_and_nonempty(body in ".{0,200}") {
            for bullet in split_bullets(&body) {
                prop_assert!(!bullet.is_empty());
                prop_assert_eq!(bullet.trim(), bullet.as_str());
                prop_assert!(!bullet.contains(BULLET_SEPARATOR));
            }
        }

        #[test]
        fn prop_sentences_round_trip(words in prop::collection::vec("[A-Za-z][A-Za-z ]{0,15}[A-Za-z]", 0..12)) {
            let body = words.join(BULLET_SEPARATOR);
            prop_assert_eq!(split_bullets(&body), words);
        }

        #[test]
        fn prop_count_bounded_by_separators(body in "[a-c. ]{0,60}") {
            let bound = body.matches(BULLET_SEPARATOR).count() + 1;
            prop_assert!(split_bullets(&body).len() <= bound);
        }
    }
}
