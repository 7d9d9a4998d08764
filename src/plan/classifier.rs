//! Struggle tag → virtue classification.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::model::Virtue;

/// Known struggle tags and the virtue each one calls for.
static STRUGGLE_VIRTUES: LazyLock<HashMap<&'static str, Virtue>> = LazyLock::new(|| {
    HashMap::from([
        // Wisdom
        ("decision-paralysis", Virtue::Wisdom),
        ("overthinking", Virtue::Wisdom),
        ("lack-of-direction", Virtue::Wisdom),
        ("information-overload", Virtue::Wisdom),
        ("purpose-confusion", Virtue::Wisdom),
        // Courage
        ("fear-failure", Virtue::Courage),
        ("procrastination", Virtue::Courage),
        ("anxiety", Virtue::Courage),
        ("avoiding-hard-conversations", Virtue::Courage),
        ("people-pleasing", Virtue::Courage),
        // Justice
        ("relationship-conflicts", Virtue::Justice),
        ("resentment", Virtue::Justice),
        ("comparison", Virtue::Justice),
        ("workplace-tension", Virtue::Justice),
        ("neglecting-others", Virtue::Justice),
        // Temperance
        ("social-media-overwhelm", Virtue::Temperance),
        ("screen-time", Virtue::Temperance),
        ("overeating", Virtue::Temperance),
        ("anger", Virtue::Temperance),
        ("impulse-spending", Virtue::Temperance),
        ("overcommitment", Virtue::Temperance),
    ])
});

/// The virtue a single struggle tag maps to, if the tag is known.
pub fn virtue_for(tag: &str) -> Option<Virtue> {
    STRUGGLE_VIRTUES.get(tag).copied()
}

/// All recognized struggle tags, sorted.
pub fn known_struggles() -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = STRUGGLE_VIRTUES.keys().copied().collect();
    tags.sort_unstable();
    tags
}

/// Pick the primary virtue for a set of struggles.
///
/// Each recognized tag adds one to its virtue; unknown tags are ignored.
/// The highest count wins. A later virtue in [`Virtue::ALL`] only replaces
/// the current leader with a strictly greater count, so ties (including the
/// all-zero case) go to the earlier virtue, and an empty input yields
/// [`Virtue::Wisdom`].
pub fn classify<S: AsRef<str>>(struggles: &[S]) -> Virtue {
    let mut counts = [0usize; Virtue::ALL.len()];
    for tag in struggles {
        if let Some(virtue) = virtue_for(tag.as_ref()) {
            counts[virtue as usize] += 1;
        }
    }

    let mut best = Virtue::ALL[0];
    let mut best_count = counts[0];
    for (virtue, count) in Virtue::ALL.iter().zip(counts).skip(1) {
        if count > best_count {
            best = *virtue;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_defaults_to_wisdom() {
        let none: [&str; 0] = [];
        assert_eq!(classify(&none), Virtue::Wisdom);
    }

    #[test]
    fn unknown_tags_are_ignored() {
        assert_eq!(classify(&["not-a-tag", "also-unknown"]), Virtue::Wisdom);
        assert_eq!(classify(&["not-a-tag", "anger"]), Virtue::Temperance);
    }

    #[test]
    fn single_tags_map_to_their_virtue() {
        assert_eq!(classify(&["fear-failure"]), Virtue::Courage);
        assert_eq!(classify(&["relationship-conflicts"]), Virtue::Justice);
        assert_eq!(classify(&["social-media-overwhelm"]), Virtue::Temperance);
        assert_eq!(classify(&["decision-paralysis"]), Virtue::Wisdom);
    }

    #[test]
    fn highest_count_wins() {
        let tags = ["fear-failure", "anger", "screen-time", "overthinking"];
        assert_eq!(classify(&tags), Virtue::Temperance);
    }

    #[test]
    fn ties_go_to_earlier_virtue() {
        assert_eq!(classify(&["anger", "fear-failure"]), Virtue::Courage);
        assert_eq!(classify(&["resentment", "overthinking"]), Virtue::Wisdom);
        assert_eq!(
            classify(&["anger", "resentment", "screen-time", "comparison"]),
            Virtue::Justice
        );
    }

    #[test]
    fn accepts_owned_strings() {
        let tags = vec!["procrastination".to_string()];
        assert_eq!(classify(&tags), Virtue::Courage);
    }

    #[test]
    fn every_virtue_has_known_struggles() {
        for virtue in Virtue::ALL {
            assert!(
                known_struggles()
                    .iter()
                    .any(|tag| virtue_for(tag) == Some(virtue)),
                "no struggle maps to {virtue}"
            );
        }
    }
}
