//! Static quote table keyed by (virtue, door).

use std::collections::HashMap;
use std::sync::LazyLock;

use super::model::{Door, Quote, QuoteType, Virtue};

static QUOTES: LazyLock<HashMap<(Virtue, Door), Quote>> = LazyLock::new(|| {
    let entries: [(Virtue, Door, &str, &str); 8] = [
        (
            Virtue::Wisdom,
            Door::Christian,
            "If any of you lacks wisdom, let him ask God, who gives generously to all without reproach, and it will be given him.",
            "James 1:5",
        ),
        (
            Virtue::Wisdom,
            Door::Secular,
            "The only true wisdom is in knowing you know nothing.",
            "Socrates",
        ),
        (
            Virtue::Courage,
            Door::Christian,
            "Be strong and courageous. Do not be frightened, and do not be dismayed, for the Lord your God is with you wherever you go.",
            "Joshua 1:9",
        ),
        (
            Virtue::Courage,
            Door::Secular,
            "Courage is not the absence of fear, but the triumph over it.",
            "Nelson Mandela",
        ),
        (
            Virtue::Justice,
            Door::Christian,
            "He has told you, O man, what is good; and what does the Lord require of you but to do justice, and to love kindness, and to walk humbly with your God?",
            "Micah 6:8",
        ),
        (
            Virtue::Justice,
            Door::Secular,
            "Injustice anywhere is a threat to justice everywhere.",
            "Martin Luther King Jr.",
        ),
        (
            Virtue::Temperance,
            Door::Christian,
            "But the fruit of the Spirit is love, joy, peace, patience, kindness, goodness, faithfulness, gentleness, self-control.",
            "Galatians 5:22-23",
        ),
        (
            Virtue::Temperance,
            Door::Secular,
            "No man is free who is not master of himself.",
            "Epictetus",
        ),
    ];

    entries
        .into_iter()
        .map(|(virtue, door, text, source)| {
            let quote = Quote {
                text: text.to_string(),
                source: source.to_string(),
                kind: quote_type(door),
            };
            ((virtue, door), quote)
        })
        .collect()
});

/// How quotes behind a door are presented.
pub fn quote_type(door: Door) -> QuoteType {
    match door {
        Door::Christian => QuoteType::Biblical,
        Door::Secular => QuoteType::Wisdom,
    }
}

/// The quote for a virtue behind a door.
pub fn quote_for(virtue: Virtue, door: Door) -> &'static Quote {
    // The table is built from a literal covering every (virtue, door) pair.
    &QUOTES[&(virtue, door)]
}
