//! Closed vocabularies the extractor matches against.
//!
//! Matching is substring-based over a lightly lemmatized question, so a
//! sign name that is also an ordinary English word will collide. That is
//! an accepted limitation of keyword extraction.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use urania::aspects::AspectKind;
use urania::types::{ordinal, Body, Sign};

pub const BODY_ALIASES: &[(&str, Body)] = &[
    ("sun", Body::Sun),
    ("moon", Body::Moon),
    ("mercury", Body::Mercury),
    ("venus", Body::Venus),
    ("mars", Body::Mars),
    ("jupiter", Body::Jupiter),
    ("saturn", Body::Saturn),
    ("uranus", Body::Uranus),
    ("neptune", Body::Neptune),
    ("pluto", Body::Pluto),
    ("north node", Body::MeanNode),
    ("mean node", Body::MeanNode),
    ("rahu", Body::Rahu),
    ("ketu", Body::Ketu),
    ("south node", Body::Ketu),
    ("ascendant", Body::Ascendant),
    ("asc", Body::Ascendant),
    ("rising sign", Body::Ascendant),
    ("midheaven", Body::Midheaven),
    ("mc", Body::Midheaven),
];

pub const ASPECT_ALIASES: &[(&str, AspectKind)] = &[
    ("conjunction", AspectKind::Conjunction),
    ("conjunct", AspectKind::Conjunction),
    ("sextile", AspectKind::Sextile),
    ("square", AspectKind::Square),
    ("trine", AspectKind::Trine),
    ("opposition", AspectKind::Opposition),
    ("opposed", AspectKind::Opposition),
    ("opposite", AspectKind::Opposition),
];

/// A chart element a life-area topic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartElement {
    Body(Body),
    House(u8),
    Sign(Sign),
}

impl ChartElement {
    pub fn label(&self) -> String {
        match self {
            ChartElement::Body(b) => b.label().to_string(),
            ChartElement::House(n) => format!("the {} house", ordinal(*n)),
            ChartElement::Sign(s) => s.name().to_string(),
        }
    }
}

/// Life-area topics and the chart elements they are read from. The topic
/// word itself is what the extractor looks for in the raw question.
pub const LIFE_AREAS: &[(&str, &[ChartElement])] = &[
    (
        "career",
        &[
            ChartElement::House(10),
            ChartElement::Body(Body::Midheaven),
            ChartElement::Body(Body::Saturn),
        ],
    ),
    (
        "love",
        &[
            ChartElement::Body(Body::Venus),
            ChartElement::House(5),
            ChartElement::House(7),
        ],
    ),
    (
        "relationships",
        &[ChartElement::Body(Body::Venus), ChartElement::House(7)],
    ),
    (
        "money",
        &[
            ChartElement::House(2),
            ChartElement::Body(Body::Venus),
            ChartElement::Body(Body::Jupiter),
        ],
    ),
    (
        "finances",
        &[
            ChartElement::House(2),
            ChartElement::House(8),
            ChartElement::Body(Body::Pluto),
        ],
    ),
    (
        "health",
        &[
            ChartElement::House(6),
            ChartElement::House(1),
            ChartElement::Body(Body::Ascendant),
        ],
    ),
    (
        "self",
        &[
            ChartElement::House(1),
            ChartElement::Body(Body::Ascendant),
            ChartElement::Body(Body::Sun),
        ],
    ),
    (
        "emotions",
        &[
            ChartElement::Body(Body::Moon),
            ChartElement::Sign(Sign::Cancer),
            ChartElement::House(4),
        ],
    ),
    (
        "communication",
        &[
            ChartElement::Body(Body::Mercury),
            ChartElement::House(3),
            ChartElement::Sign(Sign::Gemini),
        ],
    ),
    (
        "home",
        &[
            ChartElement::House(4),
            ChartElement::Body(Body::Moon),
            ChartElement::Sign(Sign::Cancer),
        ],
    ),
    ("family", &[ChartElement::House(4), ChartElement::Body(Body::Moon)]),
    (
        "creativity",
        &[
            ChartElement::House(5),
            ChartElement::Body(Body::Venus),
            ChartElement::Sign(Sign::Leo),
        ],
    ),
    ("children", &[ChartElement::House(5)]),
    (
        "work",
        &[
            ChartElement::House(6),
            ChartElement::Body(Body::Mercury),
            ChartElement::Sign(Sign::Virgo),
        ],
    ),
    (
        "partnerships",
        &[
            ChartElement::House(7),
            ChartElement::Body(Body::Venus),
            ChartElement::Sign(Sign::Libra),
        ],
    ),
    (
        "transformation",
        &[
            ChartElement::House(8),
            ChartElement::Body(Body::Pluto),
            ChartElement::Sign(Sign::Scorpio),
        ],
    ),
    ("shared resources", &[ChartElement::House(8)]),
    (
        "philosophy",
        &[
            ChartElement::House(9),
            ChartElement::Body(Body::Jupiter),
            ChartElement::Sign(Sign::Sagittarius),
        ],
    ),
    ("travel", &[ChartElement::House(9), ChartElement::Body(Body::Jupiter)]),
    ("higher education", &[ChartElement::House(9)]),
    (
        "public image",
        &[ChartElement::House(10), ChartElement::Body(Body::Midheaven)],
    ),
    (
        "ambition",
        &[
            ChartElement::House(10),
            ChartElement::Body(Body::Saturn),
            ChartElement::Body(Body::Mars),
        ],
    ),
    (
        "friendships",
        &[
            ChartElement::House(11),
            ChartElement::Body(Body::Uranus),
            ChartElement::Sign(Sign::Aquarius),
        ],
    ),
    ("groups", &[ChartElement::House(11)]),
    (
        "spirituality",
        &[
            ChartElement::House(12),
            ChartElement::Body(Body::Neptune),
            ChartElement::Sign(Sign::Pisces),
        ],
    ),
    ("subconscious", &[ChartElement::House(12)]),
];

/// Function words skipped when collecting residual keywords.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "am", "an", "and", "any", "are", "be", "can", "could", "do", "does", "for",
    "from", "have", "here", "how", "i", "in", "is", "it", "like", "look", "looking", "me", "mean",
    "my", "of", "on", "or", "please", "tell", "that", "the", "there", "this", "to", "was", "what",
    "when", "where", "which", "who", "will", "with", "would", "you", "your",
];

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[a-z0-9]+").expect("token pattern");

    /// "7th house".
    pub static ref HOUSE_ORDINAL_RE: Regex =
        Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th) house\b").expect("house ordinal pattern");

    /// "house 7", anchored so "house 1" cannot fire inside "house 12".
    pub static ref HOUSE_NUMBER_RE: Regex =
        Regex::new(r"\bhouse (\d{1,2})\b").expect("house number pattern");

    /// Lowercased sign names.
    pub static ref SIGN_ALIASES: Vec<(String, Sign)> = Sign::ALL
        .iter()
        .map(|s| (s.name().to_lowercase(), *s))
        .collect();

    /// "1st house" .. "12th house" and "house 1" .. "house 12".
    pub static ref HOUSE_PHRASES: Vec<(String, u8)> = {
        let mut phrases = Vec::with_capacity(24);
        for n in 1..=12u8 {
            phrases.push((format!("{} house", ordinal(n)), n));
            phrases.push((format!("house {}", n), n));
        }
        phrases
    };

    /// Every word that appears in some vocabulary entry; such words are
    /// never stemmed.
    static ref VOCAB_WORDS: HashSet<String> = {
        let mut words = HashSet::new();
        for (alias, _) in BODY_ALIASES {
            for word in alias.split_whitespace() {
                words.insert(word.to_string());
            }
        }
        for (alias, _) in SIGN_ALIASES.iter() {
            words.insert(alias.clone());
        }
        for (alias, _) in ASPECT_ALIASES {
            words.insert((*alias).to_string());
        }
        for (phrase, _) in HOUSE_PHRASES.iter() {
            for word in phrase.split_whitespace() {
                words.insert(word.to_string());
            }
        }
        words
    };
}

/// Lowercased word tokens of a text.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fold a token toward the closed vocabulary: vocabulary words pass
/// through untouched, everything else has common English endings stripped
/// when the stem is a vocabulary word ("squares" → "square").
pub fn lemma(token: &str) -> String {
    if VOCAB_WORDS.contains(token) {
        return token.to_string();
    }
    for suffix in ["'s", "ing", "ed", "es", "s"] {
        if token.len() > suffix.len() + 2 && token.ends_with(suffix) {
            let stem = &token[..token.len() - suffix.len()];
            if VOCAB_WORDS.contains(stem) {
                return stem.to_string();
            }
        }
    }
    token.to_string()
}
