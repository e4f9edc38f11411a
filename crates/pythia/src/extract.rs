//! Entity extraction from free-text questions.

use std::collections::BTreeSet;

use urania::aspects::AspectKind;
use urania::types::{Body, Sign};

use crate::lexicon::{
    lemma, tokenize, ASPECT_ALIASES, BODY_ALIASES, HOUSE_NUMBER_RE, HOUSE_ORDINAL_RE, LIFE_AREAS,
    SIGN_ALIASES, STOPWORDS,
};

/// Chart-entity references found in one question. Kinds are not mutually
/// exclusive; the set is discarded once the answer is produced.
#[derive(Debug, Clone, Default)]
pub struct ExtractedEntities {
    pub bodies: BTreeSet<Body>,
    pub signs: BTreeSet<Sign>,
    pub houses: BTreeSet<u8>,
    pub aspect_kinds: BTreeSet<AspectKind>,
    pub life_areas: BTreeSet<&'static str>,
    /// Residual content words for last-resort matching.
    pub keywords: BTreeSet<String>,
}

/// Parse a question into typed entity references.
///
/// Vocabulary matching runs over the lemmatized text; life-area topics are
/// matched against the raw lowercased question.
pub fn extract(question: &str) -> ExtractedEntities {
    let raw = question.to_lowercase();
    let tokens: Vec<String> = tokenize(question).iter().map(|t| lemma(t)).collect();
    let lemma_text = tokens.join(" ");

    let mut entities = ExtractedEntities::default();

    for (alias, body) in BODY_ALIASES {
        if lemma_text.contains(alias) {
            entities.bodies.insert(*body);
        }
    }
    for (alias, sign) in SIGN_ALIASES.iter() {
        if lemma_text.contains(alias.as_str()) {
            entities.signs.insert(*sign);
        }
    }
    for re in [&*HOUSE_ORDINAL_RE, &*HOUSE_NUMBER_RE] {
        for capture in re.captures_iter(&lemma_text) {
            if let Ok(number) = capture[1].parse::<u8>() {
                if (1..=12).contains(&number) {
                    entities.houses.insert(number);
                }
            }
        }
    }
    for (alias, kind) in ASPECT_ALIASES {
        if lemma_text.contains(alias) {
            entities.aspect_kinds.insert(*kind);
        }
    }
    for (topic, _) in LIFE_AREAS {
        if raw.contains(topic) {
            entities.life_areas.insert(*topic);
        }
    }
    for token in &tokens {
        if token.len() >= 3 && !STOPWORDS.contains(&token.as_str()) {
            entities.keywords.insert(token.clone());
        }
    }

    entities
}
