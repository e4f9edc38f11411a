//! The interpretation index: an injected read-only map from structured
//! placement keys to prepared text. The resolver never assumes anything
//! about where the data came from; JSON is simply the loading format.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use urania::aspects::AspectKind;
use urania::types::{ordinal, Body, Sign};
use urania::Chart;

/// Structured key of one interpretation entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterpKey {
    BodyInSign { body: Body, sign: Sign },
    BodyInHouse { body: Body, house: u8 },
    AspectPair { body_a: Body, body_b: Body, aspect: AspectKind },
    HouseCuspSign { house: u8, sign: Sign },
    Nakshatra { name: String },
}

impl InterpKey {
    pub fn describe(&self) -> String {
        match self {
            InterpKey::BodyInSign { body, sign } => format!("{} in {}", body, sign),
            InterpKey::BodyInHouse { body, house } => {
                format!("{} in the {} house", body, ordinal(*house))
            }
            InterpKey::AspectPair {
                body_a,
                body_b,
                aspect,
            } => format!("{} {} {}", body_a, aspect, body_b),
            InterpKey::HouseCuspSign { house, sign } => {
                format!("the {} house cusp in {}", ordinal(*house), sign)
            }
            InterpKey::Nakshatra { name } => format!("the nakshatra {}", name),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CorpusEntry {
    #[serde(flatten)]
    key: InterpKey,
    text: String,
}

/// Read-only keyed lookup over interpretation text.
#[derive(Debug, Clone, Default)]
pub struct InterpretationIndex {
    entries: HashMap<InterpKey, String>,
}

lazy_static! {
    static ref BUILTIN: InterpretationIndex = InterpretationIndex::from_json(include_str!(
        "../data/corpus.json"
    ))
    .expect("embedded corpus is valid JSON");
}

impl InterpretationIndex {
    /// Load an index from a JSON array of keyed entries.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries: Vec<CorpusEntry> = serde_json::from_str(json)?;
        Ok(Self {
            entries: entries.into_iter().map(|e| (e.key, e.text)).collect(),
        })
    }

    /// The corpus compiled into the crate.
    pub fn builtin() -> &'static InterpretationIndex {
        &BUILTIN
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, key: &InterpKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Lookup that degrades a miss into a readable line instead of failing.
    pub fn lookup_or_miss(&self, key: &InterpKey) -> String {
        self.lookup(key)
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "No specific interpretation is available for {} yet.",
                    key.describe()
                )
            })
    }

    /// Aspect text for an unordered pair: tries both orders.
    pub fn aspect_text(&self, a: Body, b: Body, aspect: AspectKind) -> Option<&str> {
        self.lookup(&InterpKey::AspectPair {
            body_a: a,
            body_b: b,
            aspect,
        })
        .or_else(|| {
            self.lookup(&InterpKey::AspectPair {
                body_a: b,
                body_b: a,
                aspect,
            })
        })
    }
}

/// Render every interpretation the index holds for this chart, one line
/// per placement. Used for display and for last-resort keyword matching.
pub fn chart_interpretations(chart: &Chart, index: &InterpretationIndex) -> Vec<String> {
    let mut lines = Vec::new();

    for body in &chart.bodies {
        let sign = body.position.sign;
        if let Some(text) = index.lookup(&InterpKey::BodyInSign { body: body.body, sign }) {
            lines.push(format!("{} in {}: {}", body.body, sign, text));
        }
        if let Some(text) = index.lookup(&InterpKey::BodyInHouse {
            body: body.body,
            house: body.house,
        }) {
            lines.push(format!(
                "{} in the {} house: {}",
                body.body,
                ordinal(body.house),
                text
            ));
        }
        if let Some(nakshatra) = body.nakshatra {
            if let Some(text) = index.lookup(&InterpKey::Nakshatra {
                name: nakshatra.to_string(),
            }) {
                lines.push(format!("{} in {}: {}", body.body, nakshatra, text));
            }
        }
    }

    for angle in [&chart.ascendant, &chart.midheaven] {
        if let Some(text) = index.lookup(&InterpKey::BodyInSign {
            body: angle.name,
            sign: angle.position.sign,
        }) {
            lines.push(format!("{} in {}: {}", angle.name, angle.position.sign, text));
        }
    }

    for aspect in &chart.aspects {
        if let Some(text) = index.aspect_text(aspect.body_a, aspect.body_b, aspect.kind) {
            lines.push(format!("{}: {}", aspect, text));
        }
    }

    for cusp in &chart.houses {
        if let Some(text) = index.lookup(&InterpKey::HouseCuspSign {
            house: cusp.number,
            sign: cusp.position.sign,
        }) {
            lines.push(format!(
                "{} house cusp in {}: {}",
                ordinal(cusp.number),
                cusp.position.sign,
                text
            ));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_corpus_loads() {
        let index = InterpretationIndex::builtin();
        assert!(!index.is_empty());
    }

    #[test]
    fn json_round_trip() {
        let json = r#"[
            {"kind": "body_in_sign", "body": "Sun", "sign": "Aries", "text": "bold"},
            {"kind": "body_in_house", "body": "Mars", "house": 7, "text": "driven"},
            {"kind": "aspect_pair", "body_a": "Sun", "body_b": "Moon", "aspect": "Square", "text": "tense"},
            {"kind": "aspect_pair", "body_a": "Saturn", "body_b": "Ketu", "aspect": {"SignDistance": 3}, "text": "austere"},
            {"kind": "house_cusp_sign", "house": 10, "sign": "Capricorn", "text": "steady"},
            {"kind": "nakshatra", "name": "Rohini", "text": "lush"}
        ]"#;
        let index = InterpretationIndex::from_json(json).unwrap();
        assert_eq!(index.len(), 6);
        assert_eq!(
            index.lookup(&InterpKey::BodyInSign {
                body: Body::Sun,
                sign: Sign::Aries
            }),
            Some("bold")
        );
        // Unordered aspect lookup finds the reversed order too.
        assert_eq!(
            index.aspect_text(Body::Moon, Body::Sun, AspectKind::Square),
            Some("tense")
        );
        assert_eq!(
            index.aspect_text(Body::Saturn, Body::Ketu, AspectKind::SignDistance(3)),
            Some("austere")
        );
    }

    #[test]
    fn misses_degrade_to_a_readable_line() {
        let index = InterpretationIndex::default();
        let line = index.lookup_or_miss(&InterpKey::BodyInSign {
            body: Body::Venus,
            sign: Sign::Leo,
        });
        assert!(line.contains("Venus in Leo"));
        assert!(line.starts_with("No specific interpretation"));
    }
}
