//! Priority-ordered rule resolution from extracted entities to an answer.
//!
//! Each rule pairs a predicate over the extracted entities with a handler
//! that reads the chart and the interpretation index. Rules are evaluated
//! in order and the first one that both applies and produces text wins;
//! nothing here can fail, and the final fallback is always a plain string.

use std::collections::HashSet;

use urania::types::ordinal;
use urania::Chart;

use crate::corpus::{chart_interpretations, InterpKey, InterpretationIndex};
use crate::extract::{extract, ExtractedEntities};
use crate::lexicon::{tokenize, ChartElement, LIFE_AREAS};

pub const GENERIC_HELP: &str = "I can describe specific planets, signs, houses and aspects in \
your chart, or broader life areas. Try asking about your Sun sign, a placement like Mars in \
the 7th house, or your career prospects.";

struct Rule {
    applies: fn(&ExtractedEntities) -> bool,
    respond: fn(&ExtractedEntities, &Chart, &InterpretationIndex) -> Option<String>,
}

const RULES: &[Rule] = &[
    Rule {
        applies: |e| {
            e.bodies.len() == 1
                && e.signs.len() == 1
                && e.houses.is_empty()
                && e.aspect_kinds.is_empty()
                && e.life_areas.is_empty()
        },
        respond: body_in_sign,
    },
    Rule {
        applies: |e| {
            e.bodies.len() == 1
                && e.houses.len() == 1
                && e.signs.is_empty()
                && e.aspect_kinds.is_empty()
                && e.life_areas.is_empty()
        },
        respond: body_in_house,
    },
    Rule {
        applies: |e| {
            e.bodies.len() == 1
                && e.signs.is_empty()
                && e.houses.is_empty()
                && e.aspect_kinds.is_empty()
                && e.life_areas.is_empty()
        },
        respond: body_overview,
    },
    Rule {
        applies: |e| {
            e.houses.len() == 1
                && e.bodies.is_empty()
                && e.signs.is_empty()
                && e.aspect_kinds.is_empty()
                && e.life_areas.is_empty()
        },
        respond: house_overview,
    },
    Rule {
        applies: |e| !e.life_areas.is_empty(),
        respond: life_areas,
    },
    Rule {
        applies: |e| !e.aspect_kinds.is_empty(),
        respond: aspects,
    },
    Rule {
        applies: |e| !e.keywords.is_empty(),
        respond: keyword_fallback,
    },
];

/// Answer a free-text question about a computed chart. Pure in its inputs,
/// total in its output: every question yields a non-empty string.
pub fn answer(chart: &Chart, index: &InterpretationIndex, question: &str) -> String {
    let entities = extract(question);
    log::debug!("extracted entities: {:?}", entities);
    for rule in RULES {
        if (rule.applies)(&entities) {
            if let Some(text) = (rule.respond)(&entities, chart, index) {
                if !text.trim().is_empty() {
                    return text;
                }
            }
        }
    }
    GENERIC_HELP.to_string()
}

fn body_in_sign(
    entities: &ExtractedEntities,
    chart: &Chart,
    index: &InterpretationIndex,
) -> Option<String> {
    let body = *entities.bodies.iter().next()?;
    let asked = *entities.signs.iter().next()?;
    match chart.sign_of(body) {
        Some(sign) if sign == asked => Some(format!(
            "Your {} is in {}. {}",
            body,
            sign,
            index.lookup_or_miss(&InterpKey::BodyInSign { body, sign })
        )),
        Some(sign) => Some(format!(
            "You asked about {} in {}, but in your chart {} is in {}. {}",
            body,
            asked,
            body,
            sign,
            index.lookup_or_miss(&InterpKey::BodyInSign { body, sign })
        )),
        None => Some(format!("{} is not part of this chart.", body)),
    }
}

fn body_in_house(
    entities: &ExtractedEntities,
    chart: &Chart,
    index: &InterpretationIndex,
) -> Option<String> {
    let body = *entities.bodies.iter().next()?;
    let asked = *entities.houses.iter().next()?;
    if body.is_angle() {
        return Some(format!(
            "The {} marks a chart angle rather than occupying a house.",
            body
        ));
    }
    match chart.house_of(body) {
        Some(house) if house == asked => Some(format!(
            "Your {} is in the {} house. {}",
            body,
            ordinal(house),
            index.lookup_or_miss(&InterpKey::BodyInHouse { body, house })
        )),
        Some(house) => Some(format!(
            "You asked about {} in the {} house, but in your chart {} occupies the {} house. {}",
            body,
            ordinal(asked),
            body,
            ordinal(house),
            index.lookup_or_miss(&InterpKey::BodyInHouse { body, house })
        )),
        None => Some(format!("{} is not part of this chart.", body)),
    }
}

fn body_overview(
    entities: &ExtractedEntities,
    chart: &Chart,
    index: &InterpretationIndex,
) -> Option<String> {
    let body = *entities.bodies.iter().next()?;
    let mut parts = Vec::new();

    if let Some(sign) = chart.sign_of(body) {
        parts.push(format!(
            "Your {} is in {}. {}",
            body,
            sign,
            index.lookup_or_miss(&InterpKey::BodyInSign { body, sign })
        ));
    }
    if let Some(house) = chart.house_of(body) {
        parts.push(format!(
            "It occupies the {} house. {}",
            ordinal(house),
            index.lookup_or_miss(&InterpKey::BodyInHouse { body, house })
        ));
    }
    if let Some(nakshatra) = chart.body(body).and_then(|b| b.nakshatra) {
        if let Some(text) = index.lookup(&InterpKey::Nakshatra {
            name: nakshatra.to_string(),
        }) {
            parts.push(format!("Its nakshatra is {}. {}", nakshatra, text));
        }
    }
    for aspect in chart.aspects.iter().filter(|a| a.involves(body)) {
        if let Some(text) = index.aspect_text(aspect.body_a, aspect.body_b, aspect.kind) {
            parts.push(format!("{}: {}", aspect, text));
        }
    }

    if parts.is_empty() {
        return Some(format!("{} is not part of this chart.", body));
    }
    Some(parts.join("\n"))
}

fn house_overview(
    entities: &ExtractedEntities,
    chart: &Chart,
    index: &InterpretationIndex,
) -> Option<String> {
    let house = *entities.houses.iter().next()?;
    let mut parts = Vec::new();

    if let Some(cusp) = chart.house_cusp(house) {
        parts.push(format!(
            "Your {} house cusp falls in {}. {}",
            ordinal(house),
            cusp.position.sign,
            index.lookup_or_miss(&InterpKey::HouseCuspSign {
                house,
                sign: cusp.position.sign
            })
        ));
    }

    let occupants = chart.bodies_in_house(house);
    if !occupants.is_empty() {
        parts.push("Planets in this house:".to_string());
        for body in occupants {
            parts.push(format!(
                "{} in {} sits in your {} house. {}",
                body.body,
                body.position.sign,
                ordinal(house),
                index.lookup_or_miss(&InterpKey::BodyInHouse {
                    body: body.body,
                    house
                })
            ));
        }
    }

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("\n"))
}

fn life_areas(
    entities: &ExtractedEntities,
    chart: &Chart,
    index: &InterpretationIndex,
) -> Option<String> {
    let mut parts = Vec::new();

    for topic in &entities.life_areas {
        parts.push(format!("Regarding {}:", topic));
        let elements = LIFE_AREAS
            .iter()
            .find(|(name, _)| name == topic)
            .map(|(_, elements)| *elements)
            .unwrap_or(&[]);

        let mut found = false;
        for element in elements {
            match element {
                ChartElement::House(number) => {
                    if let Some(cusp) = chart.house_cusp(*number) {
                        if let Some(text) = index.lookup(&InterpKey::HouseCuspSign {
                            house: *number,
                            sign: cusp.position.sign,
                        }) {
                            parts.push(format!(
                                "- {} house cusp in {}: {}",
                                ordinal(*number),
                                cusp.position.sign,
                                text
                            ));
                            found = true;
                        }
                    }
                    for body in chart.bodies_in_house(*number) {
                        if let Some(text) = index.lookup(&InterpKey::BodyInHouse {
                            body: body.body,
                            house: *number,
                        }) {
                            parts.push(format!(
                                "- {} in the {} house: {}",
                                body.body,
                                ordinal(*number),
                                text
                            ));
                            found = true;
                        }
                    }
                }
                ChartElement::Body(body) => {
                    if let Some(sign) = chart.sign_of(*body) {
                        if let Some(text) =
                            index.lookup(&InterpKey::BodyInSign { body: *body, sign })
                        {
                            parts.push(format!("- {} in {}: {}", body, sign, text));
                            found = true;
                        }
                    }
                }
                ChartElement::Sign(sign) => {
                    for body in chart.bodies.iter().filter(|b| b.position.sign == *sign) {
                        if let Some(text) = index.lookup(&InterpKey::BodyInSign {
                            body: body.body,
                            sign: *sign,
                        }) {
                            parts.push(format!("- {} in {}: {}", body.body, sign, text));
                            found = true;
                        }
                    }
                }
            }
        }

        if !found {
            let associated: Vec<String> = elements.iter().map(ChartElement::label).collect();
            parts.push(format!(
                "No prepared reading covers {} in this chart, but it is associated with {}; \
                 you can ask about those directly.",
                topic,
                associated.join(", ")
            ));
        }
    }

    Some(parts.join("\n"))
}

fn aspects(
    entities: &ExtractedEntities,
    chart: &Chart,
    index: &InterpretationIndex,
) -> Option<String> {
    let kind = *entities.aspect_kinds.iter().next()?;

    if entities.bodies.len() >= 2 {
        let named: Vec<_> = entities.bodies.iter().copied().take(2).collect();
        let (a, b) = (named[0], named[1]);

        if let Some(aspect) = chart
            .aspects
            .iter()
            .find(|x| x.connects(a, b) && x.kind == kind)
        {
            let text = index
                .aspect_text(aspect.body_a, aspect.body_b, kind)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    index.lookup_or_miss(&InterpKey::AspectPair {
                        body_a: aspect.body_a,
                        body_b: aspect.body_b,
                        aspect: kind,
                    })
                });
            return Some(format!("{}: {}", aspect, text));
        }
        if let Some(aspect) = chart.aspects.iter().find(|x| x.connects(a, b)) {
            let text = index
                .aspect_text(aspect.body_a, aspect.body_b, aspect.kind)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    index.lookup_or_miss(&InterpKey::AspectPair {
                        body_a: aspect.body_a,
                        body_b: aspect.body_b,
                        aspect: aspect.kind,
                    })
                });
            return Some(format!(
                "{} and {} do not form a {} in your chart; instead: {}. {}",
                a,
                b,
                kind.label(),
                aspect,
                text
            ));
        }
        return Some(format!(
            "{} and {} form no recognized aspect in your chart.",
            a, b
        ));
    }

    let matching: Vec<_> = chart.aspects.iter().filter(|x| x.kind == kind).collect();
    if matching.is_empty() {
        return Some(format!(
            "No {} aspects stand out in your chart. You can ask about aspects between \
             specific planets.",
            kind.label()
        ));
    }
    let mut parts = vec![format!("{} aspects in your chart:", kind.label())];
    for aspect in matching {
        let text = index
            .aspect_text(aspect.body_a, aspect.body_b, aspect.kind)
            .map(str::to_string)
            .unwrap_or_else(|| {
                index.lookup_or_miss(&InterpKey::AspectPair {
                    body_a: aspect.body_a,
                    body_b: aspect.body_b,
                    aspect: aspect.kind,
                })
            });
        parts.push(format!("- {}: {}", aspect, text));
    }
    Some(parts.join("\n"))
}

fn keyword_fallback(
    entities: &ExtractedEntities,
    chart: &Chart,
    index: &InterpretationIndex,
) -> Option<String> {
    let lines = chart_interpretations(chart, index);
    let mut matched = Vec::new();
    for line in &lines {
        let words: HashSet<String> = tokenize(line).into_iter().collect();
        if entities.keywords.iter().any(|kw| words.contains(kw)) {
            matched.push(format!("- {}", line));
        }
    }
    if matched.is_empty() {
        return None;
    }
    Some(format!(
        "Based on the keywords in your question, these readings may be relevant:\n{}",
        matched.join("\n")
    ))
}
