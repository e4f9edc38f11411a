use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{ordinal, Body};

/// Recognized angular relationships.
///
/// The five classical kinds are orb-based and symmetric; `SignDistance`
/// is the sidereal convention, a directional whole-sign cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    SignDistance(u8),
}

impl AspectKind {
    /// Classical kinds in detection order. The first match wins, so this
    /// order is part of the engine's contract.
    pub const ANGULAR: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle for the classical kinds.
    pub fn angle(self) -> Option<f64> {
        match self {
            AspectKind::Conjunction => Some(0.0),
            AspectKind::Sextile => Some(60.0),
            AspectKind::Square => Some(90.0),
            AspectKind::Trine => Some(120.0),
            AspectKind::Opposition => Some(180.0),
            AspectKind::SignDistance(_) => None,
        }
    }

    pub fn label(self) -> String {
        match self {
            AspectKind::Conjunction => "Conjunction".to_string(),
            AspectKind::Sextile => "Sextile".to_string(),
            AspectKind::Square => "Square".to_string(),
            AspectKind::Trine => "Trine".to_string(),
            AspectKind::Opposition => "Opposition".to_string(),
            AspectKind::SignDistance(d) => format!("{} House", ordinal(d)),
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One detected aspect.
///
/// Classical aspects are unordered pairs and appear once per pair. Sign
/// casts are directional: `body_a` casts onto `body_b`, and the reverse
/// relation exists only if detected separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub kind: AspectKind,
    /// Deviation from the exact angle; absent for sign casts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orb: Option<f64>,
    /// Whether the pair is closing on the exact angle; only determined
    /// when both ends are moving bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applying: Option<bool>,
}

impl Aspect {
    pub fn involves(&self, body: Body) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// Whether this aspect connects the two bodies, in either direction.
    pub fn connects(&self, a: Body, b: Body) -> bool {
        (self.body_a == a && self.body_b == b) || (self.body_a == b && self.body_b == a)
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.body_a, self.kind, self.body_b)
    }
}
