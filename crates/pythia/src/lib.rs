pub mod corpus;
pub mod extract;
pub mod lexicon;
pub mod resolver;

pub use corpus::{chart_interpretations, InterpKey, InterpretationIndex};
pub use extract::{extract, ExtractedEntities};
pub use resolver::{answer, GENERIC_HELP};
