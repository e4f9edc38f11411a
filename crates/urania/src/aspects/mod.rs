pub mod calculator;
pub mod drishti;
pub mod orbs;
pub mod types;

pub use calculator::{detect_angular_aspects, AspectPoint};
pub use drishti::{cast_distances, detect_sign_aspects, CastPoint};
pub use types::{Aspect, AspectKind};
