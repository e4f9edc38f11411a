use thiserror::Error;

/// Errors surfaced by chart computation.
///
/// DST ambiguity is not represented here: ambiguous or non-existent local
/// times are resolved to the standard-time reading and logged as a warning.
/// Missing interpretation text is likewise never an error.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Invalid caller input (empty place string, impossible calendar date,
    /// unknown timezone identifier). Reported verbatim, nothing partial.
    #[error("invalid birth input: {message}")]
    Input { message: String },

    /// The geocoding service failed, timed out, or returned nothing usable.
    #[error("geocoding failed for {place:?}: {message}")]
    Geocoding { place: String, message: String },

    /// The ephemeris collaborator failed for the given request.
    #[error("ephemeris query failed ({context}): {message}")]
    Ephemeris { context: String, message: String },
}

impl ChartError {
    pub fn input(message: impl Into<String>) -> Self {
        ChartError::Input {
            message: message.into(),
        }
    }

    pub fn ephemeris(context: impl Into<String>, message: impl Into<String>) -> Self {
        ChartError::Ephemeris {
            context: context.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
