use thiserror::Error;

/// A name that is not part of the body catalog.
///
/// Raised only when an identity is resolved from a name; no partial
/// [`Celestial`](crate::celestial::Celestial) exists when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown planet {0}")]
pub struct UnknownBodyError(pub String);

/// Failure reported by the ephemeris engine.
///
/// This layer never recovers from these: they are passed through verbatim.
/// A transit that simply does not happen is **not** an engine error, it is
/// reported as `Ok(None)` by the search routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Ephemeris data file not found: {0}")]
    DataFileMissing(String),

    #[error("Julian day {0} is outside the range covered by the ephemeris")]
    OutOfRange(f64),

    #[error("Fixed star not found in catalog: {0}")]
    UnknownStar(String),

    #[error("Ephemeris computation failed: {0}")]
    Computation(String),
}

#[derive(Error, Debug)]
pub enum AstrologError {
    #[error(transparent)]
    UnknownBody(#[from] UnknownBodyError),

    #[error("Ephemeris engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Invalid ephemeris source: {0}")]
    InvalidEphemerisSource(String),

    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("Invalid observer location: {0}")]
    InvalidLocation(String),

    #[error("Ephemeris engine lock poisoned by a panicking query")]
    EnginePoisoned,
}

impl From<ordered_float::FloatIsNan> for AstrologError {
    fn from(_: ordered_float::FloatIsNan) -> Self {
        AstrologError::InvalidLocation("NaN coordinate".to_string())
    }
}

impl PartialEq for AstrologError {
    fn eq(&self, other: &Self) -> bool {
        use AstrologError::*;
        match (self, other) {
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (Engine(a), Engine(b)) => a == b,
            (InvalidEphemerisSource(a), InvalidEphemerisSource(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (InvalidLocation(a), InvalidLocation(b)) => a == b,
            (EnginePoisoned, EnginePoisoned) => true,
            _ => false,
        }
    }
}
