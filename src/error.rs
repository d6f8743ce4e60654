use thiserror::Error;

/// Top-level error for the lat/lon ↔ grid-reference conversion chain.
#[derive(Error, Debug)]
pub enum GridRefError {
    #[error("projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Failures in the projection pipeline (datum shift + Transverse Mercator).
#[derive(Error, Debug)]
pub enum ProjError {
    /// The point falls outside the representable National Grid extent
    /// ([0, 700000] easting × [0, 1300000] northing).
    #[error("off-grid coordinate: easting={easting:.1}, northing={northing:.1}")]
    OutOfDomain { easting: f64, northing: f64 },

    /// Geodetic input outside [-90, 90] × [-180, 180].
    #[error("invalid geodetic coordinate: lat={lat}, lon={lon}")]
    InvalidGeodetic { lat: f64, lon: f64 },

    /// The footpoint-latitude iteration exceeded its cap. Unreachable for
    /// in-domain inputs; indicates a constants or algorithm defect.
    #[error("footpoint latitude failed to converge after {iterations} iterations")]
    Convergence { iterations: usize },
}

/// Failures parsing a grid-reference string.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("grid reference must start with two letters")]
    MissingLetters,

    #[error("letter pair {0:?} is not a National Grid square")]
    UnknownSquare(String),

    #[error("expected an even digit count between 2 and 10, got {0}")]
    BadDigitCount(usize),

    #[error("unexpected character {0:?} in grid reference")]
    UnexpectedChar(char),
}
