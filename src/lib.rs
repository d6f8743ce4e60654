//! Convert between WGS84 latitude/longitude and Ordnance Survey National
//! Grid references such as "SK123456".
//!
//! The chain is: 7-parameter Helmert datum shift (WGS84 ↔ OSGB36), the
//! OSGB-series Transverse Mercator projection on Airy 1830, and the
//! letter-pair grid-square codec. Everything is a pure, stateless function
//! over immutable inputs; the types are freely shareable across threads.
//!
//! Two convenience entry points cover the common case:
//!
//! ```
//! use osgridref::{from_grid_reference, to_grid_reference, Precision};
//!
//! let gridref = to_grid_reference(53.2, -1.5, Precision::default()).unwrap();
//! assert!(gridref.starts_with("SK"));
//!
//! let point = from_grid_reference("SK 123 456").unwrap();
//! assert!(point.lat > 53.0 && point.lat < 53.2);
//! ```
//!
//! Callers that need error detail use [`NationalGrid`] and [`GridRef`]
//! directly.

pub mod error;
pub mod gridref;
pub mod maps_link;
pub mod proj;

pub use error::{GridRefError, ParseError, ProjError};
pub use gridref::{GridRef, Precision};
pub use maps_link::parse_maps_link;
pub use proj::{GridCoord, LatLon, NationalGrid};

/// Format a WGS84 point as a National Grid reference, or `None` when the
/// point is outside the representable grid. `Precision::default()` gives
/// the usual 6-digit (100 m) reference.
pub fn to_grid_reference(lat: f64, lon: f64, precision: Precision) -> Option<String> {
    let projected = NationalGrid::new().project(LatLon::new(lat, lon)).ok()?;
    let gridref = GridRef::encode(projected, precision).ok()?;
    Some(gridref.to_string())
}

/// Resolve a grid reference string to the WGS84 centre of the square it
/// names, or `None` for malformed input or an unrecognized letter pair.
/// Case-insensitive; embedded whitespace is ignored.
pub fn from_grid_reference(s: &str) -> Option<LatLon> {
    let gridref: GridRef = s.parse().ok()?;
    NationalGrid::new().unproject(gridref.centre()).ok()
}

/// Whether `s` parses as a well-formed, on-grid reference.
pub fn is_valid_grid_reference(s: &str) -> bool {
    s.parse::<GridRef>().is_ok()
}
