//! Extract a WGS84 coordinate from a Google Maps URL.
//!
//! Users paste map links instead of grid references often enough that the
//! location form accepts them directly. Handles the common URL shapes:
//! `/maps/@lat,lng,zoom`, `?q=lat,lng` and `?ll=lat,lng`. Short links
//! (`goo.gl/maps/...`) redirect and cannot be resolved without I/O, so
//! they are not handled here.

use std::sync::LazyLock;

use regex::Regex;

use crate::proj::LatLon;

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"@(-?\d+\.?\d*),(-?\d+\.?\d*)",
        r"[?&]q=(-?\d+\.?\d*),(-?\d+\.?\d*)",
        r"[?&]ll=(-?\d+\.?\d*),(-?\d+\.?\d*)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Pull a lat/lon out of a Google Maps link, or `None` if the URL carries
/// no recognizable coordinate.
pub fn parse_maps_link(url: &str) -> Option<LatLon> {
    for pattern in PATTERNS.iter() {
        if let Some(caps) = pattern.captures(url) {
            let lat: f64 = caps[1].parse().ok()?;
            let lon: f64 = caps[2].parse().ok()?;
            if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
                return Some(LatLon::new(lat, lon));
            }
        }
    }
    None
}
