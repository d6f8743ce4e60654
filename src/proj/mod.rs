//! National Grid transform chain: WGS84 geodetic ↔ OSGB36 easting/northing.
//!
//! `project` runs datum shift → Transverse Mercator → bounds check;
//! `unproject` mirrors it. Degrees at the public boundary, radians inside.

pub mod datum;
pub mod ellipsoid;
pub mod transverse_mercator;

use crate::error::ProjError;
use crate::proj::datum::{Helmert, OSGB36_TO_WGS84};
use crate::proj::ellipsoid::{AIRY1830, WGS84};
use crate::proj::transverse_mercator::TransverseMercator;

/// Eastern grid edge (metres). Easting beyond this is off-grid.
pub const MAX_EASTING_M: f64 = 700_000.0;
/// Northern grid edge (metres). Northing beyond this is off-grid.
pub const MAX_NORTHING_M: f64 = 1_300_000.0;

/// WGS84 geodetic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// National Grid easting/northing in metres from the false origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCoord {
    pub easting: f64,
    pub northing: f64,
}

impl GridCoord {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }

    /// Inside the representable grid rectangle.
    pub fn on_grid(&self) -> bool {
        (0.0..=MAX_EASTING_M).contains(&self.easting)
            && (0.0..=MAX_NORTHING_M).contains(&self.northing)
    }
}

/// The full WGS84 ↔ National Grid transform.
pub struct NationalGrid {
    tm: TransverseMercator,
    to_osgb36: Helmert,
    to_wgs84: Helmert,
}

impl NationalGrid {
    pub fn new() -> Self {
        Self {
            tm: TransverseMercator::national_grid(),
            to_osgb36: OSGB36_TO_WGS84.inverse(),
            to_wgs84: OSGB36_TO_WGS84,
        }
    }

    /// WGS84 lat/lon (degrees) → easting/northing (metres).
    ///
    /// Rejects geodetic input outside [-90, 90] × [-180, 180] and any
    /// result outside the grid rectangle; off-grid points are never
    /// silently encoded.
    pub fn project(&self, p: LatLon) -> Result<GridCoord, ProjError> {
        if !(-90.0..=90.0).contains(&p.lat) || !(-180.0..=180.0).contains(&p.lon) {
            return Err(ProjError::InvalidGeodetic {
                lat: p.lat,
                lon: p.lon,
            });
        }

        let (lat_os, lon_os) = datum::shift(
            &WGS84,
            &AIRY1830,
            &self.to_osgb36,
            p.lat.to_radians(),
            p.lon.to_radians(),
        );
        let (easting, northing) = self.tm.forward(lat_os, lon_os);

        let g = GridCoord::new(easting, northing);
        if !g.on_grid() {
            return Err(ProjError::OutOfDomain { easting, northing });
        }
        Ok(g)
    }

    /// Easting/northing (metres) → WGS84 lat/lon (degrees).
    pub fn unproject(&self, g: GridCoord) -> Result<LatLon, ProjError> {
        let (lat_os, lon_os) = self.tm.inverse(g.easting, g.northing)?;
        let (lat, lon) = datum::shift(&AIRY1830, &WGS84, &self.to_wgs84, lat_os, lon_os);
        Ok(LatLon::new(lat.to_degrees(), lon.to_degrees()))
    }
}

impl Default for NationalGrid {
    fn default() -> Self {
        Self::new()
    }
}
