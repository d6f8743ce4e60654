//! Helmert datum transforms between WGS84 and OSGB36.
//!
//! The National Grid is defined on OSGB36 (Airy 1830), while callers supply
//! GPS-style WGS84 coordinates. The shift is the standard 7-parameter
//! Helmert transform in the position-vector convention, applied in
//! geocentric cartesian space. Accuracy of the single national parameter
//! set is a few metres across GB, which is well inside this crate's
//! 100 m default grid-reference resolution.

use crate::proj::ellipsoid::Ellipsoid;

/// 7-parameter Helmert transform: translations in metres, rotations in
/// arcseconds, scale in parts per million.
#[derive(Clone, Copy, Debug)]
pub struct Helmert {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub rx_sec: f64,
    pub ry_sec: f64,
    pub rz_sec: f64,
    pub s_ppm: f64,
}

/// OS published transform from OSGB36 to WGS84.
pub const OSGB36_TO_WGS84: Helmert = Helmert {
    tx: 446.448,
    ty: -125.157,
    tz: 542.060,
    rx_sec: 0.1502,
    ry_sec: 0.2470,
    rz_sec: 0.8421,
    s_ppm: -20.4894,
};

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

impl Helmert {
    /// Reverse the transform direction. Exact enough at these rotation
    /// magnitudes (sub-arcsecond), where the small-angle negation is
    /// standard practice.
    pub const fn inverse(&self) -> Helmert {
        Helmert {
            tx: -self.tx,
            ty: -self.ty,
            tz: -self.tz,
            rx_sec: -self.rx_sec,
            ry_sec: -self.ry_sec,
            rz_sec: -self.rz_sec,
            s_ppm: -self.s_ppm,
        }
    }

    /// Apply to a geocentric cartesian coordinate (metres).
    pub fn apply(&self, (x, y, z): (f64, f64, f64)) -> (f64, f64, f64) {
        let s1 = 1.0 + self.s_ppm * 1e-6;
        let rx = self.rx_sec * ARCSEC_TO_RAD;
        let ry = self.ry_sec * ARCSEC_TO_RAD;
        let rz = self.rz_sec * ARCSEC_TO_RAD;

        (
            self.tx + s1 * x - rz * y + ry * z,
            self.ty + rz * x + s1 * y - rx * z,
            self.tz - ry * x + rx * y + s1 * z,
        )
    }
}

/// Geodetic (radians, height 0) → geocentric cartesian on `ell`.
pub fn geodetic_to_cartesian(ell: &Ellipsoid, lat: f64, lon: f64) -> (f64, f64, f64) {
    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let nu = ell.a / (1.0 - ell.e2 * sin_lat * sin_lat).sqrt();

    (
        nu * cos_lat * lon.cos(),
        nu * cos_lat * lon.sin(),
        nu * (1.0 - ell.e2) * sin_lat,
    )
}

/// Geocentric cartesian → geodetic (radians) on `ell`, height discarded.
///
/// Latitude by fixed-point iteration; converges to double precision in a
/// handful of steps for near-surface points.
pub fn cartesian_to_geodetic(ell: &Ellipsoid, (x, y, z): (f64, f64, f64)) -> (f64, f64) {
    let p = x.hypot(y);
    let mut lat = (z / (p * (1.0 - ell.e2))).atan();

    for _ in 0..10 {
        let sin_lat = lat.sin();
        let nu = ell.a / (1.0 - ell.e2 * sin_lat * sin_lat).sqrt();
        let next = ((z + ell.e2 * nu * sin_lat) / p).atan();
        if (next - lat).abs() < 1e-12 {
            lat = next;
            break;
        }
        lat = next;
    }

    (lat, y.atan2(x))
}

/// Shift a geodetic coordinate (radians) from `from` to `to` datum.
pub fn shift(from: &Ellipsoid, to: &Ellipsoid, h: &Helmert, lat: f64, lon: f64) -> (f64, f64) {
    let cart = geodetic_to_cartesian(from, lat, lon);
    cartesian_to_geodetic(to, h.apply(cart))
}
