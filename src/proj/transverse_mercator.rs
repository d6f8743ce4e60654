//! Transverse Mercator projection — OSGB published series.
//!
//! Forward: meridional arc M(φ) plus the northing terms I..IIIA and easting
//! terms IV..VI in powers of Δλ. Inverse: footpoint latitude by fixed-point
//! iteration on M, then the latitude terms VII..IX and longitude terms
//! X..XIIA in powers of ΔE. Truncation error is below 1 mm inside the
//! National Grid extent, matching the OS published formulation.

use crate::error::ProjError;
use crate::proj::ellipsoid::{Ellipsoid, AIRY1830};

/// Iteration cap for the footpoint-latitude solve. In-domain inputs
/// converge in well under ten steps.
const MAX_FOOTPOINT_ITERATIONS: usize = 50;

/// Convergence threshold on the meridional-arc residual: 0.01 mm.
const FOOTPOINT_TOLERANCE_M: f64 = 1e-5;

pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    lat0: f64,
    lon0: f64,
    f0: f64,
    false_easting: f64,
    false_northing: f64,
}

impl TransverseMercator {
    pub fn new(
        ellipsoid: Ellipsoid,
        lat0: f64,
        lon0: f64,
        f0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        Self {
            ellipsoid,
            lat0,
            lon0,
            f0,
            false_easting,
            false_northing,
        }
    }

    /// The OS National Grid: Airy 1830, true origin 49°N 2°W,
    /// F₀ = 0.9996012717, false origin E₀ = 400000, N₀ = -100000.
    pub fn national_grid() -> Self {
        Self::new(
            AIRY1830,
            49.0_f64.to_radians(),
            (-2.0_f64).to_radians(),
            0.999_601_271_7,
            400_000.0,
            -100_000.0,
        )
    }

    /// Meridional arc from the true origin latitude to `phi`, scaled by F₀.
    /// Four-term series in the third flattening n, through n³.
    fn meridional_arc(&self, phi: f64) -> f64 {
        let n = self.ellipsoid.n;
        let n2 = n * n;
        let n3 = n2 * n;

        let dphi = phi - self.lat0;
        let sphi = phi + self.lat0;

        self.ellipsoid.b
            * self.f0
            * ((1.0 + n + 5.0 / 4.0 * n2 + 5.0 / 4.0 * n3) * dphi
                - (3.0 * n + 3.0 * n2 + 21.0 / 8.0 * n3) * dphi.sin() * sphi.cos()
                + (15.0 / 8.0 * n2 + 15.0 / 8.0 * n3) * (2.0 * dphi).sin() * (2.0 * sphi).cos()
                - 35.0 / 24.0 * n3 * (3.0 * dphi).sin() * (3.0 * sphi).cos())
    }

    /// Forward: geodetic (radians, on this ellipsoid) → easting/northing.
    pub fn forward(&self, lat: f64, lon: f64) -> (f64, f64) {
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let tan_lat = lat.tan();

        let nu = self.ellipsoid.nu(lat, self.f0);
        let rho = self.ellipsoid.rho(lat, self.f0);
        let eta2 = nu / rho - 1.0;

        let cos3 = cos_lat * cos_lat * cos_lat;
        let cos5 = cos3 * cos_lat * cos_lat;
        let tan2 = tan_lat * tan_lat;
        let tan4 = tan2 * tan2;

        let i = self.meridional_arc(lat) + self.false_northing;
        let ii = nu / 2.0 * sin_lat * cos_lat;
        let iii = nu / 24.0 * sin_lat * cos3 * (5.0 - tan2 + 9.0 * eta2);
        let iiia = nu / 720.0 * sin_lat * cos5 * (61.0 - 58.0 * tan2 + tan4);
        let iv = nu * cos_lat;
        let v = nu / 6.0 * cos3 * (nu / rho - tan2);
        let vi = nu / 120.0 * cos5 * (5.0 - 18.0 * tan2 + tan4 + 14.0 * eta2 - 58.0 * tan2 * eta2);

        let dl = lon - self.lon0;
        let dl2 = dl * dl;
        let dl3 = dl2 * dl;
        let dl4 = dl3 * dl;
        let dl5 = dl4 * dl;
        let dl6 = dl5 * dl;

        let northing = i + ii * dl2 + iii * dl4 + iiia * dl6;
        let easting = self.false_easting + iv * dl + v * dl3 + vi * dl5;

        (easting, northing)
    }

    /// Inverse: easting/northing → geodetic (radians, on this ellipsoid).
    ///
    /// Errors only if the footpoint iteration fails to converge, which is
    /// unreachable for coordinates inside the grid extent.
    pub fn inverse(&self, easting: f64, northing: f64) -> Result<(f64, f64), ProjError> {
        let dn = northing - self.false_northing;
        let phi = self.footpoint_latitude(dn)?;

        let cos_phi = phi.cos();
        let tan_phi = phi.tan();
        let sec_phi = 1.0 / cos_phi;

        let nu = self.ellipsoid.nu(phi, self.f0);
        let rho = self.ellipsoid.rho(phi, self.f0);
        let eta2 = nu / rho - 1.0;

        let tan2 = tan_phi * tan_phi;
        let tan4 = tan2 * tan2;
        let tan6 = tan4 * tan2;
        let nu3 = nu * nu * nu;
        let nu5 = nu3 * nu * nu;
        let nu7 = nu5 * nu * nu;

        let vii = tan_phi / (2.0 * rho * nu);
        let viii = tan_phi / (24.0 * rho * nu3) * (5.0 + 3.0 * tan2 + eta2 - 9.0 * tan2 * eta2);
        let ix = tan_phi / (720.0 * rho * nu5) * (61.0 + 90.0 * tan2 + 45.0 * tan4);
        let x = sec_phi / nu;
        let xi = sec_phi / (6.0 * nu3) * (nu / rho + 2.0 * tan2);
        let xii = sec_phi / (120.0 * nu5) * (5.0 + 28.0 * tan2 + 24.0 * tan4);
        let xiia = sec_phi / (5040.0 * nu7) * (61.0 + 662.0 * tan2 + 1320.0 * tan4 + 720.0 * tan6);

        let de = easting - self.false_easting;
        let de2 = de * de;
        let de3 = de2 * de;
        let de4 = de3 * de;
        let de5 = de4 * de;
        let de6 = de5 * de;
        let de7 = de6 * de;

        let lat = phi - vii * de2 + viii * de4 - ix * de6;
        let lon = self.lon0 + x * de - xi * de3 + xii * de5 - xiia * de7;

        Ok((lat, lon))
    }

    /// Solve M(φ') = N - N₀ for the footpoint latitude φ'.
    fn footpoint_latitude(&self, dn: f64) -> Result<f64, ProjError> {
        let af0 = self.ellipsoid.a * self.f0;
        let mut phi = self.lat0;
        let mut m = 0.0;

        for _ in 0..MAX_FOOTPOINT_ITERATIONS {
            phi += (dn - m) / af0;
            m = self.meridional_arc(phi);
            if (dn - m).abs() < FOOTPOINT_TOLERANCE_M {
                return Ok(phi);
            }
        }

        Err(ProjError::Convergence {
            iterations: MAX_FOOTPOINT_ITERATIONS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dms(d: f64, m: f64, s: f64) -> f64 {
        (d + m / 60.0 + s / 3600.0).to_radians()
    }

    #[test]
    fn test_true_origin() {
        // M(φ₀) = 0 and Δλ = 0, so the true origin lands exactly on the
        // false-origin offsets.
        let tm = TransverseMercator::national_grid();
        let (e, n) = tm.forward(49.0_f64.to_radians(), (-2.0_f64).to_radians());
        assert_relative_eq!(e, 400_000.0, epsilon = 1e-6);
        assert_relative_eq!(n, -100_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_os_worked_example_forward() {
        // OS "A guide to coordinate systems in Great Britain" worked
        // example: 52°39'27.2531"N, 1°43'4.5177"E (OSGB36)
        // → E 651409.903, N 313177.270
        let tm = TransverseMercator::national_grid();
        let (e, n) = tm.forward(dms(52.0, 39.0, 27.2531), dms(1.0, 43.0, 4.5177));
        assert_relative_eq!(e, 651_409.903, epsilon = 0.01);
        assert_relative_eq!(n, 313_177.270, epsilon = 0.01);
    }

    #[test]
    fn test_os_worked_example_inverse() {
        let tm = TransverseMercator::national_grid();
        let (lat, lon) = tm.inverse(651_409.903, 313_177.270).unwrap();
        assert_relative_eq!(lat, dms(52.0, 39.0, 27.2531), epsilon = 1e-9);
        assert_relative_eq!(lon, dms(1.0, 43.0, 4.5177), epsilon = 1e-9);
    }

    #[test]
    fn test_inverse_at_true_origin_converges_immediately() {
        let tm = TransverseMercator::national_grid();
        let (lat, lon) = tm.inverse(400_000.0, -100_000.0).unwrap();
        assert_relative_eq!(lat, 49.0_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(lon, (-2.0_f64).to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_roundtrip_across_grid() {
        let tm = TransverseMercator::national_grid();
        // SW Cornwall, London, Derbyshire, Highlands, Shetland
        let cases: &[(f64, f64)] = &[
            (50.1, -5.5),
            (51.5, -0.1),
            (53.2, -1.5),
            (57.5, -5.0),
            (60.8, -0.9),
        ];
        for &(lat_deg, lon_deg) in cases {
            let lat = lat_deg.to_radians();
            let lon = lon_deg.to_radians();
            let (e, n) = tm.forward(lat, lon);
            let (lat2, lon2) = tm.inverse(e, n).unwrap();
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_grid_extremes_converge() {
        let tm = TransverseMercator::national_grid();
        for &(e, n) in &[
            (0.0, 0.0),
            (700_000.0, 0.0),
            (0.0, 1_300_000.0),
            (700_000.0, 1_300_000.0),
        ] {
            assert!(tm.inverse(e, n).is_ok(), "({e}, {n}) did not converge");
        }
    }
}
