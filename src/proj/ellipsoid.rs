/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Semi-minor axis (metres)
    pub b: f64,
    /// First eccentricity squared: (a² - b²) / a²
    pub e2: f64,
    /// Third flattening: (a - b) / (a + b)
    pub n: f64,
}

impl Ellipsoid {
    pub const fn new(a: f64, b: f64) -> Self {
        let e2 = (a * a - b * b) / (a * a);
        let n = (a - b) / (a + b);
        Self { a, b, e2, n }
    }

    /// Transverse radius of curvature ν at latitude phi, scaled by k.
    pub fn nu(&self, phi: f64, k: f64) -> f64 {
        let s = phi.sin();
        self.a * k / (1.0 - self.e2 * s * s).sqrt()
    }

    /// Meridional radius of curvature ρ at latitude phi, scaled by k.
    pub fn rho(&self, phi: f64, k: f64) -> f64 {
        let s = phi.sin();
        self.a * k * (1.0 - self.e2) / (1.0 - self.e2 * s * s).powf(1.5)
    }
}

/// Airy 1830 — the ellipsoid underlying the OS National Grid (OSGB36).
pub const AIRY1830: Ellipsoid = Ellipsoid::new(6_377_563.396, 6_356_256.909);

/// WGS84, defined by semi-major axis and flattening 1/298.257223563.
pub const WGS84: Ellipsoid =
    Ellipsoid::new(6_378_137.0, 6_378_137.0 * (1.0 - 1.0 / 298.257_223_563));
