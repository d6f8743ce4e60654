//! Grid-reference codec — letter-pair plus digits, e.g. "SK123456".
//!
//! A reference names a square, not a point: two letters pick the 100 km
//! square (500 km square + position within it), and 1-5 digits per axis
//! truncate easting and northing to a power-of-ten resolution. Decoding
//! returns the square's centroid, per OSGB convention.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ProjError};
use crate::proj::GridCoord;

/// First-letter table for the 500 km squares covering GB, indexed by
/// [n500][e500]. Everything outside these six squares is off-grid.
const FIRST_LETTERS: [[char; 2]; 3] = [['S', 'T'], ['N', 'O'], ['H', 'J']];

/// Digit count per axis, i.e. half the total digits in the reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    /// 2 digits total, 10 km squares
    TenKilometre,
    /// 4 digits total, 1 km squares
    Kilometre,
    /// 6 digits total, 100 m squares
    HundredMetre,
    /// 8 digits total, 10 m squares
    TenMetre,
    /// 10 digits total, 1 m squares
    Metre,
}

impl Precision {
    pub fn digits_per_axis(self) -> u32 {
        match self {
            Precision::TenKilometre => 1,
            Precision::Kilometre => 2,
            Precision::HundredMetre => 3,
            Precision::TenMetre => 4,
            Precision::Metre => 5,
        }
    }

    /// Side length of the denoted square in metres.
    pub fn resolution_m(self) -> u32 {
        10_u32.pow(5 - self.digits_per_axis())
    }
}

impl Default for Precision {
    /// 6-digit references (100 m) are the product default.
    fn default() -> Self {
        Precision::HundredMetre
    }
}

/// A well-formed National Grid reference.
///
/// Stores the square's south-west corner in metres, truncated to the
/// reference's resolution. `Display` renders the canonical string form;
/// `FromStr` parses (case-insensitive, embedded whitespace ignored).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRef {
    easting: u32,
    northing: u32,
    digits: u32,
}

impl GridRef {
    /// Encode an easting/northing pair at the given precision.
    ///
    /// Off-grid coordinates are rejected, never truncated into a
    /// neighbouring square.
    pub fn encode(g: GridCoord, precision: Precision) -> Result<GridRef, ProjError> {
        if !g.on_grid() {
            return Err(ProjError::OutOfDomain {
                easting: g.easting,
                northing: g.northing,
            });
        }

        let easting = g.easting.floor() as u32;
        let northing = g.northing.floor() as u32;

        // The rectangle check above keeps (e500, n500) inside the table,
        // but the letter lookup stays authoritative for the domain.
        if square_letters(easting / 100_000, northing / 100_000).is_none() {
            return Err(ProjError::OutOfDomain {
                easting: g.easting,
                northing: g.northing,
            });
        }

        let digits = precision.digits_per_axis();
        let res = precision.resolution_m();
        Ok(GridRef {
            easting: easting / res * res,
            northing: northing / res * res,
            digits,
        })
    }

    /// Side length of the denoted square in metres.
    pub fn resolution_m(&self) -> u32 {
        10_u32.pow(5 - self.digits)
    }

    /// Centre of the denoted square. A truncated reference names a square,
    /// so the centroid is the least-biased point to hand back.
    pub fn centre(&self) -> GridCoord {
        let half = self.resolution_m() as f64 / 2.0;
        GridCoord::new(self.easting as f64 + half, self.northing as f64 + half)
    }

    /// South-west corner of the denoted square.
    pub fn south_west(&self) -> GridCoord {
        GridCoord::new(self.easting as f64, self.northing as f64)
    }
}

/// Letters for the 100 km square holding (e100, n100), or `None` outside
/// the lettered extent.
fn square_letters(e100: u32, n100: u32) -> Option<(char, char)> {
    let first = *FIRST_LETTERS
        .get((n100 / 5) as usize)?
        .get((e100 / 5) as usize)?;

    // Second letter walks the 5x5 square row-major from the north-west,
    // A..Y with 'I' left out.
    let idx = (4 - n100 % 5) * 5 + e100 % 5;
    let mut code = b'A' + idx as u8;
    if code >= b'I' {
        code += 1;
    }

    Some((first, code as char))
}

/// Inverse of `square_letters`: south-west corner of the named 100 km
/// square in metres.
fn square_origin(first: char, second: char) -> Option<(u32, u32)> {
    let (e500, n500) = FIRST_LETTERS
        .iter()
        .enumerate()
        .find_map(|(n, row)| row.iter().position(|&c| c == first).map(|e| (e, n)))?;

    if second == 'I' || !second.is_ascii_uppercase() {
        return None;
    }
    let mut idx = second as u32 - 'A' as u32;
    if second > 'I' {
        idx -= 1;
    }

    let e100 = e500 as u32 * 5 + idx % 5;
    let n100 = n500 as u32 * 5 + (4 - idx / 5);
    Some((e100 * 100_000, n100 * 100_000))
}

impl fmt::Display for GridRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (l1, l2) = square_letters(self.easting / 100_000, self.northing / 100_000)
            .expect("GridRef is constructed on-grid");
        let res = self.resolution_m();
        let w = self.digits as usize;
        write!(
            f,
            "{l1}{l2}{:0w$}{:0w$}",
            self.easting % 100_000 / res,
            self.northing % 100_000 / res,
        )
    }
}

impl FromStr for GridRef {
    type Err = ParseError;

    /// Parse a grid reference: two letters from the valid tables followed
    /// by an even count of 2-10 digits. Uppercased and whitespace-stripped
    /// before validation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let mut chars = norm.chars();
        let (first, second) = match (chars.next(), chars.next()) {
            (Some(a), Some(b)) if a.is_ascii_uppercase() && b.is_ascii_uppercase() => (a, b),
            _ => return Err(ParseError::MissingLetters),
        };

        let rest = &norm[2..];
        if let Some(c) = rest.chars().find(|c| !c.is_ascii_digit()) {
            return Err(ParseError::UnexpectedChar(c));
        }
        if rest.len() % 2 != 0 || !(2..=10).contains(&rest.len()) {
            return Err(ParseError::BadDigitCount(rest.len()));
        }

        let (base_e, base_n) = square_origin(first, second)
            .ok_or_else(|| ParseError::UnknownSquare(format!("{first}{second}")))?;

        // The letter scheme names squares east and north of the grid
        // rectangle (e.g. JZ, HA); those are off-grid, not decodable.
        if base_e as f64 > crate::proj::MAX_EASTING_M || base_n as f64 > crate::proj::MAX_NORTHING_M
        {
            return Err(ParseError::UnknownSquare(format!("{first}{second}")));
        }

        let digits = (rest.len() / 2) as u32;
        let res = 10_u32.pow(5 - digits);
        let (e_str, n_str) = rest.split_at(rest.len() / 2);
        // Halves are 1-5 ASCII digits, so they always fit a u32
        let e: u32 = e_str.parse().expect("validated digits");
        let n: u32 = n_str.parse().expect("validated digits");

        Ok(GridRef {
            easting: base_e + e * res,
            northing: base_n + n * res,
            digits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_encode_sk_square() {
        // e100 = 4, n100 = 3 → S square, second letter K
        let g = GridCoord::new(433_148.0, 360_217.0);
        let r = GridRef::encode(g, Precision::HundredMetre).unwrap();
        assert_eq!(r.to_string(), "SK331602");
    }

    #[test]
    fn test_encode_all_precisions() {
        let g = GridCoord::new(651_409.0, 313_177.0);
        let cases = [
            (Precision::TenKilometre, "TG51"),
            (Precision::Kilometre, "TG5113"),
            (Precision::HundredMetre, "TG514131"),
            (Precision::TenMetre, "TG51401317"),
            (Precision::Metre, "TG5140913177"),
        ];
        for (p, expected) in cases {
            assert_eq!(GridRef::encode(g, p).unwrap().to_string(), expected);
        }
    }

    #[test]
    fn test_encode_rejects_off_grid() {
        for g in [
            GridCoord::new(-1.0, 500_000.0),
            GridCoord::new(700_001.0, 500_000.0),
            GridCoord::new(400_000.0, -1.0),
            GridCoord::new(400_000.0, 1_300_001.0),
        ] {
            assert!(matches!(
                GridRef::encode(g, Precision::default()),
                Err(ProjError::OutOfDomain { .. })
            ));
        }
    }

    #[test]
    fn test_decode_centre_offset() {
        // SK123456 names a 100 m square; decoding returns its centroid
        let r: GridRef = "SK123456".parse().unwrap();
        let c = r.centre();
        assert_relative_eq!(c.easting, 412_350.0);
        assert_relative_eq!(c.northing, 345_650.0);
    }

    #[test]
    fn test_decode_normalizes_case_and_whitespace() {
        let r: GridRef = " sk 123 456 ".parse().unwrap();
        assert_eq!(r.to_string(), "SK123456");
    }

    #[test]
    fn test_decode_two_digit_reference() {
        let r: GridRef = "SK14".parse().unwrap();
        assert_eq!(r.resolution_m(), 10_000);
        assert_relative_eq!(r.centre().easting, 415_000.0);
        assert_relative_eq!(r.centre().northing, 345_000.0);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(
            "IJ1234".parse::<GridRef>(),
            Err(ParseError::UnknownSquare("IJ".into()))
        );
        assert_eq!(
            "ZZ1234".parse::<GridRef>(),
            Err(ParseError::UnknownSquare("ZZ".into()))
        );
        assert_eq!(
            "SI1234".parse::<GridRef>(),
            Err(ParseError::UnknownSquare("SI".into()))
        );
        assert_eq!(
            "SK12345".parse::<GridRef>(),
            Err(ParseError::BadDigitCount(5))
        );
        assert_eq!("SK".parse::<GridRef>(), Err(ParseError::BadDigitCount(0)));
        assert_eq!(
            "SK123456789012".parse::<GridRef>(),
            Err(ParseError::BadDigitCount(12))
        );
        assert_eq!(
            "SK12a4".parse::<GridRef>(),
            Err(ParseError::UnexpectedChar('A'))
        );
        assert_eq!("7 Main St".parse::<GridRef>(), Err(ParseError::MissingLetters));
    }

    #[test]
    fn test_decode_rejects_squares_beyond_grid_rectangle() {
        // JZ sits at 900 km easting, HA at 1400 km northing: valid letter
        // arithmetic, but wholly outside the representable grid.
        assert_eq!(
            "JZ1234".parse::<GridRef>(),
            Err(ParseError::UnknownSquare("JZ".into()))
        );
        assert_eq!(
            "HA1234".parse::<GridRef>(),
            Err(ParseError::UnknownSquare("HA".into()))
        );
    }

    #[test]
    fn test_letter_table_bijection() {
        // Every (first letter, 0..25 index) pair must map to a distinct
        // letter pair and decode back to the same 100 km square.
        let mut seen = std::collections::HashSet::new();
        for n100 in 0..13_u32 {
            for e100 in 0..7_u32 {
                let (l1, l2) = square_letters(e100, n100).unwrap();
                assert_ne!(l2, 'I');
                assert!(seen.insert((l1, l2)), "duplicate pair {l1}{l2}");
                assert_eq!(square_origin(l1, l2), Some((e100 * 100_000, n100 * 100_000)));
            }
        }
        assert_eq!(seen.len(), 7 * 13);
    }

    #[test]
    fn test_full_letter_range_decodes() {
        // All 6 first letters x 25 second letters name a square somewhere
        for first in ['S', 'T', 'N', 'O', 'H', 'J'] {
            for second in ('A'..='Z').filter(|&c| c != 'I') {
                let (e, n) = square_origin(first, second).unwrap();
                assert_eq!(e % 100_000, 0);
                assert_eq!(n % 100_000, 0);
            }
        }
    }

    #[test]
    fn test_roundtrip_metre_precision() {
        for &(e, n) in &[
            (0.0, 0.0),
            (433_148.0, 360_217.0),
            (651_409.0, 313_177.0),
            (699_999.0, 1_299_999.0),
        ] {
            let g = GridCoord::new(e, n);
            let r = GridRef::encode(g, Precision::Metre).unwrap();
            let c: GridRef = r.to_string().parse().unwrap();
            assert_eq!(r, c);
            // Centre of a 1 m square is within 1 m of the input
            assert!((c.centre().easting - e).abs() <= 1.0);
            assert!((c.centre().northing - n).abs() <= 1.0);
        }
    }

    #[test]
    fn test_roundtrip_all_precisions() {
        let g = GridCoord::new(433_148.0, 360_217.0);
        for p in [
            Precision::TenKilometre,
            Precision::Kilometre,
            Precision::HundredMetre,
            Precision::TenMetre,
            Precision::Metre,
        ] {
            let r = GridRef::encode(g, p).unwrap();
            let c: GridRef = r.to_string().parse().unwrap();
            assert_eq!(r, c);
            let half = p.resolution_m() as f64 / 2.0;
            assert!((c.centre().easting - g.easting).abs() <= half);
            assert!((c.centre().northing - g.northing).abs() <= half);
        }
    }
}
