//! Equatorial sky positions and great-circle separations.

use serde::{Deserialize, Serialize};

/// Arcseconds per degree.
pub const ARCSEC_PER_DEG: f64 = 3600.0;

/// A position on the celestial sphere, stored in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension in radians.
    pub ra: f64,
    /// Declination in radians.
    pub dec: f64,
}

impl Equatorial {
    /// Builds a position from degrees.
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Equatorial {
            ra: ra_deg.to_radians(),
            dec: dec_deg.to_radians(),
        }
    }

    /// Right ascension in degrees.
    pub fn ra_degrees(&self) -> f64 {
        self.ra.to_degrees()
    }

    /// Declination in degrees.
    pub fn dec_degrees(&self) -> f64 {
        self.dec.to_degrees()
    }

    /// Great-circle separation to another position, in radians.
    ///
    /// Haversine form, which keeps precision at the arcsecond separations
    /// the correlator compares.
    pub fn angular_distance(&self, other: &Equatorial) -> f64 {
        let d_ra = other.ra - self.ra;
        let d_dec = other.dec - self.dec;
        let a = (d_dec / 2.0).sin().powi(2)
            + self.dec.cos() * other.dec.cos() * (d_ra / 2.0).sin().powi(2);
        2.0 * a.sqrt().asin()
    }

    /// Great-circle separation to another position, in arcseconds.
    pub fn separation_arcsec(&self, other: &Equatorial) -> f64 {
        self.angular_distance(other).to_degrees() * ARCSEC_PER_DEG
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_coincident_positions_have_zero_separation() {
        let p = Equatorial::from_degrees(83.633, 22.014);
        assert_eq!(p.angular_distance(&p), 0.0);
    }

    #[test]
    fn test_ra_offset_shrinks_with_declination() {
        // 1" of pure RA offset spans cos(dec) arcseconds on the sky.
        let offset_deg = 1.0 / ARCSEC_PER_DEG;
        for dec in [0.0, 20.0, 60.0] {
            let a = Equatorial::from_degrees(10.0, dec);
            let b = Equatorial::from_degrees(10.0 + offset_deg, dec);
            assert_relative_eq!(
                a.separation_arcsec(&b),
                dec.to_radians().cos(),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_dec_offset_is_direct() {
        let a = Equatorial::from_degrees(150.0, -30.0);
        let b = Equatorial::from_degrees(150.0, -30.0 + 2.5 / ARCSEC_PER_DEG);
        assert_relative_eq!(a.separation_arcsec(&b), 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_separation_is_symmetric() {
        let a = Equatorial::from_degrees(10.0, 20.0);
        let b = Equatorial::from_degrees(10.0003, 20.0001);
        assert_relative_eq!(
            a.angular_distance(&b),
            b.angular_distance(&a),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_antipodal_points_are_half_a_turn_apart() {
        let a = Equatorial::from_degrees(0.0, 0.0);
        let b = Equatorial::from_degrees(180.0, 0.0);
        assert_relative_eq!(a.angular_distance(&b), std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_degree_accessors_round_trip() {
        let p = Equatorial::from_degrees(210.75, -45.125);
        assert_relative_eq!(p.ra_degrees(), 210.75, epsilon = 1e-12);
        assert_relative_eq!(p.dec_degrees(), -45.125, epsilon = 1e-12);
    }
}
