//! Math utilities.

use crate::units::{Degs, Rads};

pub use glam::{DQuat, DVec3};

/// Returns the square of the given value.
#[inline(always)]
pub fn sqr(x: f64) -> f64 { x * x }

/// Normalises the vector, leaving the zero vector untouched.
pub fn normalize(v: DVec3) -> DVec3 {
    let len = v.length();
    if len == 0.0 {
        v
    } else {
        v / len
    }
}

/// Reflects the direction `w` about the normal `n`.
///
/// Both directions point away from the surface, so the result is the mirror
/// direction $2(\mathbf{n} \cdot \mathbf{w})\mathbf{n} - \mathbf{w}$.
#[inline]
pub fn reflect(w: DVec3, n: DVec3) -> DVec3 { 2.0 * n.dot(w) * n - w }

/// Angle between two vectors.
///
/// Computed as `atan2(|a × b|, a · b)`, which stays accurate for nearly
/// parallel vectors where `acos` of the dot product collapses to 0.
pub fn angle_between(a: DVec3, b: DVec3) -> Rads {
    Rads::new(a.cross(b).length().atan2(a.dot(b)))
}

/// Raises `base` to the real power `exp`.
///
/// Returns `None` when the result is not a real number, i.e. for a negative
/// base with a non-integral exponent.
pub fn pow_real(base: f64, exp: f64) -> Option<f64> {
    if base < 0.0 && exp.fract() != 0.0 {
        return None;
    }
    let value = base.powf(exp);
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Converts a spherical coordinate (unit radius) to a cartesian coordinate.
pub fn sph_to_cart(zenith: Rads, azimuth: Rads) -> DVec3 {
    let (sin_theta, cos_theta) = (zenith.sin(), zenith.cos());
    let (sin_phi, cos_phi) = (azimuth.sin(), azimuth.cos());
    DVec3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

/// Maps a geographic coordinate onto a sphere of the given radius.
///
/// Latitude 90° is the positive z-axis, longitude 0° the positive x-axis.
pub fn lon_lat_to_cartesian(lon: Degs, lat: Degs, radius: f64) -> DVec3 {
    let (sin_lon, cos_lon) = (lon.sin(), lon.cos());
    let (sin_lat, cos_lat) = (lat.sin(), lat.cos());
    DVec3::new(
        radius * cos_lon * cos_lat,
        radius * sin_lon * cos_lat,
        radius * sin_lat,
    )
}

/// Returns the geographic coordinate `(lat, lon)` of a direction, longitude
/// in the range (-180°, 180°].
pub fn cartesian_to_lat_lon(v: DVec3) -> (Degs, Degs) {
    let v = normalize(v);
    let lat = v.z.clamp(-1.0, 1.0).asin();
    let lon = v.y.atan2(v.x);
    (Rads::new(lat).to_degrees(), Rads::new(lon).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn normalize_keeps_zero_vector() {
        assert_eq!(normalize(DVec3::ZERO), DVec3::ZERO);
        assert_eq!(normalize(DVec3::new(0.0, 3.0, 0.0)), DVec3::Y);
    }

    #[test]
    fn reflect_about_axis() {
        assert_eq!(reflect(DVec3::X, DVec3::Z), -DVec3::X);
        assert_eq!(reflect(DVec3::Z, DVec3::Z), DVec3::Z);
    }

    #[test]
    fn angle_between_resolves_tiny_angles() {
        for angle in [1.0e-12, 5.0e-9, 1.0e-6] {
            let v = sph_to_cart(Rads::new(angle), Rads::ZERO);
            assert_relative_eq!(angle_between(v, DVec3::Z).value(), angle, max_relative = 1.0e-6);
        }
        assert_eq!(angle_between(DVec3::X, DVec3::X).value(), 0.0);
        assert_relative_eq!(angle_between(DVec3::X, -DVec3::X).value(), std::f64::consts::PI);
        assert_relative_eq!(
            angle_between(DVec3::X, DVec3::Y * 2.0).value(),
            std::f64::consts::FRAC_PI_2
        );
    }

    #[test]
    fn pow_real_domain() {
        assert_eq!(pow_real(-0.5, 2.0), Some(0.25));
        assert_eq!(pow_real(-0.5, 2.5), None);
        assert_eq!(pow_real(0.0, 0.5), Some(0.0));
    }

    #[test]
    fn geographic_axes() {
        let north = lon_lat_to_cartesian(Degs::new(0.0), Degs::new(90.0), 1.0);
        assert_relative_eq!(north.z, 1.0);
        let east = lon_lat_to_cartesian(Degs::new(90.0), Degs::new(0.0), 2.0);
        assert_relative_eq!(east.y, 2.0);
        assert!(east.x.abs() < 1.0e-12);

        let (lat, lon) = cartesian_to_lat_lon(DVec3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(lat.value(), 0.0);
        assert_relative_eq!(lon.value(), -90.0);
    }

    proptest! {
        #[test]
        fn reflection_preserves_angle_to_normal(
            x in -1.0f64..1.0,
            y in -1.0f64..1.0,
            z in 0.1f64..1.0,
        ) {
            let w = DVec3::new(x, y, z).normalize();
            let r = reflect(w, DVec3::Z);
            prop_assert!((r.length() - 1.0).abs() < 1.0e-12);
            prop_assert!((r.dot(DVec3::Z) - w.dot(DVec3::Z)).abs() < 1.0e-12);
            let twice = 2.0 * angle_between(w, DVec3::Z).value();
            prop_assert!((angle_between(w, r).value() - twice).abs() < 1.0e-6);
        }

        #[test]
        fn spherical_coordinates_stay_on_unit_sphere(theta in 0.0f64..3.14, phi in 0.0f64..6.28) {
            let v = sph_to_cart(Rads::new(theta), Rads::new(phi));
            prop_assert!((v.length() - 1.0).abs() < 1.0e-12);
            prop_assert!((angle_between(v, DVec3::Z).value() - theta).abs() < 1.0e-9);
        }
    }
}
