//! Angle and solid angle units.

use core::fmt::Debug;
use std::marker::PhantomData;

/// Radian unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct URadian;

/// Degree unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UDegree;

/// Unit trait for angle units.
pub trait AngleUnit: Debug + Copy + Clone {
    /// The symbol of the unit.
    const SYMBOLS: &'static [&'static str];

    /// The conversion factor from radians.
    const FACTOR_FROM_RAD: f64;

    /// The conversion factor to radians.
    const FACTOR_TO_RAD: f64 = 1.0 / Self::FACTOR_FROM_RAD;

    /// The conversion factor from degrees.
    const FACTOR_FROM_DEG: f64;

    /// The conversion factor to degrees.
    const FACTOR_TO_DEG: f64 = 1.0 / Self::FACTOR_FROM_DEG;
}

impl AngleUnit for URadian {
    const SYMBOLS: &'static [&'static str] = &["rad"];
    const FACTOR_FROM_RAD: f64 = 1.0;
    const FACTOR_FROM_DEG: f64 = std::f64::consts::PI / 180.0;
}

impl AngleUnit for UDegree {
    const SYMBOLS: &'static [&'static str] = &["deg"];
    const FACTOR_FROM_RAD: f64 = 180.0 / std::f64::consts::PI;
    const FACTOR_FROM_DEG: f64 = 1.0;
}

/// Angle with unit.
#[derive(Copy, Clone)]
pub struct Angle<A: AngleUnit> {
    value: f64,
    unit: PhantomData<A>,
}

impl<A: AngleUnit> Debug for Angle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Angle {{ value: {}, unit: {} }}",
            self.value,
            A::SYMBOLS[0]
        )
    }
}

impl<A: AngleUnit, B: AngleUnit> PartialEq<Angle<B>> for Angle<A> {
    fn eq(&self, other: &Angle<B>) -> bool {
        approx::relative_eq!(
            self.value * A::FACTOR_TO_RAD,
            other.value * B::FACTOR_TO_RAD,
            epsilon = f64::EPSILON
        )
    }
}

impl<A: AngleUnit, B: AngleUnit> PartialOrd<Angle<B>> for Angle<A> {
    fn partial_cmp(&self, other: &Angle<B>) -> Option<core::cmp::Ordering> {
        let self_rad = self.value * A::FACTOR_TO_RAD;
        let other_rad = other.value * B::FACTOR_TO_RAD;
        self_rad.partial_cmp(&other_rad)
    }
}

impl<A: AngleUnit> Angle<A> {
    /// Zero angle.
    pub const ZERO: Self = Self::new(0.0);

    /// Create a new angle with unit.
    pub const fn new(value: f64) -> Self {
        Angle {
            value,
            unit: PhantomData,
        }
    }

    /// Get the value of the angle.
    pub const fn value(&self) -> f64 { self.value }

    /// Converts the angle to radians.
    #[inline]
    pub fn to_radians(&self) -> Angle<URadian> { Angle::new(self.value * A::FACTOR_TO_RAD) }

    /// Converts the angle to degrees.
    #[inline]
    pub fn to_degrees(&self) -> Angle<UDegree> { Angle::new(self.value * A::FACTOR_TO_DEG) }

    /// Computes the sine of the angle.
    pub fn sin(&self) -> f64 { (self.value * A::FACTOR_TO_RAD).sin() }

    /// Computes the cosine of the angle.
    pub fn cos(&self) -> f64 { (self.value * A::FACTOR_TO_RAD).cos() }
}

impl Angle<URadian> {
    /// PI in radians.
    pub const PI: Self = Self::new(std::f64::consts::PI);
    /// PI/2 in radians.
    pub const HALF_PI: Self = Self::new(std::f64::consts::FRAC_PI_2);
}

/// Type alias for `Angle<URadian>`.
pub type Rads = Angle<URadian>;

/// Type alias for `Angle<UDegree>`.
pub type Degs = Angle<UDegree>;

impl From<Degs> for Rads {
    fn from(angle: Degs) -> Self { angle.to_radians() }
}

impl From<Rads> for Degs {
    fn from(angle: Rads) -> Self { angle.to_degrees() }
}

/// A type representing a solid angle in steradians.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct SolidAngle(f64);

impl SolidAngle {
    /// Returns the solid angle value in steradians.
    pub const fn value(&self) -> f64 { self.0 }
}

/// Calculates the solid angle subtended by a spherical cap of the given
/// half-angle on the unit sphere, $2\pi(1 - \cos\theta) = 4\pi\sin^2(\theta/2)$.
///
/// The half-angle form keeps full precision for narrow caps.
pub fn solid_angle_of_spherical_cap(half_angle: Rads) -> SolidAngle {
    let s = (half_angle.value() * 0.5).sin();
    SolidAngle(4.0 * std::f64::consts::PI * s * s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn conversion() {
        let a = Rads::new(1.0);
        let b: Degs = a.into();
        assert_relative_eq!(b.value(), 1.0f64.to_degrees());
        assert_eq!(a, b);

        let c = Degs::new(180.0);
        assert_relative_eq!(c.to_radians().value(), std::f64::consts::PI);
        assert_eq!(c, Rads::PI);
    }

    #[test]
    fn trigonometry_is_unit_aware() {
        assert_relative_eq!(Degs::new(90.0).sin(), 1.0);
        assert_relative_eq!(Rads::PI.cos(), -1.0);
        assert!(Degs::new(10.0) < Rads::new(0.2));
    }

    #[test]
    fn spherical_cap_solid_angle() {
        assert_relative_eq!(
            solid_angle_of_spherical_cap(Rads::HALF_PI).value(),
            std::f64::consts::TAU
        );
        assert_relative_eq!(
            solid_angle_of_spherical_cap(Rads::PI).value(),
            4.0 * std::f64::consts::PI
        );
        assert_eq!(solid_angle_of_spherical_cap(Rads::ZERO).value(), 0.0);
    }

    #[test]
    fn narrow_cap_solid_angle_is_not_cancelled() {
        // Ω ≈ πθ² for small θ.
        for theta in [1.0e-9, 1.0e-8, 1.0e-5] {
            let omega = solid_angle_of_spherical_cap(Rads::new(theta)).value();
            assert!(omega > 0.0);
            assert_relative_eq!(omega, std::f64::consts::PI * theta * theta, max_relative = 1.0e-9);
        }
    }
}
