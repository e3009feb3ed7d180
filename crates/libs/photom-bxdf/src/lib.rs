//! Reflectance laws and their evaluation over a tessellated sphere.
//!
//! A law maps a [`MaterialProperty`] and a [`FacetGeometry`] to a
//! [`Reflectance`]. Laws are collected in a [`LawRegistry`] and applied to
//! every facet of a sphere by [`evaluate_field`].
#![warn(missing_docs)]

use base::math::DVec3;

mod error;
mod field;
mod geometry;
mod law;
pub mod laws;
mod material;
mod registry;
pub mod scattering;

pub use error::*;
pub use field::*;
pub use geometry::*;
pub use law::*;
pub use material::*;
pub use registry::*;

/// Value returned by a reflectance law.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Reflectance {
    /// Single scalar value.
    Scalar(f64),
    /// RGB colour.
    Color(DVec3),
}

impl Reflectance {
    /// Number of channels of the value.
    pub const fn channels(&self) -> usize {
        match self {
            Reflectance::Scalar(_) => 1,
            Reflectance::Color(_) => 3,
        }
    }

    /// Returns the scalar value, if any.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Reflectance::Scalar(v) => Some(*v),
            Reflectance::Color(_) => None,
        }
    }

    /// Appends the channels of the value to `out`.
    pub fn extend_into(&self, out: &mut Vec<f64>) {
        match self {
            Reflectance::Scalar(v) => out.push(*v),
            Reflectance::Color(c) => out.extend_from_slice(&c.to_array()),
        }
    }
}

impl From<f64> for Reflectance {
    fn from(value: f64) -> Self { Reflectance::Scalar(value) }
}

impl From<DVec3> for Reflectance {
    fn from(value: DVec3) -> Self { Reflectance::Color(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflectance_channels() {
        let mut out = vec![];
        let scalar = Reflectance::from(0.5);
        scalar.extend_into(&mut out);
        assert_eq!(scalar.channels(), 1);
        assert_eq!(scalar.as_scalar(), Some(0.5));

        let color = Reflectance::from(DVec3::new(0.1, 0.2, 0.3));
        color.extend_into(&mut out);
        assert_eq!(color.channels(), 3);
        assert_eq!(color.as_scalar(), None);
        assert_eq!(out, [0.5, 0.1, 0.2, 0.3]);
    }
}
