//! # photom-base
//! Core library for photom.
//! Contains the basic types shared by the photom crates: vector math, angle
//! and solid angle units, the application error type and the command line
//! helpers.
#![warn(missing_docs)]

use std::fmt::{Display, Formatter};

#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod math;
pub mod units;

/// Indicates whether something is uniform in all directions or not.
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Isotropy {
    /// Uniformity in all directions.
    #[cfg_attr(feature = "cli", clap(alias = "iso"))]
    Isotropic,
    /// Non-uniformity in some directions.
    #[cfg_attr(feature = "cli", clap(alias = "aniso"))]
    Anisotropic,
}

impl Display for Isotropy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Isotropy::Isotropic => "Isotropic",
                Isotropy::Anisotropic => "Anisotropic",
            }
        )
    }
}
