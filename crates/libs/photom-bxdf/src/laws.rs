//! Catalogue of the built-in reflectance laws.
//!
//! Every law is available both as a plain function of the material and the
//! geometry (in [`diffuse`] and [`specular`]) and as a [`Law`] entry of
//! [`BUILTIN_LAWS`], which carries the parameters and geometric terms the law
//! reads.
use crate::{GeomTerm, Law, LawFamily, Param};

pub mod diffuse;
pub mod specular;

pub use diffuse::*;
pub use specular::*;

use GeomTerm::*;
use LawFamily::{Diffuse, Specular};

/// Built-in laws, diffuse first, in catalogue order.
pub static BUILTIN_LAWS: [Law; 20] = [
    Law::scalar("lambert_diffuse", Diffuse, &[Param::Rho], &[], lambert_diffuse),
    Law::scalar(
        "irradiance_lambert_diffuse",
        Diffuse,
        &[Param::Rho, Param::E0],
        &[],
        irradiance_lambert_diffuse,
    ),
    Law::color("color_lambert_diffuse", Diffuse, &[Param::Color], &[], color_lambert_diffuse),
    Law::scalar("phong_diffuse", Diffuse, &[Param::Rho], &[], phong_diffuse),
    Law::scalar(
        "oren_nayar_diffuse",
        Diffuse,
        &[Param::Rho, Param::E0, Param::Sigma],
        &[ThetaI, ThetaR],
        oren_nayar_diffuse,
    ),
    Law::placeholder("minnaert_diffuse", Diffuse),
    Law::placeholder("ashikhmin_shirley_diffuse", Diffuse).anisotropic(),
    Law::scalar("perfect_specular", Specular, &[], &[V, R], perfect_specular),
    Law::scalar(
        "fresnel_perfect_specular",
        Specular,
        &[Param::F0],
        &[V, R],
        fresnel_perfect_specular,
    ),
    Law::scalar(
        "wetterer_perfect_specular",
        Specular,
        &[Param::F0],
        &[V, R, MuI],
        wetterer_perfect_specular,
    ),
    Law::scalar(
        "crappy_lobe_specular",
        Specular,
        &[Param::LobeRadius],
        &[V, R],
        crappy_lobe_specular,
    ),
    Law::scalar("lobe_specular", Specular, &[Param::LobeRadius], &[V, R], lobe_specular),
    Law::scalar(
        "wetterer_lobe_specular",
        Specular,
        &[Param::F0, Param::LobeRadius],
        &[V, R],
        wetterer_lobe_specular,
    ),
    Law::scalar("phong_specular", Specular, &[Param::Alpha], &[V, R], phong_specular),
    Law::scalar(
        "blinn_phong_specular",
        Specular,
        &[Param::Alpha],
        &[N, H],
        blinn_phong_specular,
    ),
    Law::placeholder("gaussian_specular", Specular),
    Law::placeholder("beckmann_specular", Specular),
    Law::placeholder("heidrich_seidel_specular", Specular).anisotropic(),
    Law::placeholder("ward_specular", Specular).anisotropic(),
    Law::placeholder("cook_torrance_specular", Specular),
];
