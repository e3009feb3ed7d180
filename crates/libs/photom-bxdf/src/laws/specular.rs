//! Specular reflectance laws.
//!
//! Two strategies are used to decide whether the observer receives specular
//! light. The exact-mirror laws fire only when `V == R` holds bit for bit,
//! which models a Dirac delta. The lobe laws fire when the angle between `V`
//! and `R` is strictly less than the material's `lobe_radius`; their value
//! is normalised by the solid angle of the lobe.
use crate::{FacetGeometry, LawFault, MaterialProperty};
use base::{
    math::{angle_between, pow_real},
    units::{solid_angle_of_spherical_cap, Rads},
};

/// Returns `f()` when the observer is exactly in the mirror direction, 0
/// otherwise.
fn exact_mirror<F>(geom: &FacetGeometry, f: F) -> Result<f64, LawFault>
where
    F: FnOnce() -> Result<f64, LawFault>,
{
    if geom.v() == geom.r() {
        f()
    } else {
        Ok(0.0)
    }
}

/// Returns `f(Ω)` when the observer lies inside the lobe of half-angle
/// `lobe_radius` around the mirror direction, 0 otherwise. `Ω` is the solid
/// angle of the lobe.
fn inside_lobe<F>(mat: &MaterialProperty, geom: &FacetGeometry, f: F) -> Result<f64, LawFault>
where
    F: FnOnce(f64) -> f64,
{
    let radius = Rads::new(mat.lobe_radius()?);
    if angle_between(geom.v(), geom.r()) < radius {
        Ok(f(solid_angle_of_spherical_cap(radius).value()))
    } else {
        Ok(0.0)
    }
}

/// Perfect mirror: 1 in the mirror direction.
pub fn perfect_specular(_mat: &MaterialProperty, geom: &FacetGeometry) -> Result<f64, LawFault> {
    exact_mirror(geom, || Ok(1.0))
}

/// Perfect mirror weighted by the Fresnel reflectance at normal incidence.
pub fn fresnel_perfect_specular(
    mat: &MaterialProperty,
    geom: &FacetGeometry,
) -> Result<f64, LawFault> {
    let f_0 = mat.f_0()?;
    exact_mirror(geom, || Ok(f_0))
}

/// Perfect mirror returning $F_0 / \mu_i$ in the mirror direction.
pub fn wetterer_perfect_specular(
    mat: &MaterialProperty,
    geom: &FacetGeometry,
) -> Result<f64, LawFault> {
    let f_0 = mat.f_0()?;
    exact_mirror(geom, || {
        if geom.mu_i() == 0.0 {
            Err(LawFault::Domain("grazing incidence, mu_i is 0".to_string()))
        } else {
            Ok(f_0 / geom.mu_i())
        }
    })
}

/// Un-normalised lobe: 1 inside the lobe.
pub fn crappy_lobe_specular(
    mat: &MaterialProperty,
    geom: &FacetGeometry,
) -> Result<f64, LawFault> {
    inside_lobe(mat, geom, |_| 1.0)
}

/// Lobe normalised to a unit integral over the sphere: $1 / \Omega$.
pub fn lobe_specular(mat: &MaterialProperty, geom: &FacetGeometry) -> Result<f64, LawFault> {
    inside_lobe(mat, geom, |omega| 1.0 / omega)
}

/// Normalised lobe weighted by the Fresnel reflectance: $F_0 / \Omega$.
pub fn wetterer_lobe_specular(
    mat: &MaterialProperty,
    geom: &FacetGeometry,
) -> Result<f64, LawFault> {
    let f_0 = mat.f_0()?;
    inside_lobe(mat, geom, |omega| f_0 / omega)
}

/// Phong specular term $(\mathbf{R} \cdot \mathbf{V})^\alpha$.
pub fn phong_specular(mat: &MaterialProperty, geom: &FacetGeometry) -> Result<f64, LawFault> {
    let cos = geom.r().dot(geom.v());
    pow_real(cos, mat.alpha()).ok_or_else(|| {
        LawFault::Domain(format!("(R.V)^alpha undefined for R.V = {cos}, alpha = {}", mat.alpha()))
    })
}

/// Blinn-Phong specular term $(\mathbf{N} \cdot \mathbf{H})^{4\alpha}$.
///
/// The exponent is scaled by 4 so that the highlight has about the size of
/// the Phong one for the same shininess.
pub fn blinn_phong_specular(
    mat: &MaterialProperty,
    geom: &FacetGeometry,
) -> Result<f64, LawFault> {
    let cos = geom.n().dot(geom.h());
    let exponent = 4.0 * mat.alpha();
    pow_real(cos, exponent).ok_or_else(|| {
        LawFault::Domain(format!("(N.H)^(4 alpha) undefined for N.H = {cos}, 4 alpha = {exponent}"))
    })
}

/// Gaussian microfacet lobe. Declared, not implemented.
pub fn gaussian_specular(_mat: &MaterialProperty, _geom: &FacetGeometry) -> Result<f64, LawFault> {
    Err(LawFault::Unimplemented)
}

/// Beckmann microfacet lobe. Declared, not implemented.
pub fn beckmann_specular(_mat: &MaterialProperty, _geom: &FacetGeometry) -> Result<f64, LawFault> {
    Err(LawFault::Unimplemented)
}

/// Anisotropic Heidrich-Seidel model. Declared, not implemented.
pub fn heidrich_seidel_specular(
    _mat: &MaterialProperty,
    _geom: &FacetGeometry,
) -> Result<f64, LawFault> {
    Err(LawFault::Unimplemented)
}

/// Anisotropic Ward model. Declared, not implemented.
pub fn ward_specular(_mat: &MaterialProperty, _geom: &FacetGeometry) -> Result<f64, LawFault> {
    Err(LawFault::Unimplemented)
}

/// Cook-Torrance microfacet model. Declared, not implemented.
pub fn cook_torrance_specular(
    _mat: &MaterialProperty,
    _geom: &FacetGeometry,
) -> Result<f64, LawFault> {
    Err(LawFault::Unimplemented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Param;
    use approx::assert_relative_eq;
    use base::math::{sph_to_cart, DVec3};
    use proptest::prelude::*;
    use std::f64::consts::PI;

    /// Light at 45° in the XZ plane; the mirror direction is then
    /// (-sin 45°, 0, cos 45°).
    fn oblique_light() -> DVec3 { DVec3::new(1.0, 0.0, 1.0) }

    /// Geometry whose observer sits at `offset` radians from the mirror
    /// direction, rotated towards the normal.
    fn off_mirror(offset: f64) -> FacetGeometry {
        let zenith = PI / 4.0 - offset;
        let observer = sph_to_cart(Rads::new(zenith), Rads::new(PI));
        FacetGeometry::new(oblique_light(), observer, DVec3::Z)
    }

    #[test]
    fn exact_mirror_laws_fire_only_on_v_equal_r() {
        let mat = MaterialProperty::new().with_f0(0.04);
        let mirrored = FacetGeometry::mirrored(oblique_light(), DVec3::Z);
        assert_eq!(perfect_specular(&mat, &mirrored), Ok(1.0));
        assert_eq!(fresnel_perfect_specular(&mat, &mirrored), Ok(0.04));
        assert_relative_eq!(
            wetterer_perfect_specular(&mat, &mirrored).unwrap(),
            0.04 / mirrored.mu_i()
        );

        let off = off_mirror(1.0e-9);
        assert_ne!(off.v(), off.r());
        assert_eq!(perfect_specular(&mat, &off), Ok(0.0));
        assert_eq!(fresnel_perfect_specular(&mat, &off), Ok(0.0));
        assert_eq!(wetterer_perfect_specular(&mat, &off), Ok(0.0));
    }

    #[test]
    fn fresnel_requires_f0_everywhere() {
        let off = off_mirror(0.3);
        assert_eq!(
            fresnel_perfect_specular(&MaterialProperty::new(), &off),
            Err(LawFault::MissingParameter(Param::F0))
        );
    }

    #[test]
    fn wetterer_mirror_at_grazing_incidence_is_undefined() {
        let mat = MaterialProperty::new().with_f0(0.5);
        let grazing = FacetGeometry::mirrored(DVec3::X, DVec3::Z);
        assert_eq!(grazing.mu_i(), 0.0);
        assert!(matches!(
            wetterer_perfect_specular(&mat, &grazing),
            Err(LawFault::Domain(_))
        ));
    }

    #[test]
    fn lobe_boundary_is_excluded() {
        let e = 0.2;
        let d = 1.0e-6;
        let mat = MaterialProperty::new().with_lobe_radius(e);
        assert_eq!(crappy_lobe_specular(&mat, &off_mirror(e - d)), Ok(1.0));
        assert_eq!(crappy_lobe_specular(&mat, &off_mirror(e + d)), Ok(0.0));
        assert_eq!(lobe_specular(&mat, &off_mirror(e + d)), Ok(0.0));
    }

    #[test]
    fn lobe_laws_are_normalised_by_the_cap() {
        let e = 0.1;
        let mat = MaterialProperty::new().with_lobe_radius(e).with_f0(0.25);
        let omega = 2.0 * PI * (1.0 - e.cos());
        let inside = off_mirror(0.05);
        assert_relative_eq!(
            lobe_specular(&mat, &inside).unwrap(),
            1.0 / omega,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            wetterer_lobe_specular(&mat, &inside).unwrap(),
            0.25 / omega,
            max_relative = 1.0e-12
        );
        assert_eq!(
            lobe_specular(&MaterialProperty::new(), &inside),
            Err(LawFault::MissingParameter(Param::LobeRadius))
        );
    }

    #[test]
    fn narrow_lobe_keeps_its_boundary() {
        let e = 1.0e-9;
        let mat = MaterialProperty::new().with_lobe_radius(e).with_f0(0.5);
        let outside = off_mirror(5.0 * e);
        assert!(angle_between(outside.v(), outside.r()) > Rads::new(e));
        assert_eq!(crappy_lobe_specular(&mat, &outside), Ok(0.0));
        assert_eq!(lobe_specular(&mat, &outside), Ok(0.0));
        assert_eq!(crappy_lobe_specular(&mat, &off_mirror(2.0 * e)), Ok(0.0));

        let inside = off_mirror(0.5 * e);
        assert_eq!(crappy_lobe_specular(&mat, &inside), Ok(1.0));
        let expected = 1.0 / (PI * e * e);
        let lobe = lobe_specular(&mat, &inside).unwrap();
        assert!(lobe.is_finite());
        assert_relative_eq!(lobe, expected, max_relative = 1.0e-9);
        assert_relative_eq!(
            wetterer_lobe_specular(&mat, &inside).unwrap(),
            0.5 * expected,
            max_relative = 1.0e-9
        );
    }

    #[test]
    fn narrow_lobe_is_finite_on_the_mirror() {
        let mat = MaterialProperty::new().with_lobe_radius(1.0e-8);
        let mirrored = FacetGeometry::mirrored(oblique_light(), DVec3::Z);
        let lobe = lobe_specular(&mat, &mirrored).unwrap();
        assert!(lobe.is_finite());
        assert_relative_eq!(lobe, 1.0 / (PI * 1.0e-16), max_relative = 1.0e-9);
    }

    #[test]
    fn zero_radius_lobe_is_empty() {
        let mat = MaterialProperty::new().with_lobe_radius(0.0);
        let mirrored = FacetGeometry::mirrored(oblique_light(), DVec3::Z);
        assert_eq!(lobe_specular(&mat, &mirrored), Ok(0.0));
    }

    #[test]
    fn phong_peaks_in_mirror_direction() {
        let mat = MaterialProperty::new();
        let mirrored = FacetGeometry::mirrored(oblique_light(), DVec3::Z);
        assert_relative_eq!(phong_specular(&mat, &mirrored).unwrap(), 1.0, epsilon = 1.0e-12);
        let off = off_mirror(0.3);
        assert_relative_eq!(
            phong_specular(&mat, &off).unwrap(),
            0.3f64.cos().powf(10.0),
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn phong_negative_base_with_fractional_exponent_fails() {
        let mat = MaterialProperty::new().with_alpha(2.5);
        // Observer opposite to the mirror direction: R.V = -1.
        let geom = FacetGeometry::new(DVec3::Z, -DVec3::Z, DVec3::Z);
        assert!(matches!(phong_specular(&mat, &geom), Err(LawFault::Domain(_))));
        // An integral exponent is fine.
        let even = MaterialProperty::new().with_alpha(2.0);
        assert_relative_eq!(phong_specular(&even, &geom).unwrap(), 1.0);
    }

    #[test]
    fn blinn_phong_uses_four_times_alpha() {
        let a = 3.0;
        let geom = FacetGeometry::new(oblique_light(), DVec3::new(0.2, 0.4, 1.0), DVec3::Z);
        let n_dot_h = geom.n().dot(geom.h());
        let blinn = blinn_phong_specular(&MaterialProperty::new().with_alpha(a), &geom).unwrap();
        assert_relative_eq!(blinn, n_dot_h.powf(4.0 * a), epsilon = 1.0e-12);
        assert_ne!(blinn, n_dot_h.powf(a));
        // Blinn-Phong with alpha is Blinn-Phong with exponent 4 alpha, which
        // is what a material with 4 alpha gets through (N.H)^alpha.
        let quadrupled = MaterialProperty::new().with_alpha(4.0 * a);
        assert_relative_eq!(blinn, n_dot_h.powf(quadrupled.alpha()), epsilon = 1.0e-12);
    }

    #[test]
    fn placeholders_are_explicit() {
        let mat = MaterialProperty::new();
        let geom = FacetGeometry::new(DVec3::Z, DVec3::Z, DVec3::Z);
        for law in [
            gaussian_specular,
            beckmann_specular,
            heidrich_seidel_specular,
            ward_specular,
            cook_torrance_specular,
        ] {
            assert_eq!(law(&mat, &geom), Err(LawFault::Unimplemented));
        }
    }

    proptest! {
        #[test]
        fn mirror_laws_vanish_away_from_mirror(offset in 1.0e-6f64..0.7, f_0 in 0.0f64..1.0) {
            let mat = MaterialProperty::new().with_f0(f_0);
            let geom = off_mirror(offset);
            prop_assert_eq!(perfect_specular(&mat, &geom), Ok(0.0));
            prop_assert_eq!(fresnel_perfect_specular(&mat, &geom), Ok(0.0));
        }

        #[test]
        fn mirror_laws_fire_on_mirror(lx in -1.0f64..1.0, ly in -1.0f64..1.0, lz in 0.1f64..1.0,
            f_0 in 0.0f64..1.0)
        {
            let mat = MaterialProperty::new().with_f0(f_0);
            let geom = FacetGeometry::mirrored(DVec3::new(lx, ly, lz), DVec3::Z);
            prop_assert_eq!(perfect_specular(&mat, &geom), Ok(1.0));
            prop_assert_eq!(fresnel_perfect_specular(&mat, &geom), Ok(f_0));
        }
    }
}
