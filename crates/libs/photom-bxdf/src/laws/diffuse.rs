//! Diffuse reflectance laws.
use crate::{FacetGeometry, LawFault, MaterialProperty};
use base::math::{sqr, DVec3};
use std::f64::consts::PI;

/// Lambertian reflectance for a unit irradiance: $\rho / \pi$.
pub fn lambert_diffuse(mat: &MaterialProperty, _geom: &FacetGeometry) -> Result<f64, LawFault> {
    Ok(mat.rho() / PI)
}

/// Lambertian reflectance scaled by the irradiance: $\rho E_0 / \pi$.
pub fn irradiance_lambert_diffuse(
    mat: &MaterialProperty,
    _geom: &FacetGeometry,
) -> Result<f64, LawFault> {
    Ok(mat.rho() * mat.e_0()? / PI)
}

/// Lambertian reflectance expressed as the material colour.
pub fn color_lambert_diffuse(
    mat: &MaterialProperty,
    _geom: &FacetGeometry,
) -> Result<DVec3, LawFault> {
    Ok(mat.color()?)
}

/// Diffuse term of the Phong model, which is the Lambertian law.
pub fn phong_diffuse(mat: &MaterialProperty, geom: &FacetGeometry) -> Result<f64, LawFault> {
    lambert_diffuse(mat, geom)
}

/// Oren-Nayar reflectance of a rough diffuse surface.
///
/// $$
/// \frac{\rho}{\pi} E_0 \left[A + B \max(0, \cos(\theta_i - \theta_r)) \sin\alpha \cos\beta\right]
/// $$
///
/// with $A = 1 - 0.5\frac{\sigma^2}{\sigma^2 + 0.33}$,
/// $B = 0.45\frac{\sigma^2}{\sigma^2 + 0.09}$, $\alpha = \max(\theta_i, \theta_r)$ and
/// $\beta = \min(\theta_i, \theta_r)$.
pub fn oren_nayar_diffuse(mat: &MaterialProperty, geom: &FacetGeometry) -> Result<f64, LawFault> {
    let sigma2 = sqr(mat.sigma()?);
    let e_0 = mat.e_0()?;
    let (ti, tr) = (geom.theta_i(), geom.theta_r());
    let a = 1.0 - 0.5 * sigma2 / (sigma2 + 0.33);
    let b = 0.45 * sigma2 / (sigma2 + 0.09);
    let alpha = ti.max(tr);
    let beta = ti.min(tr);
    let bracket = a + b * (ti - tr).cos().max(0.0) * alpha.sin() * beta.cos();
    Ok(mat.rho() / PI * e_0 * bracket)
}

/// Minnaert limb-darkening law. Declared, not implemented.
pub fn minnaert_diffuse(_mat: &MaterialProperty, _geom: &FacetGeometry) -> Result<f64, LawFault> {
    Err(LawFault::Unimplemented)
}

/// Anisotropic diffuse term of the Ashikhmin-Shirley model. Declared, not
/// implemented.
pub fn ashikhmin_shirley_diffuse(
    _mat: &MaterialProperty,
    _geom: &FacetGeometry,
) -> Result<f64, LawFault> {
    Err(LawFault::Unimplemented)
}
