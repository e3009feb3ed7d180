//! Two-term scattering functions taking raw vectors and coefficients.
use crate::LawFault;
use base::math::{pow_real, DVec3};

/// Wavefront-style diffuse plus specular model:
/// $K_d (\mathbf{N} \cdot \mathbf{L}) + K_s (\mathbf{H} \cdot \mathbf{L})^{N_s}$.
pub fn wavefront(kd: f64, n: DVec3, l: DVec3, ks: f64, h: DVec3, ns: f64) -> Result<f64, LawFault> {
    let cos = h.dot(l);
    let specular = pow_real(cos, ns)
        .ok_or_else(|| LawFault::Domain(format!("(H.L)^Ns undefined for H.L = {cos}, Ns = {ns}")))?;
    Ok(kd * n.dot(l) + ks * specular)
}

/// Diffuse term plus a specular indicator that is 1 when `R` lies within
/// distance `eps` of `V`: $K_d (\mathbf{N} \cdot \mathbf{L}) + K_s s$.
pub fn lobe(kd: f64, n: DVec3, l: DVec3, ks: f64, r: DVec3, eps: f64, v: DVec3) -> f64 {
    let specular = if r.distance(v) <= eps { 1.0 } else { 0.0 };
    kd * n.dot(l) + ks * specular
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wavefront_two_terms() {
        let l = DVec3::new(0.0, 0.6, 0.8);
        let h = DVec3::new(0.0, 0.0, 1.0);
        let value = wavefront(0.5, DVec3::Z, l, 0.25, h, 2.0).unwrap();
        assert_relative_eq!(value, 0.5 * 0.8 + 0.25 * 0.64);
    }

    #[test]
    fn wavefront_negative_base_fractional_exponent() {
        let result = wavefront(0.5, DVec3::Z, DVec3::Z, 0.5, -DVec3::Z, 1.5);
        assert!(matches!(result, Err(LawFault::Domain(_))));
    }

    #[test]
    fn lobe_includes_specular_term_inside_tolerance() {
        let r = DVec3::new(0.0, 0.6, 0.8);
        let near = DVec3::new(0.0, 0.61, 0.79);
        let far = DVec3::new(0.6, 0.0, 0.8);
        assert_relative_eq!(lobe(0.5, DVec3::Z, DVec3::Z, 0.3, r, 0.05, near), 0.8);
        assert_relative_eq!(lobe(0.5, DVec3::Z, DVec3::Z, 0.3, r, 0.05, far), 0.5);
        // The tolerance is inclusive.
        assert_relative_eq!(lobe(0.5, DVec3::Z, DVec3::Z, 0.3, r, 0.0, r), 0.8);
    }
}
