use base::math::{angle_between, normalize, reflect, DVec3};

/// Geometric quantities a reflectance law may read from a [`FacetGeometry`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeomTerm {
    /// Direction towards the light source.
    L,
    /// Direction towards the observer.
    V,
    /// Surface normal.
    N,
    /// Halfway vector between `L` and `V`.
    H,
    /// Mirror reflection of `L` about `N`.
    R,
    /// Incidence angle, between `L` and `N`.
    ThetaI,
    /// Reflection angle, between `V` and `N`.
    ThetaR,
    /// Cosine of the incidence angle.
    MuI,
}

/// Local frame of one sample point on the surface.
///
/// All directions are unit vectors pointing away from the surface;
/// `H = normalize(L + V)` and `R = reflect(L, N)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FacetGeometry {
    l: DVec3,
    v: DVec3,
    n: DVec3,
    h: DVec3,
    r: DVec3,
    theta_i: f64,
    theta_r: f64,
    mu_i: f64,
}

impl FacetGeometry {
    /// Builds the frame from the light, observer and normal directions,
    /// which are normalised first.
    pub fn new(light: DVec3, observer: DVec3, normal: DVec3) -> Self {
        let l = normalize(light);
        let v = normalize(observer);
        let n = normalize(normal);
        let r = reflect(l, n);
        Self {
            l,
            v,
            n,
            h: normalize(l + v),
            r,
            theta_i: angle_between(l, n).value(),
            theta_r: angle_between(v, n).value(),
            mu_i: n.dot(l),
        }
    }

    /// Builds the frame where the observer sits exactly in the mirror
    /// direction of the light (`V == R`).
    pub fn mirrored(light: DVec3, normal: DVec3) -> Self {
        let l = normalize(light);
        let n = normalize(normal);
        let r = reflect(l, n);
        let mut geom = Self::new(l, r, n);
        // Normalising R again may move it by an ulp.
        geom.v = geom.r;
        geom.h = normalize(geom.l + geom.v);
        geom.theta_r = angle_between(geom.v, geom.n).value();
        geom
    }

    /// Direction towards the light source.
    pub fn l(&self) -> DVec3 { self.l }

    /// Direction towards the observer.
    pub fn v(&self) -> DVec3 { self.v }

    /// Surface normal.
    pub fn n(&self) -> DVec3 { self.n }

    /// Halfway vector between `L` and `V`.
    pub fn h(&self) -> DVec3 { self.h }

    /// Mirror reflection of `L` about `N`.
    pub fn r(&self) -> DVec3 { self.r }

    /// Incidence angle in radians.
    pub fn theta_i(&self) -> f64 { self.theta_i }

    /// Reflection angle in radians.
    pub fn theta_r(&self) -> f64 { self.theta_r }

    /// Cosine of the incidence angle.
    pub fn mu_i(&self) -> f64 { self.mu_i }
}
