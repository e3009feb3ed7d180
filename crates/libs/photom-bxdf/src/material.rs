use crate::MissingParameter;
use base::math::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Material parameters recognised by the reflectance laws.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Param {
    /// Diffuse reflectivity (default 1).
    #[serde(rename = "rho")]
    Rho,
    /// Irradiance.
    #[serde(rename = "E_0")]
    E0,
    /// RGB colour.
    #[serde(rename = "color")]
    Color,
    /// Standard deviation of the facet slopes (Oren-Nayar roughness).
    #[serde(rename = "sigma")]
    Sigma,
    /// Fresnel reflectance at normal incidence.
    #[serde(rename = "F_0")]
    F0,
    /// Phong shininess exponent (default 10).
    #[serde(rename = "alpha")]
    Alpha,
    /// Half-angle in radians of a specular lobe.
    #[serde(rename = "lobe_radius")]
    LobeRadius,
    /// Single scattering albedo.
    #[serde(rename = "pomega_0")]
    Pomega0,
}

impl Param {
    /// All recognised parameters.
    pub const ALL: [Param; 8] = [
        Param::Rho,
        Param::E0,
        Param::Color,
        Param::Sigma,
        Param::F0,
        Param::Alpha,
        Param::LobeRadius,
        Param::Pomega0,
    ];

    /// Name of the parameter as written in material files.
    pub const fn name(&self) -> &'static str {
        match self {
            Param::Rho => "rho",
            Param::E0 => "E_0",
            Param::Color => "color",
            Param::Sigma => "sigma",
            Param::F0 => "F_0",
            Param::Alpha => "alpha",
            Param::LobeRadius => "lobe_radius",
            Param::Pomega0 => "pomega_0",
        }
    }

    /// Looks up a parameter by its name.
    pub fn from_name(name: &str) -> Option<Param> {
        Param::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

/// Value of a material parameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamValue {
    /// Scalar parameter.
    Scalar(f64),
    /// Vector parameter (colour).
    Vector(DVec3),
}

/// A set of physical parameters describing how a surface reflects light.
///
/// Only `rho` (1) and `alpha` (10) have defaults; every other parameter is
/// unset until given and reading it fails with [`MissingParameter`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialProperty {
    #[serde(default = "MaterialProperty::default_rho")]
    rho: f64,
    #[serde(rename = "E_0", default, skip_serializing_if = "Option::is_none")]
    e_0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<DVec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sigma: Option<f64>,
    #[serde(rename = "F_0", default, skip_serializing_if = "Option::is_none")]
    f_0: Option<f64>,
    #[serde(default = "MaterialProperty::default_alpha")]
    alpha: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lobe_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pomega_0: Option<f64>,
}

impl Default for MaterialProperty {
    fn default() -> Self { Self::new() }
}

impl MaterialProperty {
    /// Default diffuse reflectivity.
    pub const DEFAULT_RHO: f64 = 1.0;

    /// Default Phong shininess exponent.
    pub const DEFAULT_ALPHA: f64 = 10.0;

    fn default_rho() -> f64 { Self::DEFAULT_RHO }

    fn default_alpha() -> f64 { Self::DEFAULT_ALPHA }

    /// Creates a property set holding only the defaults.
    pub const fn new() -> Self {
        Self {
            rho: Self::DEFAULT_RHO,
            e_0: None,
            color: None,
            sigma: None,
            f_0: None,
            alpha: Self::DEFAULT_ALPHA,
            lobe_radius: None,
            pomega_0: None,
        }
    }

    /// Sets the diffuse reflectivity.
    pub const fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the irradiance.
    pub const fn with_e0(mut self, e_0: f64) -> Self {
        self.e_0 = Some(e_0);
        self
    }

    /// Sets the colour.
    pub const fn with_color(mut self, color: DVec3) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the Oren-Nayar roughness.
    pub const fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }

    /// Sets the Fresnel reflectance at normal incidence.
    pub const fn with_f0(mut self, f_0: f64) -> Self {
        self.f_0 = Some(f_0);
        self
    }

    /// Sets the Phong shininess exponent.
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the specular lobe half-angle in radians.
    pub const fn with_lobe_radius(mut self, lobe_radius: f64) -> Self {
        self.lobe_radius = Some(lobe_radius);
        self
    }

    /// Sets the single scattering albedo.
    pub const fn with_pomega0(mut self, pomega_0: f64) -> Self {
        self.pomega_0 = Some(pomega_0);
        self
    }

    /// Diffuse reflectivity.
    pub const fn rho(&self) -> f64 { self.rho }

    /// Phong shininess exponent.
    pub const fn alpha(&self) -> f64 { self.alpha }

    /// Irradiance.
    pub fn e_0(&self) -> Result<f64, MissingParameter> {
        self.e_0.ok_or(MissingParameter(Param::E0))
    }

    /// Colour.
    pub fn color(&self) -> Result<DVec3, MissingParameter> {
        self.color.ok_or(MissingParameter(Param::Color))
    }

    /// Oren-Nayar roughness.
    pub fn sigma(&self) -> Result<f64, MissingParameter> {
        self.sigma.ok_or(MissingParameter(Param::Sigma))
    }

    /// Fresnel reflectance at normal incidence.
    pub fn f_0(&self) -> Result<f64, MissingParameter> {
        self.f_0.ok_or(MissingParameter(Param::F0))
    }

    /// Specular lobe half-angle in radians.
    pub fn lobe_radius(&self) -> Result<f64, MissingParameter> {
        self.lobe_radius.ok_or(MissingParameter(Param::LobeRadius))
    }

    /// Single scattering albedo.
    pub fn pomega_0(&self) -> Result<f64, MissingParameter> {
        self.pomega_0.ok_or(MissingParameter(Param::Pomega0))
    }

    /// Returns the value of any parameter.
    pub fn get(&self, param: Param) -> Result<ParamValue, MissingParameter> {
        match param {
            Param::Rho => Ok(ParamValue::Scalar(self.rho)),
            Param::E0 => self.e_0().map(ParamValue::Scalar),
            Param::Color => self.color().map(ParamValue::Vector),
            Param::Sigma => self.sigma().map(ParamValue::Scalar),
            Param::F0 => self.f_0().map(ParamValue::Scalar),
            Param::Alpha => Ok(ParamValue::Scalar(self.alpha)),
            Param::LobeRadius => self.lobe_radius().map(ParamValue::Scalar),
            Param::Pomega0 => self.pomega_0().map(ParamValue::Scalar),
        }
    }

    /// Whether the parameter has a value (explicit or default).
    pub fn is_set(&self, param: Param) -> bool { self.get(param).is_ok() }

    /// Verifies that every parameter of `requires` has a value, reporting the
    /// first one missing.
    pub fn check(&self, requires: &[Param]) -> Result<(), MissingParameter> {
        match requires.iter().find(|p| !self.is_set(**p)) {
            Some(param) => Err(MissingParameter(*param)),
            None => Ok(()),
        }
    }
}

/// A named physical surface owning zero or more property sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Name of the material.
    pub name: String,
    /// Property sets of the material.
    #[serde(default)]
    pub properties: Vec<MaterialProperty>,
}

impl Material {
    /// Creates a material without any property set.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Adds a property set to the material.
    pub fn with_property(mut self, property: MaterialProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Returns the property set at `index`.
    pub fn property(&self, index: usize) -> Option<&MaterialProperty> { self.properties.get(index) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let mat = MaterialProperty::new();
        assert_eq!(mat.rho(), 1.0);
        assert_eq!(mat.alpha(), 10.0);
        assert_eq!(mat.get(Param::Rho), Ok(ParamValue::Scalar(1.0)));
        for param in [
            Param::E0,
            Param::Color,
            Param::Sigma,
            Param::F0,
            Param::LobeRadius,
            Param::Pomega0,
        ] {
            assert_eq!(mat.get(param), Err(MissingParameter(param)));
            assert!(!mat.is_set(param));
        }
    }

    #[test]
    fn check_reports_first_missing_parameter() {
        let mat = MaterialProperty::new().with_e0(2.0);
        assert_eq!(mat.check(&[Param::Rho, Param::E0]), Ok(()));
        assert_eq!(
            mat.check(&[Param::E0, Param::Sigma, Param::F0]),
            Err(MissingParameter(Param::Sigma))
        );
        assert_eq!(mat.check(&[]), Ok(()));
    }

    #[test]
    fn names_round_trip() {
        for param in Param::ALL {
            assert_eq!(Param::from_name(param.name()), Some(param));
        }
        assert_eq!(Param::from_name("roughness"), None);
        assert_eq!(Param::F0.to_string(), "F_0");
    }

    #[test]
    fn deserialize_from_toml() {
        let material: Material = toml::from_str(
            r#"
            name = "regolith"

            [[properties]]
            sigma = 0.3
            E_0 = 2.0

            [[properties]]
            rho = 0.5
            F_0 = 0.04
            color = [1.0, 0.5, 0.25]
            lobe_radius = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(material.name, "regolith");
        assert_eq!(material.properties.len(), 2);
        let rough = material.property(0).unwrap();
        assert_eq!(rough.rho(), 1.0);
        assert_eq!(rough.alpha(), 10.0);
        assert_eq!(rough.sigma(), Ok(0.3));
        assert_eq!(rough.e_0(), Ok(2.0));
        let shiny = material.property(1).unwrap();
        assert_eq!(shiny.rho(), 0.5);
        assert_eq!(shiny.f_0(), Ok(0.04));
        assert_eq!(shiny.color(), Ok(DVec3::new(1.0, 0.5, 0.25)));
        assert_eq!(shiny.lobe_radius(), Ok(0.1));
        assert!(material.property(2).is_none());
    }

    #[test]
    fn unknown_parameters_are_rejected() {
        let result = toml::from_str::<MaterialProperty>("roughness = 0.3");
        assert!(result.is_err());
    }
}
