use crate::{FacetGeometry, GeomTerm, LawError, LawFault, MaterialProperty, Param, Reflectance};
use base::{math::DVec3, Isotropy};
use std::fmt::{Debug, Display, Formatter};

/// Family of a reflectance law.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LawFamily {
    /// Isotropic scattering, independent of the observer except through
    /// the geometry angles.
    Diffuse,
    /// Scattering concentrated around the mirror direction.
    Specular,
}

impl Display for LawFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LawFamily::Diffuse => write!(f, "diffuse"),
            LawFamily::Specular => write!(f, "specular"),
        }
    }
}

/// Common interface of everything the field evaluator can apply to a facet.
pub trait ReflectanceLaw: Send + Sync {
    /// Name of the law.
    fn name(&self) -> &str;

    /// Number of channels of the values returned by the law.
    fn channels(&self) -> usize { 1 }

    /// Material parameters the law reads.
    fn requires(&self) -> &[Param] { &[] }

    /// Whether the law has a computation.
    fn is_implemented(&self) -> bool { true }

    /// Family of the law, if it belongs to one.
    fn family(&self) -> Option<LawFamily> { None }

    /// Isotropy of the law.
    fn isotropy(&self) -> Isotropy { Isotropy::Isotropic }

    /// Geometric quantities read by the law.
    fn geometry(&self) -> &[GeomTerm] { &[] }

    /// Verifies that the law can be evaluated against the material.
    fn check(&self, material: &MaterialProperty) -> Result<(), LawError> {
        if !self.is_implemented() {
            return Err(LawError::Unimplemented {
                law: self.name().to_string(),
            });
        }
        material
            .check(self.requires())
            .map_err(|err| LawError::from_fault(self.name(), err.into()))
    }

    /// Evaluates the law for one material and one geometry sample.
    fn eval(
        &self,
        material: &MaterialProperty,
        geometry: &FacetGeometry,
    ) -> Result<Reflectance, LawError>;
}

/// Signature of a law returning a scalar.
pub type ScalarLawFn = fn(&MaterialProperty, &FacetGeometry) -> Result<f64, LawFault>;

/// Signature of a law returning a colour.
pub type ColorLawFn = fn(&MaterialProperty, &FacetGeometry) -> Result<DVec3, LawFault>;

#[derive(Copy, Clone)]
enum LawBody {
    Scalar(ScalarLawFn),
    Color(ColorLawFn),
    Placeholder,
}

/// Catalogue entry of a reflectance law: its name, its capability set and
/// its computation.
///
/// [`Law::eval`] validates the capability set before running the
/// computation, so a law never sees a material lacking one of its
/// parameters.
#[derive(Copy, Clone)]
pub struct Law {
    name: &'static str,
    family: LawFamily,
    isotropy: Isotropy,
    requires: &'static [Param],
    geometry: &'static [GeomTerm],
    body: LawBody,
}

impl Law {
    /// Law computing a scalar.
    pub const fn scalar(
        name: &'static str,
        family: LawFamily,
        requires: &'static [Param],
        geometry: &'static [GeomTerm],
        f: ScalarLawFn,
    ) -> Self {
        Self {
            name,
            family,
            isotropy: Isotropy::Isotropic,
            requires,
            geometry,
            body: LawBody::Scalar(f),
        }
    }

    /// Law computing a colour.
    pub const fn color(
        name: &'static str,
        family: LawFamily,
        requires: &'static [Param],
        geometry: &'static [GeomTerm],
        f: ColorLawFn,
    ) -> Self {
        Self {
            name,
            family,
            isotropy: Isotropy::Isotropic,
            requires,
            geometry,
            body: LawBody::Color(f),
        }
    }

    /// Law declared in the catalogue without a computation. Evaluating it
    /// fails with [`LawError::Unimplemented`].
    pub const fn placeholder(name: &'static str, family: LawFamily) -> Self {
        Self {
            name,
            family,
            isotropy: Isotropy::Isotropic,
            requires: &[],
            geometry: &[],
            body: LawBody::Placeholder,
        }
    }

    /// Marks the law as anisotropic.
    pub const fn anisotropic(mut self) -> Self {
        self.isotropy = Isotropy::Anisotropic;
        self
    }
}

impl Debug for Law {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Law")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("isotropy", &self.isotropy)
            .field("requires", &self.requires)
            .field("geometry", &self.geometry)
            .field("implemented", &self.is_implemented())
            .finish()
    }
}

impl ReflectanceLaw for Law {
    fn name(&self) -> &str { self.name }

    fn channels(&self) -> usize {
        match self.body {
            LawBody::Color(_) => 3,
            _ => 1,
        }
    }

    fn requires(&self) -> &[Param] { self.requires }

    fn is_implemented(&self) -> bool { !matches!(self.body, LawBody::Placeholder) }

    fn family(&self) -> Option<LawFamily> { Some(self.family) }

    fn isotropy(&self) -> Isotropy { self.isotropy }

    fn geometry(&self) -> &[GeomTerm] { self.geometry }

    fn eval(
        &self,
        material: &MaterialProperty,
        geometry: &FacetGeometry,
    ) -> Result<Reflectance, LawError> {
        self.check(material)?;
        let value = match self.body {
            LawBody::Scalar(f) => f(material, geometry).map(Reflectance::Scalar),
            LawBody::Color(f) => f(material, geometry).map(Reflectance::Color),
            LawBody::Placeholder => Err(LawFault::Unimplemented),
        };
        value.map_err(|fault| LawError::from_fault(self.name, fault))
    }
}

/// A reflectance law defined by a closure.
///
/// Lets callers plug their own computation into the evaluator.
pub struct CustomLaw<F> {
    name: String,
    channels: usize,
    requires: Vec<Param>,
    f: F,
}

impl<F> CustomLaw<F>
where
    F: Fn(&MaterialProperty, &FacetGeometry) -> Result<Reflectance, LawFault> + Send + Sync,
{
    /// Creates a single channel law.
    pub fn new<S: Into<String>>(name: S, requires: &[Param], f: F) -> Self {
        Self {
            name: name.into(),
            channels: 1,
            requires: requires.to_vec(),
            f,
        }
    }

    /// Sets the number of channels of the returned values.
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }
}

impl<F> ReflectanceLaw for CustomLaw<F>
where
    F: Fn(&MaterialProperty, &FacetGeometry) -> Result<Reflectance, LawFault> + Send + Sync,
{
    fn name(&self) -> &str { &self.name }

    fn channels(&self) -> usize { self.channels }

    fn requires(&self) -> &[Param] { &self.requires }

    fn eval(
        &self,
        material: &MaterialProperty,
        geometry: &FacetGeometry,
    ) -> Result<Reflectance, LawError> {
        self.check(material)?;
        (self.f)(material, geometry).map_err(|fault| LawError::from_fault(&self.name, fault))
    }
}
