use crate::{FacetGeometry, LawError, MaterialProperty, Reflectance, ReflectanceLaw};
use base::math::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sphere::FacetSphere;

/// How the facet centre of the sphere enters the geometry of a sample.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// The facet centre is the surface normal; light and observer are fixed.
    /// The field shows the appearance of a lit sphere.
    #[default]
    Normal,
    /// The facet centre is the observer direction; light and normal are
    /// fixed. The field shows the law over all outgoing directions.
    Outgoing,
}

/// Light, observer and normal directions shared by every facet of an
/// evaluation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Illumination {
    light: DVec3,
    observer: DVec3,
    normal: DVec3,
    mode: SamplingMode,
}

impl Default for Illumination {
    fn default() -> Self { Self::new(DVec3::Z, DVec3::Z) }
}

impl Illumination {
    /// Fixed light and observer; each facet centre is taken as the normal.
    pub fn new(light: DVec3, observer: DVec3) -> Self {
        Self {
            light,
            observer,
            normal: DVec3::Z,
            mode: SamplingMode::Normal,
        }
    }

    /// Fixed light and surface normal; each facet centre is taken as the
    /// observer direction.
    pub fn outgoing(light: DVec3, normal: DVec3) -> Self {
        Self {
            light,
            observer: normal,
            normal,
            mode: SamplingMode::Outgoing,
        }
    }

    /// Direction towards the light.
    pub fn light(&self) -> DVec3 { self.light }

    /// Direction towards the observer, used in [`SamplingMode::Normal`].
    pub fn observer(&self) -> DVec3 { self.observer }

    /// Surface normal, used in [`SamplingMode::Outgoing`].
    pub fn normal(&self) -> DVec3 { self.normal }

    /// Sampling mode.
    pub fn mode(&self) -> SamplingMode { self.mode }

    /// Geometry of the sample at the facet whose centre is `center`.
    pub fn geometry_at(&self, center: DVec3) -> FacetGeometry {
        match self.mode {
            SamplingMode::Normal => FacetGeometry::new(self.light, self.observer, center),
            SamplingMode::Outgoing => FacetGeometry::new(self.light, center, self.normal),
        }
    }
}

/// What to do when the law fails on a facet.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum FailurePolicy {
    /// Abort the whole evaluation.
    #[default]
    Abort,
    /// Write the sentinel in every channel of the facet and go on. The
    /// failed facets are listed by [`Field::substituted`].
    Substitute(f64),
}

/// Options of [`evaluate_field_with`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FieldOptions {
    /// Evaluate the facets on the rayon thread pool.
    pub parallel: bool,
    /// Policy applied to per-facet failures.
    pub on_error: FailurePolicy,
}

/// Error raised by the field evaluator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The law can't be evaluated against the material at all.
    #[error(transparent)]
    Law(#[from] LawError),
    /// The law failed on one facet.
    #[error("evaluation failed at facet {facet}: {source}")]
    Facet {
        /// Id of the facet.
        facet: usize,
        /// Failure of the law.
        source: LawError,
    },
    /// The law returned a value whose number of channels differs from the
    /// one it declares.
    #[error("law `{law}` returned {found} channel(s) at facet {facet}, expected {expected}")]
    ChannelMismatch {
        /// Id of the facet.
        facet: usize,
        /// Name of the law.
        law: String,
        /// Declared number of channels.
        expected: usize,
        /// Number of channels of the value.
        found: usize,
    },
}

impl FieldError {
    /// Id of the facet the error occurred at, if any.
    pub fn facet(&self) -> Option<usize> {
        match self {
            FieldError::Law(_) => None,
            FieldError::Facet { facet, .. } | FieldError::ChannelMismatch { facet, .. } => {
                Some(*facet)
            }
        }
    }
}

/// Values of a reflectance law over the facets of a sphere, in facet order.
///
/// Values are stored flat, `channels` consecutive values per facet.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    law: String,
    channels: usize,
    values: Box<[f64]>,
    substituted: Vec<usize>,
}

impl Field {
    /// Name of the law that produced the field.
    pub fn law(&self) -> &str { &self.law }

    /// Number of values per facet.
    pub fn channels(&self) -> usize { self.channels }

    /// Number of facets.
    pub fn len(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.values.len() / self.channels
        }
    }

    /// Whether the field covers no facet.
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Values of the facet.
    pub fn get(&self, facet: usize) -> Option<&[f64]> {
        let start = facet.checked_mul(self.channels)?;
        self.values.get(start..start.checked_add(self.channels)?)
    }

    /// All values, facet after facet.
    pub fn values(&self) -> &[f64] { &self.values }

    /// Values of a single channel field, `None` for a multichannel one.
    pub fn scalars(&self) -> Option<&[f64]> {
        if self.channels == 1 {
            Some(&self.values)
        } else {
            None
        }
    }

    /// Values of channel `c` of every facet.
    pub fn channel(&self, c: usize) -> impl Iterator<Item = f64> + '_ {
        let count = if c < self.channels { self.len() } else { 0 };
        self.values.iter().skip(c).step_by(self.channels.max(1)).take(count).copied()
    }

    /// Smallest and largest finite values of the field.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }

    /// Facets whose value is the sentinel of [`FailurePolicy::Substitute`].
    pub fn substituted(&self) -> &[usize] { &self.substituted }
}

/// Evaluates `law` on every facet of `sphere`, aborting on the first failure.
pub fn evaluate_field<S>(
    sphere: &S,
    law: &dyn ReflectanceLaw,
    material: &MaterialProperty,
    illumination: &Illumination,
) -> Result<Field, FieldError>
where
    S: FacetSphere + ?Sized,
{
    evaluate_field_with(sphere, law, material, illumination, &FieldOptions::default())
}

/// Evaluates `law` on every facet of `sphere`.
///
/// The capability check of the law runs once before any facet is visited;
/// its failure aborts the evaluation whatever the failure policy. Facet
/// failures are handled according to `options.on_error`.
pub fn evaluate_field_with<S>(
    sphere: &S,
    law: &dyn ReflectanceLaw,
    material: &MaterialProperty,
    illumination: &Illumination,
    options: &FieldOptions,
) -> Result<Field, FieldError>
where
    S: FacetSphere + ?Sized,
{
    law.check(material)?;

    let channels = law.channels();
    let eval = |facet: usize| -> Result<Reflectance, FieldError> {
        let geometry = illumination.geometry_at(sphere.facet_center(facet));
        let value = law
            .eval(material, &geometry)
            .map_err(|source| FieldError::Facet { facet, source })?;
        if value.channels() != channels {
            return Err(FieldError::ChannelMismatch {
                facet,
                law: law.name().to_string(),
                expected: channels,
                found: value.channels(),
            });
        }
        Ok(value)
    };

    log::debug!(
        "Evaluating law {} over {} facets ({:?} sampling, parallel: {})",
        law.name(),
        sphere.facet_count(),
        illumination.mode(),
        options.parallel
    );

    let ids = sphere.facet_ids();
    let field = if options.parallel {
        let results: Vec<_> = ids.clone().into_par_iter().map(&eval).collect();
        assemble(law.name(), channels, ids.zip(results), options.on_error)?
    } else {
        assemble(law.name(), channels, ids.map(|facet| (facet, eval(facet))), options.on_error)?
    };

    if !field.substituted.is_empty() {
        log::warn!(
            "Law {}: {} of {} facets substituted",
            field.law,
            field.substituted.len(),
            field.len()
        );
    }
    Ok(field)
}

/// Collects per-facet results into a field, in iteration order.
fn assemble<I>(
    law: &str,
    channels: usize,
    results: I,
    policy: FailurePolicy,
) -> Result<Field, FieldError>
where
    I: ExactSizeIterator<Item = (usize, Result<Reflectance, FieldError>)>,
{
    let mut values = Vec::with_capacity(results.len() * channels);
    let mut substituted = Vec::new();
    for (facet, result) in results {
        match (result, policy) {
            (Ok(value), _) => value.extend_into(&mut values),
            (Err(err), FailurePolicy::Abort) => return Err(err),
            (Err(err), FailurePolicy::Substitute(sentinel)) => {
                log::warn!("{err}, substituting {sentinel}");
                values.extend(std::iter::repeat(sentinel).take(channels));
                substituted.push(facet);
            }
        }
    }
    Ok(Field {
        law: law.to_string(),
        channels,
        values: values.into_boxed_slice(),
        substituted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sampling_modes() {
        let light = DVec3::new(1.0, 0.0, 1.0);
        let center = DVec3::new(0.0, 1.0, 1.0);
        let normal = Illumination::new(light, DVec3::Z).geometry_at(center);
        assert_relative_eq!(normal.n().dot(center.normalize()), 1.0);
        assert_eq!(normal.v(), DVec3::Z);

        let outgoing = Illumination::outgoing(light, DVec3::Z).geometry_at(center);
        assert_eq!(outgoing.n(), DVec3::Z);
        assert_relative_eq!(outgoing.v().dot(center.normalize()), 1.0);
        assert_relative_eq!(outgoing.l().dot(light.normalize()), 1.0);
    }

    #[test]
    fn out_of_range_facets_have_no_value() {
        let field = Field {
            law: "constant".to_string(),
            channels: 1,
            values: vec![5.0; 4].into_boxed_slice(),
            substituted: Vec::new(),
        };
        assert_eq!(field.get(3), Some(&[5.0][..]));
        assert_eq!(field.get(4), None);
        assert_eq!(field.get(usize::MAX), None);
        assert_eq!(field.get(usize::MAX / 2 + 1), None);
    }

    #[test]
    fn field_accessors() {
        let field = Field {
            law: "rgb".to_string(),
            channels: 3,
            values: vec![0.0, 1.0, 2.0, 3.0, 4.0, f64::NAN].into_boxed_slice(),
            substituted: vec![1],
        };
        assert_eq!(field.len(), 2);
        assert!(!field.is_empty());
        assert_eq!(field.get(0), Some(&[0.0, 1.0, 2.0][..]));
        assert_eq!(field.get(2), None);
        assert_eq!(field.get(usize::MAX), None);
        assert_eq!(field.scalars(), None);
        assert_eq!(field.channel(1).collect::<Vec<_>>(), vec![1.0, 4.0]);
        assert_eq!(field.channel(3).count(), 0);
        assert_eq!(field.min_max(), Some((0.0, 4.0)));
        assert_eq!(field.substituted(), &[1]);
    }

    #[test]
    fn field_error_reports_facet() {
        let err = FieldError::Facet {
            facet: 12,
            source: LawError::Unimplemented {
                law: "ward_specular".to_string(),
            },
        };
        assert_eq!(err.facet(), Some(12));
        assert_eq!(
            err.to_string(),
            "evaluation failed at facet 12: law `ward_specular` is declared but not implemented"
        );
        assert_eq!(FieldError::from(LawError::UnknownLaw("x".into())).facet(), None);
    }
}
