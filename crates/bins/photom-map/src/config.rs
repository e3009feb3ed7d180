use base::{
    error::PhotomError,
    math::{lon_lat_to_cartesian, DVec3},
    units::Degs,
};
use bxdf::{Illumination, Material, MaterialProperty, SamplingMode};
use serde::{Deserialize, Serialize};
use sphere::{IcoSphere, Rotation};
use std::path::{Path, PathBuf};

/// Direction given by its geographic coordinate in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoDirection {
    /// Latitude, 90° is the north pole.
    pub lat: f64,
    /// Longitude, 0° is the positive x-axis.
    pub lon: f64,
}

impl GeoDirection {
    /// The north pole.
    pub const NORTH_POLE: Self = Self { lat: 90.0, lon: 0.0 };

    /// Unit vector of the direction.
    pub fn to_cartesian(&self) -> DVec3 {
        lon_lat_to_cartesian(Degs::new(self.lon), Degs::new(self.lat), 1.0)
    }
}

impl Default for GeoDirection {
    fn default() -> Self { Self::NORTH_POLE }
}

/// Light and observer configuration of the scene.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IlluminationConfig {
    /// Direction towards the light.
    #[serde(default)]
    pub light: GeoDirection,
    /// Direction towards the observer, used by the `normal` sampling mode.
    #[serde(default)]
    pub observer: GeoDirection,
    /// Surface normal, used by the `outgoing` sampling mode.
    #[serde(default)]
    pub normal: GeoDirection,
    /// How facet centres enter the geometry.
    #[serde(default)]
    pub mode: SamplingMode,
}

impl IlluminationConfig {
    /// Illumination shared by every facet.
    pub fn illumination(&self) -> Illumination {
        match self.mode {
            SamplingMode::Normal => {
                Illumination::new(self.light.to_cartesian(), self.observer.to_cartesian())
            }
            SamplingMode::Outgoing => {
                Illumination::outgoing(self.light.to_cartesian(), self.normal.to_cartesian())
            }
        }
    }
}

/// Tessellation of the sampling sphere.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereConfig {
    /// Number of subdivisions of the icosahedron.
    #[serde(default = "SphereConfig::default_level")]
    pub level: u32,
    /// Whether to put a vertex of the icosahedron on each pole.
    #[serde(default = "SphereConfig::default_rotate")]
    pub rotate: bool,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            rotate: Self::default_rotate(),
        }
    }
}

impl SphereConfig {
    fn default_level() -> u32 { 3 }

    fn default_rotate() -> bool { true }

    /// Builds the icosphere.
    pub fn build(&self) -> IcoSphere {
        let rotation = if self.rotate {
            Rotation::for_icosphere()
        } else {
            Rotation::identity()
        };
        IcoSphere::icosahedron().rotated(&rotation).divided(self.level)
    }
}

/// Scene to evaluate: materials, illumination and sampling sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Law evaluated when none is given on the command line.
    #[serde(default)]
    pub law: Option<String>,

    /// Directory where the outputs are written. Relative paths are resolved
    /// against the directory of the scene file.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Materials of the scene.
    #[serde(default = "SceneConfig::default_materials")]
    pub materials: Vec<Material>,

    /// Light and observer.
    #[serde(default)]
    pub illumination: IlluminationConfig,

    /// Sampling sphere.
    #[serde(default)]
    pub sphere: SphereConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            law: None,
            output_dir: None,
            materials: Self::default_materials(),
            illumination: IlluminationConfig::default(),
            sphere: SphereConfig::default(),
        }
    }
}

impl SceneConfig {
    fn default_materials() -> Vec<Material> {
        vec![Material::new("default").with_property(MaterialProperty::new())]
    }

    /// Load [`SceneConfig`] from a .toml file.
    pub fn load(path: &Path) -> Result<Self, PhotomError> {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let string = std::fs::read_to_string(path).map_err(|err| {
            PhotomError::from_io_error(
                err,
                format!("Failed to read scene file: {}", path.display()),
            )
        })?;
        let mut config = Self::parse(&string).map_err(|err| {
            PhotomError::new(
                format!("Failed to parse scene file: {}", path.display()),
                Some(Box::new(err)),
            )
        })?;
        if let Some(output_dir) = config.output_dir {
            config.output_dir = Some(base.join(output_dir));
        }
        log::info!("Loaded scene {}", path.display());
        log::info!("    - Law: {:?}", config.law);
        log::info!(
            "    - Materials: {:?}",
            config.materials.iter().map(|m| m.name.as_str()).collect::<Vec<_>>()
        );
        log::info!("    - Illumination: {:?}", config.illumination);
        log::info!("    - Sphere: {:?}", config.sphere);
        log::info!("    - Output directory: {:?}", config.output_dir);
        Ok(config)
    }

    /// Parses a scene from its TOML text.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> { toml::from_str(text) }

    /// Returns the material named `name`, or the first one if no name is
    /// given.
    pub fn material(&self, name: Option<&str>) -> Result<&Material, PhotomError> {
        let found = match name {
            Some(name) => self.materials.iter().find(|m| m.name == name),
            None => self.materials.first(),
        };
        found.ok_or_else(|| {
            PhotomError::new(
                format!(
                    "Material {} not found in the scene",
                    name.unwrap_or("<first>")
                ),
                None,
            )
        })
    }

    /// Resolves an output file name against the output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}
