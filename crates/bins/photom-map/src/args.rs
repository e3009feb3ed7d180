use base::cli::CommonArgs;
use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};

/// photom-map command line interface arguments.
#[derive(clap::Parser, Debug, Clone)]
#[clap(
    author,
    version,
    about = "Evaluates a reflectance law over a tessellated sphere and exports the field for \
             rendering."
)]
pub struct CliArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path to the scene description file.
    #[clap(
        short,
        long,
        help = "Path to the scene file (.toml). If not specified, the built-in\ndefault scene is \
                used"
    )]
    pub scene: Option<PathBuf>,

    /// Name of the law to evaluate, overrides the one of the scene.
    #[clap(short, long, help = "Name of the reflectance law to evaluate")]
    pub law: Option<String>,

    /// Name of the material, defaults to the first material of the scene.
    #[clap(short, long, help = "Name of the material to evaluate the law against")]
    pub material: Option<String>,

    /// Index of the property set of the material.
    #[clap(short, long, default_value_t = 0, help = "Index of the property set of the material")]
    pub property: usize,

    /// Subdivision level of the icosphere, overrides the one of the scene.
    #[clap(long, help = "Number of subdivisions of the icosahedron")]
    pub level: Option<u32>,

    /// Output file.
    #[clap(
        short,
        long,
        help = "Output file. Defaults to <law>_<material>_<property>.<format>\nin the output \
                directory of the scene"
    )]
    pub output: Option<PathBuf>,

    /// Output format.
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Geojson)]
    pub format: OutputFormat,

    /// Sentinel written at facets where the law fails.
    #[clap(
        long,
        allow_negative_numbers = true,
        help = "Write this value at facets where the law fails instead of\naborting"
    )]
    pub substitute: Option<f64>,

    /// Evaluates the facets in parallel.
    #[clap(long, help = "Evaluate the facets in parallel")]
    pub parallel: bool,

    /// Lists the laws and exits.
    #[clap(long, help = "List the available laws and exit")]
    pub list_laws: bool,
}

/// Format of the exported field.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// GeoJSON feature collection, one polygon per facet.
    #[default]
    Geojson,
    /// CSV table, one row per facet barycentre.
    Csv,
}

impl OutputFormat {
    /// File extension of the format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Geojson => "geojson",
            Self::Csv => "csv",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.extension()) }
}
