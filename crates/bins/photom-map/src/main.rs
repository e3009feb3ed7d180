//! Evaluates a reflectance law over every facet of an icosphere and writes
//! the resulting field for choropleth or scatter rendering.
use crate::{
    args::{CliArgs, OutputFormat},
    config::SceneConfig,
};
use base::{cli, error::PhotomError};
use bxdf::{evaluate_field_with, FailurePolicy, FieldOptions, LawRegistry, ReflectanceLaw};

mod args;
mod config;
mod export;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, launch_time) = cli::parse_args::<CliArgs>("photom-map");

    cli::setup_logging(
        args.common.log_timestamp.then_some(launch_time),
        args.common.log_level,
        &[],
    );

    run(args).map_err(|err| {
        log::error!("{}", err);
        err.into()
    })
}

fn run(args: CliArgs) -> Result<(), PhotomError> {
    let registry = LawRegistry::builtin()
        .map_err(|err| PhotomError::new("Failed to build the law catalogue", Some(Box::new(err))))?;

    if args.list_laws {
        for line in law_table(&registry) {
            println!("{line}");
        }
        return Ok(());
    }

    let scene = match &args.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    let law_name = args.law.as_deref().or(scene.law.as_deref()).ok_or_else(|| {
        PhotomError::new(
            "No law to evaluate, use --law or set `law` in the scene file",
            None,
        )
    })?;
    let law = registry
        .get(law_name)
        .map_err(|err| PhotomError::new("Failed to select the law", Some(Box::new(err))))?;
    let material = scene.material(args.material.as_deref())?;
    let property = material.property(args.property).ok_or_else(|| {
        PhotomError::new(
            format!(
                "Material {} has no property set at index {} ({} available)",
                material.name,
                args.property,
                material.properties.len()
            ),
            None,
        )
    })?;

    let mut sphere_config = scene.sphere;
    if let Some(level) = args.level {
        sphere_config.level = level;
    }
    let sphere = sphere_config.build();
    let options = FieldOptions {
        parallel: args.parallel,
        on_error: args.substitute.map_or(FailurePolicy::Abort, FailurePolicy::Substitute),
    };

    log::info!(
        "Evaluating {} on material {}[{}] over {} facets",
        law.name(),
        material.name,
        args.property,
        sphere.facets().len()
    );
    let field = evaluate_field_with(
        &sphere,
        law,
        property,
        &scene.illumination.illumination(),
        &options,
    )
    .map_err(|err| {
        PhotomError::new(
            format!(
                "Failed to evaluate law {} on material {}",
                law.name(),
                material.name
            ),
            Some(Box::new(err)),
        )
    })?;
    match field.min_max() {
        Some((min, max)) => log::info!("Field range: [{}, {}]", min, max),
        None => log::warn!("Field has no finite value"),
    }

    let output = args.output.clone().unwrap_or_else(|| {
        scene.output_path(&format!(
            "{}_{}_{}.{}",
            law.name(),
            material.name,
            args.property,
            args.format.extension()
        ))
    });
    match args.format {
        OutputFormat::Geojson => export::write_geojson(&sphere, &field, &output)?,
        OutputFormat::Csv => export::write_csv(&sphere, &field, &output)?,
    }
    log::info!("Field written to {}", output.display());
    println!("{}", output.display());
    Ok(())
}

/// One line per registered law, in registration order, under a header.
fn law_table(registry: &LawRegistry) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<28} {:<9} {:<11} {:<12} {:<20} requires",
        "law", "family", "isotropy", "implemented", "reads"
    )];
    lines.extend(registry.iter().map(|law| {
        let requires = law
            .requires()
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ");
        let reads = law
            .geometry()
            .iter()
            .map(|term| format!("{term:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        let family = law.family().map_or_else(|| "-".to_string(), |f| f.to_string());
        format!(
            "{:<28} {:<9} {:<11} {:<12} {:<20} {}",
            law.name(),
            family,
            law.isotropy().to_string(),
            law.is_implemented(),
            reads,
            requires
        )
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use bxdf::{
        laws::BUILTIN_LAWS, CustomLaw, FacetGeometry, LawFault, MaterialProperty, Reflectance,
    };

    #[test]
    fn law_table_lists_registered_laws() {
        let mut registry = LawRegistry::builtin().unwrap();
        registry
            .register(Box::new(CustomLaw::new(
                "albedo",
                &[],
                |m: &MaterialProperty, _: &FacetGeometry| -> Result<Reflectance, LawFault> {
                    Ok(Reflectance::Scalar(m.rho()))
                },
            )))
            .unwrap();
        let table = law_table(&registry);
        assert_eq!(table.len(), BUILTIN_LAWS.len() + 2);
        assert!(table[0].starts_with("law"));
        assert!(table[1].starts_with("lambert_diffuse"));
        let custom = table.last().unwrap();
        assert!(custom.starts_with("albedo"));
        assert!(custom.contains(" - "));
        assert!(table
            .iter()
            .any(|line| line.starts_with("ward_specular") && line.contains("false")));
    }
}
