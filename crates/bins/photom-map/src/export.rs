//! Writers handing a field over to rendering tools.
use base::error::PhotomError;
use bxdf::Field;
use serde_json::{json, Map, Value};
use sphere::{FacetSphere, IcoSphere};
use std::{fs::File, io::BufWriter, path::Path};

fn create(path: &Path) -> Result<BufWriter<File>, PhotomError> {
    File::create(path).map(BufWriter::new).map_err(|err| {
        PhotomError::from_io_error(err, format!("Failed to create output file: {}", path.display()))
    })
}

/// Value of a facet as a JSON number or array of numbers. Non-finite values
/// become `null`.
fn facet_value(field: &Field, facet: usize) -> Value {
    match field.get(facet) {
        Some([value]) => json!(value),
        Some(values) => json!(values),
        None => Value::Null,
    }
}

/// Builds the GeoJSON feature collection of the sphere where each feature
/// carries the law name and the value of its facet.
pub fn field_geojson(sphere: &IcoSphere, field: &Field) -> Value {
    sphere.geojson_with(|facet| {
        let mut props = Map::new();
        props.insert("law".to_string(), json!(field.law()));
        props.insert("value".to_string(), facet_value(field, facet));
        if field.substituted().binary_search(&facet).is_ok() {
            props.insert("substituted".to_string(), json!(true));
        }
        props
    })
}

/// Writes the field as a GeoJSON feature collection.
pub fn write_geojson(sphere: &IcoSphere, field: &Field, path: &Path) -> Result<(), PhotomError> {
    serde_json::to_writer(create(path)?, &field_geojson(sphere, field)).map_err(|err| {
        PhotomError::new(
            format!("Failed to write GeoJSON file: {}", path.display()),
            Some(Box::new(err)),
        )
    })
}

/// Writes the field as a CSV table with one row per facet:
/// `id, lat, lon, value` (or `value_0, value_1, ...` for multichannel
/// fields), coordinates being those of the facet barycentre in degrees.
pub fn write_csv<S>(sphere: &S, field: &Field, path: &Path) -> Result<(), PhotomError>
where
    S: FacetSphere + ?Sized,
{
    let to_error = |err: csv::Error| {
        PhotomError::new(
            format!("Failed to write CSV file: {}", path.display()),
            Some(Box::new(err)),
        )
    };
    let mut writer = csv::Writer::from_writer(create(path)?);
    let mut header = vec!["id".to_string(), "lat".to_string(), "lon".to_string()];
    match field.channels() {
        1 => header.push("value".to_string()),
        n => header.extend((0..n).map(|c| format!("value_{c}"))),
    }
    writer.write_record(&header).map_err(to_error)?;
    for facet in sphere.facet_ids() {
        let (lat, lon) = sphere.facet_lat_lon(facet);
        let mut record = vec![facet.to_string(), lat.value().to_string(), lon.value().to_string()];
        if let Some(values) = field.get(facet) {
            record.extend(values.iter().map(|v| v.to_string()));
        }
        writer.write_record(&record).map_err(to_error)?;
    }
    writer.flush().map_err(|err| {
        PhotomError::from_io_error(err, format!("Failed to flush CSV file: {}", path.display()))
    })
}
