//! GeoJSON description of the facets, consumed by choropleth renderers.
use crate::{FacetSphere, IcoSphere};
use base::math::cartesian_to_lat_lon;
use serde_json::{json, Map, Value};

/// Latitude beyond which a vertex is considered to sit on a pole.
const POLE_LATITUDE: f64 = 90.0 - 1.0e-9;

impl IcoSphere {
    /// Closed ring of `[lon, lat]` pairs in degrees outlining the facet.
    ///
    /// Rings crossing the antimeridian are unwrapped so that longitudes stay
    /// contiguous (some may exceed 180°). A corner sitting on a pole takes
    /// the longitude of the facet centre.
    pub fn facet_boundary(&self, facet: usize) -> Vec<[f64; 2]> {
        let center_lon = self.facet_lat_lon(facet).1.value();
        let mut ring = self
            .facet_corners(facet)
            .iter()
            .map(|corner| {
                let (lat, lon) = cartesian_to_lat_lon(*corner);
                if lat.value().abs() > POLE_LATITUDE {
                    [center_lon, lat.value()]
                } else {
                    [lon.value(), lat.value()]
                }
            })
            .collect::<Vec<_>>();
        let (min, max) = ring.iter().fold((f64::MAX, f64::MIN), |(min, max), [lon, _]| {
            (min.min(*lon), max.max(*lon))
        });
        if max - min > 180.0 {
            for [lon, _] in ring.iter_mut() {
                if *lon < 0.0 {
                    *lon += 360.0;
                }
            }
        }
        ring.push(ring[0]);
        ring
    }

    /// GeoJSON feature collection with one polygon per facet; each feature
    /// carries its facet id.
    pub fn geojson(&self) -> Value { self.geojson_with(|_| Map::new()) }

    /// GeoJSON feature collection with one polygon per facet, the properties
    /// of each feature being extended by `properties(facet)`.
    pub fn geojson_with<F>(&self, properties: F) -> Value
    where
        F: Fn(usize) -> Map<String, Value>,
    {
        let features = self
            .facet_ids()
            .map(|id| {
                let mut props = properties(id);
                props.insert("id".to_string(), json!(id));
                json!({
                    "type": "Feature",
                    "id": id,
                    "properties": props,
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [self.facet_boundary(id)],
                    },
                })
            })
            .collect::<Vec<_>>();
        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}
