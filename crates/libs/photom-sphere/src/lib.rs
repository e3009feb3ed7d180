//! Tessellated spheres used as sampling domain.
//!
//! The reflectance evaluator only sees a sphere through the [`FacetSphere`]
//! trait: an ordered set of facet ids and a unit direction per facet. The
//! [`IcoSphere`] is the concrete tessellation shipped with photom; it also
//! provides adjacency and GeoJSON boundaries for choropleth rendering.
#![warn(missing_docs)]

use base::{
    math::{cartesian_to_lat_lon, DVec3},
    units::Degs,
};
use std::ops::Range;

mod geojson;
mod icosphere;
mod rotation;

pub use geojson::*;
pub use icosphere::*;
pub use rotation::*;

/// Error raised when building or querying a tessellated sphere.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SphereError {
    /// A facet references a vertex that doesn't exist.
    #[error("facet {facet} references vertex {index} which doesn't exist")]
    InvalidVertexIndex {
        /// Facet holding the reference.
        facet: usize,
        /// The out-of-range vertex index.
        index: u32,
    },
    /// An edge isn't shared by exactly two facets, the mesh is not closed.
    #[error("edge ({a}, {b}) is shared by {count} facet(s) instead of 2")]
    NonManifoldEdge {
        /// First vertex of the edge.
        a: u32,
        /// Second vertex of the edge.
        b: u32,
        /// Number of facets using the edge.
        count: usize,
    },
}

/// A sphere partitioned into facets, seen from the evaluator.
pub trait FacetSphere: Sync {
    /// Number of facets of the sphere.
    fn facet_count(&self) -> usize;

    /// Ordered facet ids.
    fn facet_ids(&self) -> Range<usize> { 0..self.facet_count() }

    /// Unit direction from the sphere centre to the centre of the facet.
    fn facet_center(&self, facet: usize) -> DVec3;

    /// Geographic coordinate `(lat, lon)` of the facet centre.
    fn facet_lat_lon(&self, facet: usize) -> (Degs, Degs) {
        cartesian_to_lat_lon(self.facet_center(facet))
    }
}
