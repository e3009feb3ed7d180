use crate::{FacetSphere, Rotation, SphereError};
use ahash::AHashMap;
use base::math::{cartesian_to_lat_lon, normalize, DVec3};

/// Geodesic sphere obtained by repeatedly subdividing an icosahedron.
///
/// Every vertex lies on the unit sphere. Facets are triangles indexing the
/// vertex array, wound counter-clockwise when seen from outside; the facet
/// id is the position of the triangle in the facet array.
#[derive(Debug, Clone)]
pub struct IcoSphere {
    /// Number of subdivisions applied to the base icosahedron.
    level: u32,
    vertices: Vec<DVec3>,
    facets: Vec<[u32; 3]>,
    /// Normalised barycentre of each facet.
    centers: Vec<DVec3>,
}

impl IcoSphere {
    /// The regular icosahedron inscribed in the unit sphere (20 facets).
    pub fn icosahedron() -> Self {
        let phi = (1.0 + 5.0f64.sqrt()) * 0.5;
        let vertices = [
            [-1.0, phi, 0.0],
            [1.0, phi, 0.0],
            [-1.0, -phi, 0.0],
            [1.0, -phi, 0.0],
            [0.0, -1.0, phi],
            [0.0, 1.0, phi],
            [0.0, -1.0, -phi],
            [0.0, 1.0, -phi],
            [phi, 0.0, -1.0],
            [phi, 0.0, 1.0],
            [-phi, 0.0, -1.0],
            [-phi, 0.0, 1.0],
        ]
        .iter()
        .map(|v| DVec3::from_array(*v).normalize())
        .collect::<Vec<_>>();
        #[rustfmt::skip]
        let facets = vec![
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];
        Self::assemble(0, vertices, facets)
    }

    /// Builds a sphere from raw vertices and triangles.
    ///
    /// Vertices are projected onto the unit sphere. Fails if a triangle
    /// references a vertex that doesn't exist.
    pub fn from_raw(vertices: Vec<DVec3>, facets: Vec<[u32; 3]>) -> Result<Self, SphereError> {
        for (facet, tri) in facets.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(SphereError::InvalidVertexIndex { facet, index });
            }
        }
        let vertices = vertices.into_iter().map(normalize).collect();
        Ok(Self::assemble(0, vertices, facets))
    }

    fn assemble(level: u32, vertices: Vec<DVec3>, facets: Vec<[u32; 3]>) -> Self {
        let centers = facets
            .iter()
            .map(|[a, b, c]| {
                normalize(vertices[*a as usize] + vertices[*b as usize] + vertices[*c as usize])
            })
            .collect();
        Self {
            level,
            vertices,
            facets,
            centers,
        }
    }

    /// Returns a new sphere where every facet has been split `times` times
    /// into four, new vertices being projected onto the unit sphere.
    pub fn divided(&self, times: u32) -> Self {
        let mut vertices = self.vertices.clone();
        let mut facets = self.facets.clone();
        for _ in 0..times {
            let mut midpoints = AHashMap::<(u32, u32), u32>::with_capacity(facets.len() * 3 / 2);
            let mut midpoint = |a: u32, b: u32, vertices: &mut Vec<DVec3>| -> u32 {
                let key = if a < b { (a, b) } else { (b, a) };
                *midpoints.entry(key).or_insert_with(|| {
                    let mid = normalize(vertices[a as usize] + vertices[b as usize]);
                    vertices.push(mid);
                    (vertices.len() - 1) as u32
                })
            };
            let mut next = Vec::with_capacity(facets.len() * 4);
            for [a, b, c] in facets {
                let ab = midpoint(a, b, &mut vertices);
                let bc = midpoint(b, c, &mut vertices);
                let ca = midpoint(c, a, &mut vertices);
                next.push([a, ab, ca]);
                next.push([b, bc, ab]);
                next.push([c, ca, bc]);
                next.push([ab, bc, ca]);
            }
            facets = next;
        }
        log::debug!(
            "Subdivided sphere {} time(s): {} vertices, {} facets",
            times,
            vertices.len(),
            facets.len()
        );
        Self::assemble(self.level + times, vertices, facets)
    }

    /// Returns a copy of the sphere with every vertex rotated.
    pub fn rotated(&self, rotation: &Rotation) -> Self {
        let vertices = self.vertices.iter().map(|v| rotation.apply(*v)).collect();
        Self::assemble(self.level, vertices, self.facets.clone())
    }

    /// Number of subdivisions applied to the base icosahedron.
    pub fn level(&self) -> u32 { self.level }

    /// Vertices of the sphere.
    pub fn vertices(&self) -> &[DVec3] { &self.vertices }

    /// Triangles of the sphere.
    pub fn facets(&self) -> &[[u32; 3]] { &self.facets }

    /// Corner positions of the given facet.
    pub fn facet_corners(&self, facet: usize) -> [DVec3; 3] {
        let [a, b, c] = self.facets[facet];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Applies `f` to the centre of every facet, in facet order.
    pub fn mapf<T, F>(&self, f: F) -> Vec<T>
    where
        F: Fn(DVec3) -> T,
    {
        self.centers.iter().map(|c| f(*c)).collect()
    }

    /// Latitudes in degrees of the facet barycentres.
    pub fn bary_lats(&self) -> Vec<f64> {
        self.mapf(|c| cartesian_to_lat_lon(c).0.value())
    }

    /// Longitudes in degrees of the facet barycentres.
    pub fn bary_lons(&self) -> Vec<f64> {
        self.mapf(|c| cartesian_to_lat_lon(c).1.value())
    }

    /// Computes, for every facet, the facets sharing its three edges.
    ///
    /// Neighbour `i` is across the edge starting at corner `i`. Fails if the
    /// mesh is not closed.
    pub fn adjacency(&self) -> Result<Vec<[usize; 3]>, SphereError> {
        let mut edges =
            AHashMap::<(u32, u32), Vec<usize>>::with_capacity(self.facets.len() * 3 / 2);
        for (id, [a, b, c]) in self.facets.iter().enumerate() {
            for (u, v) in [(*a, *b), (*b, *c), (*c, *a)] {
                let key = if u < v { (u, v) } else { (v, u) };
                edges.entry(key).or_default().push(id);
            }
        }
        if let Some(((a, b), owners)) = edges.iter().find(|(_, owners)| owners.len() != 2) {
            return Err(SphereError::NonManifoldEdge {
                a: *a,
                b: *b,
                count: owners.len(),
            });
        }
        Ok(self
            .facets
            .iter()
            .enumerate()
            .map(|(id, [a, b, c])| {
                let mut neighbours = [0usize; 3];
                for (slot, (u, v)) in [(*a, *b), (*b, *c), (*c, *a)].into_iter().enumerate() {
                    let key = if u < v { (u, v) } else { (v, u) };
                    let owners = &edges[&key];
                    neighbours[slot] = if owners[0] == id { owners[1] } else { owners[0] };
                }
                neighbours
            })
            .collect())
    }
}

impl FacetSphere for IcoSphere {
    fn facet_count(&self) -> usize { self.facets.len() }

    fn facet_center(&self, facet: usize) -> DVec3 { self.centers[facet] }
}
