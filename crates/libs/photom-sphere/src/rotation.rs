use base::math::{DQuat, DVec3};

/// Rigid rotation applied to the vertices of a sphere before sampling.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rotation(DQuat);

impl Default for Rotation {
    fn default() -> Self { Self::identity() }
}

impl Rotation {
    /// Rotation leaving every direction unchanged.
    pub const fn identity() -> Self { Self(DQuat::IDENTITY) }

    /// Rotation taking the direction `from` onto the direction `to`.
    pub fn from_arc(from: DVec3, to: DVec3) -> Self {
        Self(DQuat::from_rotation_arc(from.normalize(), to.normalize()))
    }

    /// Canonical orientation of the icosahedron: one vertex sits on the north
    /// pole and its antipode on the south pole, so the two polar caps are
    /// fans of five facets around a vertex instead of facets straddling the
    /// poles.
    pub fn for_icosphere() -> Self {
        let phi = (1.0 + 5.0f64.sqrt()) * 0.5;
        Self::from_arc(DVec3::new(0.0, 1.0, phi), DVec3::Z)
    }

    /// Rotates the given direction.
    #[inline]
    pub fn apply(&self, v: DVec3) -> DVec3 { self.0 * v }
}
