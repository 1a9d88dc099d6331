use serde::{Deserialize, Serialize};

/// Defines the geometry (shape) of an element
///
/// Line elements live in 1D meshes; quadrilaterals in 2D meshes.
/// The reference (natural) space is [-1,1] (1D) or [-1,1]² (2D) with
/// corner nodes numbered counterclockwise from the bottom-left corner:
///
/// ```text
/// 3-----6-----2
/// |           |
/// 7     8     5
/// |           |
/// 0-----4-----1
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum GeoKind {
    /// Linear line with 2 nodes
    Lin2,

    /// Quadratic line with 3 nodes (sequential: end, middle, end)
    Lin3,

    /// Cubic line with 4 nodes (equally spaced)
    Lin4,

    /// Bilinear quadrilateral with 4 nodes
    Qua4,

    /// Serendipity quadrilateral with 8 nodes
    Qua8,

    /// Biquadratic quadrilateral with 9 nodes
    Qua9,
}

impl GeoKind {
    /// Returns the number of nodes
    pub fn nnode(&self) -> usize {
        match self {
            GeoKind::Lin2 => 2,
            GeoKind::Lin3 => 3,
            GeoKind::Lin4 => 4,
            GeoKind::Qua4 => 4,
            GeoKind::Qua8 => 8,
            GeoKind::Qua9 => 9,
        }
    }

    /// Returns the dimension of the reference space
    pub fn geo_ndim(&self) -> usize {
        match self {
            GeoKind::Lin2 | GeoKind::Lin3 | GeoKind::Lin4 => 1,
            GeoKind::Qua4 | GeoKind::Qua8 | GeoKind::Qua9 => 2,
        }
    }

    /// Returns the polynomial order along each direction
    pub fn order(&self) -> usize {
        match self {
            GeoKind::Lin2 => 1,
            GeoKind::Lin3 => 2,
            GeoKind::Lin4 => 3,
            GeoKind::Qua4 => 1,
            GeoKind::Qua8 | GeoKind::Qua9 => 2,
        }
    }

    /// Returns the kind of the boundary edges of a 2D element
    pub fn edge_kind(&self) -> Option<GeoKind> {
        match self {
            GeoKind::Qua4 => Some(GeoKind::Lin2),
            GeoKind::Qua8 | GeoKind::Qua9 => Some(GeoKind::Lin3),
            _ => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
