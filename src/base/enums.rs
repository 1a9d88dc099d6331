use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines degrees-of-freedom types
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dof {
    /// Displacement along the first dimension
    Ux,

    /// Displacement along the second dimension
    Uy,

    /// Temperature (or any scalar driven by a diffusion operator)
    T,

    /// Concentration (conserved phase-field variable)
    C,

    /// Chemical potential (auxiliary variable of the mixed formulation)
    Mu,
}

/// Defines the sides of a structured mesh
///
/// A 1D mesh only has the Left and Right sides (single end nodes)
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Bottom,
    Top,
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
