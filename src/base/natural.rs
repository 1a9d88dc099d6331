use super::{Dof, Side};
use std::fmt;

/// Defines natural boundary conditions applied to boundary edges
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nbc {
    /// Robin (convective) condition `flux = u - target`
    ///
    /// Adds `N_I N_J` to the tangent and `-(u - target) N_I` to the
    /// residual, integrated over the edge
    Robin { dof: Dof, target: f64 },

    /// Prescribed outward flux `q`
    ///
    /// Adds `q N_I` to the residual, integrated over the edge
    Flux { dof: Dof, value: f64 },
}

impl Nbc {
    /// Returns the degree-of-freedom affected by this condition
    pub fn dof(&self) -> Dof {
        match self {
            Nbc::Robin { dof, .. } => *dof,
            Nbc::Flux { dof, .. } => *dof,
        }
    }
}

/// Holds natural boundary conditions
pub struct Natural {
    pub all: Vec<(Side, Nbc)>,
}

impl Natural {
    /// Allocates a new instance
    pub fn new() -> Self {
        Natural { all: Vec::new() }
    }

    /// Sets a natural boundary condition on a whole side of the mesh
    pub fn on(&mut self, side: Side, nbc: Nbc) -> &mut Self {
        self.all.push((side, nbc));
        self
    }
}

impl fmt::Display for Natural {
    /// Prints a formatted summary of the boundary conditions
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Natural boundary conditions\n").unwrap();
        write!(f, "===========================\n").unwrap();
        for (side, nbc) in &self.all {
            write!(f, "{:?} : {:?}\n", side, nbc).unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
