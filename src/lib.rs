//! Mfsim implements finite element solutions for multiphysics problems on
//! structured one- and two-dimensional Lagrange meshes
//!
//! The crate assembles a global residual vector and a dense tangent matrix
//! from per-physics element kernels (diffusion, plane-stress elasticity,
//! mixed Cahn-Hilliard, one-way thermo-mechanics) and drives a backward
//! Euler Newton-Raphson loop with penalty-enforced essential conditions and
//! Robin/flux natural conditions integrated over boundary edges.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

/// Defines a function of time to prescribe essential values
pub type FnTime = fn(f64) -> f64;

/// Defines a function of (x,y) to set initial values
pub type FnSpace = fn(f64, f64) -> f64;

pub mod base;
pub mod fem;
pub mod integ;
pub mod mesh;
pub mod shapes;

/// Makes the most common structures available
pub mod prelude {
    pub use crate::base::{
        Config, Convergence, DivergencePolicy, Dof, Elem, Essential, FreeEnergy, Natural, Nbc,
        ParamCahnHilliard, ParamDiffusion, ParamSolid, ParamThermoMech, Side,
    };
    pub use crate::fem::{nodal_values, Elements, Equations, FemState, SolverImplicit, StepSummary};
    pub use crate::mesh::Mesh;
    pub use crate::shapes::GeoKind;
    pub use crate::{FnSpace, FnTime, StrError};
}
