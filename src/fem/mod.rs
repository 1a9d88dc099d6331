//! Implements the finite element assembly and solution layer

mod boundaries;
mod control;
mod element_cahn_hilliard;
mod element_diffusion;
mod element_solid;
mod element_thermo_mech;
mod elements;
mod equations;
mod fem_state;
mod linear_system;
mod post;
mod prescribed_values;
mod projection;
mod solver_implicit;
pub use crate::fem::boundaries::*;
pub use crate::fem::control::*;
pub use crate::fem::element_cahn_hilliard::*;
pub use crate::fem::element_diffusion::*;
pub use crate::fem::element_solid::*;
pub use crate::fem::element_thermo_mech::*;
pub use crate::fem::elements::*;
pub use crate::fem::equations::*;
pub use crate::fem::fem_state::*;
pub use crate::fem::linear_system::*;
pub use crate::fem::post::*;
pub use crate::fem::prescribed_values::*;
pub use crate::fem::projection::*;
pub use crate::fem::solver_implicit::*;
