//! Defines basic structures: configuration, parameters, and boundary conditions

mod config;
mod enums;
mod essential;
mod natural;
mod parameters;
pub use crate::base::config::*;
pub use crate::base::enums::*;
pub use crate::base::essential::*;
pub use crate::base::natural::*;
pub use crate::base::parameters::*;
