//! Implements structured mesh generation for 1D and 2D domains

mod structured;
pub use crate::mesh::structured::*;
