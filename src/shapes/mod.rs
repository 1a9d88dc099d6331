//! Implements Lagrange isoparametric shape functions

mod geo_kind;
mod scratchpad;
pub use crate::shapes::geo_kind::*;
pub use crate::shapes::scratchpad::*;
