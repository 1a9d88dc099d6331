//! Implements Gauss-Legendre quadrature rules

mod gauss;
pub use crate::integ::gauss::*;
