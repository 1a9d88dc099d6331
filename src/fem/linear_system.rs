use crate::StrError;
use russell_lab::{solve_lin_sys, vec_copy, Matrix, Vector};

/// Holds the global linear system `[K] {-ΔU} = {-R}`
///
/// The solver writes `K ΔU = R` with `K = -∂R/∂U`, so the correction
/// comes out of a single dense solve and is added to the solution
pub struct LinearSystem {
    /// Global jacobian matrix (neq, neq)
    pub jacobian: Matrix,

    /// Global residual vector (neq)
    pub residual: Vector,

    /// Correction vector ΔU (neq)
    pub mdu: Vector,
}

impl LinearSystem {
    /// Allocates a new instance
    pub fn new(n_equation: usize) -> Self {
        LinearSystem {
            jacobian: Matrix::new(n_equation, n_equation),
            residual: Vector::new(n_equation),
            mdu: Vector::new(n_equation),
        }
    }

    /// Solves the linear system for the correction ΔU
    ///
    /// The jacobian is factorized in place and must be reassembled
    /// before the next call
    pub fn solve(&mut self) -> Result<(), StrError> {
        vec_copy(&mut self.mdu, &self.residual)?;
        solve_lin_sys(&mut self.mdu, &mut self.jacobian)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
