use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the convergence test of the Newton-Raphson iterations
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Convergence {
    /// Accepts the step when the residual norm is small enough
    ResidualOnly,

    /// Accepts the step when either the residual norm or the
    /// correction (ΔU) norm is small enough
    ResidualOrCorrection,
}

/// Defines what to do when the iterations fail to converge
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum DivergencePolicy {
    /// Aborts the simulation with an error
    StopRun,

    /// Rejects the timestep, keeps the last converged state, and continues
    HoldState,

    /// Repeats the timestep with Δt halved (fails below dt_min)
    RetryHalveDt,
}

/// Holds configuration parameters controlling the simulation
pub struct Config {
    /// Transient analysis (backward Euler), otherwise steady state
    pub transient: bool,

    /// Time increment
    pub dt: f64,

    /// Minimum allowed time increment (used by DivergencePolicy::RetryHalveDt)
    pub dt_min: f64,

    /// Number of timesteps (a steady analysis performs a single step)
    pub n_max_time_steps: usize,

    /// Maximum number of Newton-Raphson iterations per timestep
    pub n_max_iterations: usize,

    /// Absolute tolerance on the residual norm
    pub tol_rr_abs: f64,

    /// Relative tolerance with respect to the first residual norm
    pub tol_rr_rel: f64,

    /// Convergence test
    pub convergence: Convergence,

    /// Action on non-convergence
    pub divergence: DivergencePolicy,

    /// Overrides the number of Gauss points per dimension
    pub n_integ_point: Option<usize>,

    /// Prints a line per timestep
    pub verbose_timesteps: bool,

    /// Prints a line per iteration
    pub verbose_iterations: bool,
}

impl Config {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Config {
            transient: false,
            dt: 0.1,
            dt_min: 1e-10,
            n_max_time_steps: 1,
            n_max_iterations: 50,
            tol_rr_abs: 1e-12,
            tol_rr_rel: 1e-9,
            convergence: Convergence::ResidualOnly,
            divergence: DivergencePolicy::StopRun,
            n_integ_point: None,
            verbose_timesteps: false,
            verbose_iterations: false,
        }
    }

    /// Enables the transient analysis with a fixed time increment
    pub fn set_transient(&mut self, dt: f64, n_steps: usize) -> Result<&mut Self, StrError> {
        if dt <= 0.0 {
            return Err("dt must be > 0.0");
        }
        if n_steps < 1 {
            return Err("n_steps must be ≥ 1");
        }
        self.transient = true;
        self.dt = dt;
        self.n_max_time_steps = n_steps;
        Ok(self)
    }

    /// Sets the minimum allowed time increment
    pub fn set_dt_min(&mut self, dt_min: f64) -> Result<&mut Self, StrError> {
        if dt_min <= 0.0 {
            return Err("dt_min must be > 0.0");
        }
        self.dt_min = dt_min;
        Ok(self)
    }

    /// Sets the maximum number of iterations per timestep
    pub fn set_n_max_iterations(&mut self, n: usize) -> Result<&mut Self, StrError> {
        if n < 1 {
            return Err("n_max_iterations must be ≥ 1");
        }
        self.n_max_iterations = n;
        Ok(self)
    }

    /// Sets the convergence tolerances
    pub fn set_tolerances(&mut self, tol_abs: f64, tol_rel: f64) -> Result<&mut Self, StrError> {
        if tol_abs <= 0.0 {
            return Err("tol_rr_abs must be > 0.0");
        }
        if tol_rel <= 0.0 {
            return Err("tol_rr_rel must be > 0.0");
        }
        self.tol_rr_abs = tol_abs;
        self.tol_rr_rel = tol_rel;
        Ok(self)
    }

    /// Sets the convergence test
    pub fn set_convergence(&mut self, convergence: Convergence) -> Result<&mut Self, StrError> {
        self.convergence = convergence;
        Ok(self)
    }

    /// Sets the action on non-convergence
    pub fn set_divergence(&mut self, divergence: DivergencePolicy) -> Result<&mut Self, StrError> {
        self.divergence = divergence;
        Ok(self)
    }

    /// Overrides the number of Gauss points per dimension
    pub fn set_n_integ_point(&mut self, n: usize) -> Result<&mut Self, StrError> {
        if n < 2 || n > 5 {
            return Err("number of integration points must be in 2..=5");
        }
        self.n_integ_point = Some(n);
        Ok(self)
    }

    /// Enables printing of timestep and iteration diagnostics
    pub fn set_verbose(&mut self, timesteps: bool, iterations: bool) -> Result<&mut Self, StrError> {
        self.verbose_timesteps = timesteps;
        self.verbose_iterations = iterations;
        Ok(self)
    }

    /// Checks that the combination of parameters is valid
    pub fn validate(&self) -> Option<String> {
        if self.dt <= 0.0 {
            return Some("dt must be > 0.0".to_string());
        }
        if self.dt_min <= 0.0 {
            return Some("dt_min must be > 0.0".to_string());
        }
        if self.transient && self.dt < self.dt_min {
            return Some("dt must be ≥ dt_min".to_string());
        }
        if self.n_max_iterations < 1 {
            return Some("n_max_iterations must be ≥ 1".to_string());
        }
        if self.tol_rr_abs <= 0.0 || self.tol_rr_rel <= 0.0 {
            return Some("tolerances must be > 0.0".to_string());
        }
        if let Some(n) = self.n_integ_point {
            if n < 2 || n > 5 {
                return Some("number of integration points must be in 2..=5".to_string());
            }
        }
        None
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n").unwrap();
        write!(f, "==================\n").unwrap();
        write!(f, "transient = {:?}\n", self.transient).unwrap();
        write!(f, "dt = {:?}\n", self.dt).unwrap();
        write!(f, "dt_min = {:?}\n", self.dt_min).unwrap();
        write!(f, "n_max_time_steps = {:?}\n", self.n_max_time_steps).unwrap();
        write!(f, "n_max_iterations = {:?}\n", self.n_max_iterations).unwrap();
        write!(f, "tol_rr_abs = {:?}\n", self.tol_rr_abs).unwrap();
        write!(f, "tol_rr_rel = {:?}\n", self.tol_rr_rel).unwrap();
        write!(f, "convergence = {:?}\n", self.convergence).unwrap();
        write!(f, "divergence = {:?}\n", self.divergence).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
