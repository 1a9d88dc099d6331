use crate::base::{Config, Convergence};
use crate::StrError;
use russell_lab::{vec_norm, Norm, Vector};
use serde::{Deserialize, Serialize};

/// Holds the diagnostics of one timestep
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepSummary {
    /// Timestep index
    pub step: usize,

    /// Time at the end of the step
    pub t: f64,

    /// Time increment used by the step
    pub dt: f64,

    /// Number of Newton-Raphson iterations performed
    pub iterations: usize,

    /// Euclidean norm of the residual at the last iteration
    pub norm_rr: f64,

    /// Euclidean norm of the correction at the last iteration
    pub norm_mdu: f64,

    /// Whether the step converged
    pub converged: bool,
}

/// Controls the convergence of the Newton-Raphson iterations
///
/// Tracks the Euclidean norms of the residual {R} and of the correction
/// {ΔU}, keeping the first-iteration norms as references for the
/// relative tests
pub struct ControlConvergence<'a> {
    config: &'a Config,
    iteration: usize,
    norm_rr0: f64,
    norm_rr: f64,
    norm_mdu0: f64,
    norm_mdu: f64,
    converged_on_rr: bool,
    converged_on_mdu: bool,
}

impl<'a> ControlConvergence<'a> {
    /// Creates a new convergence controller
    pub fn new(config: &'a Config) -> Self {
        ControlConvergence {
            config,
            iteration: 0,
            norm_rr0: 0.0,
            norm_rr: 0.0,
            norm_mdu0: 0.0,
            norm_mdu: 0.0,
            converged_on_rr: false,
            converged_on_mdu: false,
        }
    }

    /// Resets the flags and reference norms for a new timestep
    pub fn reset(&mut self) {
        self.iteration = 0;
        self.norm_rr0 = 0.0;
        self.norm_mdu0 = 0.0;
        self.converged_on_rr = false;
        self.converged_on_mdu = false;
    }

    /// Records the residual norm of the current iteration
    pub fn analyze_rr(&mut self, iteration: usize, rr: &Vector) -> Result<(), StrError> {
        self.iteration = iteration;
        self.norm_rr = vec_norm(rr, Norm::Euc);
        if !self.norm_rr.is_finite() {
            return Err("found NaN or Inf in the residual vector");
        }
        if iteration == 0 {
            self.norm_rr0 = self.norm_rr;
        }
        self.converged_on_rr =
            self.norm_rr < self.config.tol_rr_rel * self.norm_rr0 || self.norm_rr < self.config.tol_rr_abs;
        Ok(())
    }

    /// Records the correction norm of the current iteration
    pub fn analyze_mdu(&mut self, iteration: usize, mdu: &Vector) -> Result<(), StrError> {
        self.norm_mdu = vec_norm(mdu, Norm::Euc);
        if !self.norm_mdu.is_finite() {
            return Err("found NaN or Inf in the correction vector");
        }
        if iteration == 0 {
            self.norm_mdu0 = self.norm_mdu;
        }
        self.converged_on_mdu = self.norm_mdu < self.config.tol_rr_rel * self.norm_mdu0
            || self.norm_mdu < self.config.tol_rr_abs;
        Ok(())
    }

    /// Checks whether the configured convergence test is satisfied
    pub fn converged(&self) -> bool {
        match self.config.convergence {
            Convergence::ResidualOnly => self.converged_on_rr,
            Convergence::ResidualOrCorrection => self.converged_on_rr || self.converged_on_mdu,
        }
    }

    /// Returns the last residual norm
    pub fn norm_rr(&self) -> f64 {
        self.norm_rr
    }

    /// Returns the last correction norm
    pub fn norm_mdu(&self) -> f64 {
        self.norm_mdu
    }

    /// Prints the header before time stepping
    pub fn print_header(&self) {
        if self.config.verbose_timesteps || self.config.verbose_iterations {
            println!("{}", "─".repeat(64));
            println!(
                "{:>8} {:>11} {:>11} {:>5} {:>11} {:>11}",
                "timestep", "t", "Δt", "iter", "‖R‖", "‖ΔU‖"
            );
            println!("{}", "─".repeat(64));
        }
    }

    /// Prints timestep information
    pub fn print_timestep(&self, timestep: usize, t: f64, dt: f64) {
        if self.config.verbose_timesteps {
            println!("{:>8} {:>11.6e} {:>11.6e}", timestep + 1, t, dt);
        }
    }

    /// Prints iteration information
    pub fn print_iteration(&self) {
        if self.config.verbose_iterations {
            let mark = if self.converged() { " ok" } else { "" };
            println!(
                "{:>8} {:>11} {:>11} {:>5} {:>11.4e} {:>11.4e}{}",
                "·", "·", "·", self.iteration, self.norm_rr, self.norm_mdu, mark
            );
        }
    }

    /// Prints the horizontal line at the end of the analysis
    pub fn print_footer(&self) {
        if self.config.verbose_timesteps || self.config.verbose_iterations {
            println!("{}", "─".repeat(64));
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
