use super::{
    Boundaries, ControlConvergence, Elements, Equations, FemState, LinearSystem, NodalProjection,
    PrescribedValues, StepSummary,
};
use crate::base::{Config, DivergencePolicy, Elem, Essential, Natural};
use crate::mesh::Mesh;
use crate::StrError;
use russell_lab::vec_copy;

/// Implements the implicit (backward Euler) solver with Newton-Raphson iterations
///
/// At every timestep the solver iterates
///
/// ```text
/// [K] {ΔU} = {R}      with      K = -∂R/∂U
/// U ← U + ΔU
/// ```
///
/// until the convergence test of [ControlConvergence] passes. A steady
/// analysis performs a single step with the transient terms disabled
pub struct SolverImplicit<'a> {
    /// Configuration parameters
    pub config: &'a Config,

    /// Global equation numbering
    pub equations: Equations,

    /// Diagnostics of the completed timesteps
    pub summaries: Vec<StepSummary>,

    prescribed: PrescribedValues,
    elements: Elements<'a>,
    boundaries: Boundaries,
    lin_sys: LinearSystem,
}

impl<'a> SolverImplicit<'a> {
    /// Allocates a new instance
    pub fn new(
        mesh: &'a Mesh,
        elem: &'a Elem,
        config: &'a Config,
        essential: &Essential,
        natural: &Natural,
    ) -> Result<Self, StrError> {
        if let Some(msg) = config.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate simulation because config.validate() failed");
        }
        let equations = Equations::new(mesh, elem);
        let prescribed = PrescribedValues::new(mesh, &equations, essential)?;
        let elements = Elements::new(mesh, elem, config, &equations)?;
        let boundaries = Boundaries::new(mesh, config, &equations, natural)?;
        let lin_sys = LinearSystem::new(equations.n_equation);
        Ok(SolverImplicit {
            config,
            equations,
            summaries: Vec::new(),
            prescribed,
            elements,
            boundaries,
            lin_sys,
        })
    }

    /// Runs the time stepping (or the single steady step)
    pub fn solve(&mut self, state: &mut FemState) -> Result<(), StrError> {
        let neq = self.equations.n_equation;
        let mut control = ControlConvergence::new(self.config);
        control.print_header();
        let mut timestep = 0;
        while timestep < self.config.n_max_time_steps {
            let t_old = state.t;
            if self.config.transient {
                state.t = t_old + state.dt;
            }
            control.reset();
            control.print_timestep(timestep, state.t, state.dt);

            // start the iterations from the last converged state
            vec_copy(&mut state.uu, &state.uu_old)?;
            state.vv.fill(0.0);

            let mut converged = false;
            let mut iterations = 0;
            for iteration in 0..self.config.n_max_iterations {
                iterations = iteration + 1;
                self.prescribed.apply_values(&mut state.uu, state.t);
                if self.config.transient {
                    for i in 0..neq {
                        state.vv[i] = (state.uu[i] - state.uu_old[i]) / state.dt;
                    }
                }
                self.elements
                    .calc_and_assemble(state, &mut self.lin_sys.jacobian, &mut self.lin_sys.residual)?;
                self.boundaries
                    .calc_and_assemble(state, &mut self.lin_sys.jacobian, &mut self.lin_sys.residual)?;
                self.prescribed.penalize(&mut self.lin_sys.jacobian, &mut self.lin_sys.residual);
                control.analyze_rr(iteration, &self.lin_sys.residual)?;
                self.lin_sys.solve()?;
                control.analyze_mdu(iteration, &self.lin_sys.mdu)?;
                for i in 0..neq {
                    state.uu[i] += self.lin_sys.mdu[i];
                }
                control.print_iteration();
                if control.converged() {
                    converged = true;
                    break;
                }
            }

            if converged {
                vec_copy(&mut state.uu_old, &state.uu)?;
                self.summaries.push(StepSummary {
                    step: timestep,
                    t: state.t,
                    dt: state.dt,
                    iterations,
                    norm_rr: control.norm_rr(),
                    norm_mdu: control.norm_mdu(),
                    converged: true,
                });
                timestep += 1;
                continue;
            }

            match self.config.divergence {
                DivergencePolicy::StopRun => {
                    return Err("Newton-Raphson did not converge");
                }
                DivergencePolicy::HoldState => {
                    // reject the step but keep marching in time
                    vec_copy(&mut state.uu, &state.uu_old)?;
                    self.summaries.push(StepSummary {
                        step: timestep,
                        t: state.t,
                        dt: state.dt,
                        iterations,
                        norm_rr: control.norm_rr(),
                        norm_mdu: control.norm_mdu(),
                        converged: false,
                    });
                    timestep += 1;
                }
                DivergencePolicy::RetryHalveDt => {
                    state.t = t_old;
                    vec_copy(&mut state.uu, &state.uu_old)?;
                    state.dt /= 2.0;
                    if state.dt < self.config.dt_min {
                        return Err("Δt is smaller than the allowed minimum");
                    }
                }
            }
        }
        control.print_footer();
        Ok(())
    }

    /// Recovers secondary values (e.g. stresses) at the mesh nodes
    pub fn projection(&mut self, state: &FemState) -> Result<NodalProjection, StrError> {
        self.elements.projection(state)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
