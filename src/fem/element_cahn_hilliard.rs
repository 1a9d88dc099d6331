use super::{bulk_integ_points, ElementTrait, Equations, FemState};
use crate::base::{Config, Dof, ParamCahnHilliard};
use crate::mesh::Mesh;
use crate::shapes::Scratchpad;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Number of secondary values projected to nodes: f, f', f''
pub const N_PROJ_CAHN_HILLIARD: usize = 3;

/// Implements the mixed (c, μ) Cahn-Hilliard kernel (1D and 2D)
///
/// The fourth-order equation is split into two second-order ones:
///
/// ```text
/// R_c[I] = ∫ (ċ N_I + M ∇μ·∇N_I) dΩ
/// R_μ[I] = ∫ (μ N_I - f'(c) N_I - κ ∇c·∇N_I) dΩ
/// ```
///
/// Every node carries the pair (c, μ); the local ordering is
/// (c₀, μ₀, c₁, μ₁, ...)
pub struct ElementCahnHilliard<'a> {
    pub param: &'a ParamCahnHilliard,
    pub nodes: Vec<usize>,
    pub local_to_global: Vec<usize>,
    pub pad: Scratchpad,
    pub ips: Vec<[f64; 3]>,
    pub residual: Vector,
    pub jacobian: Matrix,
    uu_local: Vector,
    vv_local: Vector,
    proj_weight: Vector,
    proj_values: Matrix,
}

impl<'a> ElementCahnHilliard<'a> {
    /// Allocates a new instance
    pub fn new(
        mesh: &Mesh,
        config: &Config,
        param: &'a ParamCahnHilliard,
        cell_id: usize,
        equations: &Equations,
    ) -> Result<Self, StrError> {
        let nodes = mesh.conn[cell_id].clone();
        let mut pad = Scratchpad::new(mesh.ndim, mesh.kind)?;
        mesh.set_pad_coords(&mut pad, &nodes)?;
        let mut local_to_global = Vec::with_capacity(2 * nodes.len());
        for node in &nodes {
            local_to_global.push(equations.eq(*node, Dof::C)?);
            local_to_global.push(equations.eq(*node, Dof::Mu)?);
        }
        let nnode = nodes.len();
        let neq = 2 * nnode;
        Ok(ElementCahnHilliard {
            param,
            nodes,
            local_to_global,
            pad,
            ips: bulk_integ_points(mesh.kind, config)?,
            residual: Vector::new(neq),
            jacobian: Matrix::new(neq, neq),
            uu_local: Vector::new(neq),
            vv_local: Vector::new(neq),
            proj_weight: Vector::new(nnode),
            proj_values: Matrix::new(nnode, N_PROJ_CAHN_HILLIARD),
        })
    }
}

impl<'a> ElementTrait for ElementCahnHilliard<'a> {
    fn calc(&mut self, state: &FemState, ctan: (f64, f64)) -> Result<(), StrError> {
        let nnode = self.nodes.len();
        let ndim = self.pad.space_ndim;
        for (i, eq) in self.local_to_global.iter().enumerate() {
            self.uu_local[i] = state.uu[*eq];
            self.vv_local[i] = state.vv[*eq];
        }
        self.residual.fill(0.0);
        self.jacobian.fill(0.0);
        let mob = self.param.mobility;
        let kappa = self.param.kappa;
        for ip in &self.ips {
            let ksi = [ip[1], ip[2]];
            let det = self.pad.calc_gradient(&ksi[0..ndim])?;
            let jxw = det * ip[0];
            // interpolated fields at the Gauss point
            let (mut c, mut c_dot, mut mu) = (0.0, 0.0, 0.0);
            let mut grad_c = [0.0, 0.0];
            let mut grad_mu = [0.0, 0.0];
            for a in 0..nnode {
                let na = self.pad.interp[a];
                c += na * self.uu_local[2 * a];
                c_dot += na * self.vv_local[2 * a];
                mu += na * self.uu_local[2 * a + 1];
                for i in 0..ndim {
                    let ga = self.pad.gradient.get(a, i);
                    grad_c[i] += ga * self.uu_local[2 * a];
                    grad_mu[i] += ga * self.uu_local[2 * a + 1];
                }
            }
            let (_, dfdc, d2fdc2) = self.param.free_energy.eval(c);
            for a in 0..nnode {
                let na = self.pad.interp[a];
                let mut rc = c_dot * na;
                let mut rm = (mu - dfdc) * na;
                for i in 0..ndim {
                    let ga = self.pad.gradient.get(a, i);
                    rc += mob * grad_mu[i] * ga;
                    rm -= kappa * grad_c[i] * ga;
                }
                self.residual[2 * a] += rc * jxw;
                self.residual[2 * a + 1] += rm * jxw;
                for b in 0..nnode {
                    let nb = self.pad.interp[b];
                    let mut gg = 0.0;
                    for i in 0..ndim {
                        gg += self.pad.gradient.get(b, i) * self.pad.gradient.get(a, i);
                    }
                    let kcc = -nb * na * ctan.1;
                    let kcm = -mob * gg * ctan.0;
                    let kmc = (d2fdc2 * nb * na + kappa * gg) * ctan.0;
                    let kmm = -nb * na * ctan.0;
                    let (i, j) = (2 * a, 2 * b);
                    self.jacobian.set(i, j, self.jacobian.get(i, j) + kcc * jxw);
                    self.jacobian.set(i, j + 1, self.jacobian.get(i, j + 1) + kcm * jxw);
                    self.jacobian.set(i + 1, j, self.jacobian.get(i + 1, j) + kmc * jxw);
                    self.jacobian.set(i + 1, j + 1, self.jacobian.get(i + 1, j + 1) + kmm * jxw);
                }
            }
        }
        Ok(())
    }

    fn nodes(&self) -> &Vec<usize> {
        &self.nodes
    }

    fn local_to_global(&self) -> &Vec<usize> {
        &self.local_to_global
    }

    fn residual(&self) -> &Vector {
        &self.residual
    }

    fn jacobian(&self) -> &Matrix {
        &self.jacobian
    }

    fn n_proj_values(&self) -> usize {
        N_PROJ_CAHN_HILLIARD
    }

    fn projection(&mut self, state: &FemState) -> Result<Option<(&Vector, &Matrix)>, StrError> {
        let nnode = self.nodes.len();
        let ndim = self.pad.space_ndim;
        for (i, eq) in self.local_to_global.iter().enumerate() {
            self.uu_local[i] = state.uu[*eq];
        }
        self.proj_weight.fill(0.0);
        self.proj_values.fill(0.0);
        for ip_index in 0..self.ips.len() {
            let ip = self.ips[ip_index];
            let ksi = [ip[1], ip[2]];
            let det = self.pad.calc_gradient(&ksi[0..ndim])?;
            let mut c = 0.0;
            for a in 0..nnode {
                c += self.pad.interp[a] * self.uu_local[2 * a];
            }
            let (f, dfdc, d2fdc2) = self.param.free_energy.eval(c);
            let vals = [f, dfdc, d2fdc2];
            for a in 0..nnode {
                let xs = self.pad.interp[a] * det;
                self.proj_weight[a] += xs;
                for j in 0..N_PROJ_CAHN_HILLIARD {
                    self.proj_values.set(a, j, self.proj_values.get(a, j) + vals[j] * xs);
                }
            }
        }
        Ok(Some((&self.proj_weight, &self.proj_values)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ElementCahnHilliard;
    use crate::base::{Config, Dof, Elem, FreeEnergy, ParamCahnHilliard};
    use crate::fem::{ElementTrait, Equations, FemState};
    use crate::mesh::Mesh;
    use crate::shapes::GeoKind;
    use crate::StrError;
    use russell_lab::approx_eq;

    #[test]
    fn equilibrium_state_has_zero_residual() -> Result<(), StrError> {
        // uniform c at a free-energy minimum with μ = 0 and ċ = 0
        // satisfies both equations pointwise
        let mesh = Mesh::structured_2d(2, 2, 0.0, 1.0, 0.0, 1.0, GeoKind::Qua4)?;
        let param = ParamCahnHilliard {
            mobility: 1.0,
            kappa: 2e-2,
            free_energy: FreeEnergy::DoubleWell { height: 100.0 },
        };
        let elem = Elem::CahnHilliard(param);
        let equations = Equations::new(&mesh, &elem);
        let mut config = Config::new();
        config.set_transient(5e-6, 1)?;
        let mut state = FemState::new(&equations, &config)?;
        state.set_uniform_ic(&equations, Dof::C, 1.0)?;
        let mut element = ElementCahnHilliard::new(&mesh, &config, &param, 0, &equations)?;
        element.calc(&state, (1.0, 1.0 / config.dt))?;
        for i in 0..element.residual.dim() {
            approx_eq(element.residual[i], 0.0, 1e-13);
        }
        Ok(())
    }

    #[test]
    fn chemical_potential_residual_sees_dfdc() -> Result<(), StrError> {
        // uniform c away from a minimum: R_μ[I] = -f'(c) ∫ N_I dΩ
        let mesh = Mesh::structured_1d(1, 0.0, 2.0, GeoKind::Lin2)?;
        let param = ParamCahnHilliard {
            mobility: 1.0,
            kappa: 2e-2,
            free_energy: FreeEnergy::Landau,
        };
        let elem = Elem::CahnHilliard(param);
        let equations = Equations::new(&mesh, &elem);
        let config = Config::new();
        let mut state = FemState::new(&equations, &config)?;
        state.set_uniform_ic(&equations, Dof::C, 0.5)?;
        let mut element = ElementCahnHilliard::new(&mesh, &config, &param, 0, &equations)?;
        element.calc(&state, (1.0, 0.0))?;
        let dfdc = 0.5f64 * 0.5 * 0.5 - 0.5;
        // ∫ N_I dΩ = L/2 = 1
        approx_eq(element.residual[1], -dfdc, 1e-14);
        approx_eq(element.residual[3], -dfdc, 1e-14);
        approx_eq(element.residual[0], 0.0, 1e-14);
        Ok(())
    }

    #[test]
    fn projection_recovers_free_energy() -> Result<(), StrError> {
        let mesh = Mesh::structured_2d(1, 1, 0.0, 1.0, 0.0, 1.0, GeoKind::Qua4)?;
        let param = ParamCahnHilliard::sample();
        let elem = Elem::CahnHilliard(param);
        let equations = Equations::new(&mesh, &elem);
        let config = Config::new();
        let mut state = FemState::new(&equations, &config)?;
        state.set_uniform_ic(&equations, Dof::C, 0.5)?;
        let mut elements = crate::fem::Elements::new(&mesh, &elem, &config, &equations)?;
        let proj = elements.projection(&state)?;
        let (f, dfdc, d2fdc2) = param.free_energy.eval(0.5);
        for node in 0..mesh.nnode() {
            approx_eq(proj.values.get(node, 0), f, 1e-12);
            approx_eq(proj.values.get(node, 1), dfdc, 1e-12);
            approx_eq(proj.values.get(node, 2), d2fdc2, 1e-12);
        }
        Ok(())
    }
}
