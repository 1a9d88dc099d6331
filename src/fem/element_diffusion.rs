use super::{bulk_integ_points, ElementTrait, Equations, FemState};
use crate::base::{Config, Dof, ParamDiffusion};
use crate::mesh::Mesh;
use crate::shapes::Scratchpad;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Implements the diffusion equation kernel (1D and 2D)
///
/// Weak-form residual per node I:
///
/// ```text
/// R_I = ∫ (Ṫ N_I + κ ∇T·∇N_I - s N_I) dΩ
/// ```
///
/// and the tangent `K = -∂R/∂U` with `ctan = (1, 1/Δt)`.
/// The steady case solves the Poisson equation `κ ∇²T + s = 0`
pub struct ElementDiffusion<'a> {
    pub param: &'a ParamDiffusion,
    pub nodes: Vec<usize>,
    pub local_to_global: Vec<usize>,
    pub pad: Scratchpad,
    pub ips: Vec<[f64; 3]>,
    pub residual: Vector,
    pub jacobian: Matrix,
    uu_local: Vector,
    vv_local: Vector,
}

impl<'a> ElementDiffusion<'a> {
    /// Allocates a new instance
    pub fn new(
        mesh: &Mesh,
        config: &Config,
        param: &'a ParamDiffusion,
        cell_id: usize,
        equations: &Equations,
    ) -> Result<Self, StrError> {
        let nodes = mesh.conn[cell_id].clone();
        let mut pad = Scratchpad::new(mesh.ndim, mesh.kind)?;
        mesh.set_pad_coords(&mut pad, &nodes)?;
        let mut local_to_global = Vec::with_capacity(nodes.len());
        for node in &nodes {
            local_to_global.push(equations.eq(*node, Dof::T)?);
        }
        let neq = nodes.len();
        Ok(ElementDiffusion {
            param,
            nodes,
            local_to_global,
            pad,
            ips: bulk_integ_points(mesh.kind, config)?,
            residual: Vector::new(neq),
            jacobian: Matrix::new(neq, neq),
            uu_local: Vector::new(neq),
            vv_local: Vector::new(neq),
        })
    }
}

impl<'a> ElementTrait for ElementDiffusion<'a> {
    fn calc(&mut self, state: &FemState, ctan: (f64, f64)) -> Result<(), StrError> {
        let nnode = self.nodes.len();
        let ndim = self.pad.space_ndim;
        for a in 0..nnode {
            self.uu_local[a] = state.uu[self.local_to_global[a]];
            self.vv_local[a] = state.vv[self.local_to_global[a]];
        }
        self.residual.fill(0.0);
        self.jacobian.fill(0.0);
        let kappa = self.param.conductivity;
        for ip in &self.ips {
            let ksi = [ip[1], ip[2]];
            let det = self.pad.calc_gradient(&ksi[0..ndim])?;
            let jxw = det * ip[0];
            // interpolated rate and gradient
            let mut t_dot = 0.0;
            let mut grad = [0.0, 0.0];
            for a in 0..nnode {
                t_dot += self.pad.interp[a] * self.vv_local[a];
                for i in 0..ndim {
                    grad[i] += self.pad.gradient.get(a, i) * self.uu_local[a];
                }
            }
            for a in 0..nnode {
                let na = self.pad.interp[a];
                let mut r = t_dot * na;
                for i in 0..ndim {
                    r += kappa * grad[i] * self.pad.gradient.get(a, i);
                }
                if let Some(s) = self.param.source {
                    r -= s * na;
                }
                self.residual[a] += r * jxw;
                for b in 0..nnode {
                    let nb = self.pad.interp[b];
                    let mut k = -nb * na * ctan.1;
                    for i in 0..ndim {
                        k -= kappa * self.pad.gradient.get(b, i) * self.pad.gradient.get(a, i) * ctan.0;
                    }
                    self.jacobian.set(a, b, self.jacobian.get(a, b) + k * jxw);
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
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
