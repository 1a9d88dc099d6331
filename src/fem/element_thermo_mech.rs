use super::{bulk_integ_points, ElementTrait, Equations, FemState};
use super::element_solid::{plane_stress_dd, N_PROJ_SOLID};
use crate::base::{Config, Dof, ParamThermoMech};
use crate::mesh::Mesh;
use crate::shapes::Scratchpad;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Implements the one-way coupled thermo-mechanical kernel (2D only)
///
/// The temperature drives a volumetric eigenstrain `ε* = (ω T / 3) I`
/// subtracted from the normal strains before the stress evaluation:
///
/// ```text
/// R_u[I] = -∫ Bᵀ σ dΩ            σ = D (ε - ε*)
/// R_T[I] = ∫ (Ṫ N_I + κ ∇T·∇N_I) dΩ
/// ```
///
/// The displacements do not feed back into the heat equation. Every
/// node carries (ux, uy, T); the local ordering is (ux₀, uy₀, T₀, ...)
pub struct ElementThermoMech<'a> {
    pub param: &'a ParamThermoMech,
    pub nodes: Vec<usize>,
    pub local_to_global: Vec<usize>,
    pub pad: Scratchpad,
    pub ips: Vec<[f64; 3]>,
    pub residual: Vector,
    pub jacobian: Matrix,
    dd: [[f64; 3]; 3],
    dsig_dtt: [f64; 3],
    uu_local: Vector,
    vv_local: Vector,
    proj_weight: Vector,
    proj_values: Matrix,
}

impl<'a> ElementThermoMech<'a> {
    /// Allocates a new instance
    pub fn new(
        mesh: &Mesh,
        config: &Config,
        param: &'a ParamThermoMech,
        cell_id: usize,
        equations: &Equations,
    ) -> Result<Self, StrError> {
        if mesh.ndim != 2 {
            return Err("thermo-mechanical elements require a 2D mesh");
        }
        let nodes = mesh.conn[cell_id].clone();
        let mut pad = Scratchpad::new(mesh.ndim, mesh.kind)?;
        mesh.set_pad_coords(&mut pad, &nodes)?;
        let mut local_to_global = Vec::with_capacity(3 * nodes.len());
        for node in &nodes {
            local_to_global.push(equations.eq(*node, Dof::Ux)?);
            local_to_global.push(equations.eq(*node, Dof::Uy)?);
            local_to_global.push(equations.eq(*node, Dof::T)?);
        }
        let nnode = nodes.len();
        let neq = 3 * nnode;
        let dd = plane_stress_dd(param.young, param.poisson);
        // ∂σ/∂T from the eigenstrain: -ω/3 on both normal strains
        let mut dsig_dtt = [0.0; 3];
        for r in 0..3 {
            dsig_dtt[r] = (dd[r][0] + dd[r][1]) * (-param.omega / 3.0);
        }
        Ok(ElementThermoMech {
            param,
            nodes,
            local_to_global,
            pad,
            ips: bulk_integ_points(mesh.kind, config)?,
            residual: Vector::new(neq),
            jacobian: Matrix::new(neq, neq),
            dd,
            dsig_dtt,
            uu_local: Vector::new(neq),
            vv_local: Vector::new(neq),
            proj_weight: Vector::new(nnode),
            proj_values: Matrix::new(nnode, N_PROJ_SOLID),
        })
    }

    /// Computes total strain, mechanical stress, and temperature at a point
    fn strain_stress_tt(&self) -> ([f64; 3], [f64; 3], f64) {
        let nnode = self.nodes.len();
        let mut eps = [0.0; 3];
        let mut tt = 0.0;
        for a in 0..nnode {
            let (gx, gy) = (self.pad.gradient.get(a, 0), self.pad.gradient.get(a, 1));
            let (ux, uy) = (self.uu_local[3 * a], self.uu_local[3 * a + 1]);
            eps[0] += gx * ux;
            eps[1] += gy * uy;
            eps[2] += gy * ux + gx * uy;
            tt += self.pad.interp[a] * self.uu_local[3 * a + 2];
        }
        let eigen = self.param.omega * tt / 3.0;
        let mech = [eps[0] - eigen, eps[1] - eigen, eps[2]];
        let mut sig = [0.0; 3];
        for r in 0..3 {
            for c in 0..3 {
                sig[r] += self.dd[r][c] * mech[c];
            }
        }
        (eps, sig, tt)
    }
}

impl<'a> ElementTrait for ElementThermoMech<'a> {
    fn calc(&mut self, state: &FemState, ctan: (f64, f64)) -> Result<(), StrError> {
        let nnode = self.nodes.len();
        for (i, eq) in self.local_to_global.iter().enumerate() {
            self.uu_local[i] = state.uu[*eq];
            self.vv_local[i] = state.vv[*eq];
        }
        self.residual.fill(0.0);
        self.jacobian.fill(0.0);
        let kappa = self.param.conductivity;
        for ip_index in 0..self.ips.len() {
            let ip = self.ips[ip_index];
            let det = self.pad.calc_gradient(&[ip[1], ip[2]])?;
            let jxw = det * ip[0];
            let (_, sig, _) = self.strain_stress_tt();
            let dd = self.dd;
            let dsig = self.dsig_dtt;
            // temperature rate and gradient
            let mut tt_dot = 0.0;
            let mut grad_tt = [0.0, 0.0];
            for a in 0..nnode {
                tt_dot += self.pad.interp[a] * self.vv_local[3 * a + 2];
                for i in 0..2 {
                    grad_tt[i] += self.pad.gradient.get(a, i) * self.uu_local[3 * a + 2];
                }
            }
            for a in 0..nnode {
                let na = self.pad.interp[a];
                let (gax, gay) = (self.pad.gradient.get(a, 0), self.pad.gradient.get(a, 1));
                self.residual[3 * a] += -(gax * sig[0] + gay * sig[2]) * jxw;
                self.residual[3 * a + 1] += -(gay * sig[1] + gax * sig[2]) * jxw;
                self.residual[3 * a + 2] +=
                    (tt_dot * na + kappa * (grad_tt[0] * gax + grad_tt[1] * gay)) * jxw;
                for b in 0..nnode {
                    let nb = self.pad.interp[b];
                    let (gbx, gby) = (self.pad.gradient.get(b, 0), self.pad.gradient.get(b, 1));
                    let (i, j) = (3 * a, 3 * b);
                    // mechanical block BᵀDB
                    let kxx = (gax * dd[0][0] * gbx + gay * dd[2][2] * gby) * jxw;
                    let kxy = (gax * dd[0][1] * gby + gay * dd[2][2] * gbx) * jxw;
                    let kyx = (gay * dd[1][0] * gbx + gax * dd[2][2] * gby) * jxw;
                    let kyy = (gay * dd[1][1] * gby + gax * dd[2][2] * gbx) * jxw;
                    self.jacobian.set(i, j, self.jacobian.get(i, j) + kxx);
                    self.jacobian.set(i, j + 1, self.jacobian.get(i, j + 1) + kxy);
                    self.jacobian.set(i + 1, j, self.jacobian.get(i + 1, j) + kyx);
                    self.jacobian.set(i + 1, j + 1, self.jacobian.get(i + 1, j + 1) + kyy);
                    // coupling block Bᵀ (∂σ/∂T) N
                    let kxt = (gax * dsig[0] + gay * dsig[2]) * nb * ctan.0 * jxw;
                    let kyt = (gay * dsig[1] + gax * dsig[2]) * nb * ctan.0 * jxw;
                    self.jacobian.set(i, j + 2, self.jacobian.get(i, j + 2) + kxt);
                    self.jacobian.set(i + 1, j + 2, self.jacobian.get(i + 1, j + 2) + kyt);
                    // thermal block
                    let ktt = (-nb * na * ctan.1 - kappa * (gbx * gax + gby * gay) * ctan.0) * jxw;
                    self.jacobian.set(i + 2, j + 2, self.jacobian.get(i + 2, j + 2) + ktt);
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
        N_PROJ_SOLID
    }

    fn projection(&mut self, state: &FemState) -> Result<Option<(&Vector, &Matrix)>, StrError> {
        let nnode = self.nodes.len();
        for (i, eq) in self.local_to_global.iter().enumerate() {
            self.uu_local[i] = state.uu[*eq];
        }
        self.proj_weight.fill(0.0);
        self.proj_values.fill(0.0);
        for ip_index in 0..self.ips.len() {
            let ip = self.ips[ip_index];
            let det = self.pad.calc_gradient(&[ip[1], ip[2]])?;
            let (eps, sig, _) = self.strain_stress_tt();
            let von_mises =
                f64::sqrt(sig[0] * sig[0] + sig[1] * sig[1] + 3.0 * sig[2] * sig[2] - sig[0] * sig[1]);
            let hydrostatic = (sig[0] + sig[1]) / 2.0;
            let vals = [sig[0], sig[1], sig[2], eps[0], eps[1], eps[2], von_mises, hydrostatic];
            for a in 0..nnode {
                let xs = self.pad.interp[a] * det;
                self.proj_weight[a] += xs;
                for j in 0..N_PROJ_SOLID {
                    self.proj_values.set(a, j, self.proj_values.get(a, j) + vals[j] * xs);
                }
            }
        }
        Ok(Some((&self.proj_weight, &self.proj_values)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
