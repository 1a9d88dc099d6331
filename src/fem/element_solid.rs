use super::{bulk_integ_points, ElementTrait, Equations, FemState};
use crate::base::{Config, Dof, ParamSolid};
use crate::mesh::Mesh;
use crate::shapes::Scratchpad;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Number of secondary values projected to nodes: stresses (σxx, σyy, σxy),
/// strains (εxx, εyy, γxy), von Mises, and hydrostatic stress
pub const N_PROJ_SOLID: usize = 8;

/// Returns the plane-stress constitutive matrix
pub(crate) fn plane_stress_dd(young: f64, poisson: f64) -> [[f64; 3]; 3] {
    let term1 = young / (1.0 - poisson * poisson);
    let term2 = young * poisson / (1.0 - poisson * poisson);
    [
        [term1, term2, 0.0],
        [term2, term1, 0.0],
        [0.0, 0.0, 0.5 * young / (1.0 + poisson)],
    ]
}

/// Implements the plane-stress linear elasticity kernel (2D only)
///
/// Weak form with the engineering strain vector ε = B u:
///
/// ```text
/// R = -∫ Bᵀ σ dΩ      K = ∫ Bᵀ D B dΩ      σ = D ε
/// ```
pub struct ElementSolid<'a> {
    pub param: &'a ParamSolid,
    pub nodes: Vec<usize>,
    pub local_to_global: Vec<usize>,
    pub pad: Scratchpad,
    pub ips: Vec<[f64; 3]>,
    pub residual: Vector,
    pub jacobian: Matrix,
    dd: [[f64; 3]; 3],
    uu_local: Vector,
    proj_weight: Vector,
    proj_values: Matrix,
}

impl<'a> ElementSolid<'a> {
    /// Allocates a new instance
    pub fn new(
        mesh: &Mesh,
        config: &Config,
        param: &'a ParamSolid,
        cell_id: usize,
        equations: &Equations,
    ) -> Result<Self, StrError> {
        if mesh.ndim != 2 {
            return Err("plane-stress elements require a 2D mesh");
        }
        let nodes = mesh.conn[cell_id].clone();
        let mut pad = Scratchpad::new(mesh.ndim, mesh.kind)?;
        mesh.set_pad_coords(&mut pad, &nodes)?;
        let mut local_to_global = Vec::with_capacity(2 * nodes.len());
        for node in &nodes {
            local_to_global.push(equations.eq(*node, Dof::Ux)?);
            local_to_global.push(equations.eq(*node, Dof::Uy)?);
        }
        let nnode = nodes.len();
        let neq = 2 * nnode;
        Ok(ElementSolid {
            param,
            nodes,
            local_to_global,
            pad,
            ips: bulk_integ_points(mesh.kind, config)?,
            residual: Vector::new(neq),
            jacobian: Matrix::new(neq, neq),
            dd: plane_stress_dd(param.young, param.poisson),
            uu_local: Vector::new(neq),
            proj_weight: Vector::new(nnode),
            proj_values: Matrix::new(nnode, N_PROJ_SOLID),
        })
    }

    fn gather(&mut self, state: &FemState) {
        for (i, eq) in self.local_to_global.iter().enumerate() {
            self.uu_local[i] = state.uu[*eq];
        }
    }

    /// Computes strain and stress at the current Gauss point
    fn strain_stress(&self) -> ([f64; 3], [f64; 3]) {
        let nnode = self.nodes.len();
        let mut eps = [0.0; 3];
        for a in 0..nnode {
            let (gx, gy) = (self.pad.gradient.get(a, 0), self.pad.gradient.get(a, 1));
            let (ux, uy) = (self.uu_local[2 * a], self.uu_local[2 * a + 1]);
            eps[0] += gx * ux;
            eps[1] += gy * uy;
            eps[2] += gy * ux + gx * uy;
        }
        let mut sig = [0.0; 3];
        for r in 0..3 {
            for c in 0..3 {
                sig[r] += self.dd[r][c] * eps[c];
            }
        }
        (eps, sig)
    }
}

impl<'a> ElementTrait for ElementSolid<'a> {
    fn calc(&mut self, state: &FemState, _ctan: (f64, f64)) -> Result<(), StrError> {
        self.gather(state);
        let nnode = self.nodes.len();
        self.residual.fill(0.0);
        self.jacobian.fill(0.0);
        for ip_index in 0..self.ips.len() {
            let ip = self.ips[ip_index];
            let det = self.pad.calc_gradient(&[ip[1], ip[2]])?;
            let jxw = det * ip[0];
            let (_, sig) = self.strain_stress();
            let dd = self.dd;
            for a in 0..nnode {
                let (gax, gay) = (self.pad.gradient.get(a, 0), self.pad.gradient.get(a, 1));
                // Bᵀσ with rows [gx,0,gy] and [0,gy,gx]
                self.residual[2 * a] += -(gax * sig[0] + gay * sig[2]) * jxw;
                self.residual[2 * a + 1] += -(gay * sig[1] + gax * sig[2]) * jxw;
                for b in 0..nnode {
                    let (gbx, gby) = (self.pad.gradient.get(b, 0), self.pad.gradient.get(b, 1));
                    let kxx = (gax * dd[0][0] * gbx + gay * dd[2][2] * gby) * jxw;
                    let kxy = (gax * dd[0][1] * gby + gay * dd[2][2] * gbx) * jxw;
                    let kyx = (gay * dd[1][0] * gbx + gax * dd[2][2] * gby) * jxw;
                    let kyy = (gay * dd[1][1] * gby + gax * dd[2][2] * gbx) * jxw;
                    let (i, j) = (2 * a, 2 * b);
                    self.jacobian.set(i, j, self.jacobian.get(i, j) + kxx);
                    self.jacobian.set(i, j + 1, self.jacobian.get(i, j + 1) + kxy);
                    self.jacobian.set(i + 1, j, self.jacobian.get(i + 1, j) + kyx);
                    self.jacobian.set(i + 1, j + 1, self.jacobian.get(i + 1, j + 1) + kyy);
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
        self.gather(state);
        let nnode = self.nodes.len();
        self.proj_weight.fill(0.0);
        self.proj_values.fill(0.0);
        for ip_index in 0..self.ips.len() {
            let ip = self.ips[ip_index];
            let det = self.pad.calc_gradient(&[ip[1], ip[2]])?;
            let (eps, sig) = self.strain_stress();
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

#[cfg(test)]
mod tests {
    use super::{plane_stress_dd, ElementSolid};
    use crate::base::{Config, Elem, ParamSolid};
    use crate::fem::{ElementTrait, Equations, FemState};
    use crate::mesh::Mesh;
    use crate::shapes::GeoKind;
    use crate::StrError;
    use russell_lab::approx_eq;

    #[test]
    fn new_handles_errors() -> Result<(), StrError> {
        let mesh = Mesh::structured_1d(1, 0.0, 1.0, GeoKind::Lin2)?;
        let param = ParamSolid::sample();
        let elem = Elem::Solid(param);
        let equations = Equations::new(&mesh, &elem);
        let config = Config::new();
        assert_eq!(
            ElementSolid::new(&mesh, &config, &param, 0, &equations).err(),
            Some("plane-stress elements require a 2D mesh")
        );
        Ok(())
    }

    #[test]
    fn plane_stress_dd_works() {
        let dd = plane_stress_dd(10.0e6, 0.3);
        approx_eq(dd[0][0], 10.0e6 / 0.91, 1.0);
        approx_eq(dd[0][1], 3.0e6 / 0.91, 1.0);
        approx_eq(dd[2][2], 5.0e6 / 1.3, 1.0);
        assert_eq!(dd[0][2], 0.0);
    }

    #[test]
    fn uniaxial_stretch_works() -> Result<(), StrError> {
        // uniform stretch εxx = 0.01 of a unit square:
        // internal forces are σxx·(1/2) on each side, tangent is symmetric
        let mesh = Mesh::structured_2d(1, 1, 0.0, 1.0, 0.0, 1.0, GeoKind::Qua4)?;
        let param = ParamSolid {
            young: 1000.0,
            poisson: 0.25,
        };
        let elem = Elem::Solid(param);
        let equations = Equations::new(&mesh, &elem);
        let config = Config::new();
        let mut element = ElementSolid::new(&mesh, &config, &param, 0, &equations)?;
        let mut state = FemState::new(&equations, &config)?;
        // ux = 0.01 x at all nodes
        for node in 0..4 {
            let eq = equations.eq(node, crate::base::Dof::Ux)?;
            state.uu[eq] = 0.01 * mesh.coords[node][0];
        }
        element.calc(&state, (1.0, 0.0))?;
        let dd = plane_stress_dd(1000.0, 0.25);
        let (sxx, syy) = (dd[0][0] * 0.01, dd[1][0] * 0.01);
        // nodes 0 and 3 are at x = 0 (reaction -σxx/2), nodes 1 and 2 at x = 1
        let rr = element.residual.as_data();
        approx_eq(rr[0], sxx / 2.0, 1e-11);
        approx_eq(rr[2], -sxx / 2.0, 1e-11);
        approx_eq(rr[4], -sxx / 2.0, 1e-11);
        approx_eq(rr[6], sxx / 2.0, 1e-11);
        // σyy pulls the bottom nodes down and the top nodes up
        approx_eq(rr[1], syy / 2.0, 1e-11);
        approx_eq(rr[5], -syy / 2.0, 1e-11);
        // tangent is symmetric
        let (n, _) = element.jacobian.dims();
        for i in 0..n {
            for j in 0..n {
                approx_eq(element.jacobian.get(i, j), element.jacobian.get(j, i), 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn projection_of_uniform_stress_works() -> Result<(), StrError> {
        // a uniform strain field projects to identical nodal values
        let mesh = Mesh::structured_2d(2, 2, 0.0, 2.0, 0.0, 2.0, GeoKind::Qua4)?;
        let param = ParamSolid {
            young: 1000.0,
            poisson: 0.25,
        };
        let elem = Elem::Solid(param);
        let equations = Equations::new(&mesh, &elem);
        let config = Config::new();
        let mut state = FemState::new(&equations, &config)?;
        for node in 0..mesh.nnode() {
            let eq = equations.eq(node, crate::base::Dof::Ux)?;
            state.uu[eq] = 0.01 * mesh.coords[node][0];
        }
        let mut elements = crate::fem::Elements::new(&mesh, &elem, &config, &equations)?;
        let proj = elements.projection(&state)?;
        let dd = plane_stress_dd(1000.0, 0.25);
        let sxx = dd[0][0] * 0.01;
        for node in 0..mesh.nnode() {
            approx_eq(proj.values.get(node, 0), sxx, 1e-10);
            approx_eq(proj.values.get(node, 3), 0.01, 1e-13);
            // von Mises is non-negative
            assert!(proj.values.get(node, 6) >= 0.0);
        }
        Ok(())
    }
}
