use super::{
    ElementCahnHilliard, ElementDiffusion, ElementSolid, ElementThermoMech, Equations, FemState,
    NodalProjection,
};
use crate::base::{Config, Elem};
use crate::integ::{gauss_legendre_1d, gauss_legendre_2d};
use crate::mesh::Mesh;
use crate::shapes::GeoKind;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Defines the contract of element kernels
///
/// A kernel fills its local residual vector and local tangent matrix for
/// the current state. The tangent follows the convention of the global
/// system `[K]{ΔU} = {R}` with `K = -∂R/∂U`, thus a Newton update is
/// simply `U += ΔU`
pub trait ElementTrait {
    /// Computes the local residual vector and tangent matrix
    ///
    /// `ctan = (1, 1/Δt)` for backward Euler; `(1, 0)` for steady state
    fn calc(&mut self, state: &FemState, ctan: (f64, f64)) -> Result<(), StrError>;

    /// Returns the node numbers (connectivity) of this element
    fn nodes(&self) -> &Vec<usize>;

    /// Returns the local-to-global equation map
    fn local_to_global(&self) -> &Vec<usize>;

    /// Returns the local residual vector computed by the last calc
    fn residual(&self) -> &Vector;

    /// Returns the local tangent matrix computed by the last calc
    fn jacobian(&self) -> &Matrix;

    /// Returns the number of secondary values recovered at nodes
    fn n_proj_values(&self) -> usize {
        0
    }

    /// Computes the local nodal projection (weights, values)
    fn projection(&mut self, _state: &FemState) -> Result<Option<(&Vector, &Matrix)>, StrError> {
        Ok(None)
    }
}

/// Returns the Gauss points of a bulk element as (weight, ξ, η) triples
///
/// The default number of points per dimension is the polynomial order
/// plus one; `config.n_integ_point` overrides it
pub(crate) fn bulk_integ_points(kind: GeoKind, config: &Config) -> Result<Vec<[f64; 3]>, StrError> {
    let n = match config.n_integ_point {
        Some(n) => n,
        None => kind.order() + 1,
    };
    if kind.geo_ndim() == 1 {
        let rule = gauss_legendre_1d(n)?;
        Ok(rule.iter().map(|p| [p[0], p[1], 0.0]).collect())
    } else {
        gauss_legendre_2d(n)
    }
}

/// Holds all elements of the mesh
pub struct Elements<'a> {
    /// Configuration parameters
    pub config: &'a Config,

    /// All element kernels
    pub all: Vec<Box<dyn ElementTrait + 'a>>,

    /// Number of secondary values recovered at nodes (0 if unavailable)
    pub n_proj_values: usize,

    /// Number of mesh nodes (for the projection arrays)
    nnode: usize,
}

impl<'a> Elements<'a> {
    /// Allocates one kernel per mesh element
    pub fn new(
        mesh: &'a Mesh,
        elem: &'a Elem,
        config: &'a Config,
        equations: &Equations,
    ) -> Result<Self, StrError> {
        let mut all: Vec<Box<dyn ElementTrait + 'a>> = Vec::with_capacity(mesh.nelem());
        for cell_id in 0..mesh.nelem() {
            let element: Box<dyn ElementTrait + 'a> = match elem {
                Elem::Diffusion(p) => Box::new(ElementDiffusion::new(mesh, config, p, cell_id, equations)?),
                Elem::Solid(p) => Box::new(ElementSolid::new(mesh, config, p, cell_id, equations)?),
                Elem::CahnHilliard(p) => {
                    Box::new(ElementCahnHilliard::new(mesh, config, p, cell_id, equations)?)
                }
                Elem::ThermoMech(p) => Box::new(ElementThermoMech::new(mesh, config, p, cell_id, equations)?),
            };
            all.push(element);
        }
        let n_proj_values = all[0].n_proj_values();
        Ok(Elements {
            config,
            all,
            n_proj_values,
            nnode: mesh.nnode(),
        })
    }

    /// Computes all local systems and assembles the global matrix and vector
    ///
    /// Zeroes `kk` and `rr` first; repeated calls with the same state
    /// produce identical results
    pub fn calc_and_assemble(
        &mut self,
        state: &FemState,
        kk: &mut Matrix,
        rr: &mut Vector,
    ) -> Result<(), StrError> {
        kk.fill(0.0);
        rr.fill(0.0);
        let ctan = if self.config.transient {
            (1.0, 1.0 / state.dt)
        } else {
            (1.0, 0.0)
        };
        for element in &mut self.all {
            element.calc(state, ctan)?;
            let l2g = element.local_to_global();
            let local_rr = element.residual();
            let local_kk = element.jacobian();
            for (i, gi) in l2g.iter().enumerate() {
                rr[*gi] += local_rr[i];
                for (j, gj) in l2g.iter().enumerate() {
                    kk.set(*gi, *gj, kk.get(*gi, *gj) + local_kk.get(i, j));
                }
            }
        }
        Ok(())
    }

    /// Recovers secondary values (e.g. stresses) at the mesh nodes
    pub fn projection(&mut self, state: &FemState) -> Result<NodalProjection, StrError> {
        if self.n_proj_values == 0 {
            return Err("nodal projection is not available for this physics");
        }
        let mut proj = NodalProjection::new(self.nnode, self.n_proj_values);
        for element in &mut self.all {
            let nodes = element.nodes().clone();
            if let Some((weights, values)) = element.projection(state)? {
                proj.add(&nodes, weights, values);
            }
        }
        proj.finalize()?;
        Ok(proj)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Elements;
    use crate::base::{Config, Elem, ParamDiffusion};
    use crate::fem::{Equations, FemState};
    use crate::mesh::Mesh;
    use crate::shapes::GeoKind;
    use crate::StrError;
    use russell_lab::{mat_approx_eq, vec_approx_eq, Matrix, Vector};

    #[test]
    fn assembly_is_additive_and_idempotent() -> Result<(), StrError> {
        // the stiffness of two elements merged at a node must equal the
        // sum of the single-element stiffnesses placed in the global frame
        let mesh = Mesh::structured_1d(2, 0.0, 2.0, GeoKind::Lin2)?;
        let elem = Elem::Diffusion(ParamDiffusion {
            conductivity: 3.0,
            source: None,
        });
        let equations = Equations::new(&mesh, &elem);
        let config = Config::new();
        let mut elements = Elements::new(&mesh, &elem, &config, &equations)?;
        let mut state = FemState::new(&equations, &config)?;
        state.uu[0] = 1.0;
        state.uu[1] = 2.0;
        state.uu[2] = 4.0;

        let neq = equations.n_equation;
        let mut kk = Matrix::new(neq, neq);
        let mut rr = Vector::new(neq);
        elements.calc_and_assemble(&state, &mut kk, &mut rr)?;

        // steady diffusion of a lin2 element: K = -(κ/L) [[1,-1],[-1,1]]
        let k = 3.0;
        #[rustfmt::skip]
        let kk_correct = Matrix::from(&[
            [-k,       k,      0.0],
            [ k, -2.0 * k,       k],
            [0.0,      k,       -k],
        ]);
        mat_approx_eq(&kk, &kk_correct, 1e-12);

        // R = κ ∫ ∇T ∇N: first element ∇T = 1, second ∇T = 2
        vec_approx_eq(&rr, &[-3.0, 3.0 - 6.0, 6.0], 1e-12);

        // identical inputs give bit-identical outputs
        let mut kk2 = Matrix::new(neq, neq);
        let mut rr2 = Vector::new(neq);
        elements.calc_and_assemble(&state, &mut kk2, &mut rr2)?;
        assert_eq!(kk.as_data(), kk2.as_data());
        assert_eq!(rr.as_data(), rr2.as_data());
        Ok(())
    }

    #[test]
    fn projection_unavailable_is_caught() -> Result<(), StrError> {
        let mesh = Mesh::structured_1d(2, 0.0, 1.0, GeoKind::Lin2)?;
        let elem = Elem::Diffusion(ParamDiffusion::sample());
        let equations = Equations::new(&mesh, &elem);
        let config = Config::new();
        let mut elements = Elements::new(&mesh, &elem, &config, &equations)?;
        let state = FemState::new(&equations, &config)?;
        assert_eq!(
            elements.projection(&state).err(),
            Some("nodal projection is not available for this physics")
        );
        Ok(())
    }
}
