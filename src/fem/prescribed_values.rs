use super::Equations;
use crate::base::Essential;
use crate::mesh::Mesh;
use crate::{FnTime, StrError};
use russell_lab::{Matrix, Vector};

/// Penalty factor placed on the diagonal of constrained equations
pub const PENALTY: f64 = 1e16;

/// Holds the prescribed (Dirichlet) values and the penalty apparatus
///
/// The constrained equations keep their rows and columns; the diagonal
/// entry receives a large penalty and the residual entry is zeroed so
/// that the Newton-Raphson correction vanishes there
pub struct PrescribedValues {
    /// (equation, value function) pairs, sorted by equation number
    pub entries: Vec<(usize, FnTime)>,

    /// Flags the prescribed equations
    pub flags: Vec<bool>,
}

impl PrescribedValues {
    /// Allocates a new instance by resolving sides to equation numbers
    pub fn new(mesh: &Mesh, equations: &Equations, essential: &Essential) -> Result<Self, StrError> {
        let mut entries = Vec::new();
        let mut flags = vec![false; equations.n_equation];
        let mut keys: Vec<_> = essential.all.keys().copied().collect();
        keys.sort();
        for (side, dof) in keys {
            let f = essential.all.get(&(side, dof)).unwrap();
            for edge in mesh.boundary(side)? {
                for node in edge {
                    let eq = equations.eq(*node, dof)?;
                    if !flags[eq] {
                        flags[eq] = true;
                        entries.push((eq, *f));
                    }
                }
            }
        }
        entries.sort_by_key(|(eq, _)| *eq);
        Ok(PrescribedValues { entries, flags })
    }

    /// Writes the prescribed values into the solution vector at time t
    pub fn apply_values(&self, uu: &mut Vector, t: f64) {
        for (eq, f) in &self.entries {
            uu[*eq] = f(t);
        }
    }

    /// Penalizes the constrained equations in the global system
    pub fn penalize(&self, kk: &mut Matrix, rr: &mut Vector) {
        for (eq, _) in &self.entries {
            kk.set(*eq, *eq, PENALTY);
            rr[*eq] = 0.0;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
