use super::{Equations, FemState};
use crate::base::Dof;
use crate::StrError;
use russell_lab::Vector;

/// Extracts the nodal values of one dof, ordered by node number
pub fn nodal_values(state: &FemState, equations: &Equations, dof: Dof) -> Result<Vector, StrError> {
    let mut values = Vector::new(equations.nnode);
    for node in 0..equations.nnode {
        values[node] = state.uu[equations.eq(node, dof)?];
    }
    Ok(values)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
