use crate::base::{Dof, Elem};
use crate::mesh::Mesh;
use crate::StrError;

/// Maps (node, dof) pairs to global equation numbers
///
/// The layout is node-major: all dofs of node 0, then all dofs of
/// node 1, and so on. Every node carries the same dofs (single-physics
/// meshes), thus `eq = ndof_per_node · node + offset(dof)`
pub struct Equations {
    /// Degrees-of-freedom carried by every node
    pub dofs: Vec<Dof>,

    /// Number of nodes in the mesh
    pub nnode: usize,

    /// Total number of equations
    pub n_equation: usize,
}

impl Equations {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, elem: &Elem) -> Self {
        let dofs = elem.dofs().to_vec();
        let nnode = mesh.nnode();
        let n_equation = nnode * dofs.len();
        Equations {
            dofs,
            nnode,
            n_equation,
        }
    }

    /// Returns the number of dofs per node
    pub fn ndof_per_node(&self) -> usize {
        self.dofs.len()
    }

    /// Returns the global equation number of (node, dof)
    pub fn eq(&self, node: usize, dof: Dof) -> Result<usize, StrError> {
        if node >= self.nnode {
            return Err("cannot find equation number because the node is out-of-bounds");
        }
        match self.dofs.iter().position(|d| *d == dof) {
            Some(offset) => Ok(node * self.dofs.len() + offset),
            None => Err("dof is not available for this problem"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Equations;
    use crate::base::{Dof, Elem, ParamDiffusion, ParamThermoMech};
    use crate::mesh::Mesh;
    use crate::shapes::GeoKind;
    use crate::StrError;

    #[test]
    fn eq_works() -> Result<(), StrError> {
        let mesh = Mesh::structured_1d(2, 0.0, 1.0, GeoKind::Lin2)?;
        let eqs = Equations::new(&mesh, &Elem::Diffusion(ParamDiffusion::sample()));
        assert_eq!(eqs.ndof_per_node(), 1);
        assert_eq!(eqs.n_equation, 3);
        assert_eq!(eqs.eq(2, Dof::T)?, 2);
        assert_eq!(eqs.eq(0, Dof::Ux).err(), Some("dof is not available for this problem"));
        assert_eq!(
            eqs.eq(3, Dof::T).err(),
            Some("cannot find equation number because the node is out-of-bounds")
        );

        let mesh = Mesh::structured_2d(1, 1, 0.0, 1.0, 0.0, 1.0, GeoKind::Qua4)?;
        let eqs = Equations::new(&mesh, &Elem::ThermoMech(ParamThermoMech::sample()));
        assert_eq!(eqs.ndof_per_node(), 3);
        assert_eq!(eqs.n_equation, 12);
        assert_eq!(eqs.eq(1, Dof::Ux)?, 3);
        assert_eq!(eqs.eq(1, Dof::Uy)?, 4);
        assert_eq!(eqs.eq(1, Dof::T)?, 5);
        Ok(())
    }
}
