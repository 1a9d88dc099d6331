use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Holds secondary values recovered at the mesh nodes
///
/// Element kernels accumulate Gauss-point values weighted by the
/// interpolation functions times |det(J)|; [NodalProjection::finalize]
/// divides by the accumulated weights to obtain the nodal values
pub struct NodalProjection {
    /// Accumulated weights per node (nnode)
    pub weight: Vector,

    /// Accumulated (then normalized) values per node (nnode, n_value)
    pub values: Matrix,

    finalized: bool,
}

impl NodalProjection {
    /// Allocates a new instance
    pub fn new(nnode: usize, n_value: usize) -> Self {
        NodalProjection {
            weight: Vector::new(nnode),
            values: Matrix::new(nnode, n_value),
            finalized: false,
        }
    }

    /// Adds the contribution of one element
    ///
    /// `weights` and `values` are local arrays ordered like `nodes`
    pub fn add(&mut self, nodes: &[usize], weights: &Vector, values: &Matrix) {
        let (_, n_value) = self.values.dims();
        for (a, node) in nodes.iter().enumerate() {
            self.weight[*node] += weights[a];
            for j in 0..n_value {
                self.values.set(*node, j, self.values.get(*node, j) + values.get(a, j));
            }
        }
    }

    /// Divides the accumulated values by the accumulated weights
    pub fn finalize(&mut self) -> Result<(), StrError> {
        if self.finalized {
            return Err("projection has already been finalized");
        }
        let (nnode, n_value) = self.values.dims();
        for node in 0..nnode {
            let w = self.weight[node];
            if w.abs() < 1e-14 {
                return Err("projection: node has zero weight");
            }
            for j in 0..n_value {
                self.values.set(node, j, self.values.get(node, j) / w);
            }
        }
        self.finalized = true;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
