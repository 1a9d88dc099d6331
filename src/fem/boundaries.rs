use super::{Equations, FemState};
use crate::base::{Config, Natural, Nbc};
use crate::integ::gauss_legendre_1d;
use crate::mesh::Mesh;
use crate::shapes::Scratchpad;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Holds one boundary edge with a natural condition attached
///
/// In 1D the "edge" degenerates to a single endpoint and the condition
/// is applied pointwise without integration
struct BoundaryEdge {
    nbc: Nbc,
    local_to_global: Vec<usize>,
    pad: Option<Scratchpad>,
    ips: Vec<[f64; 2]>,
    residual: Vector,
    jacobian: Matrix,
    uu_local: Vector,
}

/// Implements the natural (Robin and flux) boundary conditions
///
/// The edge contributions are ADDED to the global system; the caller
/// must assemble the bulk elements first
pub struct Boundaries {
    all: Vec<BoundaryEdge>,
}

impl Boundaries {
    /// Allocates a new instance by resolving sides to boundary edges
    pub fn new(
        mesh: &Mesh,
        config: &Config,
        equations: &Equations,
        natural: &Natural,
    ) -> Result<Self, StrError> {
        let mut all = Vec::new();
        for (side, nbc) in &natural.all {
            let dof = nbc.dof();
            for edge_nodes in mesh.boundary(*side)? {
                let mut local_to_global = Vec::with_capacity(edge_nodes.len());
                for node in edge_nodes {
                    local_to_global.push(equations.eq(*node, dof)?);
                }
                let nnode = edge_nodes.len();
                let (pad, ips) = if mesh.ndim == 1 {
                    (None, Vec::new())
                } else {
                    let kind = match mesh.kind.edge_kind() {
                        Some(k) => k,
                        None => return Err("mesh kind has no boundary edges"),
                    };
                    let mut pad = Scratchpad::new(2, kind)?;
                    mesh.set_pad_coords(&mut pad, edge_nodes)?;
                    let n = match config.n_integ_point {
                        Some(n) => n,
                        None => kind.order() + 1,
                    };
                    (Some(pad), gauss_legendre_1d(n)?)
                };
                all.push(BoundaryEdge {
                    nbc: *nbc,
                    local_to_global,
                    pad,
                    ips,
                    residual: Vector::new(nnode),
                    jacobian: Matrix::new(nnode, nnode),
                    uu_local: Vector::new(nnode),
                });
            }
        }
        Ok(Boundaries { all })
    }

    /// Computes the edge contributions and adds them to the global system
    pub fn calc_and_assemble(
        &mut self,
        state: &FemState,
        kk: &mut Matrix,
        rr: &mut Vector,
    ) -> Result<(), StrError> {
        for edge in &mut self.all {
            let nnode = edge.local_to_global.len();
            for (i, eq) in edge.local_to_global.iter().enumerate() {
                edge.uu_local[i] = state.uu[*eq];
            }
            edge.residual.fill(0.0);
            edge.jacobian.fill(0.0);
            match &mut edge.pad {
                None => {
                    // pointwise condition at a 1D endpoint
                    match edge.nbc {
                        Nbc::Robin { target, .. } => {
                            edge.residual[0] = -(edge.uu_local[0] - target);
                            edge.jacobian.set(0, 0, 1.0);
                        }
                        Nbc::Flux { value, .. } => {
                            edge.residual[0] = value;
                        }
                    }
                }
                Some(pad) => {
                    for ip in &edge.ips {
                        let det = pad.calc_edge_det_jac(&[ip[1]])?;
                        let jxw = det * ip[0];
                        let mut u = 0.0;
                        for a in 0..nnode {
                            u += pad.interp[a] * edge.uu_local[a];
                        }
                        match edge.nbc {
                            Nbc::Robin { target, .. } => {
                                for a in 0..nnode {
                                    let na = pad.interp[a];
                                    edge.residual[a] += -(u - target) * na * jxw;
                                    for b in 0..nnode {
                                        let k = na * pad.interp[b] * jxw;
                                        edge.jacobian.set(a, b, edge.jacobian.get(a, b) + k);
                                    }
                                }
                            }
                            Nbc::Flux { value, .. } => {
                                for a in 0..nnode {
                                    edge.residual[a] += value * pad.interp[a] * jxw;
                                }
                            }
                        }
                    }
                }
            }
            for (i, p) in edge.local_to_global.iter().enumerate() {
                rr[*p] += edge.residual[i];
                for (j, q) in edge.local_to_global.iter().enumerate() {
                    kk.set(*p, *q, kk.get(*p, *q) + edge.jacobian.get(i, j));
                }
            }
        }
        Ok(())
    }

    /// Returns the number of boundary edges with conditions attached
    pub fn len(&self) -> usize {
        self.all.len()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
