use crate::base::Side;
use crate::shapes::GeoKind;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Holds a structured mesh of line or quadrilateral elements
///
/// All connectivities are zero-based. Boundary edges are derived at build
/// time from the perimeter elements; in 1D the Left and Right "edges" hold
/// a single end node each
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mesh {
    /// Space dimension (1 or 2)
    pub ndim: usize,

    /// Kind of all elements (single-kind meshes)
    pub kind: GeoKind,

    /// Coordinates of all nodes (y = 0 for 1D)
    pub coords: Vec<[f64; 2]>,

    /// Element connectivities (nelem, nnode_per_elem)
    pub conn: Vec<Vec<usize>>,

    /// Boundary edge connectivities per side
    pub edges: HashMap<Side, Vec<Vec<usize>>>,
}

impl Mesh {
    /// Generates a uniform 1D mesh over [xmin, xmax]
    pub fn structured_1d(ne: usize, xmin: f64, xmax: f64, kind: GeoKind) -> Result<Self, StrError> {
        if kind.geo_ndim() != 1 {
            return Err("mesh: 1D generation requires a line kind");
        }
        if ne < 1 {
            return Err("mesh: ne must be ≥ 1");
        }
        if xmin >= xmax {
            return Err("mesh: xmin must be < xmax");
        }
        let p = kind.order();
        let nnode = ne * p + 1;
        let dx = (xmax - xmin) / ((nnode - 1) as f64);
        let coords: Vec<_> = (0..nnode).map(|i| [xmin + (i as f64) * dx, 0.0]).collect();
        let conn: Vec<Vec<usize>> = (0..ne).map(|e| (0..=p).map(|j| e * p + j).collect()).collect();
        let mut edges = HashMap::new();
        edges.insert(Side::Left, vec![vec![0]]);
        edges.insert(Side::Right, vec![vec![nnode - 1]]);
        Ok(Mesh {
            ndim: 1,
            kind,
            coords,
            conn,
            edges,
        })
    }

    /// Generates a uniform 2D mesh over [xmin, xmax] × [ymin, ymax]
    pub fn structured_2d(
        nx: usize,
        ny: usize,
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        kind: GeoKind,
    ) -> Result<Self, StrError> {
        if kind.geo_ndim() != 2 {
            return Err("mesh: 2D generation requires a quadrilateral kind");
        }
        if nx < 1 || ny < 1 {
            return Err("mesh: nx and ny must be ≥ 1");
        }
        if xmin >= xmax || ymin >= ymax {
            return Err("mesh: xmin must be < xmax and ymin must be < ymax");
        }
        let dx = (xmax - xmin) / (nx as f64);
        let dy = (ymax - ymin) / (ny as f64);

        // node coordinates
        let mut coords = Vec::new();
        match kind {
            GeoKind::Qua4 => {
                for j in 0..=ny {
                    for i in 0..=nx {
                        coords.push([xmin + (i as f64) * dx, ymin + (j as f64) * dy]);
                    }
                }
            }
            GeoKind::Qua8 => {
                // corner rows carry the mid-side nodes; in-between rows only corners
                for j2 in 0..=(2 * ny) {
                    let y = ymin + (j2 as f64) * dy / 2.0;
                    if j2 % 2 == 0 {
                        for i2 in 0..=(2 * nx) {
                            coords.push([xmin + (i2 as f64) * dx / 2.0, y]);
                        }
                    } else {
                        for i in 0..=nx {
                            coords.push([xmin + (i as f64) * dx, y]);
                        }
                    }
                }
            }
            GeoKind::Qua9 => {
                for j2 in 0..=(2 * ny) {
                    for i2 in 0..=(2 * nx) {
                        coords.push([xmin + (i2 as f64) * dx / 2.0, ymin + (j2 as f64) * dy / 2.0]);
                    }
                }
            }
            _ => unreachable!(),
        }

        // connectivity
        let mut conn = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let cell: Vec<usize> = match kind {
                    GeoKind::Qua4 => {
                        let n0 = j * (nx + 1) + i;
                        vec![n0, n0 + 1, n0 + nx + 2, n0 + nx + 1]
                    }
                    GeoKind::Qua8 => {
                        let stride = 3 * nx + 2;
                        let n0 = j * stride + 2 * i;
                        let n1 = n0 + 2;
                        let n2 = n1 + stride;
                        let n3 = n2 - 2;
                        let n4 = n0 + 1;
                        let n5 = n1 + 2 * nx - i;
                        let n6 = n2 - 1;
                        let n7 = n0 + 2 * nx + 1 - i;
                        vec![n0, n1, n2, n3, n4, n5, n6, n7]
                    }
                    GeoKind::Qua9 => {
                        let nnx = 2 * nx + 1;
                        let n0 = 2 * j * nnx + 2 * i;
                        let n1 = n0 + 2;
                        let n2 = n1 + 2 * nnx;
                        let n3 = n2 - 2;
                        vec![n0, n1, n2, n3, n0 + 1, n1 + nnx, n2 - 1, n0 + nnx, n0 + nnx + 1]
                    }
                    _ => unreachable!(),
                };
                conn.push(cell);
            }
        }

        // boundary edges from the perimeter elements
        let mut edges: HashMap<Side, Vec<Vec<usize>>> = HashMap::new();
        let edge_of = |cell: &Vec<usize>, side: Side| -> Vec<usize> {
            match (kind, side) {
                (GeoKind::Qua4, Side::Bottom) => vec![cell[0], cell[1]],
                (GeoKind::Qua4, Side::Right) => vec![cell[1], cell[2]],
                (GeoKind::Qua4, Side::Top) => vec![cell[2], cell[3]],
                (GeoKind::Qua4, Side::Left) => vec![cell[3], cell[0]],
                (_, Side::Bottom) => vec![cell[0], cell[4], cell[1]],
                (_, Side::Right) => vec![cell[1], cell[5], cell[2]],
                (_, Side::Top) => vec![cell[2], cell[6], cell[3]],
                (_, Side::Left) => vec![cell[3], cell[7], cell[0]],
            }
        };
        edges.insert(Side::Bottom, (0..nx).map(|i| edge_of(&conn[i], Side::Bottom)).collect());
        edges.insert(
            Side::Top,
            (0..nx).map(|i| edge_of(&conn[(ny - 1) * nx + i], Side::Top)).collect(),
        );
        edges.insert(Side::Left, (0..ny).map(|j| edge_of(&conn[j * nx], Side::Left)).collect());
        edges.insert(
            Side::Right,
            (0..ny).map(|j| edge_of(&conn[j * nx + nx - 1], Side::Right)).collect(),
        );

        Ok(Mesh {
            ndim: 2,
            kind,
            coords,
            conn,
            edges,
        })
    }

    /// Returns the boundary edge connectivities of a side
    pub fn boundary(&self, side: Side) -> Result<&Vec<Vec<usize>>, StrError> {
        match self.edges.get(&side) {
            Some(e) => Ok(e),
            None => Err("mesh: 1D meshes only have the Left and Right sides"),
        }
    }

    /// Returns the number of nodes
    pub fn nnode(&self) -> usize {
        self.coords.len()
    }

    /// Returns the number of elements
    pub fn nelem(&self) -> usize {
        self.conn.len()
    }

    /// Copies the coordinates of the given nodes into a scratchpad
    pub fn set_pad_coords(&self, pad: &mut crate::shapes::Scratchpad, nodes: &[usize]) -> Result<(), StrError> {
        for (m, node) in nodes.iter().enumerate() {
            if *node >= self.coords.len() {
                return Err("mesh: node is out-of-bounds");
            }
            pad.set_node_coords(m, &self.coords[*node][0..pad.space_ndim])?;
        }
        Ok(())
    }
}

impl fmt::Display for Mesh {
    /// Prints a summary of the mesh
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mesh summary\n").unwrap();
        write!(f, "============\n").unwrap();
        write!(f, "ndim = {}\n", self.ndim).unwrap();
        write!(f, "kind = {:?}\n", self.kind).unwrap();
        write!(f, "nnode = {}\n", self.nnode()).unwrap();
        write!(f, "nelem = {}\n", self.nelem()).unwrap();
        let mut sides: Vec<_> = self.edges.keys().collect();
        sides.sort();
        for side in sides {
            write!(f, "{:?} edges = {}\n", side, self.edges.get(side).unwrap().len()).unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
