use super::GeoKind;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Tolerance to detect a singular Jacobian
pub const DET_JAC_TOL: f64 = 1e-12;

/// Holds the workspace to evaluate interpolation functions and gradients
///
/// The pad stores the (transposed) node coordinates and the results of the
/// last evaluation: interpolation functions N, natural derivatives dN/dξ,
/// and, after [Scratchpad::calc_gradient], physical gradients dN/dx
pub struct Scratchpad {
    /// Geometry kind
    pub kind: GeoKind,

    /// Dimension of the physical space (1 or 2)
    pub space_ndim: usize,

    /// Node coordinates (nnode, space_ndim)
    pub coords: Matrix,

    /// Interpolation functions N evaluated at the last natural point (nnode)
    pub interp: Vector,

    /// Natural derivatives dN/dξ (nnode, geo_ndim)
    pub deriv: Matrix,

    /// Physical gradients dN/dx (nnode, space_ndim)
    pub gradient: Matrix,
}

impl Scratchpad {
    /// Allocates a new instance
    ///
    /// `space_ndim` must be 1 or 2 and cannot be smaller than the
    /// dimension of the reference space of `kind`
    pub fn new(space_ndim: usize, kind: GeoKind) -> Result<Self, StrError> {
        if space_ndim < 1 || space_ndim > 2 {
            return Err("space_ndim must be 1 or 2");
        }
        if space_ndim < kind.geo_ndim() {
            return Err("space_ndim must be ≥ geo_ndim");
        }
        let nnode = kind.nnode();
        Ok(Scratchpad {
            kind,
            space_ndim,
            coords: Matrix::new(nnode, space_ndim),
            interp: Vector::new(nnode),
            deriv: Matrix::new(nnode, kind.geo_ndim()),
            gradient: Matrix::new(nnode, space_ndim),
        })
    }

    /// Sets the coordinates of node m
    pub fn set_node_coords(&mut self, m: usize, x: &[f64]) -> Result<(), StrError> {
        if m >= self.kind.nnode() {
            return Err("node index is out of bounds");
        }
        if x.len() != self.space_ndim {
            return Err("slice length must equal space_ndim");
        }
        for i in 0..self.space_ndim {
            self.coords.set(m, i, x[i]);
        }
        Ok(())
    }

    /// Evaluates N and dN/dξ at the natural coordinates ξ (and η in 2D)
    pub fn calc_interp_deriv(&mut self, ksi: &[f64]) {
        match self.kind {
            GeoKind::Lin2 => self.lin2(ksi[0]),
            GeoKind::Lin3 => self.lin3(ksi[0]),
            GeoKind::Lin4 => self.lin4(ksi[0]),
            GeoKind::Qua4 => self.qua4(ksi[0], ksi[1]),
            GeoKind::Qua8 => self.qua8(ksi[0], ksi[1]),
            GeoKind::Qua9 => self.qua9(ksi[0], ksi[1]),
        }
    }

    /// Evaluates N, dN/dξ, and the physical gradients dN/dx; returns |det(J)|
    ///
    /// Only available when the reference space and the physical space have
    /// the same dimension (bulk elements)
    pub fn calc_gradient(&mut self, ksi: &[f64]) -> Result<f64, StrError> {
        let geo_ndim = self.kind.geo_ndim();
        if geo_ndim != self.space_ndim {
            return Err("calc_gradient requires geo_ndim = space_ndim");
        }
        self.calc_interp_deriv(ksi);
        let nnode = self.kind.nnode();
        if geo_ndim == 1 {
            let mut dx_dksi = 0.0;
            for m in 0..nnode {
                dx_dksi += self.deriv.get(m, 0) * self.coords.get(m, 0);
            }
            if dx_dksi.abs() < DET_JAC_TOL {
                return Err("singular element: cannot invert the Jacobian");
            }
            for m in 0..nnode {
                self.gradient.set(m, 0, self.deriv.get(m, 0) / dx_dksi);
            }
            return Ok(dx_dksi.abs());
        }
        // J[j][i] = Σ_m dNm/dξj · x[m][i]
        let (mut jj00, mut jj01, mut jj10, mut jj11) = (0.0, 0.0, 0.0, 0.0);
        for m in 0..nnode {
            jj00 += self.deriv.get(m, 0) * self.coords.get(m, 0);
            jj01 += self.deriv.get(m, 0) * self.coords.get(m, 1);
            jj10 += self.deriv.get(m, 1) * self.coords.get(m, 0);
            jj11 += self.deriv.get(m, 1) * self.coords.get(m, 1);
        }
        let det = jj00 * jj11 - jj01 * jj10;
        if det.abs() < DET_JAC_TOL {
            return Err("singular element: cannot invert the Jacobian");
        }
        // dN/dx = J⁻¹ dN/dξ
        for m in 0..nnode {
            let (d0, d1) = (self.deriv.get(m, 0), self.deriv.get(m, 1));
            self.gradient.set(m, 0, (jj11 * d0 - jj01 * d1) / det);
            self.gradient.set(m, 1, (-jj10 * d0 + jj00 * d1) / det);
        }
        Ok(det.abs())
    }

    /// Evaluates N on a boundary edge and returns the arc-length Jacobian
    ///
    /// Available for 1D kinds embedded in the 2D space; no gradients
    /// are produced (enough for surface integrals)
    pub fn calc_edge_det_jac(&mut self, ksi: &[f64]) -> Result<f64, StrError> {
        if self.kind.geo_ndim() != 1 || self.space_ndim != 2 {
            return Err("calc_edge_det_jac requires a line kind in the 2D space");
        }
        self.calc_interp_deriv(ksi);
        let nnode = self.kind.nnode();
        let (mut dx_dksi, mut dy_dksi) = (0.0, 0.0);
        for m in 0..nnode {
            dx_dksi += self.deriv.get(m, 0) * self.coords.get(m, 0);
            dy_dksi += self.deriv.get(m, 0) * self.coords.get(m, 1);
        }
        let det = f64::sqrt(dx_dksi * dx_dksi + dy_dksi * dy_dksi);
        if det < DET_JAC_TOL {
            return Err("singular element: edge has zero length");
        }
        Ok(det)
    }

    fn lin2(&mut self, ksi: f64) {
        self.interp[0] = 0.5 * (1.0 - ksi);
        self.interp[1] = 0.5 * (1.0 + ksi);
        self.deriv.set(0, 0, -0.5);
        self.deriv.set(1, 0, 0.5);
    }

    fn lin3(&mut self, ksi: f64) {
        self.interp[0] = 0.5 * ksi * (ksi - 1.0);
        self.interp[1] = -(ksi + 1.0) * (ksi - 1.0);
        self.interp[2] = 0.5 * ksi * (ksi + 1.0);
        self.deriv.set(0, 0, ksi - 0.5);
        self.deriv.set(1, 0, -2.0 * ksi);
        self.deriv.set(2, 0, ksi + 0.5);
    }

    fn lin4(&mut self, ksi: f64) {
        self.interp[0] = -(3.0 * ksi + 1.0) * (3.0 * ksi - 1.0) * (ksi - 1.0) / 16.0;
        self.interp[1] = (3.0 * ksi + 3.0) * (3.0 * ksi - 1.0) * (3.0 * ksi - 3.0) / 16.0;
        self.interp[2] = -(3.0 * ksi + 3.0) * (3.0 * ksi + 1.0) * (3.0 * ksi - 3.0) / 16.0;
        self.interp[3] = (ksi + 1.0) * (3.0 * ksi + 1.0) * (3.0 * ksi - 1.0) / 16.0;
        self.deriv.set(0, 0, (-27.0 * ksi * ksi + 18.0 * ksi + 1.0) / 16.0);
        self.deriv.set(1, 0, (81.0 * ksi * ksi - 18.0 * ksi - 27.0) / 16.0);
        self.deriv.set(2, 0, (-81.0 * ksi * ksi - 18.0 * ksi + 27.0) / 16.0);
        self.deriv.set(3, 0, (27.0 * ksi * ksi + 18.0 * ksi - 1.0) / 16.0);
    }

    fn qua4(&mut self, ksi: f64, eta: f64) {
        const KSI: [f64; 4] = [-1.0, 1.0, 1.0, -1.0];
        const ETA: [f64; 4] = [-1.0, -1.0, 1.0, 1.0];
        for m in 0..4 {
            self.interp[m] = 0.25 * (1.0 + ksi * KSI[m]) * (1.0 + eta * ETA[m]);
            self.deriv.set(m, 0, 0.25 * KSI[m] * (1.0 + eta * ETA[m]));
            self.deriv.set(m, 1, 0.25 * ETA[m] * (1.0 + ksi * KSI[m]));
        }
    }

    fn qua8(&mut self, ksi: f64, eta: f64) {
        const KSI: [f64; 4] = [-1.0, 1.0, 1.0, -1.0];
        const ETA: [f64; 4] = [-1.0, -1.0, 1.0, 1.0];
        // corners
        for m in 0..4 {
            let (a, b) = (ksi * KSI[m], eta * ETA[m]);
            self.interp[m] = 0.25 * (1.0 + a) * (1.0 + b) * (a + b - 1.0);
            self.deriv.set(m, 0, 0.25 * KSI[m] * (1.0 + b) * (2.0 * a + b));
            self.deriv.set(m, 1, 0.25 * ETA[m] * (1.0 + a) * (2.0 * b + a));
        }
        // mid-side nodes
        self.interp[4] = 0.5 * (1.0 - ksi * ksi) * (1.0 - eta);
        self.deriv.set(4, 0, -ksi * (1.0 - eta));
        self.deriv.set(4, 1, -0.5 * (1.0 - ksi * ksi));

        self.interp[5] = 0.5 * (1.0 + ksi) * (1.0 - eta * eta);
        self.deriv.set(5, 0, 0.5 * (1.0 - eta * eta));
        self.deriv.set(5, 1, -eta * (1.0 + ksi));

        self.interp[6] = 0.5 * (1.0 - ksi * ksi) * (1.0 + eta);
        self.deriv.set(6, 0, -ksi * (1.0 + eta));
        self.deriv.set(6, 1, 0.5 * (1.0 - ksi * ksi));

        self.interp[7] = 0.5 * (1.0 - ksi) * (1.0 - eta * eta);
        self.deriv.set(7, 0, -0.5 * (1.0 - eta * eta));
        self.deriv.set(7, 1, -eta * (1.0 - ksi));
    }

    fn qua9(&mut self, ksi: f64, eta: f64) {
        // products of the three 1D quadratic Lagrange polynomials
        let l = |s: f64| [0.5 * s * (s - 1.0), 1.0 - s * s, 0.5 * s * (s + 1.0)];
        let dl = |s: f64| [s - 0.5, -2.0 * s, s + 0.5];
        let (lk, le) = (l(ksi), l(eta));
        let (dk, de) = (dl(ksi), dl(eta));
        // (ξ-index, η-index) per node
        const IJ: [(usize, usize); 9] = [
            (0, 0),
            (2, 0),
            (2, 2),
            (0, 2),
            (1, 0),
            (2, 1),
            (1, 2),
            (0, 1),
            (1, 1),
        ];
        for m in 0..9 {
            let (i, j) = IJ[m];
            self.interp[m] = lk[i] * le[j];
            self.deriv.set(m, 0, dk[i] * le[j]);
            self.deriv.set(m, 1, lk[i] * de[j]);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Scratchpad;
    use crate::shapes::GeoKind;
    use crate::StrError;
    use russell_lab::approx_eq;

    // natural coordinates of the nodes of each kind
    fn node_ksi(kind: GeoKind) -> Vec<Vec<f64>> {
        match kind {
            GeoKind::Lin2 => vec![vec![-1.0], vec![1.0]],
            GeoKind::Lin3 => vec![vec![-1.0], vec![0.0], vec![1.0]],
            GeoKind::Lin4 => vec![vec![-1.0], vec![-1.0 / 3.0], vec![1.0 / 3.0], vec![1.0]],
            GeoKind::Qua4 => vec![
                vec![-1.0, -1.0],
                vec![1.0, -1.0],
                vec![1.0, 1.0],
                vec![-1.0, 1.0],
            ],
            GeoKind::Qua8 | GeoKind::Qua9 => {
                let mut ksi = vec![
                    vec![-1.0, -1.0],
                    vec![1.0, -1.0],
                    vec![1.0, 1.0],
                    vec![-1.0, 1.0],
                    vec![0.0, -1.0],
                    vec![1.0, 0.0],
                    vec![0.0, 1.0],
                    vec![-1.0, 0.0],
                ];
                if kind == GeoKind::Qua9 {
                    ksi.push(vec![0.0, 0.0]);
                }
                ksi
            }
        }
    }

    #[test]
    fn new_handles_errors() {
        assert_eq!(
            Scratchpad::new(3, GeoKind::Qua4).err(),
            Some("space_ndim must be 1 or 2")
        );
        assert_eq!(
            Scratchpad::new(1, GeoKind::Qua4).err(),
            Some("space_ndim must be ≥ geo_ndim")
        );
        let mut pad = Scratchpad::new(1, GeoKind::Lin2).unwrap();
        assert_eq!(
            pad.set_node_coords(2, &[0.0]).err(),
            Some("node index is out of bounds")
        );
        assert_eq!(
            pad.set_node_coords(0, &[0.0, 0.0]).err(),
            Some("slice length must equal space_ndim")
        );
    }

    #[test]
    fn interp_is_kronecker_delta_at_nodes() {
        let all = [
            GeoKind::Lin2,
            GeoKind::Lin3,
            GeoKind::Lin4,
            GeoKind::Qua4,
            GeoKind::Qua8,
            GeoKind::Qua9,
        ];
        for kind in all {
            let mut pad = Scratchpad::new(kind.geo_ndim(), kind).unwrap();
            let nodes = node_ksi(kind);
            for (n, ksi) in nodes.iter().enumerate() {
                pad.calc_interp_deriv(ksi);
                for m in 0..kind.nnode() {
                    let correct = if m == n { 1.0 } else { 0.0 };
                    approx_eq(pad.interp[m], correct, 1e-14);
                }
            }
        }
    }

    #[test]
    fn partition_of_unity_holds() {
        let all = [
            GeoKind::Lin2,
            GeoKind::Lin3,
            GeoKind::Lin4,
            GeoKind::Qua4,
            GeoKind::Qua8,
            GeoKind::Qua9,
        ];
        let samples_1d = [[-0.79], [0.13], [0.62]];
        let samples_2d = [[-0.79, 0.33], [0.13, -0.55], [0.62, 0.9]];
        for kind in all {
            let mut pad = Scratchpad::new(kind.geo_ndim(), kind).unwrap();
            let geo_ndim = kind.geo_ndim();
            for s in 0..3 {
                let ksi: &[f64] = if geo_ndim == 1 { &samples_1d[s] } else { &samples_2d[s] };
                pad.calc_interp_deriv(ksi);
                let mut sum_n = 0.0;
                let mut sum_d = vec![0.0; geo_ndim];
                for m in 0..kind.nnode() {
                    sum_n += pad.interp[m];
                    for j in 0..geo_ndim {
                        sum_d[j] += pad.deriv.get(m, j);
                    }
                }
                approx_eq(sum_n, 1.0, 1e-14);
                for j in 0..geo_ndim {
                    approx_eq(sum_d[j], 0.0, 1e-14);
                }
            }
        }
    }

    #[test]
    fn det_jac_works_lin2() -> Result<(), StrError> {
        // element of length L has |det(J)| = L/2
        let mut pad = Scratchpad::new(1, GeoKind::Lin2)?;
        pad.set_node_coords(0, &[3.0])?;
        pad.set_node_coords(1, &[3.0 + 0.25])?;
        let det = pad.calc_gradient(&[0.3])?;
        approx_eq(det, 0.125, 1e-15);
        // dN/dx of a linear element is ±1/L
        approx_eq(pad.gradient.get(0, 0), -4.0, 1e-13);
        approx_eq(pad.gradient.get(1, 0), 4.0, 1e-13);
        Ok(())
    }

    #[test]
    fn det_jac_works_qua4() -> Result<(), StrError> {
        // unit square has |det(J)| = area/4
        let mut pad = Scratchpad::new(2, GeoKind::Qua4)?;
        pad.set_node_coords(0, &[0.0, 0.0])?;
        pad.set_node_coords(1, &[1.0, 0.0])?;
        pad.set_node_coords(2, &[1.0, 1.0])?;
        pad.set_node_coords(3, &[0.0, 1.0])?;
        let det = pad.calc_gradient(&[-0.57, 0.13])?;
        approx_eq(det, 0.25, 1e-15);
        // constant gradients of the x-linear function u = x
        let mut du_dx = 0.0;
        let coords = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        for m in 0..4 {
            du_dx += pad.gradient.get(m, 0) * coords[m][0];
        }
        approx_eq(du_dx, 1.0, 1e-14);
        Ok(())
    }

    #[test]
    fn gradient_recovers_linear_field_qua8() -> Result<(), StrError> {
        // gradients must recover ∇(2x + 3y) on a distorted element
        let coords = [
            [0.0, 0.0],
            [2.2, 0.1],
            [2.0, 1.8],
            [-0.1, 1.6],
            [1.1, 0.05],
            [2.1, 0.95],
            [0.95, 1.7],
            [-0.05, 0.8],
        ];
        let mut pad = Scratchpad::new(2, GeoKind::Qua8)?;
        for m in 0..8 {
            pad.set_node_coords(m, &coords[m])?;
        }
        pad.calc_gradient(&[0.21, -0.37])?;
        let (mut du_dx, mut du_dy) = (0.0, 0.0);
        for m in 0..8 {
            let u = 2.0 * coords[m][0] + 3.0 * coords[m][1];
            du_dx += pad.gradient.get(m, 0) * u;
            du_dy += pad.gradient.get(m, 1) * u;
        }
        approx_eq(du_dx, 2.0, 1e-13);
        approx_eq(du_dy, 3.0, 1e-13);
        Ok(())
    }

    #[test]
    fn singular_element_is_caught() -> Result<(), StrError> {
        // all nodes coincide
        let mut pad = Scratchpad::new(1, GeoKind::Lin2)?;
        pad.set_node_coords(0, &[1.0])?;
        pad.set_node_coords(1, &[1.0])?;
        assert_eq!(
            pad.calc_gradient(&[0.0]).err(),
            Some("singular element: cannot invert the Jacobian")
        );
        let mut pad = Scratchpad::new(2, GeoKind::Qua4)?;
        for m in 0..4 {
            pad.set_node_coords(m, &[0.5, 0.5])?;
        }
        assert_eq!(
            pad.calc_gradient(&[0.0, 0.0]).err(),
            Some("singular element: cannot invert the Jacobian")
        );
        Ok(())
    }

    #[test]
    fn edge_det_jac_works() -> Result<(), StrError> {
        // straight edge of length 2 along y: |det(J)| = 1
        let mut pad = Scratchpad::new(2, GeoKind::Lin3)?;
        pad.set_node_coords(0, &[1.0, 0.0])?;
        pad.set_node_coords(1, &[1.0, 1.0])?;
        pad.set_node_coords(2, &[1.0, 2.0])?;
        let det = pad.calc_edge_det_jac(&[0.4])?;
        approx_eq(det, 1.0, 1e-15);
        // wrong usage
        let mut pad = Scratchpad::new(2, GeoKind::Qua4)?;
        assert_eq!(
            pad.calc_edge_det_jac(&[0.0]).err(),
            Some("calc_edge_det_jac requires a line kind in the 2D space")
        );
        let mut bulk = Scratchpad::new(2, GeoKind::Lin2)?;
        assert_eq!(
            bulk.calc_gradient(&[0.0]).err(),
            Some("calc_gradient requires geo_ndim = space_ndim")
        );
        Ok(())
    }
}
