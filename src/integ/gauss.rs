use crate::StrError;

// Gauss-Legendre constants on [-1, 1]

const GAUSS_2_XI: f64 = 0.577350269189625764509148780502;

const GAUSS_3_XI: f64 = 0.774596669241483377035853079956;
const GAUSS_3_W_SIDE: f64 = 0.555555555555555555555555555556;
const GAUSS_3_W_MID: f64 = 0.888888888888888888888888888889;

const GAUSS_4_XI_IN: f64 = 0.339981043584856264802665759103;
const GAUSS_4_XI_OUT: f64 = 0.861136311594052575223946488893;
const GAUSS_4_W_IN: f64 = 0.652145154862546142626936050778;
const GAUSS_4_W_OUT: f64 = 0.347854845137453857373063949222;

const GAUSS_5_XI_IN: f64 = 0.538469310105683091036314420700;
const GAUSS_5_XI_OUT: f64 = 0.906179845938663992797626878299;
const GAUSS_5_W_MID: f64 = 0.568888888888888888888888888889;
const GAUSS_5_W_IN: f64 = 0.478628670499366468041291514836;
const GAUSS_5_W_OUT: f64 = 0.236926885056189087514264040720;

/// Returns the 1D Gauss-Legendre rule with n points as (weight, ξ) pairs
///
/// The rule integrates polynomials up to degree 2n-1 exactly.
/// Supported: n in 2..=5
pub fn gauss_legendre_1d(n: usize) -> Result<Vec<[f64; 2]>, StrError> {
    match n {
        2 => Ok(vec![[1.0, -GAUSS_2_XI], [1.0, GAUSS_2_XI]]),
        3 => Ok(vec![
            [GAUSS_3_W_SIDE, -GAUSS_3_XI],
            [GAUSS_3_W_MID, 0.0],
            [GAUSS_3_W_SIDE, GAUSS_3_XI],
        ]),
        4 => Ok(vec![
            [GAUSS_4_W_OUT, -GAUSS_4_XI_OUT],
            [GAUSS_4_W_IN, -GAUSS_4_XI_IN],
            [GAUSS_4_W_IN, GAUSS_4_XI_IN],
            [GAUSS_4_W_OUT, GAUSS_4_XI_OUT],
        ]),
        5 => Ok(vec![
            [GAUSS_5_W_OUT, -GAUSS_5_XI_OUT],
            [GAUSS_5_W_IN, -GAUSS_5_XI_IN],
            [GAUSS_5_W_MID, 0.0],
            [GAUSS_5_W_IN, GAUSS_5_XI_IN],
            [GAUSS_5_W_OUT, GAUSS_5_XI_OUT],
        ]),
        _ => Err("unsupported number of Gauss points"),
    }
}

/// Returns the 2D tensor-product Gauss-Legendre rule as (weight, ξ, η) triples
///
/// The n² points combine the 1D rule along each natural direction
pub fn gauss_legendre_2d(n: usize) -> Result<Vec<[f64; 3]>, StrError> {
    let rule = gauss_legendre_1d(n)?;
    let mut points = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            points.push([rule[i][0] * rule[j][0], rule[i][1], rule[j][1]]);
        }
    }
    Ok(points)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
