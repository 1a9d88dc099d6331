use super::Dof;
use serde::{Deserialize, Serialize};

/// Holds parameters for diffusion problems
///
/// The steady case (Poisson equation) is selected by `Config::transient = false`
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ParamDiffusion {
    /// Isotropic conductivity
    pub conductivity: f64,

    /// Distributed source term
    pub source: Option<f64>,
}

/// Holds parameters for solid mechanics (plane-stress linear elasticity)
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ParamSolid {
    /// Young's modulus
    pub young: f64,

    /// Poisson's coefficient
    pub poisson: f64,
}

/// Defines the free energy function of the Cahn-Hilliard model
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum FreeEnergy {
    /// Double-well potential `f = h c² (1 - c)²` with barrier height h
    DoubleWell { height: f64 },

    /// Landau polynomial `f = (c⁴ - 2 c²) / 4`
    Landau,
}

impl FreeEnergy {
    /// Evaluates the free energy and its first and second derivatives
    pub fn eval(&self, c: f64) -> (f64, f64, f64) {
        match self {
            FreeEnergy::DoubleWell { height } => {
                let h = *height;
                let f = h * c * c * (1.0 - c) * (1.0 - c);
                let df = 2.0 * h * c * (c - 1.0) * (2.0 * c - 1.0);
                let ddf = h * (12.0 * c * c - 12.0 * c + 2.0);
                (f, df, ddf)
            }
            FreeEnergy::Landau => {
                let f = (c * c * c * c - 2.0 * c * c) / 4.0;
                let df = c * c * c - c;
                let ddf = 3.0 * c * c - 1.0;
                (f, df, ddf)
            }
        }
    }
}

/// Holds parameters for the mixed (c, μ) Cahn-Hilliard model
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ParamCahnHilliard {
    /// Mobility coefficient
    pub mobility: f64,

    /// Gradient energy coefficient
    pub kappa: f64,

    /// Bulk free energy
    pub free_energy: FreeEnergy,
}

/// Holds parameters for one-way coupled thermo-mechanics
///
/// The temperature enters the stress through the volumetric
/// eigenstrain `(ω T / 3) I`; the displacements do not feed back
/// into the heat equation
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ParamThermoMech {
    /// Young's modulus
    pub young: f64,

    /// Poisson's coefficient
    pub poisson: f64,

    /// Thermal expansion coefficient
    pub omega: f64,

    /// Thermal conductivity
    pub conductivity: f64,
}

/// Defines the available element types with their parameters
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Elem {
    Diffusion(ParamDiffusion),
    Solid(ParamSolid),
    CahnHilliard(ParamCahnHilliard),
    ThermoMech(ParamThermoMech),
}

impl Elem {
    /// Returns the degrees-of-freedom carried by every node
    pub fn dofs(&self) -> &'static [Dof] {
        match self {
            Elem::Diffusion(..) => &[Dof::T],
            Elem::Solid(..) => &[Dof::Ux, Dof::Uy],
            Elem::CahnHilliard(..) => &[Dof::C, Dof::Mu],
            Elem::ThermoMech(..) => &[Dof::Ux, Dof::Uy, Dof::T],
        }
    }
}

impl ParamDiffusion {
    /// Returns sample parameters
    pub fn sample() -> Self {
        ParamDiffusion {
            conductivity: 1.0,
            source: None,
        }
    }
}

impl ParamSolid {
    /// Returns sample parameters
    pub fn sample() -> Self {
        ParamSolid {
            young: 10_000.0,
            poisson: 0.3,
        }
    }
}

impl ParamCahnHilliard {
    /// Returns sample parameters
    pub fn sample() -> Self {
        ParamCahnHilliard {
            mobility: 1.0,
            kappa: 2e-2,
            free_energy: FreeEnergy::DoubleWell { height: 100.0 },
        }
    }
}

impl ParamThermoMech {
    /// Returns sample parameters
    pub fn sample() -> Self {
        ParamThermoMech {
            young: 120.0,
            poisson: 0.3,
            omega: 0.08,
            conductivity: 1.0,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
