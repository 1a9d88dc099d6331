use super::Equations;
use crate::base::{Config, Dof};
use crate::mesh::Mesh;
use crate::StrError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the state of a simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FemState {
    /// Time
    pub t: f64,

    /// Delta time
    pub dt: f64,

    /// Primary unknowns {U}
    ///
    /// (n_equation)
    pub uu: Vector,

    /// Primary unknowns at the last converged timestep
    ///
    /// (n_equation)
    pub uu_old: Vector,

    /// First time derivative of primary unknowns d{U}/dt
    ///
    /// (n_equation)
    pub vv: Vector,
}

impl FemState {
    /// Allocates a new instance with all values zeroed
    pub fn new(equations: &Equations, config: &Config) -> Result<FemState, StrError> {
        if equations.n_equation < 1 {
            return Err("there are no equations in the system");
        }
        Ok(FemState {
            t: 0.0,
            dt: config.dt,
            uu: Vector::new(equations.n_equation),
            uu_old: Vector::new(equations.n_equation),
            vv: Vector::new(equations.n_equation),
        })
    }

    /// Sets the initial value of a dof at all nodes
    ///
    /// Writes both {U} and the converged {U} of the previous step
    pub fn set_uniform_ic(&mut self, equations: &Equations, dof: Dof, value: f64) -> Result<(), StrError> {
        for node in 0..equations.nnode {
            let eq = equations.eq(node, dof)?;
            self.uu[eq] = value;
            self.uu_old[eq] = value;
        }
        Ok(())
    }

    /// Sets the initial value of a dof from a function of the node coordinates
    ///
    /// Writes both {U} and the converged {U} of the previous step. The
    /// closure may carry state (e.g. a random number generator)
    pub fn set_ic<F>(&mut self, mesh: &Mesh, equations: &Equations, dof: Dof, mut f: F) -> Result<(), StrError>
    where
        F: FnMut(f64, f64) -> f64,
    {
        if mesh.nnode() != equations.nnode {
            return Err("mesh and equations are incompatible");
        }
        for node in 0..equations.nnode {
            let eq = equations.eq(node, dof)?;
            let value = f(mesh.coords[node][0], mesh.coords[node][1]);
            self.uu[eq] = value;
            self.uu_old[eq] = value;
        }
        Ok(())
    }

    /// Reads a JSON file containing the state data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let state = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(state)
    }

    /// Writes a JSON file with the state data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::FemState;
    use crate::base::{Config, Dof, Elem, ParamDiffusion};
    use crate::fem::Equations;
    use crate::mesh::Mesh;
    use crate::shapes::GeoKind;
    use crate::StrError;

    #[test]
    fn new_works() -> Result<(), StrError> {
        let mesh = Mesh::structured_1d(4, 0.0, 1.0, GeoKind::Lin2)?;
        let equations = Equations::new(&mesh, &Elem::Diffusion(ParamDiffusion::sample()));
        let config = Config::new();
        let state = FemState::new(&equations, &config)?;
        assert_eq!(state.t, 0.0);
        assert_eq!(state.dt, config.dt);
        assert_eq!(state.uu.dim(), 5);
        assert_eq!(state.uu_old.dim(), 5);
        assert_eq!(state.vv.dim(), 5);
        Ok(())
    }

    #[test]
    fn initial_conditions_work() -> Result<(), StrError> {
        let mesh = Mesh::structured_1d(4, 0.0, 4.0, GeoKind::Lin2)?;
        let equations = Equations::new(&mesh, &Elem::Diffusion(ParamDiffusion::sample()));
        let config = Config::new();
        let mut state = FemState::new(&equations, &config)?;

        state.set_uniform_ic(&equations, Dof::T, 10.0)?;
        assert_eq!(state.uu.as_data(), &[10.0, 10.0, 10.0, 10.0, 10.0]);
        assert_eq!(state.uu_old.as_data(), &[10.0, 10.0, 10.0, 10.0, 10.0]);

        state.set_ic(&mesh, &equations, Dof::T, |x, _| if x < 2.0 { 10.0 } else { 2.0 })?;
        assert_eq!(state.uu.as_data(), &[10.0, 10.0, 2.0, 2.0, 2.0]);
        assert_eq!(state.uu_old.as_data(), &[10.0, 10.0, 2.0, 2.0, 2.0]);

        assert_eq!(
            state.set_uniform_ic(&equations, Dof::C, 0.5).err(),
            Some("dof is not available for this problem")
        );
        Ok(())
    }

    #[test]
    fn read_json_and_write_json_work() -> Result<(), StrError> {
        let mesh = Mesh::structured_1d(2, 0.0, 1.0, GeoKind::Lin2)?;
        let equations = Equations::new(&mesh, &Elem::Diffusion(ParamDiffusion::sample()));
        let mut config = Config::new();
        config.set_transient(0.25, 4)?;
        let mut state = FemState::new(&equations, &config)?;
        state.t = 0.5;
        state.set_uniform_ic(&equations, Dof::T, 3.0)?;
        state.vv[1] = -1.5;

        let full_path = "/tmp/mfsim/test_fem_state_write.json";
        state.write_json(&full_path)?;
        let read = FemState::read_json(&full_path)?;
        assert_eq!(read.t, 0.5);
        assert_eq!(read.dt, 0.25);
        assert_eq!(read.uu.as_data(), state.uu.as_data());
        assert_eq!(read.uu_old.as_data(), state.uu_old.as_data());
        assert_eq!(read.vv.as_data(), state.vv.as_data());

        assert_eq!(
            FemState::read_json(&"__inexistent__.json").err(),
            Some("cannot open file")
        );
        Ok(())
    }

    #[test]
    fn derive_works() -> Result<(), StrError> {
        let mesh = Mesh::structured_1d(2, 0.0, 1.0, GeoKind::Lin2)?;
        let equations = Equations::new(&mesh, &Elem::Diffusion(ParamDiffusion::sample()));
        let config = Config::new();
        let state_ori = FemState::new(&equations, &config)?;
        let state = state_ori.clone();
        let str_ori = format!("{:?}", state).to_string();
        assert!(str_ori.len() > 0);
        // serialize
        let json = serde_json::to_string(&state).unwrap();
        // deserialize
        let read: FemState = serde_json::from_str(&json).unwrap();
        assert_eq!(format!("{:?}", read), str_ori);
        Ok(())
    }
}
