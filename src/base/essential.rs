use super::{Dof, Side};
use crate::FnTime;
use std::collections::HashMap;
use std::fmt;

/// Holds essential (Dirichlet) boundary conditions
pub struct Essential {
    pub all: HashMap<(Side, Dof), FnTime>,
}

impl Essential {
    /// Allocates a new instance
    pub fn new() -> Self {
        Essential { all: HashMap::new() }
    }

    /// Sets an essential boundary condition on a whole side of the mesh
    pub fn on(&mut self, side: Side, dof: Dof, f: FnTime) -> &mut Self {
        self.all.insert((side, dof), f);
        self
    }
}

impl fmt::Display for Essential {
    /// Prints a formatted summary of the boundary conditions
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Essential boundary conditions\n").unwrap();
        write!(f, "=============================\n").unwrap();
        let mut keys: Vec<_> = self.all.keys().collect();
        keys.sort();
        for key in keys {
            let g = self.all.get(key).unwrap();
            write!(f, "{:?} {:?} : value(t=0) = {:?}\n", key.0, key.1, g(0.0)).unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
