use mfsim::prelude::*;
use russell_lab::approx_eq;

// Free thermal expansion of a plate heated uniformly
//
//   T = 1 on all sides    ux = 0 on the left    uy = 0 on the bottom
//
// The temperature settles to the uniform boundary value and the plate
// expands stress-free with u = (ωT/3)(x, y)
#[test]
fn test_thermo_mech_expansion() -> Result<(), StrError> {
    let mesh = Mesh::structured_2d(4, 4, 0.0, 1.0, 0.0, 1.0, GeoKind::Qua4)?;
    let param = ParamThermoMech {
        young: 100.0,
        poisson: 0.25,
        omega: 0.03,
        conductivity: 1.0,
    };
    let elem = Elem::ThermoMech(param);

    let config = Config::new();

    let mut essential = Essential::new();
    essential
        .on(Side::Left, Dof::T, |_| 1.0)
        .on(Side::Right, Dof::T, |_| 1.0)
        .on(Side::Bottom, Dof::T, |_| 1.0)
        .on(Side::Top, Dof::T, |_| 1.0)
        .on(Side::Left, Dof::Ux, |_| 0.0)
        .on(Side::Bottom, Dof::Uy, |_| 0.0);
    let natural = Natural::new();

    let mut solver = SolverImplicit::new(&mesh, &elem, &config, &essential, &natural)?;
    let mut state = FemState::new(&solver.equations, &config)?;
    solver.solve(&mut state)?;

    assert_eq!(solver.summaries.len(), 1);
    assert!(solver.summaries[0].converged);
    assert!(solver.summaries[0].iterations <= 5);

    // uniform temperature and linear expansion field
    let eigen = param.omega * 1.0 / 3.0;
    let tt = nodal_values(&state, &solver.equations, Dof::T)?;
    let uux = nodal_values(&state, &solver.equations, Dof::Ux)?;
    let uuy = nodal_values(&state, &solver.equations, Dof::Uy)?;
    for node in 0..mesh.nnode() {
        let (x, y) = (mesh.coords[node][0], mesh.coords[node][1]);
        approx_eq(tt[node], 1.0, 1e-10);
        approx_eq(uux[node], eigen * x, 1e-9);
        approx_eq(uuy[node], eigen * y, 1e-9);
    }

    // free expansion is stress-free
    let stress_scale = param.young * eigen;
    let proj = solver.projection(&state)?;
    for node in 0..mesh.nnode() {
        assert!(f64::abs(proj.values.get(node, 0)) < 1e-6 * stress_scale);
        assert!(f64::abs(proj.values.get(node, 1)) < 1e-6 * stress_scale);
        assert!(f64::abs(proj.values.get(node, 2)) < 1e-6 * stress_scale);
    }
    Ok(())
}

// Constrained heating generates compressive in-plane stress
//
//   σxx = σyy = -E/(1-ν) · (ωT/3)    when both normal displacements
//   are blocked on all sides
#[test]
fn test_thermo_mech_constrained() -> Result<(), StrError> {
    let mesh = Mesh::structured_2d(2, 2, 0.0, 1.0, 0.0, 1.0, GeoKind::Qua4)?;
    let param = ParamThermoMech {
        young: 100.0,
        poisson: 0.25,
        omega: 0.03,
        conductivity: 1.0,
    };
    let elem = Elem::ThermoMech(param);

    let config = Config::new();

    let mut essential = Essential::new();
    essential
        .on(Side::Left, Dof::T, |_| 1.0)
        .on(Side::Right, Dof::T, |_| 1.0)
        .on(Side::Bottom, Dof::T, |_| 1.0)
        .on(Side::Top, Dof::T, |_| 1.0)
        .on(Side::Left, Dof::Ux, |_| 0.0)
        .on(Side::Right, Dof::Ux, |_| 0.0)
        .on(Side::Bottom, Dof::Uy, |_| 0.0)
        .on(Side::Top, Dof::Uy, |_| 0.0);
    let natural = Natural::new();

    let mut solver = SolverImplicit::new(&mesh, &elem, &config, &essential, &natural)?;
    let mut state = FemState::new(&solver.equations, &config)?;
    solver.solve(&mut state)?;

    let eigen = param.omega * 1.0 / 3.0;
    let sig_correct = -param.young / (1.0 - param.poisson) * eigen;
    let proj = solver.projection(&state)?;
    for node in 0..mesh.nnode() {
        approx_eq(proj.values.get(node, 0), sig_correct, 1e-6);
        approx_eq(proj.values.get(node, 1), sig_correct, 1e-6);
        approx_eq(proj.values.get(node, 2), 0.0, 1e-6);
    }
    Ok(())
}
