//! Heats a rod with fixed cold ends until it settles.
//!
//! Run with `RUST_LOG=debug` to follow the integrator and the linear solves.

use std::{cell::RefCell, convert::Infallible, error::Error, rc::Rc};

use log::info;
use march_core::{
    Equation, Event, Phase, StateInfo,
    linear::{self, Operator},
};
use march_solvers::{
    linear::{ConjugateGradient, CsrMatrix, Jacobi},
    transient::{Config, ImplicitEuler, Integrator, LinearEquation},
};

const NODES: usize = 49;
const DT: f64 = 0.01;

/// `du/dt = u_xx + 2` on the unit interval with `u = 0` at both ends.
struct Rod {
    laplacian: CsrMatrix,
}

impl Rod {
    fn new(n: usize) -> Result<Self, Box<dyn Error>> {
        #[allow(clippy::cast_precision_loss)]
        let scale = ((n + 1) as f64).powi(2);

        let mut triplets = Vec::new();
        for i in 0..n {
            triplets.push((i, i, -2.0 * scale));
            if i + 1 < n {
                triplets.push((i, i + 1, scale));
                triplets.push((i + 1, i, scale));
            }
        }

        Ok(Self {
            laplacian: CsrMatrix::from_triplets(n, &triplets)?,
        })
    }
}

impl Equation for Rod {
    type State = Vec<f64>;
    type Error = Infallible;

    fn derivative(
        &mut self,
        _t: f64,
        u: &Vec<f64>,
        dudt: &mut Vec<f64>,
    ) -> Result<(), Infallible> {
        self.laplacian.apply(u, dudt);
        dudt.iter_mut().for_each(|d| *d += 2.0);
        Ok(())
    }
}

impl LinearEquation for Rod {
    type Operator = CsrMatrix;

    fn operator(&self) -> &CsrMatrix {
        &self.laplacian
    }

    fn source(&mut self, _t: f64, s: &mut [f64]) -> Result<(), Infallible> {
        s.fill(2.0);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let rod = Rod::new(NODES)?;

    // Each implicit step solves with I - dt A.
    let diagonal = rod.operator().diagonal().ok_or("operator has no diagonal")?;
    let shifted: Vec<f64> = diagonal.iter().map(|a| 1.0 - DT * a).collect();
    let jacobi = Jacobi::from_diagonal(&shifted);
    let solver = ConjugateGradient::new(linear::Config::default().with_tolerance(1e-12))?
        .preconditioned(jacobi);

    let midpoint = Rc::new(RefCell::new(|event: &Event<'_, Vec<f64>>| {
        if event.phase == Phase::Final || event.cycle % 20 == 0 {
            info!(
                "cycle {:>3}  t = {:.3}  u(0.5) = {:.6}",
                event.cycle,
                event.t,
                event.state[NODES / 2]
            );
        }
    }));

    let mut integrator = Integrator::new(
        Config::end_time(0.0, 1.0, DT),
        Rc::new(StateInfo::new(NODES).with_labels(["temperature"])),
        rod,
        ImplicitEuler::new(solver),
    )?
    .with_observer(midpoint);

    let mut t = 0.0;
    let mut forcing = vec![0.0; NODES];
    let mut u = vec![0.0; NODES];
    integrator.time_integrate(&mut t, &mut forcing, &mut u)?;

    println!(
        "t = {t}: u(0.5) = {:.6} (steady state 0.25) after {} steps",
        u[NODES / 2],
        integrator.cycle()
    );

    Ok(())
}
