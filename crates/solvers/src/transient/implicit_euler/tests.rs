use super::*;

use approx::assert_relative_eq;
use march_core::linear::{Config, Error as LinearError};
use thiserror::Error;

use crate::linear::{ConjugateGradient, CsrMatrix};

#[derive(Debug, Error)]
#[error("source unavailable")]
struct SourceUnavailable;

/// `du/dt = A u + slope * t`, with an optional failing source.
struct Linear {
    matrix: CsrMatrix,
    slope: f64,
    fail: bool,
}

impl Linear {
    fn decay(rate: f64) -> Self {
        Self {
            matrix: CsrMatrix::from_triplets(1, &[(0, 0, -rate)]).unwrap(),
            slope: 0.0,
            fail: false,
        }
    }

    /// `A = -tridiag(-1, 2, -1)`, a diffusion operator.
    fn diffusion(n: usize) -> Self {
        let mut triplets = Vec::new();
        for i in 0..n {
            triplets.push((i, i, -2.0));
            if i + 1 < n {
                triplets.push((i, i + 1, 1.0));
                triplets.push((i + 1, i, 1.0));
            }
        }
        Self {
            matrix: CsrMatrix::from_triplets(n, &triplets).unwrap(),
            slope: 0.0,
            fail: false,
        }
    }
}

impl Equation for Linear {
    type State = Vec<f64>;
    type Error = SourceUnavailable;

    fn derivative(
        &mut self,
        t: f64,
        u: &Vec<f64>,
        dudt: &mut Vec<f64>,
    ) -> Result<(), Self::Error> {
        self.matrix.apply(u, dudt);
        for d in dudt.iter_mut() {
            *d += self.slope * t;
        }
        Ok(())
    }
}

impl LinearEquation for Linear {
    type Operator = CsrMatrix;

    fn operator(&self) -> &CsrMatrix {
        &self.matrix
    }

    fn source(&mut self, t: f64, s: &mut [f64]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(SourceUnavailable);
        }
        s.fill(self.slope * t);
        Ok(())
    }
}

fn stepper() -> ImplicitEuler<ConjugateGradient> {
    ImplicitEuler::new(ConjugateGradient::new(Config::default()).unwrap())
}

fn starved() -> ImplicitEuler<ConjugateGradient> {
    let config = Config::default().with_max_iters(1).with_tolerance(1e-14);
    ImplicitEuler::new(ConjugateGradient::new(config).unwrap())
}

#[test]
fn single_step_matches_formula() {
    let mut equation = Linear::decay(2.0);
    equation.slope = 1.0;
    let mut u = vec![1.0];

    stepper().step(&mut equation, 0.0, &mut u, 0.5).unwrap();

    // (u + dt * s(t + dt)) / (1 + 2 dt)
    assert_relative_eq!(u[0], 0.625, epsilon = 1e-12);
}

#[test]
fn stays_stable_on_stiff_decay() {
    let mut equation = Linear::decay(1000.0);
    let mut stepper = stepper();
    let mut u = vec![1.0];

    let mut previous = u[0];
    for n in 0..10 {
        stepper.step(&mut equation, f64::from(n) * 0.1, &mut u, 0.1).unwrap();
        assert!(u[0] > 0.0 && u[0] < previous);
        previous = u[0];
    }
}

#[test]
fn first_order_accurate() {
    let error = |n: u32| {
        let mut equation = Linear::decay(1.0);
        let mut stepper = stepper();
        let dt = 1.0 / f64::from(n);
        let mut u = vec![1.0];
        for i in 0..n {
            stepper.step(&mut equation, f64::from(i) * dt, &mut u, dt).unwrap();
        }
        (u[0] - (-1.0_f64).exp()).abs()
    };

    let order = (error(20) / error(40)).log2();
    assert_relative_eq!(order, 1.0, epsilon = 0.05);
}

#[test]
fn records_last_solution() {
    let mut stepper = stepper();
    assert!(stepper.last_solution().is_none());

    let mut u = vec![1.0, 0.0, 0.0];
    stepper.step(&mut Linear::diffusion(3), 0.0, &mut u, 0.1).unwrap();

    let solution = stepper.last_solution().unwrap();
    assert!(solution.is_converged());
    assert!(solution.iters >= 2);
}

#[test]
fn unconverged_solve_leaves_state_unchanged() {
    let mut stepper = starved();
    let mut u = vec![1.0, 0.0, 0.0, 0.0, 0.0];

    let result = stepper.step(&mut Linear::diffusion(5), 0.25, &mut u, 1.0);

    let Err(ImplicitError::NotConverged { t, solution }) = result else {
        panic!("expected NotConverged, got {result:?}");
    };
    assert_relative_eq!(t, 0.25);
    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(stepper.last_solution(), Some(&solution));
    assert_eq!(u, vec![1.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn accepts_unconverged_iterate_when_asked() {
    let mut stepper = starved().accept_unconverged(true);
    let mut u = vec![1.0, 0.0, 0.0, 0.0, 0.0];

    stepper.step(&mut Linear::diffusion(5), 0.0, &mut u, 1.0).unwrap();

    assert_eq!(stepper.last_solution().unwrap().status, Status::MaxIters);
    assert!(u[0] < 1.0);
    assert!(u[1] > 0.0);
}

#[test]
fn surfaces_solver_misuse() {
    let mut u = vec![1.0, 0.0];

    let result = stepper().step(&mut Linear::diffusion(3), 0.0, &mut u, 0.1);

    assert!(matches!(
        result,
        Err(ImplicitError::Solver(LinearError::DimensionMismatch {
            expected: 3,
            found: 2
        }))
    ));
}

#[test]
fn surfaces_source_failure() {
    let mut equation = Linear::decay(1.0);
    equation.fail = true;
    let mut u = vec![1.0];

    let result = stepper().step(&mut equation, 0.0, &mut u, 0.1);

    assert!(matches!(result, Err(ImplicitError::Equation(SourceUnavailable))));
    assert_eq!(u, vec![1.0]);
}

#[test]
fn shifted_operator_diagonal() {
    let matrix = CsrMatrix::from_triplets(2, &[(0, 0, -2.0), (1, 1, -4.0)]).unwrap();
    let shifted = Shifted {
        operator: &matrix,
        dt: 0.5,
    };

    assert_eq!(shifted.diagonal(), Some(vec![2.0, 3.0]));

    let mut y = [0.0; 2];
    shifted.apply(&[1.0, 1.0], &mut y);
    assert_eq!(y, [2.0, 3.0]);
}
