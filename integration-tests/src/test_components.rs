use std::convert::Infallible;

use march_core::{Equation, Grid, StateInfo, linear::Operator};
use march_solvers::{
    linear::{CsrError, CsrMatrix},
    transient::LinearEquation,
};

/// A uniform 1D grid of `n` nodes carrying a single scalar field.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub n: usize,
}

impl Grid for Line {
    fn dofs(&self) -> usize {
        self.n
    }

    fn info(&self) -> StateInfo {
        StateInfo::new(self.n).with_labels(["u"])
    }
}

/// Heat conduction `du/dt = kappa u_xx + q` on the unit interval with
/// `u = 0` at both ends, discretized on `n` interior nodes.
pub struct Heat {
    operator: CsrMatrix,
    q: f64,
    spacing: f64,
}

impl Heat {
    /// # Errors
    ///
    /// Fails only if the operator cannot be assembled.
    pub fn new(n: usize, kappa: f64, q: f64) -> Result<Self, CsrError> {
        #[allow(clippy::cast_precision_loss)]
        let spacing = 1.0 / (n + 1) as f64;
        let scale = kappa / (spacing * spacing);

        let mut triplets = Vec::new();
        for i in 0..n {
            triplets.push((i, i, -2.0 * scale));
            if i + 1 < n {
                triplets.push((i, i + 1, scale));
                triplets.push((i + 1, i, scale));
            }
        }

        Ok(Self {
            operator: CsrMatrix::from_triplets(n, &triplets)?,
            q,
            spacing,
        })
    }

    /// Returns the position of interior node `i`.
    #[must_use]
    pub fn x(&self, i: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let i = i as f64;
        (i + 1.0) * self.spacing
    }
}

impl Equation for Heat {
    type State = Vec<f64>;
    type Error = Infallible;

    fn derivative(
        &mut self,
        _t: f64,
        u: &Vec<f64>,
        dudt: &mut Vec<f64>,
    ) -> Result<(), Infallible> {
        self.operator.apply(u, dudt);
        for d in dudt.iter_mut() {
            *d += self.q;
        }
        Ok(())
    }
}

impl LinearEquation for Heat {
    type Operator = CsrMatrix;

    fn operator(&self) -> &CsrMatrix {
        &self.operator
    }

    fn source(&mut self, _t: f64, s: &mut [f64]) -> Result<(), Infallible> {
        s.fill(self.q);
        Ok(())
    }
}

/// Periodic first-order upwind advection `du/dt + c u_x = 0`, `c > 0`.
///
/// Advises the explicit stability limit `h / c`.
pub struct Advection {
    pub velocity: f64,
    pub spacing: f64,
}

impl Equation for Advection {
    type State = Vec<f64>;
    type Error = Infallible;

    fn derivative(
        &mut self,
        _t: f64,
        u: &Vec<f64>,
        dudt: &mut Vec<f64>,
    ) -> Result<(), Infallible> {
        let n = u.len();
        let k = self.velocity / self.spacing;
        for i in 0..n {
            let upwind = u[(i + n - 1) % n];
            dudt[i] = -k * (u[i] - upwind);
        }
        Ok(())
    }

    fn supports_dt(&self) -> bool {
        true
    }

    fn dt(&self, _t: f64, _u: &Vec<f64>) -> Result<f64, Infallible> {
        Ok(self.spacing / self.velocity)
    }
}

/// Total variation `sum |u_i - u_{i-1}|` of a periodic field.
#[must_use]
pub fn total_variation(u: &[f64]) -> f64 {
    let n = u.len();
    (0..n).map(|i| (u[i] - u[(i + n - 1) % n]).abs()).sum()
}
