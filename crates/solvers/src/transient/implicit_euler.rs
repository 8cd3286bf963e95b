mod error;

use log::warn;
use march_core::{
    Equation, Stepper,
    linear::{LinearSolver, Operator, Solution, Status},
};

pub use error::ImplicitError;

/// A linear equation `du/dt = A u + s(t)`.
///
/// The operator is assumed to be time independent over a step.
pub trait LinearEquation: Equation<State = Vec<f64>> {
    type Operator: Operator;

    /// Returns the spatial operator `A`.
    fn operator(&self) -> &Self::Operator;

    /// Writes the source term `s(t)` into `s`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be evaluated.
    fn source(&mut self, t: f64, s: &mut [f64]) -> Result<(), Self::Error>;
}

/// First-order implicit (backward) Euler for [`LinearEquation`]s:
///
/// ```text
/// (I - dt A) u_{n+1} = u_n + dt * s(t_n + dt)
/// ```
///
/// Each step is one linear solve, warm-started from `u_n`. A solve that ends
/// without meeting its tolerance leaves `u` unchanged and returns
/// [`ImplicitError::NotConverged`], unless the stepper was told to
/// [accept unconverged](Self::accept_unconverged) iterates. Solves configured
/// without a stopping test are always accepted.
#[derive(Debug, Clone)]
pub struct ImplicitEuler<L> {
    solver: L,
    accept_unconverged: bool,
    last_solution: Option<Solution>,
    rhs: Vec<f64>,
    next: Vec<f64>,
}

impl<L: LinearSolver> ImplicitEuler<L> {
    #[must_use]
    pub fn new(solver: L) -> Self {
        Self {
            solver,
            accept_unconverged: false,
            last_solution: None,
            rhs: Vec::new(),
            next: Vec::new(),
        }
    }

    /// Sets whether an unconverged iterate is accepted with a warning
    /// instead of failing the step.
    #[must_use]
    pub fn accept_unconverged(mut self, accept: bool) -> Self {
        self.accept_unconverged = accept;
        self
    }

    /// Returns the outcome of the most recent linear solve.
    pub fn last_solution(&self) -> Option<&Solution> {
        self.last_solution.as_ref()
    }

    /// Returns the linear solver.
    pub fn solver(&self) -> &L {
        &self.solver
    }
}

impl<E, L> Stepper<E> for ImplicitEuler<L>
where
    E: LinearEquation,
    L: LinearSolver,
{
    type Error = ImplicitError<E::Error>;

    fn step(
        &mut self,
        equation: &mut E,
        t: f64,
        u: &mut E::State,
        dt: f64,
    ) -> Result<(), Self::Error> {
        let n = u.len();

        // rhs = u + dt * s(t + dt)
        self.rhs.resize(n, 0.0);
        equation
            .source(t + dt, &mut self.rhs)
            .map_err(ImplicitError::Equation)?;
        for (rhs, u) in self.rhs.iter_mut().zip(u.iter()) {
            *rhs = u + dt * *rhs;
        }

        self.next.clone_from(u);
        let shifted = Shifted {
            operator: equation.operator(),
            dt,
        };
        let solution = self
            .solver
            .solve_with(&shifted, &self.rhs, &mut self.next)
            .map_err(ImplicitError::Solver)?;
        self.last_solution = Some(solution);

        match solution.status {
            Status::Converged | Status::Unchecked => {}
            _ if self.accept_unconverged => warn!(
                "accepting unconverged implicit step at t = {t}: {:?} after {} iterations, residual {:e}",
                solution.status, solution.iters, solution.residual
            ),
            _ => return Err(ImplicitError::NotConverged { t, solution }),
        }

        u.copy_from_slice(&self.next);
        Ok(())
    }
}

/// The operator `I - dt A`.
struct Shifted<'a, A> {
    operator: &'a A,
    dt: f64,
}

impl<A: Operator> Operator for Shifted<'_, A> {
    fn dim(&self) -> usize {
        self.operator.dim()
    }

    fn apply(&self, x: &[f64], y: &mut [f64]) {
        self.operator.apply(x, y);
        for (y, x) in y.iter_mut().zip(x) {
            *y = x - self.dt * *y;
        }
    }

    fn diagonal(&self) -> Option<Vec<f64>> {
        self.operator
            .diagonal()
            .map(|d| d.into_iter().map(|a| 1.0 - self.dt * a).collect())
    }
}

#[cfg(test)]
mod tests;
