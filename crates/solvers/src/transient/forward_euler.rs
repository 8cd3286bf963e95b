use march_core::{Equation, State, Stepper};

use super::workspace::shaped;

/// First-order explicit Euler:
///
/// ```text
/// u_{n+1} = u_n + dt * f(t_n, u_n)
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForwardEuler<U> {
    dudt: Option<U>,
}

impl<U> ForwardEuler<U> {
    #[must_use]
    pub fn new() -> Self {
        Self { dudt: None }
    }
}

impl<E: Equation> Stepper<E> for ForwardEuler<E::State> {
    type Error = E::Error;

    fn step(
        &mut self,
        equation: &mut E,
        t: f64,
        u: &mut E::State,
        dt: f64,
    ) -> Result<(), Self::Error> {
        let dudt = shaped(&mut self.dudt, u);
        equation.derivative(t, u, dudt)?;
        u.axpy(dt, dudt);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::transient::test_utils::{Cosine, Decay, decay_error, march};

    #[test]
    fn single_step_matches_formula() {
        let mut stepper = ForwardEuler::new();
        let u = march(&mut stepper, &mut Decay::new(2.0), vec![1.0, -3.0], 0.1, 1);

        assert_relative_eq!(u[0], 0.8);
        assert_relative_eq!(u[1], -2.4);
    }

    #[test]
    fn evaluates_derivative_at_start_of_step() {
        let mut stepper = ForwardEuler::new();
        let u = march(&mut stepper, &mut Cosine, 0.0, 0.5, 2);

        assert_relative_eq!(u, 0.5 * 0.0_f64.cos() + 0.5 * 0.5_f64.cos());
    }

    #[test]
    fn calls_derivative_once_per_step() {
        let mut equation = Decay::new(1.0);
        march(&mut ForwardEuler::new(), &mut equation, vec![1.0], 0.1, 7);
        assert_eq!(equation.calls, 7);
    }

    #[test]
    fn first_order_convergence() {
        let coarse = decay_error(ForwardEuler::new(), 50);
        let fine = decay_error(ForwardEuler::new(), 100);

        let order = (coarse / fine).log2();
        assert_relative_eq!(order, 1.0, epsilon = 0.05);
    }
}
