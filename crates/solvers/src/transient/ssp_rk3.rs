use march_core::{Equation, State, Stepper};

use super::workspace::shaped;

/// Third-order strong-stability-preserving Runge-Kutta (Shu-Osher form):
///
/// ```text
/// u1      = u_n + dt * f(t_n, u_n)
/// u2      = 3/4 u_n + 1/4 (u1 + dt * f(t_n + dt, u1))
/// u_{n+1} = 1/3 u_n + 2/3 (u2 + dt * f(t_n + dt/2, u2))
/// ```
///
/// Each stage is a convex combination of forward Euler steps, so the scheme
/// preserves any monotonicity or positivity property forward Euler has under
/// the same step-size restriction. It is the usual choice for hyperbolic
/// problems with limited reconstructions.
#[derive(Debug, Clone, Default)]
pub struct SspRk3<U> {
    stage: Option<U>,
    dudt: Option<U>,
}

impl<U> SspRk3<U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: None,
            dudt: None,
        }
    }
}

impl<E: Equation> Stepper<E> for SspRk3<E::State> {
    type Error = E::Error;

    fn step(
        &mut self,
        equation: &mut E,
        t: f64,
        u: &mut E::State,
        dt: f64,
    ) -> Result<(), Self::Error> {
        let stage = shaped(&mut self.stage, u);
        let dudt = shaped(&mut self.dudt, u);

        stage.assign(u);
        equation.derivative(t, stage, dudt)?;
        stage.axpy(dt, dudt);

        equation.derivative(t + dt, stage, dudt)?;
        stage.axpy(dt, dudt);
        stage.scale(0.25);
        stage.axpy(0.75, u);

        equation.derivative(t + 0.5 * dt, stage, dudt)?;
        stage.axpy(dt, dudt);
        u.scale(1.0 / 3.0);
        u.axpy(2.0 / 3.0, stage);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::transient::test_utils::{Cosine, Decay, decay_error, march};

    #[test]
    fn time_only_forcing_reduces_to_simpson() {
        // Stage times t, t + dt, t + dt/2 with weights 1/6, 1/6, 2/3.
        let mut stepper = SspRk3::new();
        let u = march(&mut stepper, &mut Cosine, 0.0, 0.01, 1);
        assert_relative_eq!(u, 0.01_f64.sin(), epsilon = 1e-10);
    }

    #[test]
    fn calls_derivative_three_times_per_step() {
        let mut equation = Decay::new(1.0);
        march(&mut SspRk3::new(), &mut equation, vec![1.0], 0.1, 4);
        assert_eq!(equation.calls, 12);
    }

    #[test]
    fn third_order_convergence() {
        let coarse = decay_error(SspRk3::new(), 20);
        let fine = decay_error(SspRk3::new(), 40);

        let order = (coarse / fine).log2();
        assert_relative_eq!(order, 3.0, epsilon = 0.1);
    }
}
