use march_core::{Equation, State, Stepper};

use super::workspace::shaped;

/// Classic fourth-order Runge-Kutta.
#[derive(Debug, Clone, Default)]
pub struct Rk4<U> {
    stage: Option<U>,
    k1: Option<U>,
    k2: Option<U>,
    k3: Option<U>,
    k4: Option<U>,
}

impl<U> Rk4<U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: None,
            k1: None,
            k2: None,
            k3: None,
            k4: None,
        }
    }
}

impl<E: Equation> Stepper<E> for Rk4<E::State> {
    type Error = E::Error;

    fn step(
        &mut self,
        equation: &mut E,
        t: f64,
        u: &mut E::State,
        dt: f64,
    ) -> Result<(), Self::Error> {
        let stage = shaped(&mut self.stage, u);
        let k1 = shaped(&mut self.k1, u);
        let k2 = shaped(&mut self.k2, u);
        let k3 = shaped(&mut self.k3, u);
        let k4 = shaped(&mut self.k4, u);
        let half = 0.5 * dt;

        equation.derivative(t, u, k1)?;

        stage.assign(u);
        stage.axpy(half, k1);
        equation.derivative(t + half, stage, k2)?;

        stage.assign(u);
        stage.axpy(half, k2);
        equation.derivative(t + half, stage, k3)?;

        stage.assign(u);
        stage.axpy(dt, k3);
        equation.derivative(t + dt, stage, k4)?;

        u.axpy(dt / 6.0, k1);
        u.axpy(dt / 3.0, k2);
        u.axpy(dt / 3.0, k3);
        u.axpy(dt / 6.0, k4);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::transient::test_utils::{Cosine, Decay, decay_error, march};

    #[test]
    fn matches_sine_over_a_period() {
        let n = 200;
        #[allow(clippy::cast_precision_loss)]
        let dt = std::f64::consts::TAU / n as f64;

        let u = march(&mut Rk4::new(), &mut Cosine, 0.0, dt, n);
        assert_relative_eq!(u, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn calls_derivative_four_times_per_step() {
        let mut equation = Decay::new(1.0);
        march(&mut Rk4::new(), &mut equation, vec![1.0, 2.0], 0.1, 3);
        assert_eq!(equation.calls, 12);
    }

    #[test]
    fn fourth_order_convergence() {
        let coarse = decay_error(Rk4::new(), 10);
        let fine = decay_error(Rk4::new(), 20);

        let order = (coarse / fine).log2();
        assert_relative_eq!(order, 4.0, epsilon = 0.1);
    }
}
