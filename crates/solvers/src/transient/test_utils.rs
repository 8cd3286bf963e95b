use std::convert::Infallible;

use march_core::{Equation, Stepper};

/// Exponential decay `du/dt = -rate * u` on every degree of freedom.
pub(super) struct Decay {
    pub rate: f64,
    pub calls: usize,
}

impl Decay {
    pub fn new(rate: f64) -> Self {
        Self { rate, calls: 0 }
    }
}

impl Equation for Decay {
    type State = Vec<f64>;
    type Error = Infallible;

    fn derivative(
        &mut self,
        _t: f64,
        u: &Vec<f64>,
        dudt: &mut Vec<f64>,
    ) -> Result<(), Infallible> {
        self.calls += 1;
        for (d, u) in dudt.iter_mut().zip(u) {
            *d = -self.rate * u;
        }
        Ok(())
    }
}

/// Forcing that depends only on time: `du/dt = cos(t)`, so `u(t) = sin(t)`.
pub(super) struct Cosine;

impl Equation for Cosine {
    type State = f64;
    type Error = Infallible;

    fn derivative(&mut self, t: f64, _u: &f64, dudt: &mut f64) -> Result<(), Infallible> {
        *dudt = t.cos();
        Ok(())
    }
}

/// Integrates `equation` from `t = 0` with `n` steps of `dt`.
pub(super) fn march<E, S>(
    stepper: &mut S,
    equation: &mut E,
    mut u: E::State,
    dt: f64,
    n: usize,
) -> E::State
where
    E: Equation,
    S: Stepper<E>,
{
    #[allow(clippy::cast_precision_loss)]
    for i in 0..n {
        stepper
            .step(equation, i as f64 * dt, &mut u, dt)
            .unwrap_or_else(|_| panic!("step {i} failed"));
    }
    u
}

/// Error at `t = 1` of the decay problem with rate 1 and `u(0) = 1`.
pub(super) fn decay_error<S>(mut stepper: S, n: usize) -> f64
where
    S: Stepper<Decay>,
{
    #[allow(clippy::cast_precision_loss)]
    let dt = 1.0 / n as f64;
    let u = march(&mut stepper, &mut Decay::new(1.0), vec![1.0], dt, n);
    (u[0] - (-1.0_f64).exp()).abs()
}
