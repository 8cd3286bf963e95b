/// A discretized solution at one instant of simulation time.
///
/// Implementing this trait lets generic steppers combine states and their
/// derivatives. A time derivative has the same type as the state it
/// differentiates, so every scheme can be written in terms of `axpy` and
/// `scale` on a single type.
///
/// Implementations are provided for `f64`, `Vec<f64>`, and `[f64; N]`.
pub trait State: Clone {
    /// Returns the number of degrees of freedom held by this state.
    fn dofs(&self) -> usize;

    /// Computes `self += alpha * x`.
    ///
    /// `x` must have the same number of degrees of freedom as `self`.
    fn axpy(&mut self, alpha: f64, x: &Self);

    /// Computes `self *= alpha`.
    fn scale(&mut self, alpha: f64);

    /// Overwrites `self` with the values of `other`, reusing storage.
    fn assign(&mut self, other: &Self) {
        self.clone_from(other);
    }
}

impl State for f64 {
    fn dofs(&self) -> usize {
        1
    }

    fn axpy(&mut self, alpha: f64, x: &Self) {
        *self += alpha * x;
    }

    fn scale(&mut self, alpha: f64) {
        *self *= alpha;
    }
}

impl State for Vec<f64> {
    fn dofs(&self) -> usize {
        self.len()
    }

    fn axpy(&mut self, alpha: f64, x: &Self) {
        debug_assert_eq!(self.len(), x.len());
        for (y, x) in self.iter_mut().zip(x) {
            *y += alpha * x;
        }
    }

    fn scale(&mut self, alpha: f64) {
        for y in self.iter_mut() {
            *y *= alpha;
        }
    }
}

impl<const N: usize> State for [f64; N] {
    fn dofs(&self) -> usize {
        N
    }

    fn axpy(&mut self, alpha: f64, x: &Self) {
        for (y, x) in self.iter_mut().zip(x) {
            *y += alpha * x;
        }
    }

    fn scale(&mut self, alpha: f64) {
        for y in self.iter_mut() {
            *y *= alpha;
        }
    }
}
