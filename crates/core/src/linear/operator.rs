/// A linear operator `A` acting on flat vectors of degrees of freedom.
pub trait Operator {
    /// Returns the dimension `n` of the square operator.
    fn dim(&self) -> usize;

    /// Computes `y = A x`.
    ///
    /// Both slices have length [`dim`](Operator::dim). `y` is overwritten.
    fn apply(&self, x: &[f64], y: &mut [f64]);

    /// Returns the diagonal of `A`, if the operator can provide it.
    ///
    /// Used to build diagonal (Jacobi) preconditioners.
    fn diagonal(&self) -> Option<Vec<f64>> {
        None
    }
}

impl<T: Operator + ?Sized> Operator for &T {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn apply(&self, x: &[f64], y: &mut [f64]) {
        (**self).apply(x, y);
    }

    fn diagonal(&self) -> Option<Vec<f64>> {
        (**self).diagonal()
    }
}
