use march_core::linear::{Connectivity, Reduction};

/// Global dot product `a · b`.
pub(super) fn dot<C: Connectivity + ?Sized>(conn: &C, a: &[f64], b: &[f64]) -> f64 {
    let local = a.iter().zip(b).map(|(a, b)| a * b).sum();
    conn.reduce(local, Reduction::Sum)
}

/// `y += alpha * x`
pub(super) fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    for (y, x) in y.iter_mut().zip(x) {
        *y += alpha * x;
    }
}
