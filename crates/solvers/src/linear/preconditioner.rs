use march_core::linear::Operator;

/// Approximates `A^{-1}` to accelerate an iterative solve.
pub trait Preconditioner {
    /// Computes `z = M^{-1} r`.
    fn apply(&self, r: &[f64], z: &mut [f64]);
}

/// No preconditioning: `z = r`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Preconditioner for Identity {
    fn apply(&self, r: &[f64], z: &mut [f64]) {
        z.copy_from_slice(r);
    }
}

/// Diagonal scaling: `z_i = r_i / a_ii`.
///
/// Rows with a vanishing diagonal are left unscaled.
#[derive(Debug, Clone, PartialEq)]
pub struct Jacobi {
    inv_diagonal: Vec<f64>,
}

impl Jacobi {
    /// Builds the preconditioner from a diagonal.
    #[must_use]
    pub fn from_diagonal(diagonal: &[f64]) -> Self {
        let inv_diagonal = diagonal
            .iter()
            .map(|&d| if d.abs() > f64::EPSILON { 1.0 / d } else { 1.0 })
            .collect();
        Self { inv_diagonal }
    }

    /// Builds the preconditioner from an operator's diagonal.
    ///
    /// Returns `None` if the operator cannot provide its diagonal.
    #[must_use]
    pub fn from_operator<A: Operator + ?Sized>(operator: &A) -> Option<Self> {
        operator.diagonal().map(|d| Self::from_diagonal(&d))
    }
}

impl Preconditioner for Jacobi {
    fn apply(&self, r: &[f64], z: &mut [f64]) {
        for ((z, r), inv) in z.iter_mut().zip(r).zip(&self.inv_diagonal) {
            *z = r * inv;
        }
    }
}
