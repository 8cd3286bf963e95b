//! Iterative linear solvers, operators, and preconditioners.
//!
//! These implement the [`LinearSolver`](march_core::linear::LinearSolver)
//! contract from `march-core`.
//!
//! # Solvers
//!
//! - [`ConjugateGradient`] — preconditioned conjugate gradient for symmetric
//!   positive definite operators
//!
//! # Operators and preconditioners
//!
//! - [`CsrMatrix`] — compressed sparse row matrix
//! - [`Identity`], [`Jacobi`] — [`Preconditioner`]s

mod conjugate_gradient;
mod csr;
mod preconditioner;
mod vector;

pub use conjugate_gradient::ConjugateGradient;
pub use csr::{CsrError, CsrMatrix};
pub use preconditioner::{Identity, Jacobi, Preconditioner};
