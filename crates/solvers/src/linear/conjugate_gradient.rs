
use log::{debug, trace};
use march_core::linear::{
    Config, Connectivity, Error, LinearSolver, Norm, Operator, Solution, Status,
};

use super::{
    CsrMatrix, Identity, Preconditioner,
    vector::{axpy, dot},
};

/// Preconditioned conjugate gradient.
///
/// Solves `A x = b` for symmetric positive definite `A`. Each iteration pass
/// first applies the stopping test to the current residual, so a solve whose
/// initial guess already satisfies the tolerance reports one pass and leaves
/// `x` untouched.
///
/// With [`Norm::None`] there is no stopping test and the solver runs all
/// `max_iters` passes, stopping early only if the residual becomes exactly
/// zero.
///
/// A search direction with `p · A p <= 0` means the operator is not positive
/// definite and the solve ends with [`Status::Breakdown`].
///
/// # Boundary contributions
///
/// [`solve_with_boundary`](LinearSolver::solve_with_boundary) lifts the
/// boundary contribution into the right-hand side once, before iterating:
/// it solves `A x = b - A xb`, so `x + xb` satisfies the full system.
///
/// # Distributed solves
///
/// Every operator application and the final iterate are reconciled through
/// the solver's [`Connectivity`], and every dot product and norm is reduced
/// through it.
#[derive(Debug, Clone)]
pub struct ConjugateGradient<A = CsrMatrix, P = Identity, C = ()> {
    config: Config,
    operator: Option<A>,
    preconditioner: P,
    connectivity: C,
    lifted: Vec<f64>,
    workspace: Workspace,
}

impl ConjugateGradient {
    /// Creates a solver without a built-in operator.
    ///
    /// Use [`solve_with`](LinearSolver::solve_with) to supply the operator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the config is invalid.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::build(config, None)
    }
}

impl<A: Operator> ConjugateGradient<A> {
    /// Creates a solver that owns its operator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the config is invalid.
    pub fn with_operator(config: Config, operator: A) -> Result<Self, Error> {
        Self::build(config, Some(operator))
    }
}

impl<A> ConjugateGradient<A> {
    fn build(config: Config, operator: Option<A>) -> Result<Self, Error> {
        config
            .validate()
            .map_err(|reason| Error::InvalidConfig { reason })?;

        Ok(Self {
            config,
            operator,
            preconditioner: Identity,
            connectivity: (),
            lifted: Vec::new(),
            workspace: Workspace::default(),
        })
    }
}

impl<A, P, C> ConjugateGradient<A, P, C> {
    /// Replaces the preconditioner.
    #[must_use]
    pub fn preconditioned<Q: Preconditioner>(
        self,
        preconditioner: Q,
    ) -> ConjugateGradient<A, Q, C> {
        ConjugateGradient {
            config: self.config,
            operator: self.operator,
            preconditioner,
            connectivity: self.connectivity,
            lifted: self.lifted,
            workspace: self.workspace,
        }
    }

    /// Replaces the partition connectivity.
    #[must_use]
    pub fn connected<D: Connectivity>(self, connectivity: D) -> ConjugateGradient<A, P, D> {
        ConjugateGradient {
            config: self.config,
            operator: self.operator,
            preconditioner: self.preconditioner,
            connectivity,
            lifted: self.lifted,
            workspace: self.workspace,
        }
    }

    /// Returns the built-in operator, if any.
    pub fn operator(&self) -> Option<&A> {
        self.operator.as_ref()
    }

    /// Returns the preconditioner.
    pub fn preconditioner(&self) -> &P {
        &self.preconditioner
    }

    /// Returns the connectivity.
    pub fn connectivity(&self) -> &C {
        &self.connectivity
    }
}

impl<A, P, C> LinearSolver for ConjugateGradient<A, P, C>
where
    A: Operator,
    P: Preconditioner,
    C: Connectivity,
{
    fn config(&self) -> &Config {
        &self.config
    }

    fn solve(&mut self, b: &[f64], x: &mut [f64]) -> Result<Solution, Error> {
        let Some(a) = self.operator.as_ref() else {
            return Err(Error::NoOperator);
        };
        check_dims(a.dim(), &[b, &*x])?;

        Ok(iterate(
            &self.config,
            a,
            &self.preconditioner,
            &self.connectivity,
            &mut self.workspace,
            b,
            x,
        ))
    }

    fn solve_with<B>(&mut self, a: &B, b: &[f64], x: &mut [f64]) -> Result<Solution, Error>
    where
        B: Operator + ?Sized,
    {
        check_dims(a.dim(), &[b, &*x])?;

        Ok(iterate(
            &self.config,
            a,
            &self.preconditioner,
            &self.connectivity,
            &mut self.workspace,
            b,
            x,
        ))
    }

    fn solve_with_boundary<B>(
        &mut self,
        a: &B,
        b: &[f64],
        xb: &[f64],
        x: &mut [f64],
    ) -> Result<Solution, Error>
    where
        B: Operator + ?Sized,
    {
        if !self.config.has_boundary {
            return Err(Error::NoBoundaryCondition);
        }
        check_dims(a.dim(), &[b, xb, &*x])?;

        // b' = b - A xb
        self.lifted.resize(a.dim(), 0.0);
        a.apply(xb, &mut self.lifted);
        self.connectivity.reconcile(&mut self.lifted);
        for (lifted, b) in self.lifted.iter_mut().zip(b) {
            *lifted = b - *lifted;
        }

        Ok(iterate(
            &self.config,
            a,
            &self.preconditioner,
            &self.connectivity,
            &mut self.workspace,
            &self.lifted,
            x,
        ))
    }
}

/// Scratch vectors reused across solves of the same dimension.
#[derive(Debug, Clone, Default)]
struct Workspace {
    r: Vec<f64>,
    z: Vec<f64>,
    p: Vec<f64>,
    ap: Vec<f64>,
}

impl Workspace {
    fn resize(&mut self, n: usize) {
        for v in [&mut self.r, &mut self.z, &mut self.p, &mut self.ap] {
            v.resize(n, 0.0);
        }
    }
}

fn check_dims(expected: usize, vectors: &[&[f64]]) -> Result<(), Error> {
    match vectors.iter().find(|v| v.len() != expected) {
        Some(v) => Err(Error::DimensionMismatch {
            expected,
            found: v.len(),
        }),
        None => Ok(()),
    }
}

fn iterate<A, P, C>(
    config: &Config,
    a: &A,
    preconditioner: &P,
    conn: &C,
    ws: &mut Workspace,
    b: &[f64],
    x: &mut [f64],
) -> Solution
where
    A: Operator + ?Sized,
    P: Preconditioner,
    C: Connectivity,
{
    ws.resize(a.dim());

    // r = b - A x
    a.apply(x, &mut ws.r);
    conn.reconcile(&mut ws.r);
    for (r, b) in ws.r.iter_mut().zip(b) {
        *r = b - *r;
    }

    preconditioner.apply(&ws.r, &mut ws.z);
    ws.p.copy_from_slice(&ws.z);
    let mut rz = dot(conn, &ws.r, &ws.z);

    let (status, iters) = 'solve: {
        for pass in 1..=config.max_iters {
            if let Some(residual) = config.norm.measure_across(&ws.r, conn) {
                trace!("cg pass {pass}: residual {residual:e}");
                if residual <= config.tolerance {
                    break 'solve (Status::Converged, pass);
                }
            }
            if rz == 0.0 {
                let status = match config.norm {
                    Norm::None => Status::Unchecked,
                    _ => Status::Breakdown,
                };
                break 'solve (status, pass);
            }

            a.apply(&ws.p, &mut ws.ap);
            conn.reconcile(&mut ws.ap);
            let pap = dot(conn, &ws.p, &ws.ap);
            if pap.is_nan() || pap <= 0.0 {
                break 'solve (Status::Breakdown, pass);
            }

            let alpha = rz / pap;
            axpy(alpha, &ws.p, x);
            axpy(-alpha, &ws.ap, &mut ws.r);

            preconditioner.apply(&ws.r, &mut ws.z);
            let rz_next = dot(conn, &ws.r, &ws.z);
            let beta = rz_next / rz;
            rz = rz_next;
            for (p, z) in ws.p.iter_mut().zip(&ws.z) {
                *p = z + beta * *p;
            }
        }

        // The last update may have met the tolerance.
        let status = match config.norm.measure_across(&ws.r, conn) {
            Some(residual) if residual <= config.tolerance => Status::Converged,
            Some(_) => Status::MaxIters,
            None => Status::Unchecked,
        };
        (status, config.max_iters)
    };

    conn.reconcile(x);

    let norm = match config.norm {
        Norm::None => Norm::Euclidean,
        norm => norm,
    };
    let residual = norm.measure_across(&ws.r, conn).unwrap_or_default();

    debug!("cg finished: {status:?} after {iters} passes, residual {residual:e}");

    Solution {
        status,
        iters,
        residual,
    }
}
