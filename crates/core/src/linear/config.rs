use super::Norm;

/// Configuration shared by iterative linear solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct Config {
    /// Whether the problem carries a boundary condition, enabling
    /// [`LinearSolver::solve_with_boundary`](super::LinearSolver::solve_with_boundary).
    pub has_boundary: bool,

    /// Maximum number of iterations.
    pub max_iters: usize,

    /// Norm used for the stopping test.
    pub norm: Norm,

    /// The solve converges once the residual norm is at most this value.
    pub tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            has_boundary: false,
            max_iters: 1000,
            norm: Norm::Euclidean,
            tolerance: 1e-10,
        }
    }
}

impl Config {
    /// Returns the config with the boundary condition flag set.
    #[must_use]
    pub fn with_boundary(mut self, has_boundary: bool) -> Self {
        self.has_boundary = has_boundary;
        self
    }

    /// Returns the config with a new iteration budget.
    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Returns the config with a new stopping norm.
    #[must_use]
    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    /// Returns the config with a new convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Validates that the tolerance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error describing the invalid field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err("tolerance must be finite and non-negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_tolerance() {
        let config = Config::default().with_tolerance(-1e-6);
        assert!(config.validate().is_err());

        let config = Config::default().with_tolerance(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde-derive")]
    #[test]
    fn deserializes_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            has_boundary = true
            norm = "infinity"
            tolerance = 1e-8
            "#,
        )
        .expect("valid config");

        assert_eq!(
            config,
            Config::default()
                .with_boundary(true)
                .with_norm(Norm::Infinity)
                .with_tolerance(1e-8)
        );
    }
}
