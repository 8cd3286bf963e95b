use super::{Connectivity, Reduction};

/// The measure used to decide when an iterative solve has converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(rename_all = "snake_case"))]
pub enum Norm {
    /// `max |v_i|`
    Infinity,

    /// `sqrt(sum v_i^2)`
    #[default]
    Euclidean,

    /// `sqrt(sum v_i^2 / n)`, the discrete L2 norm normalized by the number of
    /// degrees of freedom.
    L2,

    /// `sum |v_i|`
    L1,

    /// No stopping test: the solver runs its full iteration budget.
    None,
}

impl Norm {
    /// Measures `v` on a single partition.
    ///
    /// Returns `None` for [`Norm::None`].
    #[must_use]
    pub fn measure(self, v: &[f64]) -> Option<f64> {
        self.measure_across(v, &())
    }

    /// Measures `v` globally, reducing partition-local values through `conn`.
    ///
    /// Returns `None` for [`Norm::None`].
    #[must_use]
    pub fn measure_across<C>(self, v: &[f64], conn: &C) -> Option<f64>
    where
        C: Connectivity + ?Sized,
    {
        let sum_squares = || conn.reduce(v.iter().map(|x| x * x).sum(), Reduction::Sum);

        match self {
            Norm::Infinity => {
                let local = v.iter().fold(0.0_f64, |max, x| max.max(x.abs()));
                Some(conn.reduce(local, Reduction::Max))
            }
            Norm::Euclidean => Some(sum_squares().sqrt()),
            Norm::L2 => {
                #[allow(clippy::cast_precision_loss)]
                let n = conn.reduce(v.len() as f64, Reduction::Sum);
                if n > 0.0 {
                    Some((sum_squares() / n).sqrt())
                } else {
                    Some(0.0)
                }
            }
            Norm::L1 => Some(conn.reduce(v.iter().map(|x| x.abs()).sum(), Reduction::Sum)),
            Norm::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const V: [f64; 4] = [3.0, -4.0, 0.0, 0.0];

    #[test]
    fn single_partition_norms() {
        assert_relative_eq!(Norm::Infinity.measure(&V).unwrap(), 4.0);
        assert_relative_eq!(Norm::Euclidean.measure(&V).unwrap(), 5.0);
        assert_relative_eq!(Norm::L2.measure(&V).unwrap(), 2.5);
        assert_relative_eq!(Norm::L1.measure(&V).unwrap(), 7.0);
        assert_eq!(Norm::None.measure(&V), None);
    }

    #[test]
    fn empty_vector_measures_zero() {
        for norm in [Norm::Infinity, Norm::Euclidean, Norm::L2, Norm::L1] {
            assert_relative_eq!(norm.measure(&[]).unwrap(), 0.0);
        }
    }

    /// Pretends to be one of two identical partitions.
    struct Mirrored;

    impl Connectivity for Mirrored {
        fn reduce(&self, local: f64, op: Reduction) -> f64 {
            match op {
                Reduction::Sum => 2.0 * local,
                Reduction::Max => local,
            }
        }
    }

    #[test]
    fn norms_reduce_across_partitions() {
        assert_relative_eq!(Norm::Infinity.measure_across(&V, &Mirrored).unwrap(), 4.0);
        assert_relative_eq!(
            Norm::Euclidean.measure_across(&V, &Mirrored).unwrap(),
            50.0_f64.sqrt()
        );
        assert_relative_eq!(Norm::L2.measure_across(&V, &Mirrored).unwrap(), 2.5);
        assert_relative_eq!(Norm::L1.measure_across(&V, &Mirrored).unwrap(), 14.0);
    }
}
