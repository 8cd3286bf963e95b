/// A global reduction applied across all partitions of a distributed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Sum,
    Max,
}

/// Reconciles degrees of freedom shared between mesh partitions.
///
/// A distributed solve calls [`reconcile`](Connectivity::reconcile) after
/// every operator application so shared degrees of freedom agree across
/// partitions, and [`reduce`](Connectivity::reduce) to turn partition-local
/// sums and maxima into global ones. Both are collective: when they return,
/// every partition holds the same result.
///
/// The defaults describe a single partition, and `()` is that connectivity.
pub trait Connectivity {
    /// Merges contributions to shared degrees of freedom in `v`.
    fn reconcile(&self, _v: &mut [f64]) {}

    /// Combines a partition-local value into a global one.
    fn reduce(&self, local: f64, _op: Reduction) -> f64 {
        local
    }
}

impl Connectivity for () {}

impl<T: Connectivity + ?Sized> Connectivity for &T {
    fn reconcile(&self, v: &mut [f64]) {
        (**self).reconcile(v);
    }

    fn reduce(&self, local: f64, op: Reduction) -> f64 {
        (**self).reduce(local, op)
    }
}
