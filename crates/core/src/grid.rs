/// Metadata describing the layout of a state on its grid.
///
/// Observers receive this once at registration so they can size buffers or
/// prepare an output schema before integration begins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateInfo {
    /// Number of degrees of freedom in a state.
    pub dofs: usize,

    /// Optional names of the solution components (e.g. `["h", "hu"]`).
    pub labels: Vec<String>,
}

impl StateInfo {
    /// Creates metadata for a state with `dofs` unlabeled degrees of freedom.
    #[must_use]
    pub fn new(dofs: usize) -> Self {
        Self {
            dofs,
            labels: Vec::new(),
        }
    }

    /// Attaches component labels.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }
}

/// The spatial grid a discretized state lives on.
///
/// Grid construction and partitioning happen elsewhere; the integrator only
/// needs to know how many degrees of freedom a state must carry and what
/// metadata to hand to its observers.
pub trait Grid {
    /// Returns the number of degrees of freedom of a state on this grid.
    fn dofs(&self) -> usize;

    /// Returns the metadata passed to observers on registration.
    fn info(&self) -> StateInfo {
        StateInfo::new(self.dofs())
    }
}

impl Grid for StateInfo {
    fn dofs(&self) -> usize {
        self.dofs
    }

    fn info(&self) -> StateInfo {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line {
        cells: usize,
    }

    impl Grid for Line {
        fn dofs(&self) -> usize {
            self.cells
        }
    }

    #[test]
    fn default_info_has_no_labels() {
        let info = Line { cells: 8 }.info();
        assert_eq!(info, StateInfo::new(8));
        assert!(info.labels.is_empty());
    }

    #[test]
    fn info_acts_as_grid() {
        let info = StateInfo::new(2).with_labels(["h", "hu"]);
        assert_eq!(info.dofs(), 2);
        assert_eq!(info.info().labels, vec!["h".to_string(), "hu".to_string()]);
    }
}
