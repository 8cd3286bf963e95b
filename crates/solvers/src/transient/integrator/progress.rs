/// What an integration call accomplished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Simulation time reached.
    pub time: f64,

    /// Number of steps taken.
    pub steps: usize,
}
