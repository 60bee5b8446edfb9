//! Score engine configuration

/// Configuration for score propagation
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Hard cap on recursion depth for effective-score propagation
    ///
    /// Guarantees termination even if the graph's acyclicity invariant
    /// were ever violated by a bug. At the cap, upstream contributions are
    /// dropped and only the local base score remains.
    pub max_depth: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}
