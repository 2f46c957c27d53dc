use thiserror::Error;

#[derive(Debug, Error)]
pub enum MineError {
    /// Support and confidence thresholds must lie in (0, 1].
    #[error("{name} must be in (0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// A committed itemset or a rule-time subset lookup contradicts the
    /// store's invariants. Always fatal: continuing would produce wrong
    /// statistics.
    #[error("internal inconsistency: {detail}")]
    InternalInconsistency { detail: String },
}
