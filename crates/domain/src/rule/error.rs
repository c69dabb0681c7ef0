use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule not found: {0}")]
    NotFound(u64),

    /// The viewer does not own this rule; the mutation was refused locally
    /// and no request was made.
    #[error("rule {0} belongs to another user")]
    NotOwned(u64),
}
