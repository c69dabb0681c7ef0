use thiserror::Error;

use crate::alert::entity::AlertStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    #[error("alert not found: {0}")]
    NotFound(u64),

    #[error("alert {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: u64,
        from: AlertStatus,
        to: AlertStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_message_names_both_states() {
        let err = AlertError::InvalidTransition {
            id: 3,
            from: AlertStatus::Resolved,
            to: AlertStatus::Pending,
        };
        assert_eq!(format!("{err}"), "alert 3 cannot move from resolved to pending");
    }
}
