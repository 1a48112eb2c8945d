use thiserror::Error;

use crate::world::EntityHandle;

/// Precondition and configuration failures surfaced by the arena core.
///
/// Runtime edge cases (zero-length directions, no eligible target, unknown
/// action slot values) are never reported through this type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("Snapshot has {actual} targets but the encoder was built for {expected}")]
    TargetCountMismatch { expected: usize, actual: usize },

    #[error("Action selection needs {expected} slots, got {actual}")]
    ActionSizeMismatch { expected: usize, actual: usize },

    #[error("Entity handle already registered: {0:?}")]
    DuplicateEntity(EntityHandle),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No agent registered with id {0}")]
    UnknownAgent(String),

    #[error("Team number 0 is reserved for \"none\" and cannot own an agent")]
    ReservedTeam,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_count_mismatch_display() {
        let e = CoreError::TargetCountMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            e.to_string(),
            "Snapshot has 3 targets but the encoder was built for 4"
        );
    }

    #[test]
    fn duplicate_entity_display() {
        let e = CoreError::DuplicateEntity(EntityHandle(7));
        assert!(e.to_string().contains("already registered"));
    }

    #[test]
    fn reserved_team_display() {
        assert!(CoreError::ReservedTeam.to_string().contains("reserved"));
    }

    #[test]
    fn invalid_config_display() {
        let e = CoreError::InvalidConfig("scan cutoff must be positive".to_string());
        assert_eq!(
            e.to_string(),
            "Invalid configuration: scan cutoff must be positive"
        );
    }
}
