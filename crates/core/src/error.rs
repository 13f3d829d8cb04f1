use thiserror::Error;

/// Rejected inputs of the phase arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhaseError {
    #[error("identity length {length} exceeds maximum {max}")]
    IdentityTooLong { length: usize, max: usize },
}
