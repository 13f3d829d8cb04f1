use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProverError {
    #[error("Target difficulty {target} exceeds the {max}-bit maximum of {algorithm}")]
    UnreachableTarget {
        target: u32,
        max: u32,
        algorithm: &'static str,
    },

    #[error("No counter reached the target after {searched} candidates")]
    NotFound { searched: u64 },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Phase error: {0}")]
    Phase(#[from] tsdiff_core::PhaseError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
