//! tsdiff Prover Library
//!
//! Tooling around the identity difficulty engine: persisted identity
//! state, digest selection and a multi-threaded search that raises an
//! identity's difficulty by advancing its counter.
//!
//! # Example
//!
//! ```rust
//! use tsdiff::{improve, Algorithm, ImproveConfig};
//!
//! let config = ImproveConfig { threads: Some(2), ..ImproveConfig::default() };
//! let outcome = improve(b"identity", Algorithm::Sha1, 0, 8, &config).unwrap();
//! assert!(outcome.difficulty >= 8);
//! assert_eq!(Algorithm::Sha1.difficulty(b"identity", outcome.counter), outcome.difficulty);
//! ```

// Re-export the core algorithm
pub use tsdiff_core as difficulty;

pub mod algorithm;
pub mod config;
pub mod error;
pub mod identity;
pub mod improve;

// Convenience re-exports
pub use algorithm::{Algorithm, Engine};
pub use config::ImproveConfig;
pub use error::ProverError;
pub use identity::{IdentityError, IdentityState};
pub use improve::{improve, ImproveOutcome};
