//! Identity state persistence
//!
//! Keeps the identity bytes, the counter currently in use and the best
//! counter found so far in a small JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tsdiff_core::{MAX_IDENTITY_LENGTH, is_slow_phase};

use crate::algorithm::Algorithm;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity must not be empty")]
    Empty,

    #[error("Invalid identity hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Invalid identity file format: {0}")]
    InvalidFormat(#[from] serde_json::Error),
}

/// Persisted identity and counter progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityState {
    #[serde(with = "hex")]
    identity: Vec<u8>,
    /// Counter currently in use
    pub counter: u64,
    /// Highest-scoring counter seen so far
    pub best_counter: u64,
    pub best_difficulty: u32,
    #[serde(default)]
    pub algorithm: Algorithm,
}

impl IdentityState {
    /// Start tracking `identity` at counter 0
    pub fn new(identity: Vec<u8>, algorithm: Algorithm) -> Result<Self, IdentityError> {
        if identity.is_empty() {
            return Err(IdentityError::Empty);
        }

        if identity.len() > MAX_IDENTITY_LENGTH {
            tracing::warn!(
                length = identity.len(),
                max = MAX_IDENTITY_LENGTH,
                "identity exceeds the length budget; every counter is in the slow phase"
            );
        }

        let best_difficulty = algorithm.difficulty(&identity, 0);
        Ok(Self {
            identity,
            counter: 0,
            best_counter: 0,
            best_difficulty,
            algorithm,
        })
    }

    /// Parse a hex-encoded identity
    pub fn from_hex(identity_hex: &str, algorithm: Algorithm) -> Result<Self, IdentityError> {
        let identity = hex::decode(identity_hex.trim())?;
        Self::new(identity, algorithm)
    }

    pub fn identity(&self) -> &[u8] {
        &self.identity
    }

    /// Difficulty at the current counter
    pub fn difficulty(&self) -> u32 {
        self.algorithm.difficulty(&self.identity, self.counter)
    }

    pub fn is_slow_phase(&self) -> bool {
        is_slow_phase(self.identity.len(), self.counter)
    }

    /// Move to `counter`, remembering it if it beats the best score
    ///
    /// Returns true when the best counter changed.
    pub fn advance(&mut self, counter: u64, difficulty: u32) -> bool {
        self.counter = counter;
        if difficulty > self.best_difficulty {
            self.best_counter = counter;
            self.best_difficulty = difficulty;
            return true;
        }
        false
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), IdentityError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, IdentityError> {
        let content = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content)?;
        if state.identity.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(state)
    }
}

/// Get the default identity state path
#[cfg(feature = "cli")]
pub fn default_state_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".tsdiff").join("identity.json")
}

/// Ensure the parent directory of `path` exists
pub fn ensure_state_dir(path: &Path) -> Result<PathBuf, IdentityError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_identity() {
        let state = IdentityState::new(b"abc".to_vec(), Algorithm::Sha256).unwrap();
        assert_eq!(state.counter, 0);
        assert_eq!(state.best_counter, 0);
        assert_eq!(state.best_difficulty, 1);
        assert_eq!(state.difficulty(), 1);
        assert!(!state.is_slow_phase());
    }

    #[test]
    fn test_empty_identity_rejected() {
        assert!(matches!(
            IdentityState::new(Vec::new(), Algorithm::Sha1),
            Err(IdentityError::Empty)
        ));
    }

    #[test]
    fn test_from_hex() {
        let state = IdentityState::from_hex(" 616263\n", Algorithm::Sha1).unwrap();
        assert_eq!(state.identity(), b"abc");

        assert!(matches!(
            IdentityState::from_hex("zz", Algorithm::Sha1),
            Err(IdentityError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_long_identity_is_slow() {
        let state = IdentityState::new(vec![1u8; 130], Algorithm::Sha1).unwrap();
        assert!(state.is_slow_phase());
    }

    #[test]
    fn test_advance_tracks_best() {
        let mut state = IdentityState::new(b"abc".to_vec(), Algorithm::Sha256).unwrap();
        assert!(!state.advance(5, 1));
        assert_eq!(state.counter, 5);
        assert_eq!(state.best_counter, 0);

        assert!(state.advance(9, 12));
        assert_eq!(state.best_counter, 9);
        assert_eq!(state.best_difficulty, 12);

        assert!(!state.advance(10, 3));
        assert_eq!(state.counter, 10);
        assert_eq!(state.best_counter, 9);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = ensure_state_dir(&dir.path().join("nested").join("identity.json")).unwrap();

        let mut state = IdentityState::new(b"abc".to_vec(), Algorithm::Blake3).unwrap();
        state.advance(42, 99);
        state.save_to_file(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"616263\""));
        assert!(content.contains("\"blake3\""));

        let loaded = IdentityState::load_from_file(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            IdentityState::load_from_file(&path),
            Err(IdentityError::InvalidFormat(_))
        ));
    }
}
