//! Error types for matchmarkets.

use thiserror::Error;

/// Result type alias using the crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when running a matching engine or checker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input matrices have inconsistent dimensions
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected (rows, cols)
        expected: Vec<usize>,
        /// Actual (rows, cols)
        got: Vec<usize>,
    },

    /// An agent is missing from another agent's preference list
    ///
    /// Surfaced when an engine needs the rank of `agent` inside
    /// `list_owner`'s preference column and cannot find it. Preference
    /// columns must be complete and strict.
    #[error("invalid preferences: agent {agent} does not appear in agent {list_owner}'s list")]
    InvalidPreferences {
        /// The agent that could not be located
        agent: usize,
        /// The agent whose preference column was scanned
        list_owner: usize,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an invalid preferences error
    pub fn invalid_preferences(agent: usize, list_owner: usize) -> Self {
        Self::InvalidPreferences { agent, list_owner }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = Error::shape_mismatch(&[3, 2], &[2, 3]);
        let msg = err.to_string();
        assert!(msg.contains("[3, 2]"));
        assert!(msg.contains("[2, 3]"));
    }

    #[test]
    fn test_invalid_preferences_display() {
        let err = Error::invalid_preferences(4, 1);
        assert_eq!(
            err.to_string(),
            "invalid preferences: agent 4 does not appear in agent 1's list"
        );
    }
}
