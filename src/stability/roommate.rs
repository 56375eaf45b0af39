//! One-sided (roommate) stability checking.

use tracing::warn;

use crate::error::{Error, Result};
use crate::types::Matrix;

/// Check a roommate matching for stability.
///
/// A pair `{i, j}` blocks when each ranks the other above their assigned
/// partner. Ranking is read straight off the preference columns: `i`
/// prefers `j` when `j` appears before `matching[i]` in `i`'s column.
///
/// # Arguments
///
/// * `pref` - (N−1)×N ordinal matrix; column `j` is agent `j`'s ranking of
///   the other agents
/// * `matching` - length-N assignment; `matching[i]` is `i`'s partner
///
/// # Returns
///
/// `true` if no pair blocks. On the first blocking pair the checker emits
/// a `warn!` naming the two agents and returns `false`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `matching` is not length N or
/// `pref` is not (N−1)×N.
pub fn check_stability_roommate(pref: &Matrix<usize>, matching: &[usize]) -> Result<bool> {
    let n = pref.cols();
    if n > 0 && pref.rows() != n - 1 {
        return Err(Error::shape_mismatch(&[n - 1, n], &[pref.rows(), n]));
    }
    if matching.len() != n {
        return Err(Error::shape_mismatch(&[n], &[matching.len()]));
    }

    for i in 0..n {
        for j in i + 1..n {
            if prefers(pref, i, j, matching[i]) && prefers(pref, j, i, matching[j]) {
                warn!(agent_a = i, agent_b = j, "matching is not stable: pair would defect");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Does `agent` rank `candidate` strictly above `partner`?
///
/// Scans `agent`'s column top-down; seeing `partner` first (including when
/// candidate and partner coincide) means no, seeing `candidate` first
/// means yes.
fn prefers(pref: &Matrix<usize>, agent: usize, candidate: usize, partner: usize) -> bool {
    for &id in pref.col(agent) {
        if id == partner {
            return false;
        }
        if id == candidate {
            return true;
        }
    }
    false
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation_market() -> Matrix<usize> {
        Matrix::from_cols(vec![
            vec![1, 2, 3],
            vec![2, 3, 0],
            vec![3, 0, 1],
            vec![0, 1, 2],
        ])
        .unwrap()
    }

    #[test]
    fn test_stable_matching_accepted() {
        let pref = rotation_market();
        assert!(check_stability_roommate(&pref, &[2, 3, 0, 1]).unwrap());
    }

    #[test]
    fn test_first_choice_pairing_still_blocks() {
        // Pairing everyone with their phase-one proposee looks plausible
        // but 1 and 3 still prefer each other over their partners.
        let pref = rotation_market();
        assert!(!check_stability_roommate(&pref, &[1, 0, 3, 2]).unwrap());
    }

    #[test]
    fn test_blocking_pair_detected() {
        // Pairing (0,3) and (1,2) leaves 0 and 2 preferring each other.
        let pref = rotation_market();
        assert!(!check_stability_roommate(&pref, &[3, 2, 1, 0]).unwrap());
    }

    #[test]
    fn test_two_agents_always_stable() {
        let pref = Matrix::from_cols(vec![vec![1], vec![0]]).unwrap();
        assert!(check_stability_roommate(&pref, &[1, 0]).unwrap());
    }

    #[test]
    fn test_wrong_matching_length_rejected() {
        let pref = rotation_market();
        assert!(check_stability_roommate(&pref, &[1, 0]).is_err());
    }
}
