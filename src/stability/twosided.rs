//! Two-sided stability checking.
//!
//! ## Blocking Pairs
//!
//! A two-sided matching is stable when no proposer and reviewer both
//! strictly prefer each other over (one of) their current partners. The
//! checker scans every proposer × reviewer pair, and within a pair every
//! slot on both sides, so many-to-one and many-to-many assignments are
//! covered by the same loop.
//!
//! ## Unmatched Slots
//!
//! Assignment matrices encode "unmatched" as the one-past-the-end id
//! (sentinel N for proposer slots, M for reviewer slots). The scan reads a
//! sentinel partner's utility as negative infinity through a virtual-row
//! accessor, so any real pairing beats staying unmatched and no padding
//! row ever needs to be materialized.
//!
//! All ids are 0-based, including inside the assignment matrices.

use tracing::warn;

use crate::error::{Error, Result};
use crate::types::Matrix;

/// Check a two-sided matching for stability.
///
/// # Arguments
///
/// * `proposer_utils` - N×M cardinal matrix; element `(i, j)` is proposer
///   `j`'s utility from reviewer `i`
/// * `reviewer_utils` - M×N cardinal matrix; element `(i, j)` is reviewer
///   `j`'s utility from proposer `i`
/// * `proposals` - M×sP assignment matrix; row `i` holds the reviewers
///   matched to proposer `i` (sentinel N = open slot)
/// * `engagements` - N×sR assignment matrix; row `j` holds the proposers
///   matched to reviewer `j` (sentinel M = open slot)
///
/// # Returns
///
/// `true` if no blocking pair exists. On the first blocking pair found the
/// checker emits a `warn!` diagnostic naming the two indices and returns
/// `false`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the utility matrices disagree on
/// market dimensions or an assignment matrix has the wrong row count.
pub fn check_stability(
    proposer_utils: &Matrix<f64>,
    reviewer_utils: &Matrix<f64>,
    proposals: &Matrix<usize>,
    engagements: &Matrix<usize>,
) -> Result<bool> {
    let n_proposers = proposer_utils.cols();
    let n_reviewers = proposer_utils.rows();
    if reviewer_utils.rows() != n_proposers || reviewer_utils.cols() != n_reviewers {
        return Err(Error::shape_mismatch(
            &[n_proposers, n_reviewers],
            &[reviewer_utils.rows(), reviewer_utils.cols()],
        ));
    }
    if proposals.rows() != n_proposers {
        return Err(Error::shape_mismatch(&[n_proposers], &[proposals.rows()]));
    }
    if engagements.rows() != n_reviewers {
        return Err(Error::shape_mismatch(&[n_reviewers], &[engagements.rows()]));
    }

    let proposer_slots = proposals.cols();
    let reviewer_slots = engagements.cols();

    for proposer in 0..n_proposers {
        for reviewer in 0..n_reviewers {
            for p_slot in 0..proposer_slots {
                for r_slot in 0..reviewer_slots {
                    // Would the reviewer trade its r_slot occupant for this
                    // proposer, and the proposer its p_slot partner for
                    // this reviewer?
                    let reviewer_gains = reviewer_utils.at(proposer, reviewer)
                        > virtual_row(reviewer_utils, engagements.at(reviewer, r_slot), reviewer);
                    let proposer_gains = proposer_utils.at(reviewer, proposer)
                        > virtual_row(proposer_utils, proposals.at(proposer, p_slot), proposer);
                    if reviewer_gains && proposer_gains {
                        warn!(
                            proposer,
                            reviewer, "matching is not stable: blocking pair found"
                        );
                        return Ok(false);
                    }
                }
            }
        }
    }
    Ok(true)
}

/// Utility of partner `i` in column `j`, reading the sentinel row as −∞
///
/// The sentinel (one past the last valid row) stands for "unmatched";
/// mapping it to negative infinity makes every real partner preferable.
#[inline]
fn virtual_row(utils: &Matrix<f64>, i: usize, j: usize) -> f64 {
    if i >= utils.rows() {
        f64::NEG_INFINITY
    } else {
        utils.at(i, j)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// One-column assignment matrix from a vector
    fn assignment(slots: Vec<usize>) -> Matrix<usize> {
        let rows = slots.len();
        Matrix::from_col_major(rows, 1, slots).unwrap()
    }

    /// The three-by-three market used across the engine tests: proposer
    /// utilities derived from preference ranks, reviewer utilities
    /// explicit.
    fn small_market() -> (Matrix<f64>, Matrix<f64>) {
        // Column j = proposer j's utility over reviewers.
        let proposer_utils = Matrix::from_cols(vec![
            vec![2.0, 3.0, 1.0],
            vec![3.0, 2.0, 1.0],
            vec![1.0, 2.0, 3.0],
        ])
        .unwrap();
        // Column j = reviewer j's utility over proposers.
        let reviewer_utils = Matrix::from_cols(vec![
            vec![2.0, 1.0, 0.0],
            vec![1.0, 2.0, 0.0],
            vec![0.0, 1.0, 2.0],
        ])
        .unwrap();
        (proposer_utils, reviewer_utils)
    }

    #[test]
    fn test_proposer_optimal_matching_is_stable() {
        let (pu, ru) = small_market();
        let stable = check_stability(
            &pu,
            &ru,
            &assignment(vec![1, 0, 2]),
            &assignment(vec![1, 0, 2]),
        )
        .unwrap();
        assert!(stable);
    }

    #[test]
    fn test_reviewer_optimal_matching_is_also_stable() {
        // The identity assignment gives every reviewer its favorite; with
        // both sides served there is no blocking pair either.
        let (pu, ru) = small_market();
        let stable = check_stability(
            &pu,
            &ru,
            &assignment(vec![0, 1, 2]),
            &assignment(vec![0, 1, 2]),
        )
        .unwrap();
        assert!(stable);
    }

    #[test]
    fn test_blocking_pair_detected() {
        // Reversing the assignment leaves proposer 1 and reviewer 0 both
        // wanting each other back.
        let (pu, ru) = small_market();
        let stable = check_stability(
            &pu,
            &ru,
            &assignment(vec![2, 1, 0]),
            &assignment(vec![2, 1, 0]),
        )
        .unwrap();
        assert!(!stable);
    }

    #[test]
    fn test_unmatched_proposer_stable_when_reviewers_served() {
        // Three proposers, two reviewers; proposer 1 is unmatched (slot
        // carries the sentinel 2) yet both reviewers hold partners they
        // would not trade down from.
        let proposer_utils =
            Matrix::from_cols(vec![vec![2.0, 1.0], vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
        let reviewer_utils =
            Matrix::from_cols(vec![vec![3.0, 1.0, 3.0], vec![2.0, 1.0, 2.0]]).unwrap();
        let stable = check_stability(
            &proposer_utils,
            &reviewer_utils,
            &assignment(vec![0, 2, 1]),
            &assignment(vec![0, 2]),
        )
        .unwrap();
        assert!(stable);
    }

    #[test]
    fn test_unmatched_reviewer_reads_as_negative_infinity() {
        // Two proposers, three reviewers; reviewer 2 is unmatched (sentinel
        // 2 in its engagement slot). Nobody wants reviewer 2 over their
        // current partner, so the matching stays stable.
        let proposer_utils =
            Matrix::from_cols(vec![vec![3.0, 2.0, 1.0], vec![3.0, 2.0, 1.0]]).unwrap();
        let reviewer_utils = Matrix::from_cols(vec![
            vec![3.0, 2.0],
            vec![3.0, 2.0],
            vec![3.0, 2.0],
        ])
        .unwrap();
        let stable = check_stability(
            &proposer_utils,
            &reviewer_utils,
            &assignment(vec![0, 1]),
            &assignment(vec![0, 1, 2]),
        )
        .unwrap();
        assert!(stable);
    }

    #[test]
    fn test_unmatched_proposer_blocks_when_reviewer_prefers() {
        // Proposer 1 is unmatched while reviewer 1 holds a partner it
        // likes less: (1, 1) blocks.
        let proposer_utils =
            Matrix::from_cols(vec![vec![2.0, 1.0], vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap();
        let reviewer_utils = Matrix::from_cols(vec![
            vec![3.0, 2.0, 1.0],
            vec![1.0, 3.0, 2.0],
        ])
        .unwrap();
        let stable = check_stability(
            &proposer_utils,
            &reviewer_utils,
            &assignment(vec![0, 2, 1]),
            &assignment(vec![0, 2]),
        )
        .unwrap();
        assert!(!stable);
    }

    #[test]
    fn test_many_to_one_stable() {
        // Two reviewers with two slots each absorb four proposers; the
        // top two land on reviewer 0, which everyone prefers.
        let proposer_utils = Matrix::from_cols(vec![
            vec![2.0, 1.0],
            vec![2.0, 1.0],
            vec![2.0, 1.0],
            vec![2.0, 1.0],
        ])
        .unwrap();
        let reviewer_utils = Matrix::from_cols(vec![
            vec![4.0, 3.0, 2.0, 1.0],
            vec![4.0, 3.0, 2.0, 1.0],
        ])
        .unwrap();
        let proposals = Matrix::from_col_major(4, 1, vec![0, 0, 1, 1]).unwrap();
        let engagements = Matrix::from_col_major(2, 2, vec![0, 2, 1, 3]).unwrap();
        let stable =
            check_stability(&proposer_utils, &reviewer_utils, &proposals, &engagements).unwrap();
        assert!(stable);
    }

    #[test]
    fn test_many_to_one_blocking_pair() {
        // Swap proposers 1 and 2 across the reviewers: proposer 1 now sits
        // at reviewer 1 while reviewer 0 holds the worse proposer 2.
        let proposer_utils = Matrix::from_cols(vec![
            vec![2.0, 1.0],
            vec![2.0, 1.0],
            vec![2.0, 1.0],
            vec![2.0, 1.0],
        ])
        .unwrap();
        let reviewer_utils = Matrix::from_cols(vec![
            vec![4.0, 3.0, 2.0, 1.0],
            vec![4.0, 3.0, 2.0, 1.0],
        ])
        .unwrap();
        let proposals = Matrix::from_col_major(4, 1, vec![0, 1, 0, 1]).unwrap();
        let engagements = Matrix::from_col_major(2, 2, vec![0, 2, 1, 3]).unwrap();
        let stable =
            check_stability(&proposer_utils, &reviewer_utils, &proposals, &engagements).unwrap();
        assert!(!stable);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let (pu, _) = small_market();
        let bad_ru = Matrix::from_cols(vec![vec![1.0, 2.0]]).unwrap();
        assert!(check_stability(
            &pu,
            &bad_ru,
            &assignment(vec![0, 1, 2]),
            &assignment(vec![0, 1, 2]),
        )
        .is_err());
    }
}
