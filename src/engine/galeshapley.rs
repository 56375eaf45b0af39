//! Gale-Shapley deferred acceptance.
//!
//! ## Matching Rules
//!
//! - Proposers walk their preference columns best-first.
//! - A free reviewer accepts any proposal.
//! - An engaged reviewer trades up only for a strictly higher utility,
//!   returning the displaced proposer to the bachelor queue.
//! - The loop ends when every proposer is engaged or has exhausted its
//!   column; on unequal sides the long side leaves agents unmatched.
//!
//! The result is the proposer-optimal stable matching: no proposer can do
//! better in any stable matching of the same market.
//!
//! ## Determinism
//!
//! The bachelor queue is seeded `M−1, M−2, …, 0` and processed FIFO.
//! Which stable matching exists does not depend on this order, but the
//! byte-exact output does, so the seeding is fixed.
//!
//! ## Example
//!
//! ```
//! use matchmarkets::engine::gale_shapley;
//! use matchmarkets::types::Matrix;
//!
//! // Three proposers, three reviewers. Column j is proposer j's ranking.
//! let pref = Matrix::from_cols(vec![
//!     vec![1usize, 0, 2],
//!     vec![0, 1, 2],
//!     vec![2, 1, 0],
//! ]).unwrap();
//! // Row i is proposer i's utility in each reviewer's eyes (col = reviewer).
//! let utils = Matrix::from_cols(vec![
//!     vec![2.0, 1.0, 0.0],
//!     vec![1.0, 2.0, 0.0],
//!     vec![0.0, 1.0, 2.0],
//! ]).unwrap();
//!
//! let outcome = gale_shapley(&pref, &utils).unwrap();
//! assert_eq!(outcome.proposals, vec![1, 0, 2]);
//! assert_eq!(outcome.engagements, vec![1, 0, 2]);
//! ```

use std::collections::VecDeque;

use tracing::trace;

use crate::error::{Error, Result};
use crate::types::{Matrix, TwoSidedMatch};

/// Compute the proposer-optimal stable matching by deferred acceptance.
///
/// # Arguments
///
/// * `proposer_pref` - N×M ordinal matrix; column `j` lists proposer `j`'s
///   reviewers in descending preference
/// * `reviewer_utils` - M×N cardinal matrix; element `(i, j)` is reviewer
///   `j`'s utility from proposer `i` (higher = preferred)
///
/// # Returns
///
/// A [`TwoSidedMatch`] whose proposals vector has length M and engagements
/// vector length N, with unmatched slots carrying the sentinels N and M.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `reviewer_utils` is not M×N.
pub fn gale_shapley(
    proposer_pref: &Matrix<usize>,
    reviewer_utils: &Matrix<f64>,
) -> Result<TwoSidedMatch> {
    let n_reviewers = proposer_pref.rows();
    let n_proposers = proposer_pref.cols();
    if reviewer_utils.rows() != n_proposers || reviewer_utils.cols() != n_reviewers {
        return Err(Error::shape_mismatch(
            &[n_proposers, n_reviewers],
            &[reviewer_utils.rows(), reviewer_utils.cols()],
        ));
    }

    // Sentinels: one past the last valid id on the opposite side.
    let mut proposals = vec![n_reviewers; n_proposers];
    let mut engagements = vec![n_proposers; n_reviewers];

    // Every proposer starts out a bachelor, seeded M-1..0.
    let mut bachelors: VecDeque<usize> = (0..n_proposers).rev().collect();

    while let Some(&proposer) = bachelors.front() {
        // Walk the proposer's column best-first.
        for &reviewer in proposer_pref.col(proposer) {
            if engagements[reviewer] == n_proposers {
                // Free reviewer accepts outright.
                engagements[reviewer] = proposer;
                proposals[proposer] = reviewer;
                trace!(proposer, reviewer, "engaged free reviewer");
                break;
            }
            let holder = engagements[reviewer];
            if reviewer_utils.at(proposer, reviewer) > reviewer_utils.at(holder, reviewer) {
                // The reviewer trades up; the holder rejoins the queue.
                proposals[holder] = n_reviewers;
                bachelors.push_back(holder);
                engagements[reviewer] = proposer;
                proposals[proposer] = reviewer;
                trace!(proposer, reviewer, displaced = holder, "displaced engagement");
                break;
            }
        }
        // Pop at the end: the proposer either matched or ran out of
        // reviewers willing to hold its proposal.
        bachelors.pop_front();
    }

    Ok(TwoSidedMatch::new(proposals, engagements))
}

// ============================================================================
// Unit Tests
// ============================================================================
