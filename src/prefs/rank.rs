//! Cardinal-to-ordinal preference conversion.
//!
//! The engines consume ordinal preference tables (column `j` lists agent
//! `j`'s choices best-first), but callers often hold cardinal utilities.
//! These helpers bridge the two representations:
//!
//! - [`sort_index`]: per-column descending argsort, turning a utility
//!   matrix into an ordinal preference matrix.
//! - [`rank_index`]: per-column inverse permutation, turning a sorted-index
//!   matrix back into ranks (row `i` of the output holds the descending
//!   rank of element `i`).
//! - [`sort_index_one_sided`]: the roommate-market variant, which skips
//!   each agent's own index so a column over N−1 utilities yields ids in
//!   `[0, N) \ {j}`.
//!
//! Ties are broken by index order (the underlying sort is stable), so the
//! conversion is deterministic.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::types::Matrix;

/// Per-column descending argsort.
///
/// Row 0 of column `j` in the result is the row index of the largest
/// element of column `j` in `u`, row 1 the second largest, and so on.
///
/// ## Example
///
/// ```
/// use matchmarkets::prefs::sort_index;
/// use matchmarkets::types::Matrix;
///
/// let u = Matrix::from_cols(vec![vec![0.5, 2.0, 1.0]]).unwrap();
/// let sorted = sort_index(&u);
/// assert_eq!(sorted.col(0), &[1, 2, 0]);
/// ```
pub fn sort_index(u: &Matrix<f64>) -> Matrix<usize> {
    let mut sorted = Matrix::from_elem(u.rows(), u.cols(), 0usize);
    for j in 0..u.cols() {
        let column = u.col(j);
        let mut order: Vec<usize> = (0..u.rows()).collect();
        order.sort_by(|&a, &b| descending(column[a], column[b]));
        sorted.col_mut(j).copy_from_slice(&order);
    }
    sorted
}

/// Per-column inverse permutation.
///
/// If `sorted` came from [`sort_index`], then `rank_index(&sorted)[i, j]`
/// is the descending rank of the original element `(i, j)` within its
/// column: 0 for the column's largest value, `rows − 1` for its smallest.
///
/// ## Example
///
/// ```
/// use matchmarkets::prefs::{rank_index, sort_index};
/// use matchmarkets::types::Matrix;
///
/// let u = Matrix::from_cols(vec![vec![0.5, 2.0, 1.0]]).unwrap();
/// let ranks = rank_index(&sort_index(&u));
/// // 0.5 is the smallest (rank 2), 2.0 the largest (rank 0).
/// assert_eq!(ranks.col(0), &[2, 0, 1]);
/// ```
pub fn rank_index(sorted: &Matrix<usize>) -> Matrix<usize> {
    let mut ranks = Matrix::from_elem(sorted.rows(), sorted.cols(), 0usize);
    for j in 0..sorted.cols() {
        for i in 0..sorted.rows() {
            ranks.set(sorted.at(i, j), j, i);
        }
    }
    ranks
}

/// Descending argsort for a one-sided market.
///
/// The input is an (N−1)×N utility matrix: column `j` holds agent `j`'s
/// utilities over the other N−1 agents, with agent `j` itself skipped.
/// After sorting each column, every index equal to or exceeding its own
/// column index is shifted up by one, producing ids in `[0, N) \ {j}`,
/// the shape the roommate engine expects.
///
/// ## Example
///
/// ```
/// use matchmarkets::prefs::sort_index_one_sided;
/// use matchmarkets::types::Matrix;
///
/// // Agent 0 rates agents {1, 2}; agent 1 rates {0, 2}; agent 2 rates {0, 1}.
/// let u = Matrix::from_cols(vec![
///     vec![10.0, 5.0],
///     vec![3.0, 7.0],
///     vec![1.0, 9.0],
/// ]).unwrap();
/// let pref = sort_index_one_sided(&u);
/// assert_eq!(pref.col(0), &[1, 2]);
/// assert_eq!(pref.col(1), &[2, 0]);
/// assert_eq!(pref.col(2), &[1, 0]);
/// ```
pub fn sort_index_one_sided(u: &Matrix<f64>) -> Matrix<usize> {
    let mut sorted = sort_index(u);
    for j in 0..sorted.cols() {
        for slot in sorted.col_mut(j) {
            if *slot >= j {
                *slot += 1;
            }
        }
    }
    sorted
}

/// Validate a two-sided preference matrix.
///
/// Every column must be a permutation of `[0, rows)`: complete and strict.
///
/// # Errors
///
/// Returns [`Error::InvalidPreferences`] naming the first id missing from
/// a column.
pub fn validate_two_sided(pref: &Matrix<usize>) -> Result<()> {
    for j in 0..pref.cols() {
        check_permutation(pref.col(j), j, pref.rows(), None)?;
    }
    Ok(())
}

/// Validate a one-sided (roommate) preference matrix.
///
/// The matrix must be (N−1)×N and every column `j` a permutation of
/// `[0, N) \ {j}`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] for a non-(N−1)×N shape, or
/// [`Error::InvalidPreferences`] naming the first id missing from a column.
pub fn validate_one_sided(pref: &Matrix<usize>) -> Result<()> {
    let n = pref.cols();
    if n > 0 && pref.rows() != n - 1 {
        return Err(Error::shape_mismatch(&[n - 1, n], &[pref.rows(), n]));
    }
    for j in 0..n {
        check_permutation(pref.col(j), j, n, Some(j))?;
    }
    Ok(())
}

/// Check that `column` covers `[0, bound)` exactly once, minus `skip`
fn check_permutation(
    column: &[usize],
    owner: usize,
    bound: usize,
    skip: Option<usize>,
) -> Result<()> {
    let mut seen = vec![false; bound];
    for &id in column {
        if id >= bound || Some(id) == skip || seen[id] {
            return Err(Error::invalid_preferences(id, owner));
        }
        seen[id] = true;
    }
    for id in 0..bound {
        if !seen[id] && Some(id) != skip {
            return Err(Error::invalid_preferences(id, owner));
        }
    }
    Ok(())
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_index_descending() {
        let u = Matrix::from_cols(vec![vec![1.0, 3.0, 2.0], vec![9.0, 8.0, 7.0]]).unwrap();
        let sorted = sort_index(&u);
        assert_eq!(sorted.col(0), &[1, 2, 0]);
        assert_eq!(sorted.col(1), &[0, 1, 2]);
    }

    #[test]
    fn test_sort_index_stable_on_ties() {
        let u = Matrix::from_cols(vec![vec![5.0, 5.0, 7.0]]).unwrap();
        let sorted = sort_index(&u);
        // Tied entries keep index order.
        assert_eq!(sorted.col(0), &[2, 0, 1]);
    }

    #[test]
    fn test_rank_index_inverts_sort() {
        let u = Matrix::from_cols(vec![vec![0.1, 0.9, 0.5, 0.7]]).unwrap();
        let ranks = rank_index(&sort_index(&u));
        // Descending ranks: 0.9 -> 0, 0.7 -> 1, 0.5 -> 2, 0.1 -> 3.
        assert_eq!(ranks.col(0), &[3, 0, 2, 1]);
    }

    #[test]
    fn test_rank_round_trip_counts_larger_elements() {
        let u = Matrix::from_cols(vec![
            vec![2.5, -1.0, 4.0],
            vec![0.0, 1.0, -3.0],
        ])
        .unwrap();
        let ranks = rank_index(&sort_index(&u));
        for j in 0..u.cols() {
            for i in 0..u.rows() {
                let larger = u.col(j).iter().filter(|&&v| v > u.at(i, j)).count();
                assert_eq!(ranks.at(i, j), larger);
            }
        }
    }

    #[test]
    fn test_sort_index_one_sided_skips_self() {
        let u = Matrix::from_cols(vec![
            vec![10.0, 5.0],
            vec![3.0, 7.0],
            vec![1.0, 9.0],
        ])
        .unwrap();
        let pref = sort_index_one_sided(&u);
        for j in 0..pref.cols() {
            assert!(!pref.col(j).contains(&j), "column {} contains itself", j);
        }
        assert!(validate_one_sided(&pref).is_ok());
    }

    #[test]
    fn test_validate_two_sided_accepts_permutations() {
        let pref = Matrix::from_cols(vec![vec![1, 0, 2], vec![2, 1, 0]]).unwrap();
        assert!(validate_two_sided(&pref).is_ok());
    }

    #[test]
    fn test_validate_two_sided_rejects_duplicates() {
        let pref = Matrix::from_cols(vec![vec![1, 1, 2]]).unwrap();
        assert!(validate_two_sided(&pref).is_err());
    }

    #[test]
    fn test_validate_two_sided_rejects_out_of_range() {
        let pref = Matrix::from_cols(vec![vec![0, 1, 3]]).unwrap();
        assert!(validate_two_sided(&pref).is_err());
    }

    #[test]
    fn test_validate_one_sided_rejects_self() {
        let pref = Matrix::from_cols(vec![vec![1, 2], vec![0, 2], vec![2, 0]]).unwrap();
        let err = validate_one_sided(&pref);
        assert_eq!(err, Err(Error::invalid_preferences(2, 2)));
    }

    #[test]
    fn test_validate_one_sided_rejects_bad_shape() {
        let pref = Matrix::from_cols(vec![vec![1, 2, 0], vec![0, 2, 1], vec![0, 1, 2]]).unwrap();
        assert!(validate_one_sided(&pref).is_err());
    }
}
