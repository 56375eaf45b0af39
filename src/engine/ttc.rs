//! Top trading cycles for the housing market.
//!
//! ## Algorithm
//!
//! Every agent owns one indivisible good and ranks all goods (identified
//! by their owners, self included). The engine repeatedly chases each
//! agent's top remaining choice, building a pointer chain; when the chain
//! closes into a cycle, the goods trade around the cycle and its members
//! leave the market. Agents left pointing into a removed cycle form a
//! "tail" that the next chase resumes from, so no pointer work is
//! repeated.
//!
//! The result is the unique core allocation of the housing market
//! (Shapley-Scarf): Pareto-efficient, with self-matches allowed.
//!
//! ## Example
//!
//! ```
//! use matchmarkets::engine::top_trading_cycle;
//! use matchmarkets::types::Matrix;
//!
//! // Three agents whose top choices chase each other in one cycle.
//! let pref = Matrix::from_cols(vec![
//!     vec![1usize, 2, 0],
//!     vec![2, 0, 1],
//!     vec![0, 1, 2],
//! ]).unwrap();
//!
//! let matching = top_trading_cycle(&pref).unwrap();
//! assert_eq!(matching, vec![1, 2, 0]);
//! ```

use tracing::trace;

use crate::error::{Error, Result};
use crate::types::Matrix;

/// "No assignment yet" marker used while chains are under construction
const UNASSIGNED: usize = usize::MAX;

/// Compute the top trading cycle allocation.
///
/// # Arguments
///
/// * `pref` - N×N ordinal matrix; column `j` ranks all agents' goods
///   (including `j`'s own) in descending preference
///
/// # Returns
///
/// A length-N vector where element `i` is the agent whose good `i`
/// receives. The vector is a function from agents to goods covering every
/// agent exactly once; `matching[i] == i` is a valid self-match.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `pref` is not square, or
/// [`Error::InvalidPreferences`] if a column omits an unmatched agent
/// (columns must be complete permutations).
pub fn top_trading_cycle(pref: &Matrix<usize>) -> Result<Vec<usize>> {
    let n = pref.cols();
    if pref.rows() != n {
        return Err(Error::shape_mismatch(&[n, n], &[pref.rows(), n]));
    }

    let mut is_matched = vec![false; n];
    let mut matching = vec![UNASSIGNED; n];
    let mut matched_count = 0;
    let mut resume_from: Option<usize> = None;

    while matched_count < n {
        // Start a chase: either resume a surviving tail or pick the
        // lowest-indexed unmatched agent.
        let mut current = match resume_from.take() {
            Some(agent) => agent,
            None => first_unmatched(&is_matched),
        };

        // Chase top choices until the chain closes into a cycle.
        let cycle_start = loop {
            let choice = top_remaining_choice(pref, &is_matched, current)?;
            matching[current] = choice;
            trace!(current, choice, "points at");
            if matching[choice] != UNASSIGNED {
                // The chain already runs through `choice`: cycle found,
                // running from `choice` back around to `current`.
                break choice;
            }
            current = choice;
        };

        // Trade around the cycle: everyone on it leaves the market.
        let mut member = cycle_start;
        while member != current {
            is_matched[member] = true;
            matched_count += 1;
            member = matching[member];
        }
        is_matched[current] = true;
        matched_count += 1;
        trace!(cycle_start, cycle_end = current, "removed cycle");

        // A tail agent is one still unmatched but already pointing at a
        // now-matched agent; resuming there keeps its chain work. If no
        // tail survives, the next chase starts fresh.
        resume_from = (0..n)
            .find(|&agent| {
                !is_matched[agent]
                    && matching[agent] != UNASSIGNED
                    && is_matched[matching[agent]]
            });
    }

    Ok(matching)
}

/// Lowest-indexed unmatched agent
fn first_unmatched(is_matched: &[bool]) -> usize {
    is_matched.iter().position(|&m| !m).unwrap_or(0)
}

/// The highest-ranked agent in `agent`'s column whose good is still in play
fn top_remaining_choice(pref: &Matrix<usize>, is_matched: &[bool], agent: usize) -> Result<usize> {
    pref.col(agent)
        .iter()
        .copied()
        .find(|&candidate| !is_matched[candidate])
        .ok_or_else(|| Error::invalid_preferences(agent, agent))
}

// ============================================================================
// Unit Tests
// ============================================================================
