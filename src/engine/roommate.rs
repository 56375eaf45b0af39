//! Irving's stable roommates algorithm.
//!
//! ## Two Phases
//!
//! **Phase 1 (proposals).** Every agent proposes down its preference
//! column; a proposee holds the best proposal seen so far and rejects the
//! rest. Passes repeat until either every agent's proposal is held (go to
//! phase 2) or some agent exhausts its column (no stable matching).
//!
//! **Phase 2 (rotation elimination).** The preference columns are reduced
//! to per-agent candidate tables: each agent discards everyone ranked below
//! its held proposer, and every discard is symmetric: removing `x` from
//! `i`'s table also removes `i` from `x`'s. While any table still holds
//! more than one candidate, the engine finds a rotation (a cycle of
//! second-choice / last-choice hops) and eliminates it, shrinking the
//! tables further. The matching is read off the singleton tables; a table
//! emptied along the way means no stable matching exists.
//!
//! Unlike the two-sided market, a stable matching need not exist
//! (Irving 1985 shows this procedure finds one exactly when it does).
//!
//! ## Example
//!
//! ```
//! use matchmarkets::engine::stable_roommates;
//! use matchmarkets::types::Matrix;
//!
//! // Four agents whose first choices pair them off mutually.
//! let pref = Matrix::from_cols(vec![
//!     vec![1usize, 2, 3],
//!     vec![0, 3, 2],
//!     vec![3, 0, 1],
//!     vec![2, 1, 0],
//! ]).unwrap();
//!
//! let matching = stable_roommates(&pref).unwrap();
//! assert_eq!(matching, Some(vec![1, 0, 3, 2]));
//! ```

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::types::Matrix;

/// Compute a stable roommate matching, if one exists.
///
/// # Arguments
///
/// * `pref` - (N−1)×N ordinal matrix; column `j` lists agent `j`'s ranking
///   of the other N−1 agents, complete and strict
///
/// # Returns
///
/// * `Ok(Some(matching))` - a stable matching; `matching[i]` is `i`'s
///   partner and `matching[matching[i]] == i` for every agent
/// * `Ok(None)` - no stable matching exists for these preferences
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `pref` is not (N−1)×N, or
/// [`Error::InvalidPreferences`] if a rank lookup fails because an agent is
/// missing from another agent's column.
pub fn stable_roommates(pref: &Matrix<usize>) -> Result<Option<Vec<usize>>> {
    let n = pref.cols();
    if n > 0 && pref.rows() != n - 1 {
        return Err(Error::shape_mismatch(&[n - 1, n], &[pref.rows(), n]));
    }
    if n == 0 {
        return Ok(Some(Vec::new()));
    }

    let held = match propose(pref, n)? {
        Some(held) => held,
        None => return Ok(None),
    };

    let mut table = match reduce_tables(pref, n, &held) {
        Some(table) => table,
        None => return Ok(None),
    };

    if !eliminate_rotations(&mut table, n) {
        return Ok(None);
    }

    // Every surviving table must hold exactly one candidate.
    let mut matching = Vec::with_capacity(n);
    for candidates in &table {
        match candidates.front() {
            Some(&partner) => matching.push(partner),
            None => return Ok(None),
        }
    }
    Ok(Some(matching))
}

// ============================================================================
// Phase 1: proposals
// ============================================================================

/// Run proposal passes until quiescent.
///
/// Returns `held`, where `held[j]` is the agent whose proposal `j` holds,
/// or `None` if some agent exhausted its column unaccepted.
fn propose(pref: &Matrix<usize>, n: usize) -> Result<Option<Vec<usize>>> {
    // Sentinel n = "nobody".
    let mut proposal_to = vec![n; n];
    let mut proposal_from = vec![n; n];
    let mut next_choice = vec![0usize; n];

    loop {
        let mut quiescent = true;
        for agent in 0..n {
            if proposal_to[agent] != n {
                continue;
            }
            if next_choice[agent] >= n - 1 {
                // Ran through the whole column while still holding no
                // acceptance: the instance has no stable matching.
                debug!(agent, "preference column exhausted");
                return Ok(None);
            }
            let proposee = pref.at(next_choice[agent], agent);
            let rank_new = rank_in_column(pref, proposee, agent)?;
            let rank_held = match proposal_from[proposee] {
                holder if holder == n => n,
                holder => rank_in_column(pref, proposee, holder)?,
            };
            trace!(agent, proposee, rank_new, rank_held, "proposal");
            if rank_new < rank_held {
                proposal_to[agent] = proposee;
                let rejected = proposal_from[proposee];
                if rejected != n {
                    trace!(proposee, rejected, "rejection");
                    proposal_to[rejected] = n;
                }
                proposal_from[proposee] = agent;
            }
            next_choice[agent] += 1;
            quiescent = false;
        }
        if quiescent {
            break;
        }
    }

    // A quiescent pass means every proposal is held; by counting, every
    // agent holds exactly one.
    Ok(Some(proposal_from))
}

/// Rank of `target` within `owner`'s preference column
fn rank_in_column(pref: &Matrix<usize>, owner: usize, target: usize) -> Result<usize> {
    pref.col(owner)
        .iter()
        .position(|&id| id == target)
        .ok_or_else(|| Error::invalid_preferences(target, owner))
}

// ============================================================================
// Phase 2: table reduction and rotation elimination
// ============================================================================

/// Build per-agent candidate tables and apply the phase-1 reduction.
///
/// Each agent discards every candidate ranked below its held proposer;
/// discards are symmetric. Returns `None` if a table empties or a
/// symmetric removal cannot find its partner (both mean no stable
/// matching).
fn reduce_tables(
    pref: &Matrix<usize>,
    n: usize,
    held: &[usize],
) -> Option<Vec<VecDeque<usize>>> {
    let mut table: Vec<VecDeque<usize>> = (0..n)
        .map(|j| pref.col(j).iter().copied().collect())
        .collect();

    for agent in 0..n {
        loop {
            let &worst = table[agent].back()?;
            if worst == held[agent] {
                break;
            }
            if !remove_candidate(&mut table[worst], agent) {
                return None;
            }
            table[agent].pop_back();
        }
    }
    Some(table)
}

/// Find and eliminate rotations until every table is a singleton (or
/// smaller). Returns false if elimination proves no stable matching.
fn eliminate_rotations(table: &mut [VecDeque<usize>], n: usize) -> bool {
    loop {
        let mut quiescent = true;
        for start in 0..n {
            if table[start].len() <= 1 {
                continue;
            }
            quiescent = false;
            trace!(start, "hunting rotation");

            // Build the trail: hop to the current agent's second choice,
            // then to that choice's last-remaining candidate. The trail
            // closes into a rotation when a hop target repeats.
            let mut seconds: Vec<usize> = Vec::new();
            let mut lasts: Vec<usize> = Vec::new();
            let mut cursor = start;
            let repeat = loop {
                // A table shrinking below two entries mid-trail means the
                // reduction invariant broke: no stable matching.
                let second = match table[cursor].get(1) {
                    Some(&second) => second,
                    None => return false,
                };
                let last = match table[second].back() {
                    Some(&last) => last,
                    None => return false,
                };
                let seen = lasts.iter().position(|&v| v == last);
                seconds.push(second);
                lasts.push(last);
                match seen {
                    Some(at) => break at,
                    None => cursor = last,
                }
            };
            debug!(?seconds, ?lasts, repeat, "eliminating rotation");

            // Eliminate: each member of the rotation discards candidates
            // from the bottom of its table until the previous trail agent
            // surfaces, symmetrically.
            for k in repeat + 1..seconds.len() {
                let member = seconds[k];
                let keep = lasts[k - 1];
                loop {
                    let worst = match table[member].back() {
                        Some(&worst) => worst,
                        None => return false,
                    };
                    if worst == keep {
                        break;
                    }
                    if !remove_candidate(&mut table[worst], member) {
                        return false;
                    }
                    table[member].pop_back();
                }
            }
        }
        if quiescent {
            return true;
        }
    }
}

/// Remove `value` from a candidate deque; false if it is absent
fn remove_candidate(candidates: &mut VecDeque<usize>, value: usize) -> bool {
    match candidates.iter().position(|&id| id == value) {
        Some(at) => {
            candidates.remove(at);
            true
        }
        None => false,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
