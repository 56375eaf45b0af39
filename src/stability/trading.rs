//! Trading (housing market) stability checking.

use tracing::warn;

use crate::error::{Error, Result};
use crate::types::Matrix;

/// Check a top-trading-cycle allocation for stability.
///
/// A pair `(i, j)` blocks when `i` ranks `j`'s good strictly above the
/// good it received and `j` ranks `i`'s good strictly above its own
/// assignment: a two-way swap both sides want. Unlike the two-sided
/// checker this scan includes `i == j`: an agent ranking its own good
/// above its assignment blocks on its own (individual rationality).
///
/// # Arguments
///
/// * `pref` - N×N ordinal matrix; column `j` ranks all goods by owner
/// * `matching` - length-N assignment; `matching[i]` is the owner of the
///   good agent `i` receives
///
/// # Returns
///
/// `true` if no pair blocks. On the first blocking pair the checker emits
/// a `warn!` naming the two agents and returns `false`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `pref` is not square or `matching`
/// is not length N.
pub fn check_stability_ttc(pref: &Matrix<usize>, matching: &[usize]) -> Result<bool> {
    let n = pref.cols();
    if pref.rows() != n {
        return Err(Error::shape_mismatch(&[n, n], &[pref.rows(), n]));
    }
    if matching.len() != n {
        return Err(Error::shape_mismatch(&[n], &[matching.len()]));
    }

    for i in 0..n {
        for j in i..n {
            if prefers(pref, i, j, matching[i]) && prefers(pref, j, i, matching[j]) {
                warn!(agent_a = i, agent_b = j, "allocation is not stable: pair would swap");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Does `agent` rank `good` strictly above its assigned `received` good?
///
/// The scan stops at the received good, so equality is never a block.
fn prefers(pref: &Matrix<usize>, agent: usize, good: usize, received: usize) -> bool {
    for &id in pref.col(agent) {
        if id == received {
            return false;
        }
        if id == good {
            return true;
        }
    }
    false
}

// ============================================================================
// Unit Tests
// ============================================================================
