//! Matching outcome types and determinism digests.
//!
//! ## Sentinels
//!
//! A two-sided market with `M` proposers and `N` reviewers encodes
//! "unmatched" as the one-past-the-end id on the opposite side: an
//! unmatched proposer carries `N` in its proposals slot, an unmatched
//! reviewer carries `M`. The accessors here fold those sentinels into
//! `Option`s so callers never compare against raw ids.
//!
//! ## Digests
//!
//! Every engine in this crate is deterministic: the same input produces the
//! same assignment, bit for bit. [`digest_assignment`] condenses an
//! assignment vector into a SHA-256 digest so tests (and operators) can
//! assert reproducibility across runs without diffing whole vectors.

use sha2::{Digest, Sha256};

/// Outcome of a two-sided matching.
///
/// ## Example
///
/// ```
/// use matchmarkets::types::TwoSidedMatch;
///
/// // Two proposers, two reviewers, fully matched crosswise.
/// let outcome = TwoSidedMatch::new(vec![1, 0], vec![1, 0]);
///
/// assert_eq!(outcome.reviewer_of(0), Some(1));
/// assert_eq!(outcome.proposer_of(1), Some(0));
/// assert!(!outcome.is_proposer_unmatched(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoSidedMatch {
    /// `proposals[i]` is the reviewer matched to proposer `i`, or the
    /// sentinel `n_reviewers()` if proposer `i` is unmatched
    pub proposals: Vec<usize>,

    /// `engagements[j]` is the proposer matched to reviewer `j`, or the
    /// sentinel `n_proposers()` if reviewer `j` is unmatched
    pub engagements: Vec<usize>,
}

impl TwoSidedMatch {
    /// Create an outcome from raw assignment vectors
    pub fn new(proposals: Vec<usize>, engagements: Vec<usize>) -> Self {
        Self {
            proposals,
            engagements,
        }
    }

    /// Number of proposers in the market
    #[inline]
    pub fn n_proposers(&self) -> usize {
        self.proposals.len()
    }

    /// Number of reviewers in the market
    #[inline]
    pub fn n_reviewers(&self) -> usize {
        self.engagements.len()
    }

    /// The reviewer matched to proposer `i`, or `None` if unmatched
    #[inline]
    pub fn reviewer_of(&self, i: usize) -> Option<usize> {
        let r = self.proposals[i];
        (r < self.n_reviewers()).then_some(r)
    }

    /// The proposer matched to reviewer `j`, or `None` if unmatched
    #[inline]
    pub fn proposer_of(&self, j: usize) -> Option<usize> {
        let p = self.engagements[j];
        (p < self.n_proposers()).then_some(p)
    }

    /// Check whether proposer `i` is unmatched
    #[inline]
    pub fn is_proposer_unmatched(&self, i: usize) -> bool {
        self.reviewer_of(i).is_none()
    }

    /// Check whether reviewer `j` is unmatched
    #[inline]
    pub fn is_reviewer_unmatched(&self, j: usize) -> bool {
        self.proposer_of(j).is_none()
    }

    /// SHA-256 digest over both assignment vectors
    ///
    /// Two outcomes digest equal iff their proposals and engagements are
    /// identical, including sentinel slots.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hash_assignment(&mut hasher, &self.proposals);
        hash_assignment(&mut hasher, &self.engagements);
        finalize(hasher)
    }

    /// The digest as a hex string
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }
}

/// SHA-256 digest of a single assignment vector
///
/// Used for the one-sided outcomes (stable roommates, top trading cycles),
/// which are plain vectors rather than proposal/engagement pairs.
pub fn digest_assignment(assignment: &[usize]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hash_assignment(&mut hasher, assignment);
    finalize(hasher)
}

/// Feed one length-prefixed assignment vector into a hasher
fn hash_assignment(hasher: &mut Sha256, assignment: &[usize]) {
    hasher.update((assignment.len() as u64).to_le_bytes());
    for &slot in assignment {
        hasher.update((slot as u64).to_le_bytes());
    }
}

fn finalize(hasher: Sha256) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

// ============================================================================
// Unit Tests
// ============================================================================
