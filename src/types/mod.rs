//! Core data types: matrices, matching outcomes, digests.
//!
//! All preference and utility data flows through [`Matrix`], a dense
//! column-major store where column `j` is agent `j`'s list. Matching
//! outcomes are plain assignment vectors ([`TwoSidedMatch`] for the
//! two-sided market, bare `Vec<usize>` for the one-sided ones) plus
//! SHA-256 digests for determinism evidence.

pub mod matching;
pub mod matrix;

pub use matching::{digest_assignment, TwoSidedMatch};
pub use matrix::Matrix;
