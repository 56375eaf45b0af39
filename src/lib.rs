//! # matchmarkets
//!
//! Deterministic matching-market engines for Rust.
//!
//! Given agents' preferences over one another, compute a stable assignment
//! (or prove none exists) and certify the stability of any assignment.
//!
//! ## Engines
//!
//! - **Gale-Shapley** ([`engine::gale_shapley`]): two disjoint populations
//!   rank each other; deferred acceptance yields the proposer-optimal
//!   stable matching
//! - **Stable roommates** ([`engine::stable_roommates`]): one population,
//!   everyone ranks everyone else; Irving's two-phase algorithm finds a
//!   stable pairing exactly when one exists
//! - **Top trading cycles** ([`engine::top_trading_cycle`]): one
//!   population of good owners; cycle elimination produces the unique
//!   core allocation
//!
//! Each engine has a certificate in [`stability`] that scans for blocking
//! pairs, and [`prefs`] converts cardinal utility matrices into the
//! ordinal preference tables the engines consume.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical inputs produce byte-identical outputs;
//!    queue seeding and scan orders are fixed, and outcomes expose SHA-256
//!    digests so reproducibility is checkable
//! 2. **Pure functions**: engines are synchronous, CPU-bound, and
//!    scope-local; no shared state survives a call, so disjoint inputs
//!    can be solved from many threads at once
//! 3. **Columns are lists**: preference and utility matrices are
//!    column-major and column `j` is always agent `j`'s list
//!
//! ## Quick Start
//!
//! ```
//! use matchmarkets::engine::gale_shapley;
//! use matchmarkets::prefs::sort_index;
//! use matchmarkets::stability::check_stability;
//! use matchmarkets::types::Matrix;
//!
//! // Column j = proposer j's utility over the two reviewers.
//! let proposer_utils = Matrix::from_cols(vec![
//!     vec![1.0, 2.0],
//!     vec![2.0, 1.0],
//! ]).unwrap();
//! // Column j = reviewer j's utility over the two proposers.
//! let reviewer_utils = Matrix::from_cols(vec![
//!     vec![1.0, 2.0],
//!     vec![2.0, 1.0],
//! ]).unwrap();
//!
//! let pref = sort_index(&proposer_utils);
//! let outcome = gale_shapley(&pref, &reviewer_utils).unwrap();
//! assert_eq!(outcome.proposals, vec![1, 0]);
//!
//! // Certify the result: one assignment slot per agent on each side.
//! let proposals = Matrix::from_col_major(2, 1, outcome.proposals.clone()).unwrap();
//! let engagements = Matrix::from_col_major(2, 1, outcome.engagements.clone()).unwrap();
//! assert!(check_stability(&proposer_utils, &reviewer_utils, &proposals, &engagements).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod prefs;
pub mod stability;
pub mod types;

pub use engine::{gale_shapley, stable_roommates, top_trading_cycle};
pub use error::{Error, Result};
pub use stability::{check_stability, check_stability_roommate, check_stability_ttc};
pub use types::{Matrix, TwoSidedMatch};
