//! Stability checkers.
//!
//! Each engine in [`crate::engine`] has a matching certificate here: an
//! exhaustive blocking-pair scan that either confirms stability or emits a
//! `warn!` diagnostic naming the offending pair and returns `false`. The
//! scans are independent of the engines: they accept any assignment in
//! the right shape, so they also serve to audit externally produced
//! matchings.
//!
//! All ids are 0-based; unmatched slots carry the one-past-the-end
//! sentinel of their side.

pub mod roommate;
pub mod trading;
pub mod twosided;

pub use roommate::check_stability_roommate;
pub use trading::check_stability_ttc;
pub use twosided::check_stability;
