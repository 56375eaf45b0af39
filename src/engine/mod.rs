//! Matching engines.
//!
//! ## Design Principles
//!
//! Every engine here is:
//!
//! 1. **Deterministic**: the same input always produces the same output,
//!    down to the processing order of internal queues and scans
//! 2. **Synchronous**: pure CPU-bound functions with no I/O or suspension
//! 3. **Scope-local**: all working buffers live and die with the call;
//!    nothing persists between invocations
//!
//! ## Engines
//!
//! - [`gale_shapley`]: two-sided deferred acceptance; always succeeds,
//!   unmatched agents carry sentinels on unequal sides
//! - [`stable_roommates`]: Irving's one-sided algorithm; returns `None`
//!   when no stable matching exists
//! - [`top_trading_cycle`]: Shapley-Scarf housing market; always produces
//!   the unique core allocation
//!
//! Each engine's output can be certified by the corresponding checker in
//! [`crate::stability`].

pub mod galeshapley;
pub mod roommate;
pub mod ttc;

pub use galeshapley::gale_shapley;
pub use roommate::stable_roommates;
pub use ttc::top_trading_cycle;
