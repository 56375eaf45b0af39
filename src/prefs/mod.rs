//! Preference utilities: cardinal-to-ordinal conversion and validation.

pub mod rank;

pub use rank::{
    rank_index, sort_index, sort_index_one_sided, validate_one_sided, validate_two_sided,
};
