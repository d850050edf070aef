//! Split Validator.
//!
//! Checks the split of a divisible expense against the trip roster and
//! resolves the per-participant shares:
//! - Equal splits are computed here, never trusted from the caller
//! - Manual splits must add up to the expense amount within a tolerance
//! - Resolved shares always sum to the amount exactly

pub mod allocation;
pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use allocation::AllocationUtil;
pub use error::SplitError;
pub use types::{Split, SplitInput, SplitPolicy, SplitType};
pub use validation::{SplitService, validate_split};
