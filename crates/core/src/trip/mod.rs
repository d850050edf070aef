//! Trip roster and expense records.

pub mod types;

pub use types::{Division, Expense, Participant, Payer, Roster, TripSnapshot};
