//! Common types used across the workspace.

pub mod amount;
pub mod date_range;
pub mod id;


pub use amount::{AmountError, amount_from_json, parse_amount, parse_positive_amount};
pub use date_range::{DateRange, DateRangeError};
pub use id::*;
