//! Common types used across the application.

pub mod amount;
pub mod id;
pub mod month;

pub use amount::{is_filled_cell, parse_amount, percent_of, saturating_sum};
pub use id::*;
pub use month::{InvalidMonth, Month};
