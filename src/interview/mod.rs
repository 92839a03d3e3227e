//! Interview preparation helpers: question lists and candidate validation

pub mod questions;
pub mod validators;

pub use questions::{parse_numbered_list, prepare_questions};
pub use validators::{is_valid_email, parse_and_validate_tech_stack};
