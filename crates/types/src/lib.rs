//! # Clinic Types
//!
//! Validated primitives shared by the clinic records crates:
//! - [`NonEmptyText`] for names and locations
//! - calendar dates in the two textual forms clients send ([`date`])
//! - the `"true"`/`"false"` string tokens used by vaccine payloads ([`token`])

pub mod date;
pub mod text;
pub mod token;

pub use date::{format_date, parse_date, DateError};
pub use text::{NonEmptyText, TextError};
pub use token::{bool_token, parse_bool_token, parse_query_flag};
