//! MROSC console common core types and utilities.

pub mod date;
pub mod id;

pub use date::{days_between, format_date, parse_date, parse_optional_date, MalformedDateError};
pub use id::{DocumentId, IdParseError, OrganizationId};
