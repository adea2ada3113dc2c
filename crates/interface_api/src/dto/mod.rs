//! Request and response bodies
//!
//! Field names are camelCase on the wire. Amounts are JSON numbers.

pub mod cars;
pub mod coverage;
pub mod claims;
pub mod history;
