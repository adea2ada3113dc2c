//! Request handlers

pub mod health;
pub mod cars;
pub mod coverage;
pub mod claims;
pub mod history;
