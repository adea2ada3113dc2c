//! History Domain
//!
//! Builds the timeline of a car: every policy (dated by its start) and every
//! claim (dated by its claim date), in one ascending sequence.

pub mod event;
pub mod merge;
pub mod service;
pub mod error;

pub use event::{HistoryEvent, CarHistory, POLICY_EVENT, CLAIM_EVENT};
pub use merge::merge_history;
pub use service::HistoryService;
pub use error::HistoryError;
