//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageOutcome`: What a listing page produced (items, nothing, or a fetch failure)
//! - `TerminationPolicy`: The single decision point for ending a traversal
//! - `StopReason`: Why a traversal ended

mod page_state;

// Re-export main types
pub use page_state::{PageOutcome, StopReason, TerminationPolicy};
