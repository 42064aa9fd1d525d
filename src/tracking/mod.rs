//! Live position tracking: sample filtering and session lifecycle.

mod filter;
mod tracker;

pub use filter::{FilterConfig, PositionFilter, PositionSample};
pub use tracker::PositionTracker;
