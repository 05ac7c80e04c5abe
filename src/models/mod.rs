//! Core data models for the aggregation pipeline.

mod identity;
mod match_detail;
mod player_stat;
mod rank;

pub use identity::*;
pub use match_detail::*;
pub use player_stat::*;
pub use rank::*;
