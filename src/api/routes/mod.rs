//! Route handlers.

pub mod matches;
