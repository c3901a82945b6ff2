//! unitdrill-core: Unit catalog, problem generation, and practice sessions.
//!
//! This crate defines the unit model, the randomized problem generator with
//! its distractors, and the timed session controller that the rest of
//! unitdrill builds on.

pub mod catalog;
pub mod distractors;
pub mod error;
pub mod explain;
pub mod generator;
pub mod model;
pub mod report;
pub mod session;
pub mod statistics;
pub mod traits;
