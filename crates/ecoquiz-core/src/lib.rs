//! ecoquiz-core: quiz model, navigation engine and scoring.
//!
//! This crate defines the quiz data model, the session state machine that
//! gates navigation on answered questions, and the scoring that turns
//! selections into category totals and a result tier.

pub mod config;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod model;
pub mod order;
pub mod parser;
pub mod presenter;
pub mod report;
pub mod scoring;
