//! # Integration Tests
//!
//! Facade-level flows across the engine and proof crates.

pub mod flows;
