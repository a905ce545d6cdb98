//! # Domain Layer (Inner Hexagon)
//!
//! Pure policy and proof-gating logic for the token engine.
//! NO I/O, NO logging, NO shared state.
//!
//! - Dependencies point INWARD only (adapters depend on this, not vice versa).
//! - Every decision is a pure function of its arguments.

pub mod approval;
pub mod cross_validation;
pub mod entities;
pub mod packed;
pub mod policy;
pub mod registry;
pub mod value_objects;

pub use approval::*;
pub use cross_validation::*;
pub use entities::*;
pub use packed::*;
pub use policy::*;
pub use registry::*;
pub use value_objects::*;
