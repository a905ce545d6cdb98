//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the domain and the outside world.
//!
//! - **Driving Port (Inbound)**: `FungibleTokenApi`
//! - **Driven Ports (Outbound)**: `LedgerAccess`, `EventSink`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
