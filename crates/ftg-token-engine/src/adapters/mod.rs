//! # Adapters Layer (Outer Hexagon)
//!
//! Reference implementations of the driven ports plus an off-chain signer.
//!
//! - `InMemoryLedger` implements `LedgerAccess`
//! - `RecordingEventSink` / `TracingEventSink` implement `EventSink`
//! - `LocalSigner` produces `CallAuthorization`s

pub mod event_sink;
pub mod ledger;
pub mod signer;

pub use event_sink::*;
pub use ledger::*;
pub use signer::*;
