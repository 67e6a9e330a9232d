//! Domain layer for the club facility-maintenance service.
//!
//! Holds the periodic-check model, the status and checklist rules, the
//! actor/role permission model, and the storage and clock seams the
//! [`checks::engine::CheckEngine`] is built on. Nothing here talks to a
//! database or the network directly.

pub mod checks;
pub mod clock;
pub mod error;
pub mod roles;
pub mod store;
pub mod trade;
pub mod types;
