//! Periodic regulatory checks: model, status rules, and lifecycle service.

pub mod board;
pub mod checklist;
pub mod engine;
pub mod model;
pub mod status;
pub mod summary;

pub use board::CheckBoard;
pub use checklist::{ChecklistItem, ChecklistItemInput, ItemRef};
pub use engine::CheckEngine;
pub use model::{CheckFilter, CreateCheck, HistoryEntry, NewCheck, PeriodicCheck, ReplaceCheck};
pub use status::CheckStatus;
pub use summary::StatusSummary;
