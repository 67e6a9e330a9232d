//! Row structs for database tables.
//!
//! Rows are decoded loosely (text enums, JSONB documents) and converted into
//! `clubcare_core` types through `TryFrom`, which rejects anything the
//! domain model cannot represent.

pub mod periodic_check;
