//! Record models for the degree and role collections.
//!
//! # Responsibility
//! - Define the generic [`record::Record`] contract and its per-kind schema.
//! - Provide the two concrete collections, [`degree::Degree`] and
//!   [`role::Role`].
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `RecordId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod degree;
pub mod record;
pub mod role;
