//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the keyed store contract shared by every record kind.
//! - Isolate SQLite query details from validation and service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `Conflict`) in
//!   addition to DB transport errors.
//! - Repositories never run candidate validation.

pub mod memory_repo;
pub mod record_repo;
