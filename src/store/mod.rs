//! Storage collaborators for the engine.
//!
//! The engine persists its aggregates through [`MemoryStore`], an in-process
//! transactional store, and reads employee records through the
//! [`EmployeeDirectory`] seam. Both stand in for the school system's
//! database, which is outside this crate.

mod directory;
mod memory;

pub use directory::{EmployeeDirectory, MemoryDirectory};
pub use memory::{MemoryStore, StoreTx};
