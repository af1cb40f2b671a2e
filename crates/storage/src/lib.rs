//! Storage backends for Pathway.
//!
//! One trait, two backends: an in-memory map for tests and embedded use,
//! and a JSON-file layout for the CLI's local data directory.

#![warn(missing_docs)]

mod json_storage;
mod memory;
mod trait_;

pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
pub use trait_::{Result, Storage, StorageError};
