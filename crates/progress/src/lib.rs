//! Roadmap progression for Pathway.
//!
//! Validates prerequisite graphs at creation time and recomputes node
//! availability after completion events.

#![warn(missing_docs)]

mod graph;
mod unlock;

pub use graph::PrereqGraph;
pub use unlock::{UnlockEngine, UnlockSignal};
