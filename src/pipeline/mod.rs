//! Traversal pipeline: plan, shared context, recursive walk, streaming orchestrator.

pub mod context;
pub mod orchestrator;
pub mod plan;
pub mod walk;

pub use context::{FirstError, TraversalContext};
pub use orchestrator::{Traversal, spawn_traversal, spawn_traversal_with_cancel};
pub use plan::{NameFilter, Stage, TraversalPlan, resource_url};
pub use walk::{traverse_with, walk_level};
