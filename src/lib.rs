//! Crestwalk: walk a paginated inventory catalog (categories → groups → types) and stream the leaves.

pub mod engine;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use error::{FetchError, Result, WalkError};
pub use fetch::{HttpTransport, Pager, Transport, fetch_all, resolve_node};
pub use pipeline::{
    Traversal, TraversalPlan, spawn_traversal, spawn_traversal_with_cancel, traverse_with,
};

use log::debug;
use std::sync::Arc;

/// Single entry point: walk `base_url` narrowed by the optional category and group filters.
///
/// Filters are compiled before any request, so a bad pattern fails here. The returned
/// [`Traversal`] yields types lazily; drop it to stop early.
///
/// ```ignore
/// let transport = std::sync::Arc::new(crestwalk::HttpTransport::new(&Default::default())?);
/// for leaf in crestwalk::walk_inventory(transport, "https://crest-tq.eveonline.com", Some("ship"), None, 0)? {
///     let item = leaf?;
///     println!("{} {}", item.id, item.name);
/// }
/// ```
pub fn walk_inventory(
    transport: Arc<dyn Transport>,
    base_url: &str,
    category: Option<&str>,
    group: Option<&str>,
    channel_cap: usize,
) -> Result<Traversal> {
    let plan = TraversalPlan::for_filters(base_url, category, group)?;
    debug!(
        "plan: {} from {} with {} stage(s)",
        plan.leaf_level(),
        plan.root_url(),
        plan.stages().len()
    );
    Ok(spawn_traversal(transport, plan, channel_cap))
}
