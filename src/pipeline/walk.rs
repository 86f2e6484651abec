//! The recursive filter-traverser.

use log::{debug, trace};
use std::ops::ControlFlow;
use std::sync::atomic::AtomicBool;

use crate::error::{FetchError, Result, WalkError};
use crate::fetch::{Transport, fetch_all, resolve_node};
use crate::types::Item;

use super::context::TraversalContext;
use super::plan::TraversalPlan;

/// Walk `items` at `depth`, emitting leaves to `on_leaf` in document order.
///
/// Past the last stage every item is a leaf. Otherwise items are filtered by the stage,
/// resolved, skipped when unpublished, and their children walked at `depth + 1`.
/// The first fetch error ends the whole walk. `Break` means the sink or the cancel flag
/// stopped it early.
pub fn walk_level<I>(
    ctx: &TraversalContext<'_>,
    mut items: I,
    depth: usize,
    on_leaf: &mut dyn FnMut(Item) -> ControlFlow<()>,
) -> std::result::Result<ControlFlow<()>, FetchError>
where
    I: Iterator<Item = std::result::Result<Item, FetchError>>,
{
    let stage = ctx.plan.stages().get(depth);
    loop {
        if ctx.is_cancelled() {
            return Ok(ControlFlow::Break(()));
        }
        let Some(item) = items.next() else {
            return Ok(ControlFlow::Continue(()));
        };
        let item = item?;

        let Some(stage) = stage else {
            if on_leaf(item).is_break() {
                return Ok(ControlFlow::Break(()));
            }
            continue;
        };

        if !stage.accepts(&item.name) {
            trace!("{} {:?} filtered out", stage.level, item.name);
            continue;
        }
        let node = resolve_node(ctx.transport, &item.href, stage.level)?;
        if !node.published {
            debug!("{} {:?} unpublished, skipping", stage.level, item.name);
            continue;
        }
        debug!(
            "{} {:?}: {} children",
            stage.level,
            item.name,
            node.children.len()
        );
        let children = node.children.into_iter().map(Ok);
        if walk_level(ctx, children, depth + 1, on_leaf)?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }
}

/// Run `plan` to completion on the calling thread, handing each leaf to `on_leaf`.
///
/// Returns `Continue` when the root resource was exhausted, `Break` when `on_leaf` or `cancel`
/// stopped the walk, or the first error met.
pub fn traverse_with<F>(
    transport: &dyn Transport,
    plan: &TraversalPlan,
    cancel: &AtomicBool,
    mut on_leaf: F,
) -> Result<ControlFlow<()>>
where
    F: FnMut(Item) -> ControlFlow<()>,
{
    let ctx = TraversalContext {
        transport,
        plan,
        cancel,
    };
    debug!(
        "walking {} ({} list, depth {}, leaves are {}s)",
        plan.root_url(),
        plan.root_level(),
        plan.depth(),
        plan.leaf_level()
    );
    let root = fetch_all(transport, plan.root_url());
    walk_level(&ctx, root, 0, &mut on_leaf).map_err(|e| {
        debug!("walk stopped by failed request to {}", e.url());
        WalkError::from(e)
    })
}
