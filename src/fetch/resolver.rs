//! Single-request resolution of a category or group detail record.

use serde::Deserialize;

use crate::error::FetchError;
use crate::types::{Item, Level, Node};

use super::transport::{Transport, fetch_json};

#[derive(Deserialize)]
struct CategoryRecord {
    #[serde(default)]
    published: bool,
    groups: Vec<Item>,
}

#[derive(Deserialize)]
struct GroupRecord {
    #[serde(default)]
    published: bool,
    types: Vec<Item>,
}

/// Fetch the node behind `detail_link`, reading the children field that belongs to `level`.
///
/// Types have no children: resolving one returns an empty, unpublished node without a request.
pub fn resolve_node(
    transport: &dyn Transport,
    detail_link: &str,
    level: Level,
) -> Result<Node, FetchError> {
    match level {
        Level::Category => {
            let r: CategoryRecord = fetch_json(transport, detail_link)?;
            Ok(Node {
                published: r.published,
                children: r.groups,
            })
        }
        Level::Group => {
            let r: GroupRecord = fetch_json(transport, detail_link)?;
            Ok(Node {
                published: r.published,
                children: r.types,
            })
        }
        Level::Type => Ok(Node::default()),
    }
}
