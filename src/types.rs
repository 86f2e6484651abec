//! Public and internal types for the crestwalk API and pipeline.

use serde::Deserialize;
use std::fmt;

use crate::utils::config::{HttpDefaults, OutputDefaults, ResourcePaths};

/// One node at any catalog level (category, group or type) as listed by the API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Item {
    /// Detail link: fetch this to get the node's `published` flag and children.
    pub href: String,
    pub id: u64,
    /// String form of `id` when the API sends one.
    #[serde(default)]
    pub id_str: Option<String>,
    pub name: String,
}

/// `next` object of a page. Absent or empty `href` means last page.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NextLink {
    #[serde(default)]
    pub href: String,
}

/// One page of a paginated list resource.
///
/// `page_count` and `total_count` are informational; only [`Page::next_link`] drives pagination.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub page_count: u64,
    #[serde(default)]
    pub total_count: u64,
    pub items: Vec<Item>,
    #[serde(default)]
    pub next: Option<NextLink>,
}

impl Page {
    /// Link to the following page, or `None` on the last page.
    pub fn next_link(&self) -> Option<&str> {
        self.next
            .as_ref()
            .map(|n| n.href.as_str())
            .filter(|href| !href.is_empty())
    }
}

/// Resolved detail record of a category or group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub published: bool,
    pub children: Vec<Item>,
}

/// Catalog level. Categories contain groups, groups contain types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Category,
    Group,
    Type,
}

impl Level {
    /// Level of this level's children, `None` for types.
    pub fn child(self) -> Option<Level> {
        match self {
            Level::Category => Some(Level::Group),
            Level::Group => Some(Level::Type),
            Level::Type => None,
        }
    }

    /// Number of levels strictly below this one.
    pub fn depth_below(self) -> usize {
        match self {
            Level::Category => 2,
            Level::Group => 1,
            Level::Type => 0,
        }
    }

    /// List resource path relative to the API base.
    pub fn list_path(self) -> &'static str {
        match self {
            Level::Category => ResourcePaths::CATEGORIES,
            Level::Group => ResourcePaths::GROUPS,
            Level::Type => ResourcePaths::TYPES,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Category => "category",
            Level::Group => "group",
            Level::Type => "type",
        };
        f.write_str(s)
    }
}

/// Outbound leaf record handed to the output stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafRecord {
    pub id: u64,
    pub id_str: String,
    pub name: String,
}

impl From<Item> for LeafRecord {
    fn from(item: Item) -> Self {
        let id_str = item.id_str.unwrap_or_else(|| item.id.to_string());
        LeafRecord {
            id: item.id,
            id_str,
            name: item.name,
        }
    }
}

/// HTTP settings for [`HttpTransport`](crate::fetch::HttpTransport).
#[derive(Clone, Debug)]
pub struct HttpOpts {
    /// Per-request timeout in seconds (connect + read).
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpOpts {
    fn default() -> Self {
        Self {
            timeout_secs: HttpDefaults::TIMEOUT_SECS,
            user_agent: HttpDefaults::user_agent(),
        }
    }
}

/// Full options (CLI). Defaults, then `.crestwalk.toml`, then env, then flags.
#[derive(Clone, Debug)]
pub struct Opts {
    /// API base URL; list resources are joined onto it.
    pub base_url: String,
    /// Category name filter (case-insensitive regex). Empty = no filter.
    pub category: Option<String>,
    /// Group name filter (case-insensitive regex). Empty = no filter.
    pub group: Option<String>,
    pub http: HttpOpts,
    /// Output field delimiter.
    pub delimiter: u8,
    /// Write a header row before the records.
    pub header: bool,
    /// Debug logging and progress counter.
    pub verbose: bool,
    /// Capacity of the leaf channel between producer and consumer. 0 = rendezvous.
    pub channel_cap: usize,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            base_url: HttpDefaults::BASE_URL.to_string(),
            category: None,
            group: None,
            http: HttpOpts::default(),
            delimiter: OutputDefaults::DELIMITER,
            header: false,
            verbose: false,
            channel_cap: OutputDefaults::LEAF_CHANNEL_CAP,
        }
    }
}
