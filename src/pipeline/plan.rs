//! Traversal plan: root resource, root level and the per-level name filters.
//! Everything here is validated before the first request goes out.

use regex::{Regex, RegexBuilder};
use url::Url;

use crate::error::{Result, WalkError};
use crate::types::Level;

/// Case-insensitive, unanchored name filter.
#[derive(Clone, Debug)]
pub struct NameFilter {
    pattern: String,
    re: Regex,
}

impl NameFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| WalkError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            re,
        })
    }

    /// `None` and `Some("")` both mean "no filter".
    pub fn parse_optional(pattern: Option<&str>) -> Result<Option<Self>> {
        match pattern {
            Some(p) if !p.is_empty() => Self::new(p).map(Some),
            _ => Ok(None),
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.re.is_match(name)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// One level that gets resolved: items at `level` are filtered, resolved, and their children
/// become the next level's candidates.
#[derive(Clone, Debug)]
pub struct Stage {
    pub level: Level,
    pub filter: Option<NameFilter>,
}

impl Stage {
    /// True when the item should be resolved (no filter, or the filter matches).
    pub fn accepts(&self, name: &str) -> bool {
        self.filter.as_ref().is_none_or(|f| f.is_match(name))
    }
}

#[derive(Clone, Debug)]
pub struct TraversalPlan {
    root_url: String,
    root_level: Level,
    stages: Vec<Stage>,
}

impl TraversalPlan {
    /// Plan a walk of `root_url` (a list of `root_level` items) with one stage per filter entry.
    /// Depth is `filters.len() + 1`; a `None` entry descends without narrowing.
    pub fn new(
        root_url: impl Into<String>,
        root_level: Level,
        filters: &[Option<&str>],
    ) -> Result<Self> {
        let too_deep = || WalkError::TooDeep {
            root: root_level,
            filters: filters.len(),
            available: root_level.depth_below(),
        };
        let mut stages = Vec::with_capacity(filters.len());
        let mut level = root_level;
        for filter in filters {
            let child = level.child().ok_or_else(too_deep)?;
            stages.push(Stage {
                level,
                filter: NameFilter::parse_optional(*filter)?,
            });
            level = child;
        }
        Ok(Self {
            root_url: root_url.into(),
            root_level,
            stages,
        })
    }

    /// Map the two CLI filters onto a plan against `base_url`:
    /// category (with or without group) starts at categories and always reaches types,
    /// group alone starts at groups, neither lists all types.
    pub fn for_filters(base_url: &str, category: Option<&str>, group: Option<&str>) -> Result<Self> {
        let category = category.filter(|s| !s.is_empty());
        let group = group.filter(|s| !s.is_empty());
        let (root_level, filters) = match (category, group) {
            (Some(c), g) => (Level::Category, vec![Some(c), g]),
            (None, Some(g)) => (Level::Group, vec![Some(g)]),
            (None, None) => (Level::Type, Vec::new()),
        };
        let root_url = resource_url(base_url, root_level.list_path())?;
        Self::new(root_url, root_level, &filters)
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn root_level(&self) -> Level {
        self.root_level
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Number of levels visited, counting the emitted one.
    pub fn depth(&self) -> usize {
        self.stages.len() + 1
    }

    /// Level of the emitted items.
    pub fn leaf_level(&self) -> Level {
        self.stages
            .last()
            .and_then(|s| s.level.child())
            .unwrap_or(self.root_level)
    }
}

/// Join a resource path onto the API base. A base without a trailing slash is treated as a directory.
pub fn resource_url(base_url: &str, path: &str) -> Result<String> {
    let invalid = |source| WalkError::InvalidUrl {
        url: base_url.to_string(),
        source,
    };
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let url = Url::parse(&base).map_err(invalid)?.join(path).map_err(invalid)?;
    Ok(url.into())
}
