//! Application configuration constants.
//! Endpoints, HTTP tuning and output defaults in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    env_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                env_prefix: pkg.to_uppercase().replace('-', "_"),
            }
        })
    }

    /// Settings file looked up in the working directory (e.g. `.crestwalk.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Environment variable overriding the API base URL (e.g. `CRESTWALK_BASE_URL`).
    pub fn base_url_env(&self) -> String {
        format!("{}_BASE_URL", self.env_prefix)
    }
}

// ---- Endpoints ----

/// List resources relative to the API base.
pub struct ResourcePaths;

impl ResourcePaths {
    pub const CATEGORIES: &'static str = "inventory/categories/";
    pub const GROUPS: &'static str = "inventory/groups/";
    pub const TYPES: &'static str = "inventory/types/";
}

// ---- HTTP ----

pub struct HttpDefaults;

impl HttpDefaults {
    /// Public Tranquility CREST endpoint.
    pub const BASE_URL: &'static str = "https://crest-tq.eveonline.com";
    pub const TIMEOUT_SECS: u64 = 30;

    pub fn user_agent() -> String {
        format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

// ---- Output ----

pub struct OutputDefaults;

impl OutputDefaults {
    pub const DELIMITER: u8 = b',';
    /// Rendezvous channel: the producer hands over one leaf at a time and never runs ahead.
    pub const LEAF_CHANNEL_CAP: usize = 0;
    /// Progress counter refresh interval (records).
    pub const PROGRESS_UPDATE_BATCH_SIZE: usize = 50;
}
