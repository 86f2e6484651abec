use clap::{Parser, Subcommand};

use crate::utils::config::ResourcePaths;
use crate::utils::parse_delimiter;

/// Walk the inventory catalog and print matching types as delimited text.
#[derive(Clone, Parser)]
#[command(name = "crestwalk")]
#[command(
    about = "Print inventory types (id_str,name), optionally narrowed by category and group name."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Category name filter (case-insensitive regex, unanchored). Not valid with `list`.
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Group name filter (case-insensitive regex, unanchored). Not valid with `list`.
    #[arg(long, short = 'g')]
    pub group: Option<String>,

    /// API base URL. Default: public CREST endpoint, or CRESTWALK_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, short = 't', global = true)]
    pub timeout: Option<u64>,

    /// Output field delimiter (single character, or `tab`).
    #[arg(long, short = 'd', global = true, value_parser = delimiter_arg)]
    pub delimiter: Option<u8>,

    /// Write a header row.
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub header: Option<bool>,

    /// Verbose output: debug logging and a progress counter on stderr.
    #[arg(long, short = 'v', global = true, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Print every item of one paginated list resource (id,name).
    List {
        /// Resource path under the base URL, or an absolute URL.
        #[arg(value_name = "RESOURCE", default_value = ResourcePaths::GROUPS)]
        resource: String,
    },
}

fn delimiter_arg(s: &str) -> Result<u8, String> {
    parse_delimiter(s).map_err(|e| e.to_string())
}
