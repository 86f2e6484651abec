//! Load `.crestwalk.toml` and environment overrides (CLI only). The lib takes plain arguments.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    base_url: Option<String>,
    category: Option<String>,
    group: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    delimiter: Option<String>,
    header: Option<bool>,
    verbose: Option<bool>,
    channel_cap: Option<usize>,
}

/// Load the settings file from `dir`. `Ok(None)` when there is no file.
pub fn load_settings_file(dir: &Path) -> Result<Option<SettingsFile>> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.is_file() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let file = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(file))
}

impl SettingsFile {
    /// `verbose` from the file, so logging can be set up before the rest is applied.
    pub fn verbose(&self) -> Option<bool> {
        self.settings.verbose
    }
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $section.$field.clone() {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Apply file settings to opts (only fields present in the file). Call before env and CLI.
pub fn apply_file_to_opts(file: &SettingsFile, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, base_url => base_url);
    if s.category.is_some() {
        opts.category = s.category.clone();
    }
    if s.group.is_some() {
        opts.group = s.group.clone();
    }
    apply_file_opt!(s, opts, timeout_secs => http.timeout_secs);
    apply_file_opt!(s, opts, user_agent => http.user_agent);
    if let Some(ref d) = s.delimiter {
        match parse_delimiter(d) {
            Ok(b) => opts.delimiter = b,
            Err(e) => log::warn!("ignoring delimiter from settings file: {}", e),
        }
    }
    apply_file_opt!(s, opts, header => header);
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, channel_cap => channel_cap);
}

/// Apply `<PKG>_BASE_URL` from the process env, falling back to `.env` in `dir`.
pub fn apply_env_to_opts(dir: &Path, opts: &mut Opts) {
    let key = PackagePaths::get().base_url_env();
    if let Some(url) = read_env(&key) {
        opts.base_url = url;
        return;
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        if let Some(url) = read_env(&key) {
            opts.base_url = url;
        }
    }
}

fn read_env(key: &str) -> Option<String> {
    let s = std::env::var(key).ok()?;
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Parse a single-byte field delimiter. Accepts `tab` and `\t` for a tab.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => bail!("delimiter must be a single ASCII character, got {:?}", s),
    }
}
