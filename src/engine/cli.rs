//! CLI command handler: walk types by default; `list` dumps one paginated resource.

use anyhow::{Context, Result, bail};
use log::{debug, warn};
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::Opts;
use crate::engine::arg_parser::{Cli, Commands};
use crate::engine::output::RecordWriter;
use crate::engine::progress::RecordCounter;
use crate::fetch::{HttpTransport, Transport, fetch_all};
use crate::pipeline::{TraversalPlan, resource_url, spawn_traversal_with_cancel};
use crate::types::LeafRecord;
use crate::utils::{apply_env_to_opts, apply_file_to_opts, load_settings_file, setup_logging};

/// Apply flags on top of file/env settings. Only flags that were given override.
fn apply_cli_to_opts(cli: &Cli, opts: &mut Opts) {
    if let Some(ref url) = cli.base_url {
        opts.base_url = url.clone();
    }
    if cli.category.is_some() {
        opts.category = cli.category.clone();
    }
    if cli.group.is_some() {
        opts.group = cli.group.clone();
    }
    if let Some(secs) = cli.timeout {
        opts.http.timeout_secs = secs;
    }
    if let Some(d) = cli.delimiter {
        opts.delimiter = d;
    }
    if let Some(h) = cli.header {
        opts.header = h;
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
}

/// Defaults → settings file → env → flags. Logging is installed once verbosity is known.
fn setup_opts(cli: &Cli) -> Result<Opts> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let file = load_settings_file(&cwd);
    let file_verbose = file.as_ref().ok().and_then(|f| f.as_ref()?.verbose());
    setup_logging(cli.verbose.or(file_verbose).unwrap_or(false));

    let mut opts = Opts::default();
    match file {
        Ok(Some(ref f)) => apply_file_to_opts(f, &mut opts),
        Ok(None) => {}
        Err(e) => warn!("ignoring settings file: {:#}", e),
    }
    apply_env_to_opts(&cwd, &mut opts);
    apply_cli_to_opts(cli, &mut opts);

    let config_str = format!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    debug!("{}", config_str);
    Ok(opts)
}

/// Ctrl+C sets `flag`; the walk stops before its next request. Process-wide, install once.
fn install_cancel_handler(flag: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")
}

/// Run the command selected on the command line.
pub fn handle_run(cli: &Cli) -> Result<()> {
    if matches!(cli.command, Some(Commands::List { .. }))
        && (cli.category.is_some() || cli.group.is_some())
    {
        bail!("--category and --group narrow the type walk; `list` does not take them");
    }
    let opts = setup_opts(cli)?;
    let transport = HttpTransport::new(&opts.http)?;
    match &cli.command {
        None => {
            let cancel = Arc::new(AtomicBool::new(false));
            install_cancel_handler(Arc::clone(&cancel))?;
            walk_types(&opts, Arc::new(transport), cancel, io::stdout().lock())
        }
        Some(Commands::List { resource }) => {
            list_resource(&opts, &transport, resource, io::stdout().lock())
        }
    }
}

/// Stream filtered types to `out`. Records written before an error stay written.
///
/// Setting `cancel` stops the walk before its next request; the run then ends with an error
/// after flushing what was written.
pub fn walk_types<W: Write>(
    opts: &Opts,
    transport: Arc<dyn Transport>,
    cancel: Arc<AtomicBool>,
    out: W,
) -> Result<()> {
    // Patterns and URL are checked here, before any request.
    let plan = TraversalPlan::for_filters(
        &opts.base_url,
        opts.category.as_deref(),
        opts.group.as_deref(),
    )?;
    debug!("walking {} from {}", plan.leaf_level(), plan.root_url());
    let mut traversal = spawn_traversal_with_cancel(transport, plan, opts.channel_cap, cancel);

    let mut out = RecordWriter::new(out, opts.delimiter, opts.header)?;
    let mut counter = opts.verbose.then(|| RecordCounter::new("Walking", " types"));

    for leaf in traversal.by_ref() {
        let item = match leaf {
            Ok(item) => item,
            Err(e) => {
                out.flush()?;
                return Err(e).context("inventory walk failed");
            }
        };
        out.write_leaf(&LeafRecord::from(item))?;
        if let Some(c) = counter.as_mut() {
            c.tick();
        }
    }
    out.flush()?;
    if let Some(c) = counter {
        c.finish();
    }
    debug!("{} types written", out.written());

    if traversal.is_cancelled() {
        bail!(
            "walk cancelled by user; {} types were written",
            out.written()
        );
    }
    Ok(())
}

/// Dump one paginated resource to `out` as `id,name`.
pub fn list_resource<W: Write>(
    opts: &Opts,
    transport: &dyn Transport,
    resource: &str,
    out: W,
) -> Result<()> {
    let url = if resource.starts_with("http://") || resource.starts_with("https://") {
        resource.to_string()
    } else {
        resource_url(&opts.base_url, resource)?
    };
    let mut out = RecordWriter::new(out, opts.delimiter, opts.header)?;
    let mut pager = fetch_all(transport, &url);
    for item in pager.by_ref() {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                out.flush()?;
                return Err(e).with_context(|| format!("listing {} failed", url));
            }
        };
        out.write_item(&item)?;
    }
    out.flush()?;
    debug!(
        "{} items across {} pages from {}",
        out.written(),
        pager.pages_fetched(),
        url
    );
    Ok(())
}
