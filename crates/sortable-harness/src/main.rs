#![forbid(unsafe_code)]

//! Sortable List Reference Harness
//!
//! Replays a scripted pointer gesture against a headless sortable list and
//! prints the resulting order and reorder events as JSON.
//!
//! # Running
//!
//! ```sh
//! cargo run -p sortable-harness
//! SORTABLE_HARNESS_SCRIPT=drag.json RUST_LOG=debug cargo run -p sortable-harness
//! ```
//!
//! # Environment
//!
//! - `SORTABLE_HARNESS_SCRIPT`: path to a JSON script (default: built-in demo)
//! - `SORTABLE_HARNESS_VIEWPORT_WIDTH` / `_HEIGHT`: viewport size in pixels
//! - `SORTABLE_HARNESS_EDGE_THRESHOLD`: auto-scroll edge band in pixels
//! - `SORTABLE_HARNESS_SCROLL_STEP`: auto-scroll step in pixels
//! - `SORTABLE_HARNESS_LOG_JSON`: emit logs as JSON lines
//! - `RUST_LOG`: log filter (default `info`)

mod error;
mod script;

use std::io::Write;
use std::path::PathBuf;

use sortable_core::Size;
use sortable_widgets::SortableListConfig;
use tracing_subscriber::EnvFilter;

use crate::error::{HarnessError, Result};
use crate::script::{Report, Script};

struct HarnessConfig {
    script: Option<PathBuf>,
    viewport: Size,
    list: SortableListConfig,
    log_json: bool,
}

impl HarnessConfig {
    fn from_env() -> Result<Self> {
        let defaults = SortableListConfig::default();
        let list = SortableListConfig::default()
            .with_edge_threshold(
                env_f32("SORTABLE_HARNESS_EDGE_THRESHOLD")?
                    .unwrap_or(defaults.auto_scroll.edge_threshold),
            )
            .with_scroll_step(
                env_f32("SORTABLE_HARNESS_SCROLL_STEP")?.unwrap_or(defaults.auto_scroll.step),
            );
        list.validate()?;

        let viewport = Size::new(
            env_f32("SORTABLE_HARNESS_VIEWPORT_WIDTH")?.unwrap_or(320.0),
            env_f32("SORTABLE_HARNESS_VIEWPORT_HEIGHT")?.unwrap_or(600.0),
        );

        Ok(Self {
            script: std::env::var_os("SORTABLE_HARNESS_SCRIPT").map(PathBuf::from),
            viewport,
            list,
            log_json: std::env::var("SORTABLE_HARNESS_LOG_JSON")
                .ok()
                .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
        })
    }
}

fn env_f32(name: &'static str) -> Result<Option<f32>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or(HarnessError::InvalidEnv { name, value }),
        Err(_) => Ok(None),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_script(path: Option<&PathBuf>) -> Result<Script> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| HarnessError::ReadScript {
                path: path.clone(),
                source,
            })?;
            Script::from_json(&json)
        }
        None => Ok(Script::demo()),
    }
}

fn run() -> Result<()> {
    let config = HarnessConfig::from_env()?;
    init_tracing(config.log_json);

    let script = load_script(config.script.as_ref())?;
    tracing::info!(
        items = script.items.len(),
        steps = script.steps.len(),
        source = config
            .script
            .as_ref()
            .map_or_else(|| "demo".to_string(), |p| p.display().to_string()),
        "replaying script"
    );

    let report = script::replay(&script, config.viewport, config.list)?;
    for event in &report.events {
        tracing::info!(%event, "reorder");
    }

    write_report(std::io::stdout().lock(), &report)
}

fn write_report<W: Write>(mut out: W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report).map_err(HarnessError::Output)?;
    writeln!(out)?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("sortable-harness: {err}");
        std::process::exit(1);
    }
}
