#![forbid(unsafe_code)]

//! Lays out the demo table at each requested container width and prints the
//! sizing state after every step.

mod cli;

use std::error::Error;
use std::fs;
use std::process;

use colfit_layout::AllocatorConfig;
use colfit_table::{ColumnDef, SizingController, SizingOptions, SizingSnapshot};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::cli::Opts;

/// One line of demo output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Step {
    step: usize,
    width: colfit_core::Px,
    recalculated: bool,
    state: SizingSnapshot,
}

fn main() {
    let opts = Opts::parse();
    init_logging();

    if let Err(err) = run(&opts) {
        tracing::error!(error = %err, "demo failed");
        eprintln!("colfit-demo: {err}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("COLFIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    #[cfg(feature = "tracing-json")]
    builder.json().init();

    #[cfg(not(feature = "tracing-json"))]
    builder.init();
}

/// The demo's column set: two grow columns, a fixed column and a percentage
/// column with a floor.
fn demo_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name").header("Name").grow(),
        ColumnDef::new("info").header("Info").grow(),
        ColumnDef::new("age").header("Age").size(100),
        ColumnDef::new("message")
            .header("Message")
            .min_size(100)
            .width_percentage(20.0),
    ]
}

fn load_columns(opts: &Opts) -> Result<Vec<ColumnDef>, Box<dyn Error>> {
    match &opts.columns {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(demo_columns()),
    }
}

fn run(opts: &Opts) -> Result<(), Box<dyn Error>> {
    let options = SizingOptions::default()
        .recalculate_on_resize(opts.on_resize)
        .allocator(AllocatorConfig::default().overflow_tolerance(opts.tolerance));
    let mut controller = SizingController::new(load_columns(opts)?, options)?;
    tracing::info!(
        columns = controller.columns().len(),
        widths = ?opts.widths,
        "demo starting"
    );

    for (step, &width) in opts.widths.iter().enumerate() {
        let recalculated = if step == 0 {
            controller.mount(width)?;
            true
        } else {
            controller.container_resized(width)?.is_some()
        };
        let line = Step {
            step,
            width,
            recalculated,
            state: controller.snapshot(),
        };
        let json = if opts.compact {
            serde_json::to_string(&line)?
        } else {
            serde_json::to_string_pretty(&line)?
        };
        println!("{json}");
    }
    Ok(())
}
