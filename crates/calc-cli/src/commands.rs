//! Command implementations for the calculator CLI.

use anyhow::{Context, Result};
use calc_engine::separator::{insert_separators, strip_separators};
use calc_model::{EvalOptions, HistoryEntry};
use chrono::Utc;
use tracing::{debug, info};

use calc_cli::history::{HistoryStore, history_table};

use crate::cli::{EvalArgs, HistoryArgs};

pub fn run_eval(args: &EvalArgs) -> Result<()> {
    let options = EvalOptions::new().with_angle_mode(args.angle_mode.into());
    let stripped = strip_separators(&args.expression);
    let balanced = calc_engine::balance(&stripped);
    debug!(raw = %args.expression, balanced = %balanced, "evaluating");

    let value = calc_engine::evaluate(&balanced, &options)
        .with_context(|| format!("evaluate `{}`", args.expression))?;
    let result = calc_engine::format_result(value);
    println!("{}", insert_separators(&result, args.separator.into()));

    if let Some(path) = &args.history_file {
        let mut store = HistoryStore::load(path);
        store.append(HistoryEntry::new(
            balanced,
            result,
            Utc::now().timestamp_millis(),
        ));
        store.save()?;
        info!(path = %path.display(), "calculation recorded");
    }
    Ok(())
}

pub fn run_history(args: &HistoryArgs) -> Result<()> {
    let store = HistoryStore::load(&args.history_file);
    if store.entries().is_empty() {
        println!("no history at {}", args.history_file.display());
        return Ok(());
    }
    println!("{}", history_table(store.entries()));
    Ok(())
}
