//! Simulation command handler.
//!
//! Loads a request, runs it on one thread or across the rayon pool, prints
//! the hit rates and optionally appends a run record to a JSONL file.
//!
//! # Examples
//!
//! ```no_run
//! use std::io;
//!
//! let args = ["handsim", "sim", "--request", "starter.json", "--trials", "20000", "--parallel"];
//! let code = handsim_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use handsim_engine::logger::{RunLogger, RunRecord};
use handsim_engine::simulation::{CancelToken, Simulator};

use crate::cli::RequestArgs;
use crate::error::CliError;
use crate::formatters::format_result_table;
use crate::request::Overrides;
use crate::ui;

/// Execution flags that do not change the request itself.
#[derive(Debug, Clone, Default)]
pub struct SimOptions {
    pub parallel: bool,
    pub max_seconds: Option<f64>,
    pub output: Option<String>,
    pub json: bool,
}

/// Handle the sim command.
///
/// # Errors
///
/// - `CliError::InvalidInput` for unreadable files or a bad `--max-seconds`
/// - `CliError::Engine` when the request fails validation
/// - `CliError::Interrupted` when the time limit cancels the run
pub fn handle_sim_command(
    args: &RequestArgs,
    overrides: Overrides,
    opts: &SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let limit = opts.max_seconds.map(parse_limit).transpose()?;
    let (request, cards, cfg) = super::load_inputs(args, overrides)?;

    let sim = Simulator::new(&request, cards.lookup())?;
    ui::warn_missing_metadata(err, sim.missing_metadata())?;

    let parallel = opts.parallel || cfg.parallel;
    let cancel = CancelToken::new();
    let started = Instant::now();
    let result = with_time_limit(&cancel, limit, || {
        if parallel {
            sim.run_parallel(&cancel)
        } else {
            sim.run(&cancel)
        }
    })?;
    tracing::info!(
        trials = result.trials,
        seed = result.seed,
        parallel,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation finished"
    );

    let mut record = RunRecord::from_result(
        String::new(),
        &request.targets,
        request.hand_size,
        sim.deck().len(),
        &result,
    );
    let recorded = match &opts.output {
        Some(path) => {
            let mut logger = RunLogger::create(path).map_err(|e| {
                CliError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to open output file {}: {}", path, e),
                ))
            })?;
            record.run_id = logger.next_id();
            logger.write(&record)?;
            Some(path.as_str())
        }
        None => None,
    };

    if opts.json {
        let report = serde_json::json!({
            "run_id": recorded.map(|_| record.run_id.as_str()),
            "seed": result.seed,
            "trials": result.trials,
            "hand_size": request.hand_size,
            "deck_size": record.deck_size,
            "exclusive": result.exclusive,
            "targets": record.targets,
            "missing_metadata": record.missing_metadata,
        });
        let json_str = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
        writeln!(out, "{}", json_str)?;
    } else {
        writeln!(
            out,
            "Simulated: {} hands (seed {}, {})",
            result.trials,
            result.seed,
            if result.exclusive { "exclusive" } else { "inclusive" }
        )?;
        writeln!(out, "{}", format_result_table(&request.targets, &result))?;
        if let Some(path) = recorded {
            writeln!(out, "Recorded run {} to {}", record.run_id, path)?;
        }
    }
    Ok(())
}

fn parse_limit(secs: f64) -> Result<Duration, CliError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(d) if !d.is_zero() => Ok(d),
        _ => Err(CliError::InvalidInput(format!(
            "--max-seconds must be a positive number, got {}",
            secs
        ))),
    }
}

/// Run `f`, cancelling `cancel` from a watchdog thread once `limit` elapses.
fn with_time_limit<T>(cancel: &CancelToken, limit: Option<Duration>, f: impl FnOnce() -> T) -> T {
    let Some(limit) = limit else {
        return f();
    };
    let (done_tx, done_rx) = mpsc::channel::<()>();
    let token = cancel.clone();
    let watchdog = thread::spawn(move || {
        if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(limit) {
            tracing::warn!(limit_secs = limit.as_secs_f64(), "time limit reached, cancelling run");
            token.cancel();
        }
    });
    let value = f();
    drop(done_tx);
    let _ = watchdog.join();
    value
}
