use serde::{Deserialize, Serialize};

use crate::condition::TargetHand;
use crate::simulation::SimulationResult;

/// Hit summary for one target hand inside a run record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSummary {
    /// Target label (name, or `#index` when unnamed)
    pub name: String,
    /// Number of trials that matched the target
    pub hits: u64,
    /// Hit rate in percent, 2 decimals
    pub percent: f64,
}

/// Complete record of one simulation run.
/// Serialized to JSONL, one line per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique identifier for this run (format: YYYYMMDD-NNNNNN)
    pub run_id: String,
    /// Seed the run used (enables exact reproduction)
    pub seed: u64,
    pub trials: u64,
    pub hand_size: usize,
    pub deck_size: usize,
    pub exclusive: bool,
    pub targets: Vec<TargetSummary>,
    /// Deck cards lacking metadata while filters were in use
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_metadata: Vec<String>,
    /// Timestamp of the run (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RunRecord {
    pub fn from_result(
        run_id: String,
        targets: &[TargetHand],
        hand_size: usize,
        deck_size: usize,
        result: &SimulationResult,
    ) -> Self {
        let summaries = targets
            .iter()
            .enumerate()
            .map(|(i, t)| TargetSummary {
                name: t.label(i),
                hits: result.hits[i],
                percent: result.percentage(i),
            })
            .collect();
        Self {
            run_id,
            seed: result.seed,
            trials: result.trials,
            hand_size,
            deck_size,
            exclusive: result.exclusive,
            targets: summaries,
            missing_metadata: result
                .missing_metadata
                .iter()
                .map(|id| id.to_string())
                .collect(),
            ts: None,
        }
    }
}

pub fn format_run_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Appends run records to a JSONL file.
///
/// Sequence numbers continue from the records already in the file, so
/// repeated invocations against the same log produce distinct run ids.
pub struct RunLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RunLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let existing = match File::open(path) {
            Ok(f) => BufReader::new(f)
                .lines()
                .map_while(Result::ok)
                .filter(|l| !l.trim().is_empty())
                .count() as u32,
            Err(_) => 0,
        };
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: existing,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_run_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RunRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
