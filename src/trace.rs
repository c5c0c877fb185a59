//! Delete tracing over recorded-guess logs.
//!
//! A forward run can record which rules produced hits for which words (the
//! `--log` flag of the binary). The log starts with one JSON meta line
//! naming the rules in effect, followed by one JSON line per word:
//!
//! ```text
//! {"rules": [":", "lD3", ...]}
//! ["p@ssW0rd", [1]]
//! ["letmein", [0, 7]]
//! ```
//!
//! [`trace_deletes`] replays the hit rules that contain a positional delete
//! and records every char a `D` removes, one line per deletion:
//! `D<TAB><position><TAB><char>`. Collected over a large run, those records
//! show which positions and chars deletion rules actually spend their time
//! on.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::engine::Op;
use crate::{RuleSet, RuleTraits};

#[derive(Debug, Deserialize)]
struct LogMeta {
    rules: Vec<String>,
}

/// Totals from one [`trace_deletes`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteStats {
    /// Log entries consumed (the meta line not included).
    pub entries: u64,
    /// Delete records written.
    pub records: u64,
}

/// Replay a recorded-guess log and write one `D\t<pos>\t<char>` line per
/// delete that fired. Rules without a positional delete are skipped via
/// their trait mask; unknown rule ids are ignored.
pub fn trace_deletes<R: BufRead, W: Write>(log: R, out: &mut W) -> Result<DeleteStats> {
    let mut lines = log.lines();
    let meta_line = lines
        .next()
        .context("delete log is empty, expected a meta line")?
        .context("failed to read delete log meta line")?;
    let meta: LogMeta =
        serde_json::from_str(&meta_line).context("malformed delete log meta line")?;
    let rules = RuleSet::compile(&meta.rules);

    let mut stats = DeleteStats::default();
    // one register spans the whole replay, as it would in one engine
    let mut memory = String::new();

    for line in lines {
        let line = line.context("failed to read delete log")?;
        if line.trim().is_empty() {
            continue;
        }
        let (word, ids): (String, Vec<usize>) = serde_json::from_str(&line)
            .with_context(|| format!("malformed delete log entry: {line}"))?;
        stats.entries += 1;

        for id in ids {
            let Some(rule) = rules.get(id) else { continue };
            if !rule.traits().contains(RuleTraits::DELETES) {
                continue;
            }

            let mut current = word.clone();
            for op in rule.ops() {
                if let Op::DeleteAt(position) = *op {
                    if let Some(deleted) = current.chars().nth(position) {
                        writeln!(out, "D\t{position}\t{deleted}")
                            .context("failed to write delete record")?;
                        stats.records += 1;
                    }
                }
                if let Some(next) = op.forward(&current, &mut memory) {
                    current = next;
                }
            }
        }
    }

    Ok(stats)
}
