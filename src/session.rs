//! Cracking drivers: stream a word list through an engine against targets.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::loader::TargetSet;
use crate::{ForwardEngine, ReversionEngine};

/// One matching guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// 0-based index of the input word in the word list.
    pub word_index: usize,
    /// The input word the rule ran over (a dictionary word forward, a
    /// mangled guess in reversion).
    pub word: String,
    /// What matched a target: the mangled guess forward, the recovered
    /// candidate in reversion.
    pub guess: String,
    /// Source text of the rule that produced the match.
    pub rule: String,
    /// Index of that rule in the engine's rule set.
    pub rule_index: usize,
    /// 1-based guess number across the whole run.
    pub guess_number: u64,
}

/// Totals for one driver run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub words: u64,
    pub guesses: u64,
    pub hits: u64,
    pub elapsed: Duration,
}

impl RunStats {
    /// Average guess throughput over the run so far.
    pub fn guesses_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 { self.guesses as f64 / secs } else { 0.0 }
    }
}

/// Apply every rule to every word, reporting matches against `targets`.
///
/// `on_hit` fires once per matching guess; a word can hit more than once
/// and every rule still runs (hits never short-circuit). `on_progress`
/// fires every `progress_every` words, 0 disables it. An empty target set
/// turns the run into a pure benchmark.
pub fn run_forward<W, H, P>(
    engine: &mut ForwardEngine,
    words: W,
    targets: &TargetSet,
    progress_every: u64,
    mut on_hit: H,
    mut on_progress: P,
) -> Result<RunStats>
where
    W: Iterator<Item = io::Result<(usize, String)>>,
    H: FnMut(&Hit),
    P: FnMut(&RunStats),
{
    let started = Instant::now();
    let mut stats = RunStats::default();

    for entry in words {
        let (word_index, word) = entry.context("failed to read word list")?;
        for (rule_index, (guess, rule)) in engine.apply(&word).enumerate() {
            stats.guesses += 1;
            if targets.contains(&guess) {
                stats.hits += 1;
                on_hit(&Hit {
                    word_index,
                    word: word.clone(),
                    guess,
                    rule: rule.to_string(),
                    rule_index,
                    guess_number: stats.guesses,
                });
            }
        }
        stats.words += 1;
        if progress_every != 0 && stats.words % progress_every == 0 {
            stats.elapsed = started.elapsed();
            on_progress(&stats);
        }
    }

    stats.elapsed = started.elapsed();
    Ok(stats)
}

/// The reversion counterpart of [`run_forward`]: run every active rule
/// backwards over every word and report recovered candidates found in
/// `targets` (typically the ordinary-word side when guesses leaked).
pub fn run_revert<W, H, P>(
    engine: &ReversionEngine,
    words: W,
    targets: &TargetSet,
    progress_every: u64,
    mut on_hit: H,
    mut on_progress: P,
) -> Result<RunStats>
where
    W: Iterator<Item = io::Result<(usize, String)>>,
    H: FnMut(&Hit),
    P: FnMut(&RunStats),
{
    let started = Instant::now();
    let mut stats = RunStats::default();
    let active = engine.active_indices().to_vec();

    for entry in words {
        let (word_index, word) = entry.context("failed to read word list")?;
        for (slot, (candidate, rule)) in engine.apply(&word).enumerate() {
            stats.guesses += 1;
            if targets.contains(&candidate) {
                stats.hits += 1;
                on_hit(&Hit {
                    word_index,
                    word: word.clone(),
                    guess: candidate,
                    rule: rule.to_string(),
                    rule_index: active[slot],
                    guess_number: stats.guesses,
                });
            }
        }
        stats.words += 1;
        if progress_every != 0 && stats.words % progress_every == 0 {
            stats.elapsed = started.elapsed();
            on_progress(&stats);
        }
    }

    stats.elapsed = started.elapsed();
    Ok(stats)
}
