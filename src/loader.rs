//! Line-oriented loaders: rule files, word lists, target lists.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// Read a rule file: one rule per line, trimmed. Blank lines and `#`
/// comments are skipped.
pub fn read_rules<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open rule file {}", path.display()))?;

    let mut rules = Vec::new();
    for line in BufReader::new(file).lines() {
        let line =
            line.with_context(|| format!("failed to read rule file {}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rules.push(trimmed.to_string());
    }
    Ok(rules)
}

/// Lazy word-list reader yielding `(index, word)` with a 0-based index.
///
/// Only the line terminator is stripped; interior and trailing spaces are
/// part of the word. Blank lines are words too (the empty word is a legal
/// input to every rule).
pub struct Words<R> {
    lines: io::Lines<R>,
    next_index: usize,
}

impl<R: BufRead> Iterator for Words<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let index = self.next_index;
        self.next_index += 1;
        Some(line.map(|word| (index, word)))
    }
}

/// Open a word list file. See [`Words`].
pub fn read_words<P: AsRef<Path>>(path: P) -> Result<Words<BufReader<File>>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open word list {}", path.display()))?;
    Ok(words_from(BufReader::new(file)))
}

/// Wrap any buffered reader (stdin, an in-memory buffer) as a word source.
pub fn words_from<R: BufRead>(reader: R) -> Words<R> {
    Words { lines: reader.lines(), next_index: 0 }
}

/// Multiset of target strings.
///
/// Duplicate lines count: a guess that matches a target occurring three
/// times is worth three occurrences, and `total` reports lines loaded
/// rather than distinct strings.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    counts: HashMap<String, u64>,
    total: u64,
}

impl TargetSet {
    pub fn insert(&mut self, target: impl Into<String>) {
        *self.counts.entry(target.into()).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn contains(&self, guess: &str) -> bool {
        self.counts.contains_key(guess)
    }

    /// Occurrences of `guess` in the target list.
    pub fn count(&self, guess: &str) -> u64 {
        self.counts.get(guess).copied().unwrap_or(0)
    }

    /// Distinct targets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Lines loaded, duplicates included.
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl<S: Into<String>> FromIterator<S> for TargetSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = TargetSet::default();
        for target in iter {
            set.insert(target);
        }
        set
    }
}

/// Read a target list into a multiset. Lines are taken verbatim apart from
/// the terminator.
pub fn read_targets<P: AsRef<Path>>(path: P) -> Result<TargetSet> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open target list {}", path.display()))?;

    let mut set = TargetSet::default();
    for line in BufReader::new(file).lines() {
        let line =
            line.with_context(|| format!("failed to read target list {}", path.display()))?;
        set.insert(line);
    }
    Ok(set)
}
