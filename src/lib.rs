mod api;
mod engine;
mod loader;
mod session;
mod trace;

pub use api::{compile, mangle, unmangle};
pub use engine::{ForwardEngine, Guesses, Recovered, ReversionEngine};
pub use loader::{TargetSet, Words, read_rules, read_targets, read_words, words_from};
pub use session::{Hit, RunStats, run_forward, run_revert};
pub use trace::{DeleteStats, trace_deletes};

use crate::engine::Op;

// --- Core types -------------------------------------------------------------

bitflags::bitflags! {
    /// Compile-time traits of a rule, unioned over its operations.
    ///
    /// Computed once in `RuleSet::compile` so callers (the reversion side,
    /// the delete tracer) can decide per rule without walking operations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RuleTraits: u8 {
        /// Writes the memory register (`M`).
        const WRITES_MEMORY = 1 << 0;
        /// Reads the memory register (`X`, `4`, `6`).
        const READS_MEMORY = 1 << 1;
        /// Contains at least one operation with no exact inverse; reverting
        /// this rule yields an approximation.
        const LOSSY = 1 << 2;
        /// Contains a positional delete (`D`).
        const DELETES = 1 << 3;
    }
}

/// One compiled rule: the source line plus its operation sequence.
///
/// The operation sequence is fixed at construction. Characters of the source
/// that did not tokenize are retained in `source` (they are part of the
/// rule's identity in logs) but contribute no operation.
#[derive(Debug, Clone)]
pub struct Rule {
    source: String,
    ops: Vec<Op>,
    traits: RuleTraits,
}

impl Rule {
    pub(crate) fn compile(source: &str) -> Self {
        let ops = engine::tokenize(source);
        let traits = ops.iter().fold(RuleTraits::empty(), |acc, op| acc | op.traits());
        Rule { source: source.to_string(), ops, traits }
    }

    /// The rule text as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of operations the source compiled to.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn traits(&self) -> RuleTraits {
        self.traits
    }

    pub(crate) fn ops(&self) -> &[Op] {
        &self.ops
    }
}

/// An ordered set of compiled rules, shared by both engines.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile rule sources in order. Compilation never fails; a source that
    /// tokenizes to nothing still occupies its slot (and acts as `:`).
    pub fn compile<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = sources.into_iter().map(|s| Rule::compile(s.as_ref())).collect();
        RuleSet { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Union of every rule's traits.
    pub fn traits(&self) -> RuleTraits {
        self.rules.iter().fold(RuleTraits::empty(), |acc, r| acc | r.traits())
    }
}

impl Default for RuleSet {
    /// The single no-op rule `:` (pass every word through unchanged).
    fn default() -> Self {
        RuleSet::compile([":"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traits_union_over_operations() {
        let cases: Vec<(&str, RuleTraits)> = vec![
            (":", RuleTraits::empty()),
            ("t", RuleTraits::empty()),
            ("l", RuleTraits::LOSSY),
            ("M", RuleTraits::WRITES_MEMORY | RuleTraits::LOSSY),
            ("4", RuleTraits::READS_MEMORY | RuleTraits::LOSSY),
            ("X084", RuleTraits::READS_MEMORY | RuleTraits::LOSSY),
            ("D3", RuleTraits::DELETES | RuleTraits::LOSSY),
            ("$1T0", RuleTraits::empty()),
            (
                "lMuX084",
                RuleTraits::LOSSY | RuleTraits::WRITES_MEMORY | RuleTraits::READS_MEMORY,
            ),
        ];

        for (source, expected) in cases {
            let rule = Rule::compile(source);
            assert_eq!(
                rule.traits(),
                expected,
                "traits for rule '{source}' were {:?}",
                rule.traits()
            );
        }
    }

    #[test]
    fn ruleset_traits_and_default() {
        let set = RuleSet::compile(["$1", "D0"]);
        assert!(set.traits().contains(RuleTraits::DELETES));
        assert!(set.traits().contains(RuleTraits::LOSSY));

        let identity = RuleSet::default();
        assert_eq!(identity.len(), 1);
        assert_eq!(identity.rules()[0].source(), ":");
    }

    #[test]
    fn rule_keeps_dropped_source_chars() {
        let rule = Rule::compile("l Z5");
        assert_eq!(rule.source(), "l Z5");
        assert_eq!(rule.len(), 2);
    }
}
