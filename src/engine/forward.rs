//! Forward application: dictionary words in, mangled guesses out.

use crate::{Rule, RuleSet};

/// Applies compiled rules to candidate words.
///
/// The engine owns the memory register: `M` writes it, `X`/`4`/`6` read it,
/// and its contents persist across `apply` calls and across `change_rules`.
/// Nothing clears it between runs short of dropping the engine.
#[derive(Debug)]
pub struct ForwardEngine {
    rules: RuleSet,
    /// Single-slot memory register shared by every rule this engine runs.
    memory: String,
    debug: bool,
}

impl ForwardEngine {
    pub fn new(rules: RuleSet) -> Self {
        ForwardEngine {
            rules,
            memory: String::new(),
            debug: std::env::var_os("REMANGLE_DEBUG_RULES").is_some(),
        }
    }

    /// Swap the rule set. The register is left as is, so a later set can
    /// read what an earlier one memorized.
    pub fn change_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Apply every rule to `word`, lazily, in rule order.
    ///
    /// Each item is `(guess, rule_source)`. Consuming only part of the
    /// iterator runs only those rules, register effects included.
    pub fn apply<'a>(&'a mut self, word: &'a str) -> Guesses<'a> {
        Guesses {
            rules: self.rules.rules().iter(),
            memory: &mut self.memory,
            word,
            debug: self.debug,
        }
    }
}

impl Default for ForwardEngine {
    fn default() -> Self {
        ForwardEngine::new(RuleSet::default())
    }
}

/// Lazy iterator over one word's guesses. See [`ForwardEngine::apply`].
pub struct Guesses<'a> {
    rules: std::slice::Iter<'a, Rule>,
    memory: &'a mut String,
    word: &'a str,
    debug: bool,
}

impl<'a> Iterator for Guesses<'a> {
    type Item = (String, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rule = self.rules.next()?;
        let mut current = self.word.to_string();
        for op in rule.ops() {
            // a fault leaves the word as it was; the rest of the rule still runs
            if let Some(next) = op.forward(&current, self.memory) {
                current = next;
            }
        }
        if self.debug {
            eprintln!("[remangle] {:?} | {:?} -> {:?}", rule.source(), self.word, current);
        }
        Some((current, rule.source()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rules.size_hint()
    }
}

impl ExactSizeIterator for Guesses<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleSet;

    #[test]
    fn rules_apply_independently_in_order() {
        let mut engine = ForwardEngine::new(RuleSet::compile([":", "$1", "ss$"]));
        let got: Vec<(String, &str)> = engine.apply("password").collect();
        assert_eq!(
            got,
            vec![
                ("password".to_string(), ":"),
                ("password1".to_string(), "$1"),
                ("pa$$word".to_string(), "ss$"),
            ]
        );
    }

    #[test]
    fn register_persists_across_apply_and_change_rules() {
        let mut engine = ForwardEngine::new(RuleSet::compile(["M"]));
        assert_eq!(engine.apply("first").count(), 1);

        engine.change_rules(RuleSet::compile(["4"]));
        let got: Vec<String> = engine.apply("second").map(|(guess, _)| guess).collect();
        assert_eq!(got, vec!["secondfirst".to_string()]);
    }

    #[test]
    fn partial_consumption_runs_only_consumed_rules() {
        let mut engine = ForwardEngine::new(RuleSet::compile(["uM", "lM"]));
        let first = engine.apply("Word").next().map(|(guess, _)| guess);
        assert_eq!(first.as_deref(), Some("WORD"));

        // the second rule never ran, so the register holds the uppercase form
        engine.change_rules(RuleSet::compile(["4"]));
        let got: Vec<String> = engine.apply("x").map(|(guess, _)| guess).collect();
        assert_eq!(got, vec!["xWORD".to_string()]);
    }

    #[test]
    fn faults_degrade_to_no_ops_mid_rule() {
        let mut engine = ForwardEngine::new(RuleSet::compile(["T9$!", "{x"]));
        let got: Vec<String> = engine.apply("abc").map(|(guess, _)| guess).collect();
        assert_eq!(got, vec!["abc!".to_string(), "bca".to_string()]);
    }

    #[test]
    fn guesses_reports_an_exact_length() {
        let mut engine = ForwardEngine::new(RuleSet::compile(["l", "u", "t"]));
        assert_eq!(engine.apply("aB").len(), 3);
    }
}
