//! Reversion: mangled guesses back to candidate dictionary words.

use super::ops::Inverse;
use crate::RuleSet;

/// Applies inverse operations in reverse order.
///
/// Reversal is best effort: operations with no exact inverse pass the
/// string through unchanged, so a rule flagged `RuleTraits::LOSSY` yields an
/// approximation. No register is involved; what `M` stored cannot be
/// reconstructed from a guess.
#[derive(Debug)]
pub struct ReversionEngine {
    rules: RuleSet,
    /// Indices into `rules` that `apply` replays, in order. Always in range.
    active: Vec<usize>,
    debug: bool,
}

impl ReversionEngine {
    pub fn new(rules: RuleSet) -> Self {
        let active = (0..rules.len()).collect();
        ReversionEngine {
            rules,
            active,
            debug: std::env::var_os("REMANGLE_DEBUG_RULES").is_some(),
        }
    }

    /// Swap the rule set and reset the active set to all rules.
    pub fn change_rules(&mut self, rules: RuleSet) {
        self.active = (0..rules.len()).collect();
        self.rules = rules;
    }

    /// Replay only `indices`, in the order given. Indices past the rule set
    /// are ignored.
    pub fn change_active_indices<I>(&mut self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let len = self.rules.len();
        self.active = indices.into_iter().filter(|&i| i < len).collect();
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn active_indices(&self) -> &[usize] {
        &self.active
    }

    /// Run every active rule backwards over `word`, lazily, in active order.
    ///
    /// Each item is `(candidate, rule_source)`.
    pub fn apply<'a>(&'a self, word: &'a str) -> Recovered<'a> {
        Recovered { engine: self, indices: self.active.iter(), word }
    }
}

impl Default for ReversionEngine {
    fn default() -> Self {
        ReversionEngine::new(RuleSet::default())
    }
}

/// Lazy iterator over recovered candidates. See [`ReversionEngine::apply`].
pub struct Recovered<'a> {
    engine: &'a ReversionEngine,
    indices: std::slice::Iter<'a, usize>,
    word: &'a str,
}

impl<'a> Iterator for Recovered<'a> {
    type Item = (String, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let &index = self.indices.next()?;
        let rule = &self.engine.rules.rules()[index];
        let mut current = self.word.to_string();
        for op in rule.ops().iter().rev() {
            match op.invert(&current) {
                Inverse::Exact(previous) => current = previous,
                Inverse::Unchanged | Inverse::Ambiguous => {}
            }
        }
        if self.engine.debug {
            eprintln!("[remangle] undo {:?} | {:?} -> {:?}", rule.source(), self.word, current);
        }
        Some((current, rule.source()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for Recovered<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_in_active_order_over_a_subset() {
        let mut engine = ReversionEngine::new(RuleSet::compile(["$1", "u", "r"]));
        engine.change_active_indices([2, 0, 9]);
        assert_eq!(engine.active_indices(), &[2, 0]);

        let got: Vec<(String, &str)> = engine.apply("stressed1").collect();
        assert_eq!(
            got,
            vec![("1desserts".to_string(), "r"), ("stressed".to_string(), "$1")]
        );
    }

    #[test]
    fn lossy_ops_pass_through_mid_rule() {
        let engine = ReversionEngine::new(RuleSet::compile(["l$1"]));
        let got: Vec<String> = engine.apply("password1").map(|(word, _)| word).collect();
        assert_eq!(got, vec!["password".to_string()]);
    }

    #[test]
    fn verification_failure_leaves_the_word_unchanged() {
        let engine = ReversionEngine::new(RuleSet::compile(["$a"]));
        let got: Vec<String> = engine.apply("hello").map(|(word, _)| word).collect();
        assert_eq!(got, vec!["hello".to_string()]);
    }

    #[test]
    fn change_rules_resets_the_active_set() {
        let mut engine = ReversionEngine::new(RuleSet::compile(["r", "u"]));
        engine.change_active_indices([1]);
        engine.change_rules(RuleSet::compile(["t"]));
        assert_eq!(engine.active_indices(), &[0]);

        let got: Vec<String> = engine.apply("aBc").map(|(word, _)| word).collect();
        assert_eq!(got, vec!["AbC".to_string()]);
    }

    #[test]
    fn inverses_run_in_reverse_operation_order() {
        // forward: rotate then append; backward must strip before rotating
        let engine = ReversionEngine::new(RuleSet::compile(["{$s"]));
        let got: Vec<String> = engine.apply("bcas").map(|(word, _)| word).collect();
        assert_eq!(got, vec!["abc".to_string()]);
    }
}
