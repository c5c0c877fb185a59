use crate::{ForwardEngine, ReversionEngine, RuleSet};

/// Compile rule sources into a [`RuleSet`].
///
/// Thin wrapper over [`RuleSet::compile`] for the common case.
///
/// # Example
/// ```
/// let rules = remangle::compile(["l", "$1", "ss$"]);
/// assert_eq!(rules.len(), 3);
/// ```
pub fn compile<I, S>(sources: I) -> RuleSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RuleSet::compile(sources)
}

/// Apply a single rule to a single word.
///
/// Builds a throwaway engine per call, so the register starts empty every
/// time. For whole word lists, use [`ForwardEngine`] directly and keep it
/// alive across words.
///
/// # Example
/// ```
/// use remangle::mangle;
///
/// assert_eq!(mangle("PASSWORD", "$l $y"), "PASSWORDly");
/// assert_eq!(mangle("PASSWORD", "$ l$y"), "password y");
/// assert_eq!(mangle("p@ssW0rd", "lMuX084"), "P@SSp@ssw0rdW0RD");
/// ```
pub fn mangle(word: &str, rule: &str) -> String {
    let mut engine = ForwardEngine::new(RuleSet::compile([rule]));
    match engine.apply(word).next() {
        Some((guess, _)) => guess,
        None => word.to_string(),
    }
}

/// Run a single rule backwards over an already-mangled guess.
///
/// Best effort: operations with an exact inverse are undone, lossy ones
/// pass the string through. A verification miss (the guess cannot have come
/// from this rule) also passes the string through.
///
/// # Example
/// ```
/// use remangle::unmangle;
///
/// assert_eq!(unmangle("p@ssW0rd1", "$1"), "p@ssW0rd");
/// assert_eq!(unmangle("drowssap", "r"), "password");
/// assert_eq!(unmangle("P@SSW0RD", "u"), "P@SSW0RD");
/// ```
pub fn unmangle(word: &str, rule: &str) -> String {
    let engine = ReversionEngine::new(RuleSet::compile([rule]));
    match engine.apply(word).next() {
        Some((candidate, _)) => candidate,
        None => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mangle_uses_a_fresh_register_per_call() {
        assert_eq!(mangle("keep", "M"), "keep");
        // the previous call's register must not leak into this one
        assert_eq!(mangle("ab", "4"), "ab");
    }

    #[test]
    fn unparseable_rules_act_as_identity() {
        assert_eq!(mangle("word", ""), "word");
        assert_eq!(mangle("word", "??"), "word");
        assert_eq!(unmangle("word", ""), "word");
        assert_eq!(unmangle("word", "~~"), "word");
    }

    #[test]
    fn compile_preserves_source_order() {
        let rules = compile(["u", ":", "r"]);
        let sources: Vec<&str> = rules.rules().iter().map(|r| r.source()).collect();
        assert_eq!(sources, vec!["u", ":", "r"]);
    }
}
