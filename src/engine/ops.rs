//! The instruction set: one closed union covering every operator, with both
//! interpretation directions on it.
//!
//! `Op::forward` mutates a word (threading the memory register); `Op::invert`
//! evaluates the best-effort inverse against an already-mutated string and
//! reports how well it did through [`Inverse`].
//!
//! All positions are char positions, never byte offsets. The fault line runs
//! between position operators and span operators: a position operator
//! (`T`, `D`, `o`, `i`, the insert point of `X`, and the single-char
//! rotations/duplications on an empty word) faults when the addressed
//! position does not exist, and the engines degrade the fault to a no-op.
//! A span operator (`x`, `O`, `'`, `[`, `]`) clamps to the word and is total.

use crate::RuleTraits;

/// One compiled operation with bound arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    /// `:` do nothing.
    Nothing,
    /// `l` lowercase every char.
    Lowercase,
    /// `u` uppercase every char.
    Uppercase,
    /// `c` uppercase the first char, lowercase the rest.
    Capitalize,
    /// `C` lowercase the first char, uppercase the rest.
    InvertCapitalize,
    /// `t` toggle the case of every char.
    ToggleCase,
    /// `T n` toggle the case of the char at position n.
    ToggleAt(usize),
    /// `r` reverse the word.
    Reverse,
    /// `d` duplicate the whole word.
    Duplicate,
    /// `p n` duplicate the whole word n additional times.
    DuplicateTimes(usize),
    /// `f` append the reversed word.
    Reflect,
    /// `{` rotate left by one.
    RotateLeft,
    /// `}` rotate right by one.
    RotateRight,
    /// `$ c` append c.
    Append(char),
    /// `^ c` prepend c.
    Prepend(char),
    /// `[` delete the first char.
    DeleteFirst,
    /// `]` delete the last char.
    DeleteLast,
    /// `D n` delete the char at position n.
    DeleteAt(usize),
    /// `x a b` keep positions [a, b) only.
    Extract(usize, usize),
    /// `O a b` remove positions [a, b] inclusive.
    Omit(usize, usize),
    /// `i n c` insert c at position n (n at the length appends).
    Insert(usize, char),
    /// `o n c` overwrite the char at position n with c.
    Overwrite(usize, char),
    /// `' n` truncate to the first n chars.
    Truncate(usize),
    /// `s x y` replace every x with y.
    Replace(char, char),
    /// `@ c` remove every c.
    Purge(char),
    /// `z n` prepend n copies of the first char.
    DuplicateFirst(usize),
    /// `Z n` append n copies of the last char.
    DuplicateLast(usize),
    /// `q` duplicate every char in place.
    DuplicateAll,
    /// `M` copy the word into the register; word unchanged.
    Memorize,
    /// `X p l i` insert register positions [p, p+l) at word position i.
    InsertMemory(usize, usize, usize),
    /// `4` append the register.
    AppendMemory,
    /// `6` prepend the register.
    PrependMemory,
}

/// Outcome of inverting one operation against a mutated string.
///
/// `Unchanged` and `Ambiguous` both pass the string through at the engine
/// level; keeping them apart is what lets callers tell "this operator class
/// cannot be undone" from "this particular string failed its check".
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Inverse {
    /// The inverse string was produced.
    Exact(String),
    /// This operator class has no inverse.
    Unchanged,
    /// Invertible in principle, but this attempt failed verification or
    /// faulted on a position.
    Ambiguous,
}

impl Op {
    /// Trait contribution of this operation (see [`RuleTraits`]).
    pub(crate) fn traits(self) -> RuleTraits {
        let mut traits = RuleTraits::empty();
        match self {
            Op::Memorize => traits |= RuleTraits::WRITES_MEMORY,
            Op::InsertMemory(..) | Op::AppendMemory | Op::PrependMemory => {
                traits |= RuleTraits::READS_MEMORY;
            }
            Op::DeleteAt(_) => traits |= RuleTraits::DELETES,
            _ => {}
        }
        if self.is_lossy() {
            traits |= RuleTraits::LOSSY;
        }
        traits
    }

    /// True when this operation has no exact inverse.
    pub(crate) fn is_lossy(self) -> bool {
        matches!(
            self,
            Op::Lowercase
                | Op::Uppercase
                | Op::Capitalize
                | Op::InvertCapitalize
                | Op::DeleteFirst
                | Op::DeleteLast
                | Op::DeleteAt(_)
                | Op::Extract(..)
                | Op::Omit(..)
                | Op::Overwrite(..)
                | Op::Truncate(_)
                | Op::Purge(_)
                | Op::Memorize
                | Op::InsertMemory(..)
                | Op::AppendMemory
                | Op::PrependMemory
        )
    }

    /// Apply the operation forward. `None` is a position fault; the engines
    /// degrade it to a no-op and run the rest of the rule.
    pub(crate) fn forward(self, word: &str, memory: &mut String) -> Option<String> {
        match self {
            Op::Nothing => Some(word.to_string()),
            Op::Lowercase => Some(word.to_lowercase()),
            Op::Uppercase => Some(word.to_uppercase()),
            Op::Capitalize => {
                let mut out = String::with_capacity(word.len());
                for (i, c) in word.chars().enumerate() {
                    if i == 0 {
                        out.extend(c.to_uppercase());
                    } else {
                        out.extend(c.to_lowercase());
                    }
                }
                Some(out)
            }
            Op::InvertCapitalize => {
                let mut out = String::with_capacity(word.len());
                for (i, c) in word.chars().enumerate() {
                    if i == 0 {
                        out.extend(c.to_lowercase());
                    } else {
                        out.extend(c.to_uppercase());
                    }
                }
                Some(out)
            }
            Op::ToggleCase => Some(toggle_all(word)),
            Op::ToggleAt(n) => toggle_at(word, n),
            Op::Reverse => Some(word.chars().rev().collect()),
            Op::Duplicate => Some([word, word].concat()),
            Op::DuplicateTimes(n) => Some(word.repeat(n + 1)),
            Op::Reflect => {
                let mut out = String::with_capacity(word.len() * 2);
                out.push_str(word);
                out.extend(word.chars().rev());
                Some(out)
            }
            Op::RotateLeft => rotate_left(word),
            Op::RotateRight => rotate_right(word),
            Op::Append(c) => {
                let mut out = word.to_string();
                out.push(c);
                Some(out)
            }
            Op::Prepend(c) => {
                let mut out = String::with_capacity(word.len() + c.len_utf8());
                out.push(c);
                out.push_str(word);
                Some(out)
            }
            Op::DeleteFirst => {
                let mut chars = word.chars();
                chars.next();
                Some(chars.collect())
            }
            Op::DeleteLast => {
                let chars = to_chars(word);
                let keep = chars.len().saturating_sub(1);
                Some(chars[..keep].iter().collect())
            }
            Op::DeleteAt(n) => {
                let chars = to_chars(word);
                if n >= chars.len() {
                    return None;
                }
                Some(without_position(&chars, n))
            }
            Op::Extract(a, b) => {
                let chars = to_chars(word);
                let lo = a.min(chars.len());
                let hi = b.min(chars.len());
                if lo >= hi {
                    return Some(String::new());
                }
                Some(chars[lo..hi].iter().collect())
            }
            Op::Omit(a, b) => {
                let out = word
                    .chars()
                    .enumerate()
                    .filter(|(i, _)| *i < a || *i > b)
                    .map(|(_, c)| c)
                    .collect();
                Some(out)
            }
            Op::Insert(n, c) => {
                let mut chars = to_chars(word);
                if n > chars.len() {
                    return None;
                }
                chars.insert(n, c);
                Some(chars.into_iter().collect())
            }
            Op::Overwrite(n, c) => {
                let mut chars = to_chars(word);
                if n >= chars.len() {
                    return None;
                }
                chars[n] = c;
                Some(chars.into_iter().collect())
            }
            Op::Truncate(n) => Some(word.chars().take(n).collect()),
            Op::Replace(from, to) => {
                Some(word.chars().map(|c| if c == from { to } else { c }).collect())
            }
            Op::Purge(c) => Some(word.chars().filter(|&k| k != c).collect()),
            Op::DuplicateFirst(n) => {
                let first = word.chars().next()?;
                let mut out = String::with_capacity(word.len() + n * first.len_utf8());
                for _ in 0..n {
                    out.push(first);
                }
                out.push_str(word);
                Some(out)
            }
            Op::DuplicateLast(n) => {
                let last = word.chars().last()?;
                let mut out = word.to_string();
                for _ in 0..n {
                    out.push(last);
                }
                Some(out)
            }
            Op::DuplicateAll => {
                let mut out = String::with_capacity(word.len() * 2);
                for c in word.chars() {
                    out.push(c);
                    out.push(c);
                }
                Some(out)
            }
            Op::Memorize => {
                memory.clear();
                memory.push_str(word);
                Some(word.to_string())
            }
            Op::InsertMemory(from, take, at) => {
                let chars = to_chars(word);
                if at > chars.len() {
                    return None;
                }
                let stash = to_chars(memory);
                let lo = from.min(stash.len());
                let hi = (from + take).min(stash.len());
                let mut out = String::new();
                out.extend(chars[..at].iter());
                out.extend(stash[lo..hi].iter());
                out.extend(chars[at..].iter());
                Some(out)
            }
            Op::AppendMemory => Some([word, memory.as_str()].concat()),
            Op::PrependMemory => Some([memory.as_str(), word].concat()),
        }
    }

    /// Evaluate the inverse against an already-mutated string.
    pub(crate) fn invert(self, word: &str) -> Inverse {
        use Inverse::{Ambiguous, Exact, Unchanged};

        match self {
            // self-inverse operators
            Op::Nothing => Exact(word.to_string()),
            Op::ToggleCase => Exact(toggle_all(word)),
            Op::ToggleAt(n) => toggle_at(word, n).map_or(Ambiguous, Exact),
            Op::Reverse => Exact(word.chars().rev().collect()),

            // rotations swap direction
            Op::RotateLeft => rotate_right(word).map_or(Ambiguous, Exact),
            Op::RotateRight => rotate_left(word).map_or(Ambiguous, Exact),

            // strip after verifying the boundary char
            Op::Append(c) => {
                let chars = to_chars(word);
                match chars.split_last() {
                    Some((&last, rest)) if last == c => Exact(rest.iter().collect()),
                    _ => Ambiguous,
                }
            }
            Op::Prepend(c) => {
                let chars = to_chars(word);
                match chars.split_first() {
                    Some((&first, rest)) if first == c => Exact(rest.iter().collect()),
                    _ => Ambiguous,
                }
            }

            // keep the leading share of a duplicated whole
            Op::Duplicate | Op::Reflect => {
                let chars = to_chars(word);
                Exact(chars[..chars.len() / 2].iter().collect())
            }
            Op::DuplicateTimes(n) => {
                let chars = to_chars(word);
                Exact(chars[..chars.len() / (n + 1)].iter().collect())
            }

            // strip a run after verifying it, boundary char included
            Op::DuplicateFirst(n) => {
                if n == 0 {
                    return Exact(word.to_string());
                }
                let chars = to_chars(word);
                if chars.len() > n && uniform(&chars[..=n]) {
                    Exact(chars[n..].iter().collect())
                } else {
                    Ambiguous
                }
            }
            Op::DuplicateLast(n) => {
                if n == 0 {
                    return Exact(word.to_string());
                }
                let chars = to_chars(word);
                if chars.len() > n && uniform(&chars[chars.len() - 1 - n..]) {
                    Exact(chars[..chars.len() - n].iter().collect())
                } else {
                    Ambiguous
                }
            }
            Op::DuplicateAll => {
                let chars = to_chars(word);
                if chars.len() % 2 == 0 && chars.chunks(2).all(|pair| pair[0] == pair[1]) {
                    Exact(chars.iter().step_by(2).collect())
                } else {
                    Ambiguous
                }
            }

            Op::Insert(n, c) => {
                let chars = to_chars(word);
                if n < chars.len() && chars[n] == c {
                    Exact(without_position(&chars, n))
                } else {
                    Ambiguous
                }
            }

            // replace back; a pre-existing target char folds in, a known
            // false positive
            Op::Replace(from, to) => {
                Exact(word.chars().map(|c| if c == to { from } else { c }).collect())
            }

            // no inverse exists for the rest
            Op::Lowercase
            | Op::Uppercase
            | Op::Capitalize
            | Op::InvertCapitalize
            | Op::DeleteFirst
            | Op::DeleteLast
            | Op::DeleteAt(_)
            | Op::Extract(..)
            | Op::Omit(..)
            | Op::Overwrite(..)
            | Op::Truncate(_)
            | Op::Purge(_)
            | Op::Memorize
            | Op::InsertMemory(..)
            | Op::AppendMemory
            | Op::PrependMemory => Unchanged,
        }
    }
}

fn to_chars(word: &str) -> Vec<char> {
    word.chars().collect()
}

fn uniform(chars: &[char]) -> bool {
    chars.windows(2).all(|pair| pair[0] == pair[1])
}

fn without_position(chars: &[char], n: usize) -> String {
    chars
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != n)
        .map(|(_, &c)| c)
        .collect()
}

fn toggle_char_into(c: char, out: &mut String) {
    if c.is_uppercase() {
        out.extend(c.to_lowercase());
    } else if c.is_lowercase() {
        out.extend(c.to_uppercase());
    } else {
        out.push(c);
    }
}

fn toggle_all(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        toggle_char_into(c, &mut out);
    }
    out
}

fn toggle_at(word: &str, n: usize) -> Option<String> {
    let chars = to_chars(word);
    if n >= chars.len() {
        return None;
    }
    let mut out = String::with_capacity(word.len());
    for (i, &c) in chars.iter().enumerate() {
        if i == n {
            toggle_char_into(c, &mut out);
        } else {
            out.push(c);
        }
    }
    Some(out)
}

fn rotate_left(word: &str) -> Option<String> {
    let mut chars = word.chars();
    let first = chars.next()?;
    let mut out: String = chars.collect();
    out.push(first);
    Some(out)
}

fn rotate_right(word: &str) -> Option<String> {
    let chars = to_chars(word);
    let (&last, rest) = chars.split_last()?;
    let mut out = String::with_capacity(word.len());
    out.push(last);
    out.extend(rest.iter());
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fwd(op: Op, word: &str) -> Option<String> {
        let mut memory = String::new();
        op.forward(word, &mut memory)
    }

    #[test]
    fn position_ops_fault_past_the_end() {
        assert_eq!(fwd(Op::ToggleAt(3), "abc"), None);
        assert_eq!(fwd(Op::DeleteAt(3), "abc"), None);
        assert_eq!(fwd(Op::Overwrite(3, 'x'), "abc"), None);
        assert_eq!(fwd(Op::Insert(4, 'x'), "abc"), None);
        assert_eq!(fwd(Op::Insert(3, 'x'), "abc"), Some("abcx".into()));
        assert_eq!(fwd(Op::RotateLeft, ""), None);
        assert_eq!(fwd(Op::RotateRight, ""), None);
        assert_eq!(fwd(Op::DuplicateFirst(0), ""), None);
        assert_eq!(fwd(Op::DuplicateLast(2), ""), None);
    }

    #[test]
    fn span_ops_clamp_and_never_fault() {
        assert_eq!(fwd(Op::Extract(2, 9), "abc"), Some("c".into()));
        assert_eq!(fwd(Op::Extract(5, 9), "abc"), Some("".into()));
        assert_eq!(fwd(Op::Extract(2, 1), "abc"), Some("".into()));
        assert_eq!(fwd(Op::Omit(5, 9), "abc"), Some("abc".into()));
        assert_eq!(fwd(Op::Omit(2, 0), "abc"), Some("abc".into()));
        assert_eq!(fwd(Op::Truncate(9), "abc"), Some("abc".into()));
        assert_eq!(fwd(Op::DeleteFirst, ""), Some("".into()));
        assert_eq!(fwd(Op::DeleteLast, ""), Some("".into()));
    }

    #[test]
    fn memory_register_flow() {
        let mut memory = String::new();
        assert_eq!(Op::Memorize.forward("stash", &mut memory), Some("stash".into()));
        assert_eq!(memory, "stash");
        assert_eq!(Op::AppendMemory.forward("ab", &mut memory), Some("abstash".into()));
        assert_eq!(Op::PrependMemory.forward("ab", &mut memory), Some("stashab".into()));
        assert_eq!(Op::InsertMemory(1, 3, 2).forward("abcd", &mut memory), Some("abtascd".into()));
        // the register slice clamps, the insert point does not
        assert_eq!(Op::InsertMemory(4, 9, 0).forward("ab", &mut memory), Some("hab".into()));
        assert_eq!(Op::InsertMemory(0, 2, 9).forward("ab", &mut memory), None);
    }

    #[test]
    fn memory_reads_on_a_fresh_register_are_no_ops() {
        let mut memory = String::new();
        assert_eq!(Op::AppendMemory.forward("ab", &mut memory), Some("ab".into()));
        assert_eq!(Op::PrependMemory.forward("ab", &mut memory), Some("ab".into()));
        assert_eq!(Op::InsertMemory(0, 5, 1).forward("ab", &mut memory), Some("ab".into()));
    }

    #[test]
    fn inverse_classification_is_tri_state() {
        // categorical: the operator class has no inverse
        assert_eq!(Op::Lowercase.invert("abc"), Inverse::Unchanged);
        assert_eq!(Op::Truncate(2).invert("abc"), Inverse::Unchanged);
        assert_eq!(Op::DeleteAt(0).invert("abc"), Inverse::Unchanged);
        assert_eq!(Op::AppendMemory.invert("abc"), Inverse::Unchanged);

        // verification failures on this particular string
        assert_eq!(Op::Append('x').invert("abc"), Inverse::Ambiguous);
        assert_eq!(Op::Append('c').invert("abc"), Inverse::Exact("ab".into()));
        assert_eq!(Op::Prepend('a').invert("abc"), Inverse::Exact("bc".into()));
        assert_eq!(Op::Insert(1, 'b').invert("abc"), Inverse::Exact("ac".into()));
        assert_eq!(Op::Insert(1, 'z').invert("abc"), Inverse::Ambiguous);
        assert_eq!(Op::Append('x').invert(""), Inverse::Ambiguous);

        // position faults on this particular string
        assert_eq!(Op::ToggleAt(9).invert("abc"), Inverse::Ambiguous);
        assert_eq!(Op::RotateLeft.invert(""), Inverse::Ambiguous);
    }

    #[test]
    fn run_verification_covers_the_boundary_char() {
        assert_eq!(Op::DuplicateFirst(2).invert("aaab"), Inverse::Exact("ab".into()));
        assert_eq!(Op::DuplicateFirst(2).invert("aabb"), Inverse::Ambiguous);
        assert_eq!(Op::DuplicateFirst(0).invert("xy"), Inverse::Exact("xy".into()));
        assert_eq!(Op::DuplicateLast(1).invert("abb"), Inverse::Exact("ab".into()));
        assert_eq!(Op::DuplicateLast(1).invert("ab"), Inverse::Ambiguous);
        assert_eq!(Op::DuplicateAll.invert("aabbcc"), Inverse::Exact("abc".into()));
        assert_eq!(Op::DuplicateAll.invert("aabbc"), Inverse::Ambiguous);
        assert_eq!(Op::DuplicateAll.invert("abab"), Inverse::Ambiguous);
        assert_eq!(Op::DuplicateAll.invert(""), Inverse::Exact("".into()));
    }

    #[test]
    fn replace_inverse_has_documented_false_positives() {
        assert_eq!(Op::Replace('s', '$').invert("pa$$word"), Inverse::Exact("password".into()));
        // a target char that was already present folds in
        assert_eq!(Op::Replace('a', 'b').invert("bb"), Inverse::Exact("aa".into()));
    }

    #[test]
    fn case_ops_handle_multibyte_chars() {
        let mut memory = String::new();
        assert_eq!(Op::ToggleCase.forward("Ünïcøde", &mut memory), Some("üNÏCØDE".into()));
        assert_eq!(Op::Capitalize.forward("éclair", &mut memory), Some("Éclair".into()));
        assert_eq!(Op::ToggleAt(1).forward("αβγ", &mut memory), Some("αΒγ".into()));
    }
}
