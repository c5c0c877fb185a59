//! The operator grammar: an ordered catalog of operator shapes and the
//! scanning tokenizer that turns a rule line into operations.
//!
//! Tokenization never fails. The scanner walks the line left to right; a
//! char that does not head a complete, well-formed operator is dropped
//! silently and scanning resumes one char later, which can land inside what
//! would have been an argument:
//!
//! ```text
//! "x4"     at end of line: 'x' wants two numerals, gets one -> dropped;
//!          '4' then matches on its own (append register)
//! "$l $y"  appends 'l', drops the space, appends 'y'
//! "$ l$y"  appends ' ', lowercases, appends 'y'
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::ops::Op;

/// Argument class of one operator argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArgKind {
    /// One base-36 digit: `0`-`9`, then `a`/`A` = 10 through `z`/`Z` = 35.
    Numeral,
    /// Any single char. Rules are line-oriented, so a newline never binds.
    Literal,
}

/// Shape of one operator: its char and the argument classes it consumes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpShape {
    pub op: char,
    pub args: &'static [ArgKind],
}

use ArgKind::{Literal, Numeral};

/// The operator catalog, in the order the rule language documents them.
/// Scanning keys on the operator char (no two shapes share one); the order
/// here is for reading side by side with the instruction set.
pub(crate) static CATALOG: &[OpShape] = &[
    OpShape { op: ':', args: &[] },
    OpShape { op: 'l', args: &[] },
    OpShape { op: 'u', args: &[] },
    OpShape { op: 'c', args: &[] },
    OpShape { op: 'C', args: &[] },
    OpShape { op: 't', args: &[] },
    OpShape { op: 'T', args: &[Numeral] },
    OpShape { op: 'r', args: &[] },
    OpShape { op: 'd', args: &[] },
    OpShape { op: 'p', args: &[Numeral] },
    OpShape { op: 'f', args: &[] },
    OpShape { op: '{', args: &[] },
    OpShape { op: '}', args: &[] },
    OpShape { op: '$', args: &[Literal] },
    OpShape { op: '^', args: &[Literal] },
    OpShape { op: '[', args: &[] },
    OpShape { op: ']', args: &[] },
    OpShape { op: 'D', args: &[Numeral] },
    OpShape { op: 'x', args: &[Numeral, Numeral] },
    OpShape { op: 'O', args: &[Numeral, Numeral] },
    OpShape { op: 'i', args: &[Numeral, Literal] },
    OpShape { op: 'o', args: &[Numeral, Literal] },
    OpShape { op: '\'', args: &[Numeral] },
    OpShape { op: 's', args: &[Literal, Literal] },
    OpShape { op: '@', args: &[Literal] },
    OpShape { op: 'z', args: &[Numeral] },
    OpShape { op: 'Z', args: &[Numeral] },
    OpShape { op: 'q', args: &[] },
    OpShape { op: 'M', args: &[] },
    OpShape { op: 'X', args: &[Numeral, Numeral, Numeral] },
    OpShape { op: '4', args: &[] },
    OpShape { op: '6', args: &[] },
];

static BY_CHAR: Lazy<HashMap<char, &'static OpShape>> =
    Lazy::new(|| CATALOG.iter().map(|shape| (shape.op, shape)).collect());

/// One bound argument produced by the scanner.
#[derive(Debug, Clone, Copy)]
enum Arg {
    Numeral(usize),
    Literal(char),
}

/// Decode one base-36 digit, case insensitive.
pub(crate) fn base36(c: char) -> Option<usize> {
    c.to_digit(36).map(|d| d as usize)
}

/// Tokenize one rule line against the catalog.
pub(crate) fn tokenize(source: &str) -> Vec<Op> {
    let chars: Vec<char> = source.chars().collect();
    let mut ops = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        match scan_at(&chars, pos) {
            Some((op, consumed)) => {
                ops.push(op);
                pos += consumed;
            }
            None => pos += 1,
        }
    }

    ops
}

/// Try to match one operation anchored at `pos`. Returns the operation and
/// the number of chars consumed (operator plus arguments).
fn scan_at(chars: &[char], pos: usize) -> Option<(Op, usize)> {
    let shape = BY_CHAR.get(&chars[pos])?;

    let mut args = Vec::with_capacity(shape.args.len());
    for (slot, kind) in shape.args.iter().enumerate() {
        let raw = *chars.get(pos + 1 + slot)?;
        args.push(match kind {
            ArgKind::Numeral => Arg::Numeral(base36(raw)?),
            ArgKind::Literal => {
                if raw == '\n' {
                    return None;
                }
                Arg::Literal(raw)
            }
        });
    }

    Some((assemble(shape.op, &args), 1 + shape.args.len()))
}

/// Build the operation for a catalog entry from its bound arguments.
///
/// Only called by `scan_at` with arguments matching the entry's shape; the
/// trailing arm is unreachable while catalog and match stay in sync.
fn assemble(op: char, args: &[Arg]) -> Op {
    use Arg::{Literal as L, Numeral as N};

    match (op, args) {
        (':', []) => Op::Nothing,
        ('l', []) => Op::Lowercase,
        ('u', []) => Op::Uppercase,
        ('c', []) => Op::Capitalize,
        ('C', []) => Op::InvertCapitalize,
        ('t', []) => Op::ToggleCase,
        ('T', [N(n)]) => Op::ToggleAt(*n),
        ('r', []) => Op::Reverse,
        ('d', []) => Op::Duplicate,
        ('p', [N(n)]) => Op::DuplicateTimes(*n),
        ('f', []) => Op::Reflect,
        ('{', []) => Op::RotateLeft,
        ('}', []) => Op::RotateRight,
        ('$', [L(c)]) => Op::Append(*c),
        ('^', [L(c)]) => Op::Prepend(*c),
        ('[', []) => Op::DeleteFirst,
        (']', []) => Op::DeleteLast,
        ('D', [N(n)]) => Op::DeleteAt(*n),
        ('x', [N(a), N(b)]) => Op::Extract(*a, *b),
        ('O', [N(a), N(b)]) => Op::Omit(*a, *b),
        ('i', [N(n), L(c)]) => Op::Insert(*n, *c),
        ('o', [N(n), L(c)]) => Op::Overwrite(*n, *c),
        ('\'', [N(n)]) => Op::Truncate(*n),
        ('s', [L(a), L(b)]) => Op::Replace(*a, *b),
        ('@', [L(c)]) => Op::Purge(*c),
        ('z', [N(n)]) => Op::DuplicateFirst(*n),
        ('Z', [N(n)]) => Op::DuplicateLast(*n),
        ('q', []) => Op::DuplicateAll,
        ('M', []) => Op::Memorize,
        ('X', [N(p), N(l), N(i)]) => Op::InsertMemory(*p, *l, *i),
        ('4', []) => Op::AppendMemory,
        ('6', []) => Op::PrependMemory,
        _ => unreachable!("operator {op:?} bound arguments outside its catalog shape"),
    }
}
