//! Rule compilation and the two interpreters.
//!
//! This module is the *engine entry point* for the rule language. It is split
//! into focused submodules under `src/engine/` while keeping stable paths
//! (for example `crate::engine::ForwardEngine` and `crate::engine::tokenize`).
//!
//! ## How the parts work together
//!
//! At a high level, a rule line travels through a fixed pipeline:
//!
//! ```text
//! "lMuX084"  ── tokenize ─────────── (grammar.rs)
//!                 │  scan left to right against the operator catalog;
//!                 │  unmatched chars are dropped silently
//!                 v
//!          Vec<Op>  (ops.rs, closed union of the 32 operators)
//!                 │
//!        ┌────────┴─────────┐
//!        v                  v
//!  ForwardEngine      ReversionEngine
//!  (forward.rs)        (revert.rs)
//!    word ─ op₁..opₙ ─ guess    guess ─ opₙ⁻¹..op₁⁻¹ ─ candidate word
//!    register threaded          inverses evaluated on the mutated
//!    through M / X / 4 / 6      string; lossy ops pass through
//! ```
//!
//! Each `Op` knows both directions: `Op::forward` produces the mutated word
//! (or a fault, degraded to a no-op by the engines) and `Op::invert` produces
//! a tri-state [`Inverse`] so reversion can tell "this operator class cannot
//! be undone" apart from "this particular string failed verification".
//!
//! ## Responsibilities by module
//!
//! - `grammar.rs`: the ordered operator catalog (char, argument classes) and
//!   the scanning tokenizer, including base-36 numeral decoding.
//! - `ops.rs`: the `Op` union, forward evaluation, tri-state inversion, and
//!   per-operation trait masks.
//! - `forward.rs`: `ForwardEngine` and the lazy `Guesses` iterator; owns the
//!   memory register.
//! - `revert.rs`: `ReversionEngine`, the `Recovered` iterator, and active-
//!   index subsetting for replaying parts of a rule set.
//!
//! ## Adding a new operator
//!
//! Add its shape to the catalog in `grammar.rs`, its variant and both
//! directions in `ops.rs`, and a fixture row in `engine/tests.rs`. The
//! compiler enforces the rest: every `match` over `Op` is exhaustive.
//!
//! ## Debugging
//!
//! Set `REMANGLE_DEBUG_RULES=1` to print per-rule application traces, in
//! both directions, to stderr.

#[path = "engine/forward.rs"]
mod forward;
#[path = "engine/grammar.rs"]
mod grammar;
#[path = "engine/ops.rs"]
mod ops;
#[path = "engine/revert.rs"]
mod revert;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use forward::{ForwardEngine, Guesses};
pub use revert::{Recovered, ReversionEngine};

pub(crate) use grammar::tokenize;
#[allow(unused_imports)]
pub(crate) use ops::{Inverse, Op};
