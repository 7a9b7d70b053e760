//! Line-oriented translation pipeline
//!
//! A best-effort source-to-source transducer: Python-style source goes
//! in, approximate Ruby-style source comes out. This is not a parser and
//! not a compiler; every transformation is textual and the output is
//! expected to need manual correction.
//!
//! The pipeline runs strictly line by line:
//!
//! 1. [`indent`] measures and strips leading whitespace (tab stop 8).
//! 2. [`driver`] classifies each line (blank, block string, continuation
//!    interior, fresh statement) and owns the per-run state in
//!    [`context::TranslateContext`].
//! 3. [`terminator`] emits synthetic block-closing lines when the indent
//!    decreases, and flushes buffered blank lines after them.
//! 4. [`rewrite`] applies the ordered token-level passes and the
//!    statement-shape dispatch to each fresh statement.
//!
//! All substitution data lives in [`tables::RewriteTables`], supplied by
//! the caller and consulted only through lookups, so alternative table
//! sets swap in without touching the engine.

pub mod context;
pub mod driver;
pub mod error;
pub mod indent;
pub mod rewrite;
pub mod tables;
pub mod terminator;
