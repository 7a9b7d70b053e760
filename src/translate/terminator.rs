//! Block-terminator tracking
//!
//! The source language closes blocks by dedenting; the target needs an
//! explicit terminator line. Whenever the indent of a fresh statement is
//! lower than the indent of the last emitted one, this module emits one
//! terminator per crossed indentation unit.
//!
//! Carve-out: a statement that continues the enclosing block (an `else`
//! branch, an `except` clause) sits at the dedented level without opening
//! a sibling block, so the terminator for exactly that level is skipped.
//!
//! Buffered blank lines are flushed here, right after the terminators and
//! before the statement's own text, so blanks never float above the
//! terminators they belong under.

use std::io::{self, Write};

use tracing::trace;

use crate::translate::context::TranslateContext;
use crate::translate::tables::RewriteTables;

/// Close every block between `ctx.previous_indent` and `new_indent`,
/// then flush pending blank lines. `continues_block` is true when the
/// upcoming statement's leading keyword continues the enclosing block;
/// `blank_indent` is the indent string flushed blanks inherit.
///
/// Also invoked once at end-of-stream with `new_indent` forced to 0.
pub fn close_blocks<W: Write>(
    ctx: &mut TranslateContext,
    tables: &RewriteTables,
    new_indent: usize,
    continues_block: bool,
    blank_indent: &str,
    out: &mut W,
) -> io::Result<()> {
    let unit = tables.indent_unit.max(1);
    let mut working = ctx.previous_indent;
    let mut emitted = 0usize;
    while working > new_indent {
        working = working.saturating_sub(unit);
        if !(working == new_indent && continues_block) {
            writeln!(out, "{}{}", " ".repeat(working), tables.block_terminator)?;
            emitted += 1;
        }
    }
    if emitted > 0 {
        trace!(terminators = emitted, "closed dedented blocks");
    }
    ctx.previous_indent = new_indent;
    for _ in 0..ctx.pending_blank_lines {
        writeln!(out, "{}", blank_indent)?;
    }
    ctx.pending_blank_lines = 0;
    Ok(())
}
