//! Line rewriting
//!
//! Applies the ordered token-level rewrite passes to one logical line and
//! then hands the result to the statement-shape dispatcher. The pass order
//! is fixed; each step feeds the next:
//!
//! 1. Raw-string literals become pattern literals.
//! 2. Percent formatting with a parenthesized tuple becomes a `format`
//!    call.
//! 3. Table-listed bare calls are rewritten (see [`calls`]).
//! 4. `Identifier(` with a leading capital becomes `Identifier.new(`,
//!    except on class headers.
//! 5. Reserved words are substituted whole-word, in declaration order.
//! 6. A `self.` qualifier is dropped before calls and turned into `@` on
//!    remaining attribute references.
//!
//! A line left empty by these passes counts as a blank line; marker
//! annotations are suppressed outright by the dispatcher.

pub mod calls;
pub mod statements;

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::translate::context::TranslateContext;
use crate::translate::rewrite::statements::StatementRewrite;
use crate::translate::tables::RewriteTables;

static RAW_SINGLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\br'([^']*)'").expect("raw string pattern is valid"));
static RAW_DOUBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\br"([^"]*)""#).expect("raw string pattern is valid"));
static PERCENT_SINGLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'([^']*)'\s*%\s*\(([^()]*)\)").expect("percent format pattern is valid")
});
static PERCENT_DOUBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]*)"\s*%\s*\(([^()]*)\)"#).expect("percent format pattern is valid")
});
static CONSTRUCTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][A-Za-z0-9_]*)\(").expect("constructor pattern is valid"));
static SELF_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bself\.([A-Za-z_][A-Za-z0-9_]*)\(").expect("self call pattern is valid")
});
static SELF_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bself\.([A-Za-z_][A-Za-z0-9_]*)").expect("self attribute pattern is valid")
});

/// Outcome of rewriting one logical line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineRewrite {
    /// Emit this text.
    Emit(String),
    /// The rewrites emptied the line; it counts toward pending blanks.
    Blank,
    /// A marker annotation; emit nothing at all.
    Suppress,
}

/// Table-driven line rewriter. Compiles the reserved-word patterns once
/// per table set so per-line work is lookup and substitution only.
pub struct Rewriter<'t> {
    tables: &'t RewriteTables,
    reserved: Vec<(Regex, String)>,
}

impl<'t> Rewriter<'t> {
    pub fn new(tables: &'t RewriteTables) -> Self {
        let reserved = tables
            .reserved_words
            .iter()
            .map(|(from, to)| {
                let pattern = format!(r"\b{}\b", regex::escape(from));
                (
                    Regex::new(&pattern).expect("escaped reserved word is a valid pattern"),
                    to.clone(),
                )
            })
            .collect();
        Rewriter { tables, reserved }
    }

    /// Rewrite one logical line (indent already stripped, trailing colon
    /// and continuation marker already removed).
    pub fn rewrite_line(&self, text: &str, ctx: &mut TranslateContext) -> LineRewrite {
        let mut line = RAW_SINGLE.replace_all(text, "/$1/").into_owned();
        line = RAW_DOUBLE.replace_all(&line, "/$1/").into_owned();
        line = PERCENT_SINGLE
            .replace_all(&line, "format('$1', $2)")
            .into_owned();
        line = PERCENT_DOUBLE
            .replace_all(&line, r#"format("$1", $2)"#)
            .into_owned();
        line = calls::rewrite_calls(&line, self.tables);
        if !line.starts_with("class ") {
            line = CONSTRUCTOR.replace_all(&line, "${1}.new(").into_owned();
        }
        for (pattern, replacement) in &self.reserved {
            line = pattern
                .replace_all(&line, NoExpand(replacement.as_str()))
                .into_owned();
        }
        line = SELF_CALL.replace_all(&line, "$1(").into_owned();
        line = SELF_ATTR.replace_all(&line, "@$1").into_owned();

        let line = line.trim();
        if line.is_empty() {
            return LineRewrite::Blank;
        }
        match statements::dispatch(line, ctx, self.tables) {
            StatementRewrite::Emit(text) => LineRewrite::Emit(text),
            StatementRewrite::Suppress => LineRewrite::Suppress,
        }
    }
}
