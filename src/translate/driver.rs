//! The per-line driver
//!
//! A state machine over the input line stream: each physical line is
//! classified as blank, block-string opener, continuation interior or
//! fresh statement, and routed through the terminator tracker and the
//! rewrite engine. Processing is strictly sequential, one line at a time,
//! with no lookahead beyond the current continuation state and no
//! backtracking; end-of-stream is the normal terminal condition.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::translate::context::TranslateContext;
use crate::translate::error::TranslateError;
use crate::translate::indent::{measure_indent_width, split_indent};
use crate::translate::rewrite::{LineRewrite, Rewriter};
use crate::translate::tables::RewriteTables;
use crate::translate::terminator;

/// Streaming translator over a table set. One `Translator` can run any
/// number of independent translations; per-run state lives in a fresh
/// [`TranslateContext`] per call.
pub struct Translator<'t> {
    tables: &'t RewriteTables,
    rewriter: Rewriter<'t>,
}

impl<'t> Translator<'t> {
    pub fn new(tables: &'t RewriteTables) -> Self {
        Translator {
            tables,
            rewriter: Rewriter::new(tables),
        }
    }

    /// Translate the whole input stream, writing output lines as they are
    /// produced. Runs to input exhaustion, then closes all open blocks.
    pub fn translate<R: BufRead, W: Write>(
        &self,
        input: R,
        output: &mut W,
    ) -> Result<(), TranslateError> {
        let mut ctx = TranslateContext::new();
        let mut lines = input.lines();
        while let Some(next) = lines.next() {
            let raw = next?;
            self.process_line(&raw, &mut ctx, &mut lines, output)?;
        }
        ctx.current_indent = 0;
        terminator::close_blocks(&mut ctx, self.tables, 0, false, "", output)?;
        Ok(())
    }

    /// Convenience wrapper translating an in-memory string.
    pub fn translate_str(&self, source: &str) -> Result<String, TranslateError> {
        let mut output = Vec::new();
        self.translate(source.as_bytes(), &mut output)?;
        Ok(String::from_utf8(output).expect("translated output is valid UTF-8"))
    }

    fn process_line<R: BufRead, W: Write>(
        &self,
        raw: &str,
        ctx: &mut TranslateContext,
        lines: &mut io::Lines<R>,
        output: &mut W,
    ) -> Result<(), TranslateError> {
        let (leading, rest) = split_indent(raw);
        let width = measure_indent_width(leading);
        ctx.previous_indent = ctx.current_indent;
        ctx.current_indent = width;

        // Blank lines are buffered, not emitted: they must land after any
        // terminators the next statement triggers. They never affect the
        // inferred block depth.
        if rest.is_empty() {
            ctx.pending_blank_lines += 1;
            ctx.current_indent = ctx.previous_indent;
            return Ok(());
        }

        if !ctx.in_continuation {
            if let Some(delimiter) = block_string_opener(rest) {
                debug!("entering block string literal");
                self.emit_block_comment(leading, &rest[delimiter.len()..], delimiter, lines, output)?;
                ctx.current_indent = ctx.previous_indent;
                return Ok(());
            }
        }

        // Continuation interiors are emitted verbatim: no terminator
        // inference, no statement dispatch, no depth bookkeeping.
        if ctx.in_continuation {
            ctx.in_continuation = rest.ends_with('\\');
            writeln!(output, "{}{}", leading, rest)?;
            ctx.current_indent = ctx.previous_indent;
            return Ok(());
        }

        // Fresh logical statement.
        let (text, continues) = match rest.strip_suffix('\\') {
            Some(stripped) => (stripped.trim_end(), true),
            None => (rest, false),
        };
        let text = match text.strip_suffix(':') {
            Some(stripped) => stripped.trim_end(),
            None => text,
        };

        // The continuer check runs on the source-form text: the tracker
        // fires before any rewriting.
        let continues_block = self.tables.is_block_continuer(leading_word(text));
        terminator::close_blocks(ctx, self.tables, width, continues_block, leading, output)?;

        ctx.in_continuation = continues;
        match self.rewriter.rewrite_line(text, ctx) {
            LineRewrite::Emit(line) => {
                if continues {
                    writeln!(output, "{}{} \\", leading, line)?;
                } else {
                    writeln!(output, "{}{}", leading, line)?;
                }
            }
            LineRewrite::Blank => ctx.pending_blank_lines += 1,
            LineRewrite::Suppress => {}
        }
        Ok(())
    }

    /// Emit a triple-delimited block string as comment lines, consuming
    /// input up to and including the closing delimiter line. If the stream
    /// ends first, everything consumed has already been emitted and the
    /// run stops cleanly.
    fn emit_block_comment<R: BufRead, W: Write>(
        &self,
        leading: &str,
        opener_rest: &str,
        delimiter: &str,
        lines: &mut io::Lines<R>,
        output: &mut W,
    ) -> Result<(), TranslateError> {
        let prefix = &self.tables.comment_prefix;
        let mut text = opener_rest.to_string();
        loop {
            let mut body = text.trim().to_string();
            let mut closed = false;
            if let Some(pos) = body.find(delimiter) {
                body.truncate(pos);
                closed = true;
            }
            let body = body.trim();
            if body.is_empty() {
                writeln!(output, "{}{}", leading, prefix)?;
            } else {
                writeln!(output, "{}{} {}", leading, prefix, body)?;
            }
            if closed {
                return Ok(());
            }
            match lines.next() {
                Some(next) => text = next?,
                None => {
                    debug!("block string literal unterminated at end of stream");
                    return Ok(());
                }
            }
        }
    }
}

fn block_string_opener(rest: &str) -> Option<&'static str> {
    if rest.starts_with("\"\"\"") {
        Some("\"\"\"")
    } else if rest.starts_with("'''") {
        Some("'''")
    } else {
        None
    }
}

fn leading_word(text: &str) -> &str {
    let end = text
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(source: &str) -> String {
        let tables = RewriteTables::default();
        Translator::new(&tables)
            .translate_str(source)
            .expect("in-memory translation succeeds")
    }

    #[test]
    fn test_single_statement() {
        assert_eq!(convert("x = 1\n"), "x = 1\n");
    }

    #[test]
    fn test_block_closed_at_end_of_stream() {
        assert_eq!(convert("if x:\n    y = 1\n"), "if x\n    y = 1\nend\n");
    }

    #[test]
    fn test_dedent_emits_terminator_before_sibling() {
        assert_eq!(
            convert("if x:\n    y = 1\nz = 2\n"),
            "if x\n    y = 1\nend\nz = 2\n"
        );
    }

    #[test]
    fn test_else_does_not_close_its_own_block() {
        assert_eq!(
            convert("if x:\n    a()\nelse:\n    b()\n"),
            "if x\n    a()\nelse\n    b()\nend\n"
        );
    }

    #[test]
    fn test_blank_lines_flush_after_terminators() {
        assert_eq!(
            convert("if x:\n    y = 1\n\nz = 2\n"),
            "if x\n    y = 1\nend\n\nz = 2\n"
        );
    }

    #[test]
    fn test_blank_lines_keep_block_depth() {
        // The blank line does not count as a dedent; only z = 2 does.
        assert_eq!(
            convert("if x:\n    y = 1\n\n    w = 2\nz = 3\n"),
            "if x\n    y = 1\n    \n    w = 2\nend\nz = 3\n"
        );
    }

    #[test]
    fn test_continuation_lines_pass_through() {
        assert_eq!(
            convert("total = a + \\\n    b\nprint(total)\n"),
            "total = a + \\\n    b\nputs(total)\n"
        );
    }

    #[test]
    fn test_continuation_does_not_dedent() {
        // The interior line sits at a lower indent than the statement
        // before it; no terminator may be emitted for it.
        assert_eq!(
            convert("if x:\n    total = a + \\\nb\n    y = 1\n"),
            "if x\n    total = a + \\\nb\n    y = 1\nend\n"
        );
    }

    #[test]
    fn test_tab_indent_measures_as_stop_8() {
        // A tab indents to column 8, which is two 4-column units deep.
        assert_eq!(
            convert("if y:\n\tx = 1\nz = 2\n"),
            "if y\n\tx = 1\n    end\nend\nz = 2\n"
        );
    }

    #[test]
    fn test_block_string_becomes_comments() {
        assert_eq!(
            convert("def f():\n    \"\"\"One.\n    Two.\n    \"\"\"\n    return 1\n"),
            "def f\n    # One.\n    # Two.\n    #\n    return 1\nend\n"
        );
    }

    #[test]
    fn test_single_line_block_string() {
        assert_eq!(convert("\"\"\"just a title\"\"\"\nx = 1\n"), "# just a title\nx = 1\n");
    }

    #[test]
    fn test_unterminated_block_string_stops_cleanly() {
        assert_eq!(
            convert("\"\"\"start\nnever closed\n"),
            "# start\n# never closed\n"
        );
    }

    #[test]
    fn test_suppressed_line_leaves_no_gap() {
        assert_eq!(
            convert("@property\ndef name(self):\n    return self._name\n"),
            "def name\n    return @_name\nend\n"
        );
    }

    #[test]
    fn test_pass_counts_as_blank() {
        assert_eq!(convert("if x:\n    pass\ndone()\n"), "if x\nend\n\ndone()\n");
    }
}
