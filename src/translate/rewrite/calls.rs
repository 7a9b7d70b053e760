//! Call-expression rewriting
//!
//! Scans a line for bare call expressions `name(args)` and rewrites the
//! ones named in the tables, either into method form (`len(xs)` to
//! `xs.length`) or into a renamed call (`print(x)` to `puts(x)`).
//!
//! The scan is purely textual: the argument span runs from the opening
//! parenthesis to the first unmatched closing one. Parentheses inside
//! string literals are not understood, so arguments containing unbalanced
//! quoted parentheses come out wrong. That limitation is inherent to a
//! line-oriented, non-parsing design and is asserted as such by the tests.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::translate::tables::RewriteTables;

static SIMPLE_RECEIVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("receiver pattern is valid")
});

/// Rewrite every table-listed bare call in `line`. Unknown calls and
/// method-position calls (`x.f(...)`) are left untouched; their argument
/// text is still scanned.
pub fn rewrite_calls(line: &str, tables: &RewriteTables) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev: Option<char> = None;
    let mut i = 0;
    while i < line.len() {
        let c = match line[i..].chars().next() {
            Some(c) => c,
            None => break,
        };
        let bare = is_ident_start(c) && !prev.map_or(false, |p| is_ident_char(p) || p == '.');
        if bare {
            let end = ident_end(line, i);
            let name = &line[i..end];
            if line[end..].starts_with('(') {
                if let Some(close) = matching_paren(line, end) {
                    let args = &line[end + 1..close];
                    if let Some(method) = tables.method_for(name) {
                        let args = rewrite_calls(args, tables);
                        out.push_str(&receiver_form(&args));
                        out.push('.');
                        out.push_str(method);
                        prev = Some(')');
                        i = close + 1;
                        continue;
                    }
                    if let Some(renamed) = tables.function_for(name) {
                        let args = rewrite_calls(args, tables);
                        out.push_str(renamed);
                        out.push('(');
                        out.push_str(&args);
                        out.push(')');
                        prev = Some(')');
                        i = close + 1;
                        continue;
                    }
                }
            }
            out.push_str(name);
            prev = name.chars().last();
            i = end;
        } else {
            out.push(c);
            prev = Some(c);
            i += c.len_utf8();
        }
    }
    out
}

/// Render the argument text as a method receiver, parenthesizing it
/// unless it is already a simple identifier or attribute chain.
fn receiver_form(args: &str) -> String {
    if SIMPLE_RECEIVER.is_match(args) {
        args.to_string()
    } else {
        format!("({})", args)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn ident_end(line: &str, start: usize) -> usize {
    line[start..]
        .char_indices()
        .find(|(_, c)| !is_ident_char(*c))
        .map(|(offset, _)| start + offset)
        .unwrap_or(line.len())
}

/// Byte index of the closing parenthesis matching the opener at `open`,
/// or `None` when the line ends first.
fn matching_paren(line: &str, open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, c) in line[open + 1..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + 1 + offset);
                }
            }
            _ => {}
        }
    }
    None
}
