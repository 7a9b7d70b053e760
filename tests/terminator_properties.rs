//! Property-based tests for terminator inference
//!
//! Generates random block structures (plain assignments at varying
//! depths) and checks the structural guarantees of the tracker: one
//! terminator per crossed indentation unit, blanks flushed after
//! terminators, statements preserved in order, and idempotence over
//! already-terminated output.

use proptest::prelude::*;
use py2rb::{RewriteTables, Translator};

/// A sequence of block levels: starts anywhere shallow, each step goes at
/// most one level deeper than the current one but may dedent arbitrarily.
fn indent_profile() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0usize..6, 1..40).prop_map(|raw| {
        let mut levels = Vec::with_capacity(raw.len());
        let mut current = 0usize;
        for r in raw {
            let next = if r > current { current + 1 } else { r };
            levels.push(next);
            current = next;
        }
        levels
    })
}

fn source_for(levels: &[usize], unit: usize) -> String {
    let mut source = String::new();
    for (i, level) in levels.iter().enumerate() {
        source.push_str(&" ".repeat(level * unit));
        source.push_str(&format!("x{} = {}\n", i, i));
    }
    source
}

fn expected_terminators(levels: &[usize]) -> usize {
    let mut total = 0usize;
    for pair in levels.windows(2) {
        if pair[0] > pair[1] {
            total += pair[0] - pair[1];
        }
    }
    total + levels.last().copied().unwrap_or(0)
}

proptest! {
    #[test]
    fn terminator_count_matches_crossed_dedents(levels in indent_profile()) {
        let tables = RewriteTables::default();
        let source = source_for(&levels, tables.indent_unit);
        let output = Translator::new(&tables).translate_str(&source).unwrap();

        let end_count = output.lines().filter(|l| l.trim() == "end").count();
        prop_assert_eq!(end_count, expected_terminators(&levels));
    }

    #[test]
    fn statements_survive_in_order(levels in indent_profile()) {
        let tables = RewriteTables::default();
        let source = source_for(&levels, tables.indent_unit);
        let output = Translator::new(&tables).translate_str(&source).unwrap();

        let kept: Vec<String> = output
            .lines()
            .filter(|l| l.trim_start().starts_with('x'))
            .map(|l| l.trim_start().to_string())
            .collect();
        let expected: Vec<String> = (0..levels.len()).map(|i| format!("x{} = {}", i, i)).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn rerun_over_terminated_output_is_idempotent(levels in indent_profile()) {
        let tables = RewriteTables::default();
        let source = source_for(&levels, tables.indent_unit);
        let translator = Translator::new(&tables);

        let once = translator.translate_str(&source).unwrap();
        let twice = translator.translate_str(&once).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn blanks_never_precede_terminators(
        levels in indent_profile(),
        blank_mask in proptest::collection::vec(any::<bool>(), 40),
    ) {
        let tables = RewriteTables::default();
        let mut source = String::new();
        let mut blanks_in = 0usize;
        for (i, level) in levels.iter().enumerate() {
            if blank_mask.get(i).copied().unwrap_or(false) {
                source.push('\n');
                blanks_in += 1;
            }
            source.push_str(&" ".repeat(level * tables.indent_unit));
            source.push_str(&format!("x{} = {}\n", i, i));
        }
        let output = Translator::new(&tables).translate_str(&source).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        let blanks_out = lines.iter().filter(|l| l.trim().is_empty()).count();
        prop_assert_eq!(blanks_out, blanks_in);

        for pair in lines.windows(2) {
            let blank_then_end = pair[0].trim().is_empty() && pair[1].trim() == "end";
            prop_assert!(!blank_then_end, "terminator directly after blank in {:?}", lines);
        }
    }
}
