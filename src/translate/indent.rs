//! Indentation analysis
//!
//! Measures the visual width of a line's leading whitespace so the driver
//! can infer block structure from indentation deltas. Tabs advance to the
//! next multiple-of-8 stop; every other leading character counts as one
//! column.

/// Tab stop width used when measuring leading whitespace.
pub const TAB_STOP: usize = 8;

/// Split a raw line into its leading whitespace and the right-trimmed rest.
///
/// The leading segment contains only spaces and tabs; everything from the
/// first other character on belongs to the remainder.
pub fn split_indent(raw: &str) -> (&str, &str) {
    let boundary = raw
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(raw.len());
    let (leading, rest) = raw.split_at(boundary);
    (leading, rest.trim_end())
}

/// Measure the visual width of a leading-whitespace segment.
///
/// Each tab advances the width to the next [`TAB_STOP`] boundary; any other
/// character advances it by exactly one. Empty input yields 0.
pub fn measure_indent_width(leading: &str) -> usize {
    leading.chars().fold(0, |width, c| {
        if c == '\t' {
            (width / TAB_STOP + 1) * TAB_STOP
        } else {
            width + 1
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty() {
        assert_eq!(measure_indent_width(""), 0);
    }

    #[test]
    fn test_measure_spaces() {
        assert_eq!(measure_indent_width("    "), 4);
        assert_eq!(measure_indent_width("        "), 8);
    }

    #[test]
    fn test_measure_single_tab() {
        assert_eq!(measure_indent_width("\t"), 8);
    }

    #[test]
    fn test_measure_tab_after_spaces() {
        // Three spaces put the cursor at column 3; the tab jumps to 8.
        assert_eq!(measure_indent_width("   \t"), 8);
        // Eight spaces are already on a stop; the tab jumps to 16.
        assert_eq!(measure_indent_width("        \t"), 16);
    }

    #[test]
    fn test_measure_spaces_after_tab() {
        assert_eq!(measure_indent_width("\t  "), 10);
    }

    #[test]
    fn test_split_plain_statement() {
        assert_eq!(split_indent("    x = 1"), ("    ", "x = 1"));
    }

    #[test]
    fn test_split_trims_trailing_whitespace() {
        assert_eq!(split_indent("  x = 1   "), ("  ", "x = 1"));
    }

    #[test]
    fn test_split_blank_line() {
        assert_eq!(split_indent("    "), ("    ", ""));
        assert_eq!(split_indent(""), ("", ""));
    }

    #[test]
    fn test_split_tab_indent() {
        assert_eq!(split_indent("\tx"), ("\t", "x"));
    }
}
