//! Per-run translation state
//!
//! All mutable state threaded through the pipeline lives in one context
//! object owned by the driver. It is created when a stream run starts and
//! discarded when the run ends; no stage keeps state of its own.

/// Mutable state shared by every pipeline stage for the duration of one
/// translation run.
///
/// Invariants:
/// - `previous_indent` reflects the indent of the last emitted logical
///   line. Blank lines, block-string bodies and continuation-interior
///   lines restore `current_indent` so they never disturb it.
/// - `pending_blank_lines` is flushed to exactly zero right after any
///   synthetic terminators for the current line, before the line's own
///   text.
#[derive(Debug, Default)]
pub struct TranslateContext {
    /// Indent width of the line currently being processed.
    pub current_indent: usize,
    /// Indent width of the last emitted logical line.
    pub previous_indent: usize,
    /// Blank input lines buffered until the next non-blank statement.
    pub pending_blank_lines: usize,
    /// Whether the next physical line continues the current statement.
    pub in_continuation: bool,
    /// Name of the innermost class definition seen so far, if any.
    pub current_class_name: Option<String>,
    /// Set by a static/class-method marker, consumed by the next
    /// definition header.
    pub next_method_is_static: bool,
    /// Set by a property marker. Informational only; cleared by the next
    /// definition header.
    pub next_method_is_property: bool,
}

impl TranslateContext {
    /// Fresh state for the start of a stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Qualifier used when a static definition must be attached to the
    /// enclosing class. Falls back to `self`, which attaches the method to
    /// whatever class the output ends up inside.
    pub fn class_qualifier(&self) -> &str {
        self.current_class_name.as_deref().unwrap_or("self")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_zeroed() {
        let ctx = TranslateContext::new();
        assert_eq!(ctx.current_indent, 0);
        assert_eq!(ctx.previous_indent, 0);
        assert_eq!(ctx.pending_blank_lines, 0);
        assert!(!ctx.in_continuation);
        assert!(ctx.current_class_name.is_none());
        assert!(!ctx.next_method_is_static);
        assert!(!ctx.next_method_is_property);
    }

    #[test]
    fn test_class_qualifier_defaults_to_self() {
        let mut ctx = TranslateContext::new();
        assert_eq!(ctx.class_qualifier(), "self");
        ctx.current_class_name = Some("Dog".to_string());
        assert_eq!(ctx.class_qualifier(), "Dog");
    }
}
