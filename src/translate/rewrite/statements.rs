//! Statement-shape dispatch
//!
//! An ordered list of (pattern, transform) rules applied to the fully
//! token-rewritten line. The first matching rule wins and only that rule
//! fires; unmatched lines pass through unchanged. The ordering is part of
//! the contract: patterns are not mutually exclusive by construction, so
//! rearranging them changes behavior.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::translate::context::TranslateContext;
use crate::translate::tables::RewriteTables;

/// Outcome of dispatching one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementRewrite {
    /// Emit this text in place of the statement.
    Emit(String),
    /// Emit nothing for this statement (marker annotations).
    Suppress,
}

type Apply = fn(&Captures, &mut TranslateContext, &RewriteTables) -> StatementRewrite;

struct ShapeRule {
    name: &'static str,
    pattern: &'static Lazy<Regex>,
    apply: Apply,
}

static IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^import\s+([A-Za-z_][\w.]*)$").expect("import pattern is valid"));
static FROM_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^from\s+([A-Za-z_][\w.]*)\s+import\s+.+$").expect("from-import pattern is valid")
});
static CLASS_WITH_BASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^class\s+([A-Za-z_]\w*)\s*\(\s*([A-Za-z_][\w.]*)\s*\)$")
        .expect("class pattern is valid")
});
static CLASS_PLAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^class\s+([A-Za-z_]\w*)$").expect("plain class pattern is valid"));
static STATIC_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@(?:staticmethod|classmethod)$").expect("static marker pattern is valid")
});
static PROPERTY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@property$").expect("property marker pattern is valid"));
static DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^def\s+([A-Za-z_]\w*)\s*\((.*)\)$").expect("def pattern is valid"));
static TRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^try$").expect("try pattern is valid"));
static EXCEPT_BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^except\s+(.+?)\s*(?:,\s*|\s+as\s+)([A-Za-z_]\w*)$")
        .expect("except-binding pattern is valid")
});
static EXCEPT_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^except\s+(.+)$").expect("except-type pattern is valid"));
static EXCEPT_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^except$").expect("bare except pattern is valid"));
static WITH_BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^with\s+(.+?)\s+as\s+([A-Za-z_]\w*)$").expect("with-binding pattern is valid")
});
static WITH_PLAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^with\s+(.+)$").expect("with pattern is valid"));
static ASSERT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^assert\s+(.+)$").expect("assert pattern is valid"));

static RULES: &[ShapeRule] = &[
    ShapeRule { name: "import", pattern: &IMPORT, apply: apply_import },
    ShapeRule { name: "from-import", pattern: &FROM_IMPORT, apply: apply_import },
    ShapeRule { name: "class-with-base", pattern: &CLASS_WITH_BASE, apply: apply_class_with_base },
    ShapeRule { name: "class", pattern: &CLASS_PLAIN, apply: apply_class_plain },
    ShapeRule { name: "static-marker", pattern: &STATIC_MARKER, apply: apply_static_marker },
    ShapeRule { name: "property-marker", pattern: &PROPERTY_MARKER, apply: apply_property_marker },
    ShapeRule { name: "def", pattern: &DEF, apply: apply_def },
    ShapeRule { name: "try", pattern: &TRY, apply: apply_try },
    ShapeRule { name: "except-binding", pattern: &EXCEPT_BINDING, apply: apply_except_binding },
    ShapeRule { name: "except-type", pattern: &EXCEPT_TYPE, apply: apply_except_type },
    ShapeRule { name: "except", pattern: &EXCEPT_BARE, apply: apply_except_bare },
    ShapeRule { name: "with-binding", pattern: &WITH_BINDING, apply: apply_with_binding },
    ShapeRule { name: "with", pattern: &WITH_PLAIN, apply: apply_with_plain },
    ShapeRule { name: "assert", pattern: &ASSERT, apply: apply_assert },
];

/// Run the line through the rule list; the first match wins. Lines no
/// rule recognizes pass through unchanged.
pub fn dispatch(
    line: &str,
    ctx: &mut TranslateContext,
    tables: &RewriteTables,
) -> StatementRewrite {
    for rule in RULES {
        if let Some(caps) = rule.pattern.captures(line) {
            trace!(rule = rule.name, "statement shape matched");
            return (rule.apply)(&caps, ctx, tables);
        }
    }
    StatementRewrite::Emit(line.to_string())
}

fn apply_import(
    caps: &Captures,
    _ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    StatementRewrite::Emit(format!("require '{}'", caps[1].replace('.', "/")))
}

fn apply_class_with_base(
    caps: &Captures,
    ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    ctx.current_class_name = Some(caps[1].to_string());
    StatementRewrite::Emit(format!("class {} < {}", &caps[1], &caps[2]))
}

fn apply_class_plain(
    caps: &Captures,
    ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    ctx.current_class_name = Some(caps[1].to_string());
    StatementRewrite::Emit(format!("class {}", &caps[1]))
}

fn apply_static_marker(
    _caps: &Captures,
    ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    ctx.next_method_is_static = true;
    StatementRewrite::Suppress
}

fn apply_property_marker(
    _caps: &Captures,
    ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    // Attribute reads need no special form in the target; remember it and
    // drop the marker line.
    ctx.next_method_is_property = true;
    StatementRewrite::Suppress
}

fn apply_def(
    caps: &Captures,
    ctx: &mut TranslateContext,
    tables: &RewriteTables,
) -> StatementRewrite {
    let name = &caps[1];
    let mapped = tables.special_method_for(name).unwrap_or(name);
    let qualified = if std::mem::take(&mut ctx.next_method_is_static) {
        format!("{}.{}", ctx.class_qualifier(), mapped)
    } else {
        mapped.to_string()
    };
    ctx.next_method_is_property = false;

    let params = caps[2].trim();
    let params = if params == "self" {
        ""
    } else if let Some(rest) = params.strip_prefix("self,") {
        rest.trim_start()
    } else {
        params
    };

    if params.is_empty() {
        StatementRewrite::Emit(format!("def {}", qualified))
    } else {
        StatementRewrite::Emit(format!("def {} ({})", qualified, params))
    }
}

fn apply_try(
    _caps: &Captures,
    _ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    StatementRewrite::Emit("begin".to_string())
}

fn apply_except_binding(
    caps: &Captures,
    _ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    StatementRewrite::Emit(format!("rescue {} => {}", &caps[1], &caps[2]))
}

fn apply_except_type(
    caps: &Captures,
    _ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    StatementRewrite::Emit(format!("rescue {}", &caps[1]))
}

fn apply_except_bare(
    _caps: &Captures,
    _ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    StatementRewrite::Emit("rescue".to_string())
}

fn apply_with_binding(
    caps: &Captures,
    _ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    StatementRewrite::Emit(format!("{} do |{}|", &caps[1], &caps[2]))
}

fn apply_with_plain(
    caps: &Captures,
    _ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    StatementRewrite::Emit(format!("{} do", &caps[1]))
}

fn apply_assert(
    caps: &Captures,
    _ctx: &mut TranslateContext,
    _tables: &RewriteTables,
) -> StatementRewrite {
    StatementRewrite::Emit(format!("fail unless {}", &caps[1]))
}
