//! Rewrite tables
//!
//! The substitution catalogue is plain data, deliberately separated from
//! the engine: the engine only ever consults it through lookups, so a
//! different table set (or a test fixture) swaps in without touching any
//! pipeline logic. Tables can be loaded from JSON or YAML files; fields
//! missing from a file fall back to the built-in defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::translate::error::TableError;

/// The full substitution catalogue plus the layout knobs the block
/// tracker needs. Immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RewriteTables {
    /// Number of columns one block level is assumed to occupy.
    pub indent_unit: usize,
    /// Synthetic line emitted to close a block.
    pub block_terminator: String,
    /// Marker prefixed to block-string lines when they are re-emitted as
    /// comments.
    pub comment_prefix: String,
    /// Leading keywords that continue the enclosing block instead of
    /// opening a sibling, suppressing the innermost terminator.
    pub block_continuers: Vec<String>,
    /// Whole-word substitutions applied over the full line, in declaration
    /// order.
    pub reserved_words: Vec<(String, String)>,
    /// Callables rewritten to a method on their argument:
    /// `len(xs)` becomes `xs.length`.
    pub method_calls: BTreeMap<String, String>,
    /// Callables rewritten to a differently named callable:
    /// `print(x)` becomes `puts(x)`.
    pub function_calls: BTreeMap<String, String>,
    /// Definition names with target-specific spellings, such as the
    /// constructor and operator overloads.
    pub special_methods: BTreeMap<String, String>,
}

impl RewriteTables {
    /// Look up a callable that becomes a method on its argument.
    pub fn method_for(&self, name: &str) -> Option<&str> {
        self.method_calls.get(name).map(String::as_str)
    }

    /// Look up a callable that keeps call form under another name.
    pub fn function_for(&self, name: &str) -> Option<&str> {
        self.function_calls.get(name).map(String::as_str)
    }

    /// Look up the target spelling of a special member name.
    pub fn special_method_for(&self, name: &str) -> Option<&str> {
        self.special_methods.get(name).map(String::as_str)
    }

    /// Whether a statement starting with `word` continues the enclosing
    /// block rather than opening a sibling.
    pub fn is_block_continuer(&self, word: &str) -> bool {
        self.block_continuers.iter().any(|k| k == word)
    }

    /// Parse a table file from a JSON string.
    pub fn from_json_str(source: &str) -> Result<Self, TableError> {
        serde_json::from_str(source).map_err(TableError::Json)
    }

    /// Parse a table file from a YAML string.
    pub fn from_yaml_str(source: &str) -> Result<Self, TableError> {
        serde_yaml::from_str(source).map_err(TableError::Yaml)
    }

    /// Load tables from a file, choosing the format by extension.
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let source = fs::read_to_string(path).map_err(TableError::Io)?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let tables = match extension {
            "json" => Self::from_json_str(&source)?,
            "yaml" | "yml" => Self::from_yaml_str(&source)?,
            other => return Err(TableError::UnknownFormat(other.to_string())),
        };
        debug!(path = %path.display(), "loaded rewrite tables");
        Ok(tables)
    }
}

impl Default for RewriteTables {
    fn default() -> Self {
        RewriteTables {
            indent_unit: 4,
            block_terminator: "end".to_string(),
            comment_prefix: "#".to_string(),
            block_continuers: default_block_continuers(),
            reserved_words: default_reserved_words(),
            method_calls: default_method_calls(),
            function_calls: default_function_calls(),
            special_methods: default_special_methods(),
        }
    }
}

// `end` is listed so that re-running the translator over already
// terminated output does not double up terminators: a literal `end` sits
// exactly at the dedented level and stands in for the terminator the
// tracker would have emitted there.
fn default_block_continuers() -> Vec<String> {
    ["elif", "else", "except", "finally", "end"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_reserved_words() -> Vec<(String, String)> {
    [
        ("True", "true"),
        ("False", "false"),
        ("None", "nil"),
        ("elif", "elsif"),
        ("finally", "ensure"),
        ("object", "Object"),
        ("continue", "next"),
        ("pass", ""),
    ]
    .iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

fn default_method_calls() -> BTreeMap<String, String> {
    to_map(&[
        ("len", "length"),
        ("str", "to_s"),
        ("int", "to_i"),
        ("float", "to_f"),
        ("repr", "inspect"),
        ("sorted", "sort"),
        ("reversed", "reverse"),
        ("enumerate", "each_with_index"),
        ("type", "class"),
    ])
}

fn default_function_calls() -> BTreeMap<String, String> {
    to_map(&[("print", "puts"), ("raw_input", "gets")])
}

fn default_special_methods() -> BTreeMap<String, String> {
    to_map(&[
        ("__init__", "initialize"),
        ("__str__", "to_s"),
        ("__repr__", "inspect"),
        ("__len__", "length"),
        ("__contains__", "include?"),
        ("__call__", "call"),
        ("__eq__", "=="),
        ("__ne__", "!="),
        ("__lt__", "<"),
        ("__le__", "<="),
        ("__gt__", ">"),
        ("__ge__", ">="),
        ("__add__", "+"),
        ("__sub__", "-"),
        ("__mul__", "*"),
        ("__div__", "/"),
        ("__mod__", "%"),
        ("__getitem__", "[]"),
        ("__setitem__", "[]="),
        ("__neg__", "-@"),
    ])
}

fn to_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
