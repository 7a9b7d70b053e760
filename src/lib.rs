//! # py2rb
//!
//! A best-effort, line-oriented Python to Ruby source translator.
//!
//! The engine tracks indentation depth across lines to infer block
//! structure, inserts the block terminators Ruby needs, and applies an
//! ordered catalogue of textual rewrites to each logical line. It makes
//! no claim of correctness: the output is a starting point for manual
//! porting, not compilable code.
//!
//! ```rust,ignore
//! use py2rb::{RewriteTables, Translator};
//!
//! let tables = RewriteTables::default();
//! let translator = Translator::new(&tables);
//! let ruby = translator.translate_str("def f(self, x):\n    return len(x)\n")?;
//! ```

pub mod translate;

pub use translate::driver::Translator;
pub use translate::error::{TableError, TranslateError};
pub use translate::tables::RewriteTables;
