//! `reglan-core`: compiles a pattern resembling common regular-expression
//! syntax into an immutable tree, then lazily enumerates, in a deterministic
//! length-ascending order, every string in the language it denotes.
//!
//! This crate never matches strings against a pattern and never touches a
//! filesystem itself — see `source::LineSource` for the seam a caller uses
//! to resolve `(?F<path>)` dictionary references, and `reglan-cli` for a
//! concrete filesystem-backed implementation.

pub mod alphabet;
pub mod ast;
mod driver;
pub mod error;
mod instance;
pub mod parser;
pub mod source;

use std::rc::Rc;

pub use driver::{enumerate, Driver, EnumerateOptions, Enumeration};
pub use error::RegexError;
pub use source::LineSource;

/// A compiled pattern. Parsing happens once, in `Regexp::new`; the
/// resulting tree is immutable and can be enumerated as many times, and as
/// many ways (different offsets/limits), as needed.
pub struct Regexp {
    pattern: Rc<ast::Pattern>,
}

impl Regexp {
    /// Parses `text`, resolving any `(?F<path>)` references through
    /// `source`.
    pub fn new(text: &str, source: &dyn LineSource) -> Result<Self, RegexError> {
        let pattern = parser::parse(text, source)?;
        Ok(Regexp {
            pattern: Rc::new(pattern),
        })
    }

    /// A fresh lazy cursor over this pattern's language, starting at its
    /// first (shortest) string.
    pub fn driver(&self) -> Driver {
        Driver::new(Rc::clone(&self.pattern))
    }

    /// Runs the offset/bound driver (§4.6) over this pattern's whole
    /// language.
    pub fn enumerate(&self, options: EnumerateOptions) -> Enumeration {
        enumerate(Rc::clone(&self.pattern), options)
    }
}
