//! Component F: the offset/bound/count driver, §4.6. Wraps a `Pattern`'s
//! `PatternInstance` as a `current()`/`step()` cursor, and `enumerate()`
//! implements the skip-then-emit-or-count contract the CLI and tests both
//! rely on.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{max_capture_index, Pattern};
use crate::instance::PatternInstance;

/// A lazy cursor over one `Pattern`'s language, in enumeration order.
/// Constructing a `Driver` costs nothing but allocating the initial shape of
/// each alternative; no string beyond the current one is ever held at once.
pub struct Driver {
    instance: PatternInstance,
    exhausted: bool,
}

impl Driver {
    pub fn new(pattern: Rc<Pattern>) -> Self {
        let captures = Rc::new(RefCell::new(vec![None; max_capture_index(&pattern)]));
        let instance = PatternInstance::new(pattern, captures);
        Driver {
            instance,
            exhausted: false,
        }
    }

    /// The string the cursor currently sits on, or `None` once the language
    /// has been fully enumerated.
    pub fn current(&self) -> Option<String> {
        if self.exhausted {
            None
        } else {
            Some(self.instance.value())
        }
    }

    /// Moves to the next string. Returns `false` once the language is
    /// exhausted, after which `current()` returns `None` forever.
    pub fn step(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if !self.instance.advance() {
            self.exhausted = true;
        }
        !self.exhausted
    }
}

/// Parameters to `enumerate`, mirroring the CLI's `-o`/`-n`/`-c` flags.
#[derive(Debug, Clone, Copy)]
pub struct EnumerateOptions {
    /// Number of leading strings to skip without emitting.
    pub offset: u64,
    /// Maximum number of strings to emit (or count); `None` means no bound.
    pub limit: Option<u64>,
    /// When `true`, produce only the final count, not the strings.
    pub silent: bool,
}

impl Default for EnumerateOptions {
    fn default() -> Self {
        EnumerateOptions {
            offset: 0,
            limit: None,
            silent: false,
        }
    }
}

/// The result of `enumerate`: either the emitted strings, in order, or —
/// when `silent` — just how many there were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enumeration {
    Strings(Vec<String>),
    Count(u64),
}

/// Runs the offset/bound driver over `pattern`'s whole language: skips the
/// first `options.offset` strings, then emits (or counts) up to
/// `options.limit` more, stopping early on exhaustion.
pub fn enumerate(pattern: Rc<Pattern>, options: EnumerateOptions) -> Enumeration {
    let mut driver = Driver::new(pattern);
    skip(&mut driver, options.offset);

    if options.silent {
        Enumeration::Count(count(&mut driver, options.limit))
    } else {
        Enumeration::Strings(collect(&mut driver, options.limit))
    }
}

fn skip(driver: &mut Driver, offset: u64) {
    for _ in 0..offset {
        if driver.current().is_none() || !driver.step() {
            break;
        }
    }
}

fn under_limit(n: u64, limit: Option<u64>) -> bool {
    limit.map_or(true, |l| n < l)
}

fn count(driver: &mut Driver, limit: Option<u64>) -> u64 {
    let mut n = 0u64;
    while driver.current().is_some() && under_limit(n, limit) {
        n += 1;
        if !driver.step() {
            break;
        }
    }
    n
}

fn collect(driver: &mut Driver, limit: Option<u64>) -> Vec<String> {
    let mut out = Vec::new();
    while let Some(s) = driver.current() {
        if !under_limit(out.len() as u64, limit) {
            break;
        }
        out.push(s);
        if !driver.step() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::source::LineSource;
    use crate::error::FileError;

    struct NoFiles;
    impl LineSource for NoFiles {
        fn read_lines(&self, path: &str) -> Result<Vec<String>, FileError> {
            Err(FileError::Unreadable {
                path: path.to_string(),
                message: "no filesystem access in this test".to_string(),
            })
        }
    }

    fn compiled(text: &str) -> Rc<Pattern> {
        Rc::new(parse(text, &NoFiles).unwrap_or_else(|e| panic!("expected {text:?} to parse: {e}")))
    }

    #[test]
    fn enumerate_all_of_a_small_language() {
        let pattern = compiled("[0-1]{1,2}");
        let options = EnumerateOptions {
            offset: 0,
            limit: Some(100),
            silent: false,
        };
        let Enumeration::Strings(strings) = enumerate(pattern, options) else {
            panic!("expected Strings");
        };
        assert_eq!(strings, vec!["0", "1", "00", "01", "10", "11"]);
    }

    #[test]
    fn offset_replay_matches_discarding_a_prefix() {
        let full = {
            let options = EnumerateOptions {
                offset: 0,
                limit: Some(100),
                silent: false,
            };
            match enumerate(compiled("[0-1]{1,2}"), options) {
                Enumeration::Strings(s) => s,
                _ => unreachable!(),
            }
        };
        let tail = {
            let options = EnumerateOptions {
                offset: 2,
                limit: Some(3),
                silent: false,
            };
            match enumerate(compiled("[0-1]{1,2}"), options) {
                Enumeration::Strings(s) => s,
                _ => unreachable!(),
            }
        };
        assert_eq!(tail, full[2..5].to_vec());
    }

    #[test]
    fn silent_mode_counts_without_emitting() {
        let options = EnumerateOptions {
            offset: 2,
            limit: Some(1000),
            silent: true,
        };
        let Enumeration::Count(n) = enumerate(compiled("[0-1]{1,2}"), options) else {
            panic!("expected Count");
        };
        assert_eq!(n, 4); // 6 total, minus the first 2
    }

    #[test]
    fn limit_stops_early_without_exhausting() {
        let options = EnumerateOptions {
            offset: 0,
            limit: Some(2),
            silent: false,
        };
        let Enumeration::Strings(strings) = enumerate(compiled("a*"), options) else {
            panic!("expected Strings");
        };
        assert_eq!(strings, vec!["", "a"]);
    }
}
