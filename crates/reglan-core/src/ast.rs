//! The immutable template tree produced by the parser: `Pattern` ->
//! `Alternative` -> `QuantifiedAtom` -> `Atom`. These values never change
//! once parsing succeeds; all enumeration state lives in `instance.rs`.

use std::rc::Rc;

use crate::alphabet;

/// An inclusive character range as written in a bracket expression, e.g.
/// `a-z`. A single character `c` is represented as `CharRange { start: c, end: c }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharRange {
    pub start: char,
    pub end: char,
}

/// A resolved bracket expression, e.g. `[a-z0-9]` or `[^aeiou]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    pub ranges: Vec<CharRange>,
    pub negated: bool,
}

impl CharClass {
    pub fn new(ranges: Vec<CharRange>, negated: bool) -> Self {
        CharClass { ranges, negated }
    }

    /// The dot atom: every character in the alphabet.
    pub fn any() -> Self {
        let lo = char::from_u32(alphabet::LOW).expect("alphabet lower bound is a valid char");
        let hi = char::from_u32(alphabet::HIGH).expect("alphabet upper bound is a valid char");
        CharClass::new(vec![CharRange { start: lo, end: hi }], false)
    }

    /// Expands this class into a sorted, deduplicated set of alphabet
    /// members. Negation is applied against the whole alphabet, not just
    /// the characters mentioned in the ranges.
    pub fn chars(&self) -> Vec<char> {
        let mut members: Vec<char> = Vec::new();
        for range in &self.ranges {
            let lo = range.start as u32;
            let hi = range.end as u32;
            for cp in lo..=hi {
                if let Some(c) = char::from_u32(cp) {
                    if alphabet::in_alphabet(c) {
                        members.push(c);
                    }
                }
            }
        }
        if self.negated {
            let excluded: std::collections::HashSet<char> = members.into_iter().collect();
            let mut result: Vec<char> = alphabet::all()
                .into_iter()
                .filter(|c| !excluded.contains(c))
                .collect();
            result.sort_unstable();
            result
        } else {
            members.sort_unstable();
            members.dedup();
            members
        }
    }
}

/// The upper bound of a quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Max {
    Bounded(u32),
    Unbounded,
}

/// One unit of a pattern: a literal character, a resolved character class,
/// a nested group, a file-backed dictionary, or a backreference.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Literal(char),
    Class(CharClass),
    /// A parenthesized group. `Some(index)` for a capturing group
    /// (1-based, matching `\1`-`\9` backreference numbering); `None` for
    /// `(?:...)`.
    Group(Rc<Pattern>, Option<usize>),
    /// Lines read from an external dictionary file via `(?F<path>)`,
    /// materialized once at parse time.
    FileRef(Rc<Vec<String>>),
    /// `\1`-`\9`: re-emits whatever the referenced capturing group last
    /// produced.
    BackRef(usize),
}

/// An atom together with its repeat bounds. A bare atom with no suffix is
/// `{1,1}`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantifiedAtom {
    pub atom: Atom,
    pub min: u32,
    pub max: Max,
}

impl QuantifiedAtom {
    pub fn min_length(&self) -> u64 {
        self.min as u64
    }

    pub fn max_length(&self) -> Max {
        self.max
    }
}

/// A single branch of concatenated, quantified atoms. Always holds at
/// least one atom — an empty branch is rejected at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub atoms: Vec<QuantifiedAtom>,
}

impl Alternative {
    pub fn min_length(&self) -> u64 {
        self.atoms.iter().map(QuantifiedAtom::min_length).sum()
    }

    pub fn max_length(&self) -> Max {
        let mut total: u64 = 0;
        for atom in &self.atoms {
            match atom.max_length() {
                Max::Unbounded => return Max::Unbounded,
                Max::Bounded(m) => total += m as u64,
            }
        }
        Max::Bounded(total.try_into().unwrap_or(u32::MAX))
    }
}

/// A pattern: one or more alternatives separated by `|`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub alternatives: Vec<Rc<Alternative>>,
}

/// Counts the capturing groups anywhere in `pattern`, including inside
/// nested (possibly non-capturing) groups, by walking the whole tree and
/// tracking the highest index seen. Used to size the shared capture table.
pub(crate) fn max_capture_index(pattern: &Pattern) -> usize {
    let mut max = 0;
    for alt in &pattern.alternatives {
        for qa in &alt.atoms {
            if let Atom::Group(inner, index) = &qa.atom {
                if let Some(i) = index {
                    max = max.max(*i);
                }
                max = max.max(max_capture_index(inner));
            }
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_class_expands_range() {
        let class = CharClass::new(vec![CharRange { start: 'a', end: 'c' }], false);
        assert_eq!(class.chars(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn char_class_negation_is_against_whole_alphabet() {
        let class = CharClass::new(vec![CharRange { start: 'a', end: 'z' }], true);
        let chars = class.chars();
        assert!(!chars.contains(&'m'));
        assert!(chars.contains(&'A'));
        assert!(chars.contains(&' '));
    }

    #[test]
    fn max_capture_index_sees_through_nested_groups() {
        // (abc)de(?:fg(hi|jk))
        let inner_alt = Rc::new(Alternative {
            atoms: vec![QuantifiedAtom {
                atom: Atom::Literal('h'),
                min: 1,
                max: Max::Bounded(1),
            }],
        });
        let capturing_inner = Pattern {
            alternatives: vec![inner_alt],
        };
        let noncapturing = Atom::Group(Rc::new(capturing_inner.clone()), Some(2));
        let outer = Pattern {
            alternatives: vec![Rc::new(Alternative {
                atoms: vec![QuantifiedAtom {
                    atom: noncapturing,
                    min: 1,
                    max: Max::Bounded(1),
                }],
            })],
        };
        assert_eq!(max_capture_index(&outer), 2);
    }
}
