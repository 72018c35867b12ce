//! Recursive-descent parser: pattern text -> `ast::Pattern`.

use std::collections::HashSet;
use std::rc::Rc;

use crate::ast::{Alternative, Atom, CharClass, CharRange, Max, Pattern, QuantifiedAtom};
use crate::error::{FileError, ParseError, RegexError};
use crate::source::LineSource;

/// Parses `text` into a `Pattern`, resolving any `(?F<path>)` dictionary
/// references through `source`.
pub fn parse(text: &str, source: &dyn LineSource) -> Result<Pattern, RegexError> {
    let mut parser = Parser {
        input: text.chars().collect(),
        pos: 0,
        next_capture: 1,
        closed_captures: HashSet::new(),
        source,
    };
    let pattern = parser.parse_pattern()?;
    if let Some(c) = parser.peek() {
        return Err(ParseError::UnexpectedChar(c, parser.pos).into());
    }
    Ok(pattern)
}

fn is_quantifier_start(c: char) -> bool {
    matches!(c, '*' | '+' | '?' | '{')
}

struct Parser<'a> {
    input: Vec<char>,
    pos: usize,
    next_capture: usize,
    closed_captures: HashSet<usize>,
    source: &'a dyn LineSource,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn consume_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_pattern(&mut self) -> Result<Pattern, RegexError> {
        let mut alternatives = vec![Rc::new(self.parse_alternative()?)];
        while self.consume_if('|') {
            alternatives.push(Rc::new(self.parse_alternative()?));
        }
        Ok(Pattern { alternatives })
    }

    fn parse_alternative(&mut self) -> Result<Alternative, RegexError> {
        let start = self.pos;
        let mut atoms = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            atoms.push(self.parse_quantified_atom()?);
        }
        if atoms.is_empty() {
            return Err(ParseError::EmptyAlternative(start).into());
        }
        Ok(Alternative { atoms })
    }

    fn parse_quantified_atom(&mut self) -> Result<QuantifiedAtom, RegexError> {
        let atom = self.parse_atom()?;
        let (min, max) = self.parse_quantifier()?;
        Ok(QuantifiedAtom { atom, min, max })
    }

    fn parse_quantifier(&mut self) -> Result<(u32, Max), RegexError> {
        match self.peek() {
            Some('*') => {
                self.next();
                Ok((0, Max::Unbounded))
            }
            Some('+') => {
                self.next();
                Ok((1, Max::Unbounded))
            }
            Some('?') => {
                self.next();
                Ok((0, Max::Bounded(1)))
            }
            Some('{') => {
                let pos = self.pos;
                self.next();
                self.parse_brace_range(pos)
            }
            _ => Ok((1, Max::Bounded(1))),
        }
    }

    fn parse_brace_range(&mut self, start: usize) -> Result<(u32, Max), RegexError> {
        let min = self
            .parse_number()
            .ok_or(ParseError::MalformedRepeat(start))?;
        match self.peek() {
            Some('}') => {
                self.next();
                Ok((min, Max::Bounded(min)))
            }
            Some(',') => {
                self.next();
                if self.consume_if('}') {
                    Ok((min, Max::Unbounded))
                } else {
                    let max = self
                        .parse_number()
                        .ok_or(ParseError::MalformedRepeat(start))?;
                    if !self.consume_if('}') {
                        return Err(ParseError::MalformedRepeat(start).into());
                    }
                    if max < min {
                        return Err(crate::error::BoundsError::MinGreaterThanMax { min, max }.into());
                    }
                    Ok((min, Max::Bounded(max)))
                }
            }
            _ => Err(ParseError::MalformedRepeat(start).into()),
        }
    }

    fn parse_number(&mut self) -> Option<u32> {
        let mut value: u32 = 0;
        let mut any = false;
        while let Some(c) = self.peek() {
            if let Some(d) = c.to_digit(10) {
                any = true;
                value = value.saturating_mul(10).saturating_add(d);
                self.next();
            } else {
                break;
            }
        }
        any.then_some(value)
    }

    fn parse_atom(&mut self) -> Result<Atom, RegexError> {
        let pos = self.pos;
        match self.peek() {
            Some('(') => {
                self.next();
                self.parse_group(pos)
            }
            Some('[') => {
                self.next();
                self.parse_class(pos)
            }
            Some('.') => {
                self.next();
                Ok(Atom::Class(CharClass::any()))
            }
            Some('\\') => {
                self.next();
                self.parse_escape()
            }
            Some(c) if is_quantifier_start(c) => Err(ParseError::DanglingQuantifier(pos).into()),
            Some(c) if c == '}' => Err(ParseError::UnexpectedChar(c, pos).into()),
            Some(c) => {
                self.next();
                Ok(Atom::Literal(c))
            }
            None => Err(ParseError::UnexpectedEnd.into()),
        }
    }

    fn parse_group(&mut self, open_pos: usize) -> Result<Atom, RegexError> {
        if self.consume_if('?') {
            if self.consume_if(':') {
                let pattern = self.parse_pattern()?;
                if !self.consume_if(')') {
                    return Err(ParseError::UnmatchedParen(open_pos).into());
                }
                return Ok(Atom::Group(Rc::new(pattern), None));
            }
            if self.consume_if('F') {
                let path_start = self.pos;
                while let Some(c) = self.peek() {
                    if c == ')' {
                        break;
                    }
                    self.next();
                }
                if self.peek() != Some(')') {
                    return Err(ParseError::UnmatchedParen(open_pos).into());
                }
                let path: String = self.input[path_start..self.pos].iter().collect();
                self.next();
                let lines = self.source.read_lines(&path).map_err(RegexError::from)?;
                if lines.is_empty() {
                    return Err(FileError::Empty { path }.into());
                }
                return Ok(Atom::FileRef(Rc::new(lines)));
            }
            return Err(ParseError::UnexpectedChar('?', self.pos).into());
        }

        let index = self.next_capture;
        self.next_capture += 1;
        let pattern = self.parse_pattern()?;
        if !self.consume_if(')') {
            return Err(ParseError::UnmatchedParen(open_pos).into());
        }
        self.closed_captures.insert(index);
        Ok(Atom::Group(Rc::new(pattern), Some(index)))
    }

    fn parse_class(&mut self, open_pos: usize) -> Result<Atom, RegexError> {
        let negated = self.consume_if('^');
        let mut ranges: Vec<CharRange> = Vec::new();
        if self.peek() == Some(']') {
            self.next();
            ranges.push(CharRange { start: ']', end: ']' });
        }
        while let Some(c) = self.peek() {
            if c == ']' {
                break;
            }
            let start = self.parse_class_atom(open_pos)?;
            if self.consume_if('-') {
                match self.peek() {
                    Some(']') => {
                        ranges.push(CharRange { start, end: start });
                        ranges.push(CharRange { start: '-', end: '-' });
                    }
                    Some(_) => {
                        let end = self.parse_class_atom(open_pos)?;
                        if (end as u32) < (start as u32) {
                            return Err(ParseError::InvalidRange(open_pos).into());
                        }
                        ranges.push(CharRange { start, end });
                    }
                    None => return Err(ParseError::UnmatchedBracket(open_pos).into()),
                }
            } else {
                ranges.push(CharRange { start, end: start });
            }
        }
        if !self.consume_if(']') {
            return Err(ParseError::UnmatchedBracket(open_pos).into());
        }
        let class = CharClass::new(ranges, negated);
        if class.chars().is_empty() {
            return Err(ParseError::EmptyClass(open_pos).into());
        }
        Ok(Atom::Class(class))
    }

    fn parse_class_atom(&mut self, open_pos: usize) -> Result<char, RegexError> {
        match self.next() {
            Some('\\') => self.next().ok_or(ParseError::TrailingBackslash.into()),
            Some(c) => Ok(c),
            None => Err(ParseError::UnmatchedBracket(open_pos).into()),
        }
    }

    fn parse_escape(&mut self) -> Result<Atom, RegexError> {
        let pos = self.pos;
        match self.next() {
            Some(d) if ('1'..='9').contains(&d) => {
                let k = d.to_digit(10).unwrap() as usize;
                if !self.closed_captures.contains(&k) {
                    return Err(ParseError::UnknownBackreference(k, pos).into());
                }
                Ok(Atom::BackRef(k))
            }
            Some(c) => Ok(Atom::Literal(c)),
            None => Err(ParseError::TrailingBackslash.into()),
        }
    }
}
