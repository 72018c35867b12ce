use thiserror::Error;

/// A malformed pattern, reported with the 0-based character offset where
/// the problem was detected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of pattern")]
    UnexpectedEnd,

    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),

    #[error("unmatched '[' at position {0}")]
    UnmatchedBracket(usize),

    #[error("unmatched '(' at position {0}")]
    UnmatchedParen(usize),

    #[error("quantifier at position {0} has no preceding atom")]
    DanglingQuantifier(usize),

    #[error("backreference \\{0} at position {1} refers to a group that does not exist yet")]
    UnknownBackreference(usize, usize),

    #[error("empty alternative at position {0}")]
    EmptyAlternative(usize),

    #[error("malformed repeat count at position {0}")]
    MalformedRepeat(usize),

    #[error("character class at position {0} matches no character in the alphabet")]
    EmptyClass(usize),

    #[error("invalid character range at position {0}: start exceeds end")]
    InvalidRange(usize),

    #[error("trailing backslash at end of pattern")]
    TrailingBackslash,
}

/// A `{min,max}` (or equivalent) quantifier whose bounds are contradictory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundsError {
    #[error("quantifier minimum {min} exceeds maximum {max}")]
    MinGreaterThanMax { min: u32, max: u32 },
}

/// Failure to resolve a `(?F<path>)` dictionary reference.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileError {
    #[error("cannot read dictionary file '{path}': {message}")]
    Unreadable { path: String, message: String },

    #[error("dictionary file '{path}' contains no lines")]
    Empty { path: String },
}

/// The unified error type returned by the public API.
#[derive(Debug, Error)]
pub enum RegexError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error(transparent)]
    File(#[from] FileError),
}
