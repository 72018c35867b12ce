use thiserror::Error;

/// Problems detected at the command-line layer, before the pattern ever
/// reaches `reglan_core`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandLineError {
    #[error("no pattern specified")]
    NoPattern,
}
