//! The interface boundary between the enumerator and whatever loads
//! dictionary files for `(?F<path>)` atoms. This crate never touches a
//! filesystem directly; a concrete implementation (e.g. reading from disk)
//! is a collaborator's responsibility — see `reglan-cli`'s `FsLineSource`.

use crate::error::FileError;

/// Resolves a `(?F<path>)` reference to the lines it should enumerate over.
pub trait LineSource {
    fn read_lines(&self, path: &str) -> Result<Vec<String>, FileError>;
}
