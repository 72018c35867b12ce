//! Filesystem-backed `LineSource`: reads `(?F<path>)` dictionary files
//! relative to the process working directory (spec.md §6), eagerly and
//! once, keeping the core crate free of any `std::fs` dependency.

use std::fs::File;
use std::io::{BufRead, BufReader};

use reglan_core::error::FileError;
use reglan_core::LineSource;

pub struct FsLineSource;

impl LineSource for FsLineSource {
    fn read_lines(&self, path: &str) -> Result<Vec<String>, FileError> {
        let file = File::open(path).map_err(|e| FileError::Unreadable {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| FileError::Unreadable {
                path: path.to_string(),
                message: e.to_string(),
            })?;
            if !line.is_empty() {
                lines.push(line);
            }
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_nonempty_lines_only() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ann").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "bo").unwrap();

        let lines = FsLineSource
            .read_lines(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(lines, vec!["ann".to_string(), "bo".to_string()]);
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let err = FsLineSource
            .read_lines("/no/such/path-reglan-test.txt")
            .unwrap_err();
        assert!(matches!(err, FileError::Unreadable { .. }));
    }
}
