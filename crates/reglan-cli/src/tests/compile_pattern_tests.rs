use crate::compile_pattern;
use reglan_core::error::FileError;
use reglan_core::LineSource;

struct NoFiles;
impl LineSource for NoFiles {
    fn read_lines(&self, path: &str) -> Result<Vec<String>, FileError> {
        Err(FileError::Unreadable {
            path: path.to_string(),
            message: "no filesystem access in this test".to_string(),
        })
    }
}

#[test]
fn compiles_a_valid_pattern() {
    let result = compile_pattern("a(b|c)d", &NoFiles);
    assert!(result.is_ok());
}

#[test]
fn reports_parse_errors() {
    let result = compile_pattern("a(b", &NoFiles);
    assert!(result.is_err());
}

#[test]
fn reports_file_errors_for_unresolved_dictionaries() {
    let result = compile_pattern("(?Fmissing.txt)", &NoFiles);
    assert!(matches!(
        result,
        Err(reglan_core::RegexError::File(FileError::Unreadable { .. }))
    ));
}
