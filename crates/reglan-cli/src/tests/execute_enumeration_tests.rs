use crate::{compile_pattern, execute_enumeration};
use reglan_core::error::FileError;
use reglan_core::{EnumerateOptions, LineSource};

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
fn writes_one_string_per_line() {
    let regexp = compile_pattern("[0-1]{1,2}", &NoFiles).unwrap();
    let mut out = Vec::new();
    execute_enumeration(
        &regexp,
        EnumerateOptions {
            offset: 0,
            limit: Some(1000),
            silent: false,
        },
        &mut out,
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "0\n1\n00\n01\n10\n11\n");
}

#[test]
fn silent_mode_writes_a_single_count_line() {
    let regexp = compile_pattern("[0-1]{1,2}", &NoFiles).unwrap();
    let mut out = Vec::new();
    execute_enumeration(
        &regexp,
        EnumerateOptions {
            offset: 0,
            limit: Some(1000),
            silent: true,
        },
        &mut out,
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "6\n");
}

#[test]
fn limit_truncates_output() {
    let regexp = compile_pattern("[0-1]{1,2}", &NoFiles).unwrap();
    let mut out = Vec::new();
    execute_enumeration(
        &regexp,
        EnumerateOptions {
            offset: 0,
            limit: Some(2),
            silent: false,
        },
        &mut out,
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "0\n1\n");
}

#[test]
fn offset_skips_leading_strings() {
    let regexp = compile_pattern("[0-1]{1,2}", &NoFiles).unwrap();
    let mut out = Vec::new();
    execute_enumeration(
        &regexp,
        EnumerateOptions {
            offset: 4,
            limit: Some(1000),
            silent: false,
        },
        &mut out,
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "10\n11\n");
}
