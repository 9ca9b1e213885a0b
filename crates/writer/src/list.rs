//! Lazy file-list input.
//!
//! The upstream listing tooling produces a UTF-8 text file with one
//! source path per line. Lists can be very large, so lines are pulled
//! one at a time; the list is never held in memory.

use crate::error::{PackError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Lazy line iterator over a file list.
#[derive(Debug)]
pub struct FileList {
    lines: Lines<BufReader<File>>,
}

impl FileList {
    /// Open a file list for reading.
    ///
    /// A missing list path is a pre-flight error: it is reported
    /// before any shard or output directory is touched.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PackError::MissingFileList {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(PackError::ListRead)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for FileList {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}

/// Trim one list line down to a path, or `None` if the line is blank.
///
/// Trailing whitespace is stripped. Blank lines are skippable noise,
/// not an end-of-input sentinel: only true stream exhaustion completes
/// a run.
pub(crate) fn path_from_line(line: &str) -> Option<&str> {
    let trimmed = line.trim_end();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_missing_list_is_preflight_error() {
        let dir = tempdir().unwrap();
        let err = FileList::open(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, PackError::MissingFileList { .. }));
        assert!(err.is_preflight());
    }

    #[test]
    fn test_yields_lines_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "a.js").unwrap();
        writeln!(file, "b.js").unwrap();
        drop(file);

        let lines: Vec<String> = FileList::open(&path)
            .unwrap()
            .collect::<std::io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["a.js", "b.js"]);
    }

    #[test]
    fn test_path_from_line_strips_trailing_whitespace() {
        assert_eq!(path_from_line("a.js  \t"), Some("a.js"));
        assert_eq!(path_from_line("a.js"), Some("a.js"));
    }

    #[test]
    fn test_blank_lines_are_noise() {
        assert_eq!(path_from_line(""), None);
        assert_eq!(path_from_line("   \t"), None);
    }
}
