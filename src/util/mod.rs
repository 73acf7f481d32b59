//! Utility functions for common operations.
//!
//! This module provides shared utilities used across the crate:
//! - Atomic file operations for data safety
//! - Number formatting for reports
//! - Column wrapping for annotation blocks

use std::io::{self, Write};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};

use crate::error::{Result, UsageError};

/// Resolve the directory a file will be written into, creating it if needed.
fn prepare_parent(path: &Path) -> Result<&Path> {
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => {
            return Err(UsageError::IoError {
                context: format!("Cannot determine parent directory for: {}", path.display()),
                source: io::Error::new(io::ErrorKind::InvalidInput, "No parent directory"),
            })
        }
    };

    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            UsageError::io(
                format!("Failed to create directory: {}", parent.display()),
                e,
            )
        })?;
    }

    Ok(parent)
}

fn persist(temp_file: NamedTempFile, path: &Path) -> Result<()> {
    temp_file.persist(path).map_err(|e| {
        UsageError::io(
            format!("Failed to atomically write file: {}", path.display()),
            e.error,
        )
    })?;
    Ok(())
}

/// Atomically write content to a file.
///
/// The content is written to a temporary file in the same directory, flushed,
/// and then renamed over the target. If any step fails the original file (if
/// it exists) remains unchanged.
///
/// # Example
///
/// ```rust,no_run
/// use chatgpt_usage::util::atomic_write;
///
/// atomic_write("config.toml", b"key = \"value\"").unwrap();
/// ```
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = prepare_parent(path)?;

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
        UsageError::io(
            format!("Failed to create temporary file in: {}", parent.display()),
            e,
        )
    })?;

    temp_file.write_all(content).map_err(|e| {
        UsageError::io(
            format!("Failed to write to temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.flush().map_err(|e| {
        UsageError::io(
            format!("Failed to flush temporary file for: {}", path.display()),
            e,
        )
    })?;

    persist(temp_file, path)
}

/// Atomically produce a file through a renderer that writes by path.
///
/// Some backends (image encoders in particular) only accept a path and pick
/// the encoding from its extension. The temporary file therefore keeps the
/// target's extension, and is renamed over the target once `render_fn`
/// returns successfully.
pub fn atomic_write_by_path<F>(path: impl AsRef<Path>, render_fn: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let path = path.as_ref();
    let parent = prepare_parent(path)?;

    let suffix = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let temp_file = Builder::new()
        .prefix(".tmp")
        .suffix(&suffix)
        .tempfile_in(parent)
        .map_err(|e| {
            UsageError::io(
                format!("Failed to create temporary file in: {}", parent.display()),
                e,
            )
        })?;

    render_fn(temp_file.path())?;

    persist(temp_file, path)
}

/// Format an integer with comma thousands separators (`1234567` -> `1,234,567`).
#[must_use]
pub fn format_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let chars: Vec<char> = s.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result
}

/// Greedily wrap `text` to lines of at most `width` characters.
///
/// Whitespace is kept as written: runs of spaces are chunks of their own and
/// are never dropped at line boundaries, so leading indentation survives and
/// lines may end in a space. A word longer than `width` is split.
#[must_use]
pub fn wrap_columns(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks: Vec<String> = Vec::new();
    for c in text.chars() {
        let is_space = c.is_whitespace();
        match chunks.last_mut() {
            Some(last) if last.chars().next().is_some_and(char::is_whitespace) == is_space => {
                last.push(if is_space { ' ' } else { c });
            }
            _ => chunks.push(if is_space { " ".to_string() } else { c.to_string() }),
        }
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for chunk in chunks {
        let mut chunk = chunk;
        loop {
            let len = chunk.chars().count();
            if current_len + len <= width {
                current.push_str(&chunk);
                current_len += len;
                break;
            }
            if current_len == 0 {
                // Oversized chunk on an empty line: split it.
                let head: String = chunk.chars().take(width).collect();
                let tail: String = chunk.chars().skip(width).collect();
                lines.push(head);
                chunk = tail;
                continue;
            }
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");

        atomic_write(&path, b"Hello, world!").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Hello, world!");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("test.txt");

        atomic_write(&path, b"Nested content").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_atomic_write_by_path_keeps_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.png");

        atomic_write_by_path(&path, |tmp| {
            assert_eq!(tmp.extension().and_then(|e| e.to_str()), Some("png"));
            std::fs::write(tmp, b"pixels").map_err(|e| UsageError::io("write", e))
        })
        .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"pixels");
    }

    #[test]
    fn test_atomic_write_by_path_failure_leaves_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.png");
        std::fs::write(&path, b"original").unwrap();

        let result = atomic_write_by_path(&path, |_| Err(UsageError::render("no fonts")));

        assert!(result.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"original");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(100_388), "100,388");
        assert_eq!(format_thousands(22_000_000), "22,000,000");
    }

    #[test]
    fn test_wrap_columns_respects_width() {
        let text = "the quick brown fox jumps over the lazy dog";
        let lines = wrap_columns(text, 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.concat(), text);
    }

    #[test]
    fn test_wrap_columns_keeps_leading_padding() {
        let text = format!("{}That is all.", " ".repeat(8));
        let lines = wrap_columns(&text, 10);
        assert_eq!(lines[0], " ".repeat(8));
        assert_eq!(lines[1], "That is ");
        assert_eq!(lines[2], "all.");
    }

    #[test]
    fn test_wrap_columns_splits_long_words() {
        let lines = wrap_columns("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_columns_empty() {
        assert!(wrap_columns("", 10).is_empty());
    }
}
