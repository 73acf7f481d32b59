//! Locating and loading a `conversations.json` export.
//!
//! The export is looked up in an ordered list of candidate paths; the first
//! path that exists wins. The document root must be a JSON array of
//! conversation objects.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatgpt_usage::parser::{locate_input, load_conversations};
//!
//! let path = locate_input(&["conversations.json", "resources/conversations.json"])?;
//! let conversations = load_conversations(&path)?;
//! println!("Loaded {} conversations", conversations.len());
//! # Ok::<(), chatgpt_usage::UsageError>(())
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::{Result, UsageError};
use crate::model::ConversationRecord;

/// Default candidate locations, relative to the working directory.
pub const DEFAULT_SEARCH_PATHS: &[&str] = &[
    "conversations.json",
    "../conversations.json",
    "../../conversations.json",
    "resources/conversations.json",
];

/// Return the first candidate path that exists.
pub fn locate_input<P: AsRef<Path>>(candidates: &[P]) -> Result<PathBuf> {
    for candidate in candidates {
        let path = candidate.as_ref();
        if path.exists() {
            info!(path = %path.display(), "Found conversation export");
            return Ok(path.to_path_buf());
        }
        debug!(path = %path.display(), "Candidate not found");
    }

    Err(UsageError::MissingInputFile {
        candidates: candidates.iter().map(|p| p.as_ref().to_path_buf()).collect(),
    })
}

/// Load every conversation record from an export file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_conversations(path: impl AsRef<Path>) -> Result<Vec<ConversationRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| UsageError::io(format!("Failed to open {}", path.display()), e))?;

    let conversations = parse_reader(BufReader::new(file)).map_err(|e| UsageError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
        source: Some(e),
    })?;

    debug!(count = conversations.len(), "Loaded conversations");
    Ok(conversations)
}

/// Parse an export document from a string.
pub fn parse_str(content: &str) -> Result<Vec<ConversationRecord>> {
    serde_json::from_str(content).map_err(|e| UsageError::ParseError {
        path: PathBuf::from("<string>"),
        message: e.to_string(),
        source: Some(e),
    })
}

fn parse_reader<R: std::io::Read>(reader: R) -> serde_json::Result<Vec<ConversationRecord>> {
    serde_json::from_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_locate_input_first_existing_wins() {
        let dir = tempdir().unwrap();
        let second = dir.path().join("second.json");
        let third = dir.path().join("third.json");
        std::fs::write(&second, "[]").unwrap();
        std::fs::write(&third, "[]").unwrap();

        let candidates = vec![dir.path().join("first.json"), second.clone(), third];
        assert_eq!(locate_input(&candidates).unwrap(), second);
    }

    #[test]
    fn test_locate_input_missing() {
        let dir = tempdir().unwrap();
        let candidates = vec![dir.path().join("a.json"), dir.path().join("b.json")];

        match locate_input(&candidates) {
            Err(UsageError::MissingInputFile { candidates: searched }) => {
                assert_eq!(searched, candidates);
            }
            other => panic!("expected MissingInputFile, got {other:?}"),
        }
    }

    #[test]
    fn test_load_conversations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conversations.json");
        std::fs::write(
            &path,
            r#"[{"title": "a", "mapping": {}}, {"title": "b", "mapping": {"n": {"message": null}}}]"#,
        )
        .unwrap();

        let conversations = load_conversations(&path).unwrap();
        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[1].mapping.len(), 1);
    }

    #[test]
    fn test_non_array_root_is_rejected() {
        assert!(matches!(
            parse_str(r#"{"mapping": {}}"#),
            Err(UsageError::ParseError { .. })
        ));
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{").unwrap();

        match load_conversations(&path) {
            Err(UsageError::ParseError { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }
}
