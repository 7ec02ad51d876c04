//! Loading the embedding catalog from its serialized artifact.
//!
//! The artifact is a JSON-lines file, one catalog entry per line:
//!
//! ```text
//! {"id": 603, "title": "The Matrix", "embedding": [0.12, -0.03, ...]}
//! ```
//!
//! Lines are parsed in parallel with Rayon; parse failures report the
//! 1-based line number. Dimensional consistency is validated once all rows
//! are in, so a bad artifact fails loudly at startup instead of producing
//! garbage scores later.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogItem, EmbeddingStore};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

impl EmbeddingStore {
    /// Load the catalog from a JSON-lines file.
    ///
    /// This is the main entry point for startup loading.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|_| CatalogError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let items = parse_catalog(BufReader::new(file))?;
        let store = Self::from_items(items)?;

        info!(
            "Loaded {} catalog entries ({} dimensions) from {}",
            store.len(),
            store.dimension(),
            path.display()
        );
        Ok(store)
    }
}

/// Parse catalog entries from any buffered reader.
///
/// Blank lines are skipped. Relative order of the remaining lines is
/// preserved, which matters: catalog order is the ranking tie-break.
pub fn parse_catalog<R: BufRead>(reader: R) -> Result<Vec<CatalogItem>> {
    let lines: Vec<String> = reader.lines().collect::<std::io::Result<_>>()?;

    lines
        .par_iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<CatalogItem>(line.trim()).map_err(|e| {
                CatalogError::ParseError {
                    line: idx + 1,
                    reason: e.to_string(),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;

    const GOOD: &str = r#"{"id": 1, "title": "Alpha", "embedding": [1.0, 0.0]}
{"id": 2, "title": "Beta", "embedding": [0.0, 1.0]}

{"id": 3, "title": "Gamma", "embedding": [0.5, 0.5]}
"#;

    #[test]
    fn test_parse_catalog_skips_blank_lines() {
        let items = parse_catalog(Cursor::new(GOOD)).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Alpha");
        assert_eq!(items[1].id, 2);
        assert_eq!(items[2].embedding, vec![0.5, 0.5]);
    }

    #[test]
    fn test_parse_catalog_preserves_line_order() {
        let items = parse_catalog(Cursor::new(GOOD)).unwrap();
        let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_catalog_reports_bad_line_number() {
        let input = r#"{"id": 1, "title": "Alpha", "embedding": [1.0]}
not json at all
{"id": 3, "title": "Gamma", "embedding": [0.5]}
"#;

        match parse_catalog(Cursor::new(input)) {
            Err(CatalogError::ParseError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", GOOD).unwrap();

        let store = EmbeddingStore::load_from_file(file.path()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.dimension(), 2);
    }

    #[test]
    fn test_load_from_file_missing_file() {
        let result = EmbeddingStore::load_from_file(Path::new("does/not/exist.jsonl"));
        assert!(matches!(result, Err(CatalogError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_from_file_rejects_mixed_dimensions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": 1, "title": "Alpha", "embedding": [1.0, 0.0]}}"#).unwrap();
        writeln!(file, r#"{{"id": 2, "title": "Beta", "embedding": [1.0]}}"#).unwrap();

        let result = EmbeddingStore::load_from_file(file.path());
        assert!(matches!(
            result,
            Err(CatalogError::DimensionMismatch { id: 2, .. })
        ));
    }
}
