//! YAML document I/O for the issue store.
//!
//! The whole store lives in one document: the prefix plus every issue, sorted
//! by ID so that saving an unchanged store is byte-for-byte stable.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Issue;
use crate::store::Store;

/// Directory holding the document, relative to the project root.
pub const DOCUMENT_DIR: &str = ".mint";

/// Document file name inside [`DOCUMENT_DIR`].
pub const DOCUMENT_FILE: &str = "issues.yaml";

#[derive(Serialize)]
struct DocumentRef<'a> {
    prefix: &'a str,
    issues: Vec<&'a Issue>,
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    issues: Vec<Issue>,
}

/// Walk up from `start` looking for `.mint/issues.yaml`.
#[must_use]
pub fn find_document(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DOCUMENT_DIR).join(DOCUMENT_FILE))
        .find(|candidate| candidate.is_file())
}

/// Default document location under `root`.
#[must_use]
pub fn default_document_path(root: &Path) -> PathBuf {
    root.join(DOCUMENT_DIR).join(DOCUMENT_FILE)
}

/// Load a store from `path`.
///
/// A missing or blank file yields an empty store using `default_prefix`.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, `Yaml` if it does not parse, or
/// `IdCollision` if two issues share an ID.
pub fn load(path: &Path, default_prefix: &str) -> Result<Store> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No document yet, starting empty");
            return Ok(Store::new(default_prefix));
        }
        Err(e) => return Err(e.into()),
    };

    let store = parse(&content, default_prefix)?;
    tracing::debug!(path = %path.display(), issues = store.len(), "Loaded document");
    Ok(store)
}

/// Parse document text.
///
/// Dangling or one-sided references are kept as-is and logged as warnings.
///
/// # Errors
///
/// Returns `Yaml` or `IdCollision`.
pub fn parse(content: &str, default_prefix: &str) -> Result<Store> {
    if content.trim().is_empty() {
        return Ok(Store::new(default_prefix));
    }

    let doc: Document = serde_yaml::from_str(content)?;
    let prefix = doc.prefix.as_deref().unwrap_or(default_prefix);
    let store = Store::from_parts(prefix, doc.issues)?;

    for problem in store.inconsistencies() {
        tracing::warn!(%problem, "Inconsistent reference in document");
    }
    Ok(store)
}

/// Render a store as document text.
///
/// # Errors
///
/// Returns `Yaml` if serialization fails.
pub fn render(store: &Store) -> Result<String> {
    let doc = DocumentRef {
        prefix: store.prefix(),
        issues: store.graph().sorted(),
    };
    Ok(serde_yaml::to_string(&doc)?)
}

/// Save a store to `path` with write-to-temp + rename.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written, or `Yaml` if serialization
/// fails.
pub fn save(store: &Store, path: &Path) -> Result<()> {
    let text = render(store)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("yaml.tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    tracing::debug!(path = %path.display(), issues = store.len(), "Saved document");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MintError;
    use crate::model::Status;

    fn sample_store() -> Store {
        let mut store = Store::new("mint");
        let a = store.create_issue("First").unwrap();
        let b = store.create_issue("Second").unwrap();
        store.link_depends_on(&a.id, &b.id).unwrap();
        store.add_comment(&a.id, "looks good").unwrap();
        store.close_issue(&b.id, "done").unwrap();
        store
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".mint").join("issues.yaml");

        let store = sample_store();
        save(&store, &path).unwrap();

        let loaded = load(&path, "other").unwrap();
        assert_eq!(loaded, store);
        assert_eq!(loaded.prefix(), "mint");
        assert!(!path.with_extension("yaml.tmp").exists());
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.yaml");

        save(&sample_store(), &path).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        let reloaded = load(&path, "mint").unwrap();
        save(&reloaded, &path).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_issues_written_in_id_order() {
        let store = sample_store();
        let text = render(&store).unwrap();

        let ids: Vec<&str> = store
            .graph()
            .sorted()
            .iter()
            .map(|issue| issue.id.as_str())
            .collect();
        let first = text.find(ids[0]).unwrap();
        let second = text.find(&format!("id: {}", ids[1])).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = load(&dir.path().join("nope.yaml"), "mint").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.prefix(), "mint");
    }

    #[test]
    fn test_load_blank_file() {
        let store = parse("  \n\n", "proj").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.prefix(), "proj");
    }

    #[test]
    fn test_parse_minimal_document() {
        let text = r"
prefix: web
issues:
  - id: web-a1
    title: Hand written
    depends_on: []
    blocks: []
    created_at: 2024-01-01T00:00:00Z
    updated_at: 2024-01-01T00:00:00Z
";
        let store = parse(text, "mint").unwrap();
        assert_eq!(store.prefix(), "web");
        let issue = store.get_issue("web-a1").unwrap();
        assert_eq!(issue.status, Status::Open);
        assert!(issue.comments.is_empty());
    }

    #[test]
    fn test_parse_keeps_dangling_reference() {
        let text = r"
prefix: mint
issues:
  - id: mint-a
    title: Orphaned edge
    depends_on: [mint-gone]
    blocks: []
    created_at: 2024-01-01T00:00:00Z
    updated_at: 2024-01-01T00:00:00Z
";
        let store = parse(text, "mint").unwrap();
        assert_eq!(store.inconsistencies().len(), 1);
        assert_eq!(store.get_issue("mint-a").unwrap().depends_on, vec!["mint-gone"]);
    }

    #[test]
    fn test_parse_duplicate_ids() {
        let text = r"
prefix: mint
issues:
  - id: mint-a
    title: One
    depends_on: []
    blocks: []
    created_at: 2024-01-01T00:00:00Z
    updated_at: 2024-01-01T00:00:00Z
  - id: mint-a
    title: Two
    depends_on: []
    blocks: []
    created_at: 2024-01-01T00:00:00Z
    updated_at: 2024-01-01T00:00:00Z
";
        assert!(matches!(
            parse(text, "mint"),
            Err(MintError::IdCollision { id }) if id == "mint-a"
        ));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(matches!(
            parse("issues: [unclosed", "mint"),
            Err(MintError::Yaml(_))
        ));
    }

    #[test]
    fn test_find_document_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let doc = default_document_path(dir.path());
        fs::create_dir_all(doc.parent().unwrap()).unwrap();
        fs::write(&doc, "").unwrap();

        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_document(&nested), Some(doc));
    }
}
