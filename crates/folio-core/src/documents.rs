//! Filesystem-backed document storage.
//!
//! Documents are plain files in a single base directory, one file per
//! document, identified by their file name. Names are restricted to a bare
//! file name component so no operation can reach outside the base directory.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{name} does not exist")]
    NotFound { name: String },

    #[error("Invalid document name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DocumentError {
    fn from(e: std::io::Error) -> Self {
        DocumentError::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Render mode of a document, resolved once from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Markdown,
}

impl DocumentFormat {
    /// Resolve the format from a file name. Anything that isn't `.md` is
    /// served as plain text.
    pub fn from_name(name: &str) -> Self {
        match Path::new(name).extension().and_then(|ext| ext.to_str()) {
            Some("md") => DocumentFormat::Markdown,
            _ => DocumentFormat::PlainText,
        }
    }
}

/// A document read from the store.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: Vec<u8>,
    pub format: DocumentFormat,
}

/// Filesystem document store rooted at a single base directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    base_dir: PathBuf,
}

impl DocumentStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a document name to a path inside the base directory.
    ///
    /// Only bare file name components are accepted; separators and
    /// traversal segments are rejected outright.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(DocumentError::InvalidName {
                name: name.to_string(),
                reason: "a name is required".to_string(),
            });
        }
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(DocumentError::InvalidName {
                name: name.to_string(),
                reason: "must be a bare file name".to_string(),
            });
        }
        Ok(self.base_dir.join(name))
    }

    /// List the names of all regular files in the base directory.
    /// Directory listing order; callers that care should sort.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.base_dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    pub async fn exists(&self, name: &str) -> bool {
        match self.resolve(name) {
            Ok(path) => fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Read a document's content and resolve its render format.
    pub async fn read(&self, name: &str) -> Result<Document> {
        let path = self.resolve(name)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            _ => {
                return Err(DocumentError::NotFound {
                    name: name.to_string(),
                });
            }
        }
        let content = fs::read(&path).await?;
        Ok(Document {
            content,
            format: DocumentFormat::from_name(name),
        })
    }

    /// Write a document, creating it if absent and overwriting otherwise.
    ///
    /// There is no locking or temp-file rename here: two concurrent writes
    /// to the same name race at the filesystem level and the last one wins.
    pub async fn write(&self, name: &str, content: &[u8]) -> Result<()> {
        let path = self.resolve(name)?;
        fs::write(&path, content).await?;
        Ok(())
    }

    /// Create an empty document. The name must be non-empty after trimming
    /// and carry a file extension.
    pub async fn create_empty(&self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DocumentError::InvalidName {
                name: name.to_string(),
                reason: "a name is required".to_string(),
            });
        }
        if Path::new(name).extension().is_none() {
            return Err(DocumentError::InvalidName {
                name: name.to_string(),
                reason: "an extension is required".to_string(),
            });
        }
        self.write(name, b"").await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let path = self.resolve(name)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            _ => {
                return Err(DocumentError::NotFound {
                    name: name.to_string(),
                });
            }
        }
        fs::remove_file(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, DocumentStore) {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let (_dir, store) = store();

        store
            .write("about.md", b"# Ruby is...")
            .await
            .expect("write should succeed");

        assert!(store.exists("about.md").await);

        let doc = store.read("about.md").await.expect("read should succeed");
        assert_eq!(doc.content, b"# Ruby is...");
        assert_eq!(doc.format, DocumentFormat::Markdown);
    }

    #[tokio::test]
    async fn txt_documents_resolve_as_plain_text() {
        let (_dir, store) = store();

        store.write("changes.txt", b"history").await.unwrap();

        let doc = store.read("changes.txt").await.unwrap();
        assert_eq!(doc.format, DocumentFormat::PlainText);
    }

    #[tokio::test]
    async fn read_missing_document_is_not_found() {
        let (_dir, store) = store();

        let err = store.read("nope.txt").await.unwrap_err();
        assert!(matches!(err, DocumentError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_reports_membership() {
        let (_dir, store) = store();

        store.write("a.txt", b"").await.unwrap();
        store.write("b.md", b"").await.unwrap();

        let names = store.list().await.unwrap();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"a.txt".to_string()));
        assert!(names.contains(&"b.md".to_string()));
    }

    #[tokio::test]
    async fn delete_removes_document() {
        let (_dir, store) = store();

        store.write("gone.txt", b"bye").await.unwrap();
        store.delete("gone.txt").await.expect("delete should succeed");

        assert!(!store.exists("gone.txt").await);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_document_is_not_found() {
        let (_dir, store) = store();

        let err = store.delete("nope.txt").await.unwrap_err();
        assert!(matches!(err, DocumentError::NotFound { .. }));
    }

    #[tokio::test]
    async fn create_empty_requires_a_name() {
        let (_dir, store) = store();

        let err = store.create_empty("   ").await.unwrap_err();
        assert!(matches!(err, DocumentError::InvalidName { .. }));
    }

    #[tokio::test]
    async fn create_empty_requires_an_extension() {
        let (_dir, store) = store();

        let err = store.create_empty("noext").await.unwrap_err();
        assert!(matches!(err, DocumentError::InvalidName { .. }));
        assert!(!store.exists("noext").await);
    }

    #[tokio::test]
    async fn create_empty_writes_an_empty_file() {
        let (_dir, store) = store();

        store.create_empty("fresh.txt").await.unwrap();

        let doc = store.read("fresh.txt").await.unwrap();
        assert!(doc.content.is_empty());
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let (_dir, store) = store();

        for name in ["../escape.txt", "a/b.txt", "..", "."] {
            let err = store.read(name).await.unwrap_err();
            assert!(matches!(err, DocumentError::InvalidName { .. }), "{name}");
            let err = store.write(name, b"x").await.unwrap_err();
            assert!(matches!(err, DocumentError::InvalidName { .. }), "{name}");
            assert!(!store.exists(name).await);
        }
    }

    #[tokio::test]
    async fn overwrite_replaces_content_wholesale() {
        let (_dir, store) = store();

        store.write("doc.txt", b"first").await.unwrap();
        store.write("doc.txt", b"second").await.unwrap();

        let doc = store.read("doc.txt").await.unwrap();
        assert_eq!(doc.content, b"second");
    }
}
