use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Resume uploads above this size are rejected before anything is written.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Accepted resume file extensions, matched case-insensitively.
pub const ALLOWED_RESUME_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Local-disk store for uploaded resume files.
///
/// Files are written under a single upload directory with generated names of
/// the form `resume-<millis>-<random>.<ext>`, so nothing user-controlled ever
/// reaches the filesystem path.
#[derive(Clone, Debug)]
pub struct ResumeStore {
    root: PathBuf,
}

impl ResumeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Return the lowercased extension of an uploaded file name if it is one
    /// of the accepted resume formats.
    pub fn allowed_extension(original_name: &str) -> Option<String> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_lowercase();

        ALLOWED_RESUME_EXTENSIONS
            .contains(&extension.as_str())
            .then_some(extension)
    }

    /// Generate a unique stored name for an upload with the given extension.
    pub fn generate_filename(&self, extension: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let suffix = rand::random::<u32>() % 1_000_000_000;
        format!("resume-{millis}-{suffix}.{extension}")
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub async fn save(&self, filename: &str, data: &[u8]) -> std::io::Result<()> {
        let path = self.path_of(filename);
        let mut file = fs::File::create(&path).await?;
        file.write_all(data).await?;
        file.flush().await?;
        debug!("Stored resume file {} ({} bytes)", path.display(), data.len());
        Ok(())
    }

    pub async fn remove(&self, filename: &str) -> std::io::Result<()> {
        fs::remove_file(self.path_of(filename)).await
    }

    pub async fn read(&self, filename: &str) -> std::io::Result<Vec<u8>> {
        fs::read(self.path_of(filename)).await
    }
}

/// Content type served for a stored resume, keyed by its extension.
pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (ResumeStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (ResumeStore::new(dir.path()), dir)
    }

    #[test]
    fn test_allowed_extension() {
        assert_eq!(
            ResumeStore::allowed_extension("resume.pdf"),
            Some("pdf".to_string())
        );
        assert_eq!(
            ResumeStore::allowed_extension("My Resume.DOCX"),
            Some("docx".to_string())
        );
        assert_eq!(ResumeStore::allowed_extension("payload.exe"), None);
        assert_eq!(ResumeStore::allowed_extension("no-extension"), None);
    }

    #[test]
    fn test_generate_filename_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path());

        let filename = store.generate_filename("pdf");
        assert!(filename.starts_with("resume-"));
        assert!(filename.ends_with(".pdf"));

        let stem = filename
            .strip_prefix("resume-")
            .and_then(|rest| rest.strip_suffix(".pdf"))
            .unwrap();
        let (millis, suffix) = stem.split_once('-').unwrap();
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_save_read_remove_round_trip() {
        let (store, _dir) = test_store();
        store.ensure_root().await.unwrap();

        store.save("resume-1-2.pdf", b"%PDF-1.4 test").await.unwrap();
        assert!(store.path_of("resume-1-2.pdf").exists());

        let data = store.read("resume-1-2.pdf").await.unwrap();
        assert_eq!(data, b"%PDF-1.4 test");

        store.remove("resume-1-2.pdf").await.unwrap();
        assert!(!store.path_of("resume-1-2.pdf").exists());
        assert!(store.read("resume-1-2.pdf").await.is_err());
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("pdf"), "application/pdf");
        assert_eq!(content_type_for("doc"), "application/msword");
        assert_eq!(content_type_for("bin"), "application/octet-stream");
    }
}
