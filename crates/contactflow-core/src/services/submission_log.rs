/// Append-only submission log
use crate::error::ContactflowError;
use crate::models::SubmissionRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

#[async_trait]
pub trait SubmissionLog: Send + Sync {
    async fn append(&self, record: &SubmissionRecord) -> Result<(), ContactflowError>;
}

/// Writes one line per accepted submission to a local file
///
/// Lines are never read back; the file only grows.
pub struct FileSubmissionLog {
    path: PathBuf,
}

impl FileSubmissionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SubmissionLog for FileSubmissionLog {
    async fn append(&self, record: &SubmissionRecord) -> Result<(), ContactflowError> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                ContactflowError::Storage(format!(
                    "Failed to open submission log {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        // Whole line in one write
        file.write_all(record.to_log_line().as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> SubmissionRecord {
        SubmissionRecord {
            timestamp: "2025-03-14 09:26:53".to_string(),
            name: name.to_string(),
            email: "jane@example.com".to_string(),
            ip_address: "203.0.113.7".to_string(),
        }
    }

    fn temp_log_path() -> PathBuf {
        std::env::temp_dir().join(format!("contactflow-{}.log", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_append_creates_and_grows_file() {
        let path = temp_log_path();
        let log = FileSubmissionLog::new(&path);

        log.append(&record("Jane")).await.unwrap();
        log.append(&record("John")).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            contents,
            "2025-03-14 09:26:53 - Jane (jane@example.com) - 203.0.113.7\n\
             2025-03-14 09:26:53 - John (jane@example.com) - 203.0.113.7\n"
        );

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_append_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join(format!("missing-{}", uuid::Uuid::new_v4()))
            .join("contact.log");
        let log = FileSubmissionLog::new(path);

        let err = log.append(&record("Jane")).await.unwrap_err();
        assert!(matches!(err, ContactflowError::Storage(_)));
    }
}
