use std::sync::Arc;

use log::{info, warn};

use crate::backend::DocumentSource;
use crate::error::UploadError;

/// Sends study documents to the backend so it can build the pending quiz.
#[derive(Clone)]
pub struct UploadService {
    documents: Arc<dyn DocumentSource>,
}

impl UploadService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentSource>) -> Self {
        Self { documents }
    }

    /// Upload a document and return how many questions were generated from it.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::NoFile` for a blank name, `UploadError::EmptyFile`
    /// for zero bytes, and `UploadError::Failed` when the backend fails.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<usize, UploadError> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(UploadError::NoFile);
        }
        if bytes.is_empty() {
            return Err(UploadError::EmptyFile);
        }

        let quiz = self
            .documents
            .upload_document(file_name, bytes)
            .await
            .map_err(|err| {
                warn!("upload of {file_name:?} failed: {err}");
                UploadError::Failed(err)
            })?;
        info!("generated {} questions from {file_name:?}", quiz.len());
        Ok(quiz.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{InMemoryBackend, QuizSource};
    use quizera_core::model::Question;

    fn question() -> Question {
        Question::new("Capital of France?", vec!["Paris".into(), "Rome".into()], 0, None).unwrap()
    }

    #[tokio::test]
    async fn upload_makes_questions_pending() {
        let backend = InMemoryBackend::new().with_uploaded(vec![question(), question()]);
        let service = UploadService::new(Arc::new(backend.clone()));

        let count = service.upload("notes.pdf", b"%PDF-1.7".to_vec()).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(backend.uploads(), vec!["notes.pdf".to_string()]);
        assert_eq!(backend.fetch_pending().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_or_empty_file_is_refused_locally() {
        let backend = InMemoryBackend::new().with_uploaded(vec![question()]);
        let service = UploadService::new(Arc::new(backend.clone()));

        assert!(matches!(
            service.upload("  ", b"text".to_vec()).await,
            Err(UploadError::NoFile)
        ));
        assert!(matches!(
            service.upload("notes.txt", Vec::new()).await,
            Err(UploadError::EmptyFile)
        ));
        assert!(backend.uploads().is_empty());
    }

    #[tokio::test]
    async fn document_without_questions_fails() {
        let backend = InMemoryBackend::new();
        let service = UploadService::new(Arc::new(backend.clone()));

        let err = service.upload("blank.docx", b"x".to_vec()).await.unwrap_err();
        assert!(matches!(err, UploadError::Failed(_)));
        assert!(err.to_string().starts_with("Failed to generate quiz: "));
        assert!(backend.fetch_pending().await.is_err());
    }
}
