use super::domain::{ApplicantId, ApplicantRecord};

/// Storage abstraction so the intake service can be exercised in isolation.
pub trait ApplicantRepository: Send + Sync {
    fn insert(&self, record: ApplicantRecord) -> Result<ApplicantRecord, RepositoryError>;
    fn update(&self, record: ApplicantRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicantRecord>, RepositoryError>;
    fn remove(&self, id: &ApplicantId) -> Result<ApplicantRecord, RepositoryError>;
    fn all(&self) -> Result<Vec<ApplicantRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
