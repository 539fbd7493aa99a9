use super::domain::UserProfile;

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, email: &str) -> Result<Option<UserProfile>, RepositoryError>;
    /// Inserts or replaces the profile keyed by its email.
    fn upsert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError>;
    /// Active profiles ordered by email.
    fn active(&self) -> Result<Vec<UserProfile>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
