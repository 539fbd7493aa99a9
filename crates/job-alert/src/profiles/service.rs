use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{ConfigSnapshot, ConfigUpdateResponse, ProfileUpdate, UserProfile};
use super::repository::{ProfileRepository, RepositoryError};
use crate::config::SearchDefaults;
use crate::form::ConfigPayload;

/// Applies submitted configurations to per-email profiles and serves read views.
pub struct ProfileService<R> {
    repository: Arc<R>,
    defaults: SearchDefaults,
}

impl<R> ProfileService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, defaults: SearchDefaults) -> Self {
        Self {
            repository,
            defaults,
        }
    }

    /// Creates or updates one profile per non-blank receiver email.
    pub fn apply_config(
        &self,
        payload: ConfigPayload,
    ) -> Result<ConfigUpdateResponse, ProfileServiceError> {
        if payload.receiver_emails.is_empty() {
            return Err(ProfileServiceError::MissingReceiver);
        }

        let update = ProfileUpdate::from_payload(&payload);
        let now = Utc::now();
        let mut profiles = Vec::with_capacity(payload.receiver_emails.len());

        for email in payload
            .receiver_emails
            .iter()
            .map(|email| email.trim())
            .filter(|email| !email.is_empty())
        {
            let mut profile = match self.repository.fetch(email)? {
                Some(existing) => existing,
                None => {
                    info!(%email, "creating profile");
                    UserProfile::new(email, now)
                }
            };
            update.apply_to(&mut profile, now);
            profiles.push(self.repository.upsert(profile)?);
        }

        info!(updated_count = profiles.len(), "configuration applied");

        Ok(ConfigUpdateResponse {
            message: "Configuration updated successfully".to_string(),
            updated_count: profiles.len() as u64,
            profiles,
        })
    }

    pub fn get(&self, email: &str) -> Result<UserProfile, ProfileServiceError> {
        let profile = self
            .repository
            .fetch(email)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(profile)
    }

    pub fn active_profiles(&self) -> Result<Vec<UserProfile>, ProfileServiceError> {
        Ok(self.repository.active()?)
    }

    /// Global search defaults plus every active profile.
    pub fn snapshot(&self) -> Result<ConfigSnapshot, ProfileServiceError> {
        Ok(ConfigSnapshot {
            preferred_locations: self.defaults.preferred_locations.clone(),
            min_salary: self.defaults.min_salary,
            max_salary: self.defaults.max_salary,
            email_recipients: self.defaults.email_recipient.iter().cloned().collect(),
            profiles: self.repository.active()?,
        })
    }
}

/// Error raised by the profile service.
#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error("At least one receiver email is required")]
    MissingReceiver,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
