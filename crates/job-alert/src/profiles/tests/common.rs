use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::SearchDefaults;
use crate::form::{ConfigPayload, SalaryRange};
use crate::profiles::domain::UserProfile;
use crate::profiles::repository::{ProfileRepository, RepositoryError};
use crate::profiles::service::ProfileService;

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    profiles: Arc<Mutex<BTreeMap<String, UserProfile>>>,
}

impl ProfileRepository for MemoryRepository {
    fn fetch(&self, email: &str) -> Result<Option<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("repository mutex poisoned");
        Ok(guard.get(email).cloned())
    }

    fn upsert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("repository mutex poisoned");
        guard.insert(profile.email.clone(), profile.clone());
        Ok(profile)
    }

    fn active(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|profile| profile.is_active)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn fetch(&self, _email: &str) -> Result<Option<UserProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert(&self, _profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn active(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn defaults() -> SearchDefaults {
    SearchDefaults {
        preferred_locations: vec!["Bangalore".to_string(), "Remote".to_string()],
        min_salary: 6.0,
        max_salary: 40.0,
        email_recipient: Some("alerts@jobs.io".to_string()),
    }
}

pub(super) fn build_service() -> (ProfileService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ProfileService::new(repository.clone(), defaults());
    (service, repository)
}

pub(super) fn payload() -> ConfigPayload {
    ConfigPayload {
        receiver_emails: vec!["dev@jobs.io".to_string(), "ops@jobs.io".to_string()],
        locations: vec!["Pune".to_string(), " Remote ".to_string()],
        salary_ranges: vec![
            SalaryRange {
                min: 4.5,
                max: 999_999.0,
            },
            SalaryRange {
                min: 0.0,
                max: 10.0,
            },
            SalaryRange {
                min: 12.0,
                max: 30.0,
            },
        ],
        experience_min: Some(2.5),
        experience_max: Some(8.0),
        job_title: "Senior Python Developer".to_string(),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
