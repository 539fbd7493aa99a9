use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use job_alert::profiles::{ProfileRepository, RepositoryError, UserProfile};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local profile store keyed by email. Contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    profiles: Arc<Mutex<BTreeMap<String, UserProfile>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    fn fetch(&self, email: &str) -> Result<Option<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(email).cloned())
    }

    fn upsert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(profile.email.clone(), profile.clone());
        Ok(profile)
    }

    fn active(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard
            .values()
            .filter(|profile| profile.is_active)
            .cloned()
            .collect())
    }
}
