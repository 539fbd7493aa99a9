//! Per-email job-search profiles and the HTTP surface the configuration form talks to.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    skills_for_title, ConfigSnapshot, ConfigUpdateResponse, HealthStatus, ProfileList,
    ProfileUpdate, UserProfile,
};
pub use repository::{ProfileRepository, RepositoryError};
pub use router::profile_router;
pub use service::{ProfileService, ProfileServiceError};
