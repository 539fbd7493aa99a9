use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::ConfigPayload;

/// Job-search preferences stored per receiver email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub expected_salary_min: Option<f64>,
    #[serde(default)]
    pub expected_salary_max: Option<f64>,
    #[serde(default)]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub current_role: Option<String>,
    #[serde(default)]
    pub primary_skills: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// A fresh active profile named after the local part of the address.
    pub fn new(email: &str, now: DateTime<Utc>) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            email: email.to_string(),
            name,
            preferred_locations: Vec::new(),
            expected_salary_min: None,
            expected_salary_max: None,
            experience_years: None,
            current_role: None,
            primary_skills: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changes derived from one submitted configuration; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub preferred_locations: Option<Vec<String>>,
    pub expected_salary_min: Option<f64>,
    pub expected_salary_max: Option<f64>,
    pub experience_years: Option<f64>,
    pub current_role: Option<String>,
    pub primary_skills: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn from_payload(payload: &ConfigPayload) -> Self {
        let mut update = Self::default();

        if !payload.locations.is_empty() {
            update.preferred_locations = Some(
                payload
                    .locations
                    .iter()
                    .map(|location| location.trim())
                    .filter(|location| !location.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }

        // Zero bounds carry no preference.
        update.expected_salary_min = payload
            .salary_ranges
            .iter()
            .map(|range| range.min)
            .filter(|min| *min > 0.0)
            .reduce(f64::min);
        update.expected_salary_max = payload
            .salary_ranges
            .iter()
            .map(|range| range.max)
            .filter(|max| *max > 0.0)
            .reduce(f64::max);

        update.experience_years = payload.experience_min;

        let title = payload.job_title.trim();
        if !title.is_empty() {
            update.current_role = Some(title.to_string());
            update.primary_skills = skills_for_title(title);
        }

        update
    }

    pub fn apply_to(&self, profile: &mut UserProfile, now: DateTime<Utc>) {
        if let Some(locations) = &self.preferred_locations {
            profile.preferred_locations = locations.clone();
        }
        if let Some(min) = self.expected_salary_min {
            profile.expected_salary_min = Some(min);
        }
        if let Some(max) = self.expected_salary_max {
            profile.expected_salary_max = Some(max);
        }
        if let Some(years) = self.experience_years {
            profile.experience_years = Some(years);
        }
        if let Some(role) = &self.current_role {
            profile.current_role = Some(role.clone());
        }
        if let Some(skills) = &self.primary_skills {
            profile.primary_skills = skills.clone();
        }
        profile.updated_at = now;
    }
}

/// Seeds primary skills from keywords in the job title. Checked in order; first match wins.
pub fn skills_for_title(title: &str) -> Option<Vec<String>> {
    let title = title.to_lowercase();
    let skills: &[&str] = if title.contains("python") {
        &["Python", "JavaScript", "React"]
    } else if title.contains("react") || title.contains("frontend") {
        &["React", "JavaScript", "TypeScript"]
    } else if title.contains("backend") {
        &["Python", "Java", "Node.js"]
    } else {
        return None;
    };
    Some(skills.iter().map(|skill| skill.to_string()).collect())
}

/// Body returned by `POST /config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdateResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub profiles: Vec<UserProfile>,
    pub updated_count: u64,
}

/// Body returned by `GET /config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub preferred_locations: Vec<String>,
    pub min_salary: f64,
    pub max_salary: f64,
    pub email_recipients: Vec<String>,
    pub profiles: Vec<UserProfile>,
}

/// Body returned by `GET /profiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileList {
    pub profiles: Vec<UserProfile>,
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "Job Crawler API is running".to_string(),
        }
    }
}
