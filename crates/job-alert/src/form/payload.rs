use serde::{Deserialize, Deserializer, Serialize};

use super::outcome::SubmitError;
use super::state::{FormState, SalaryRangeInput};
use super::validation::{non_blank, receiver_emails};

/// Upper salary bound sent when the user left the maximum blank.
pub const OPEN_SALARY_MAX: f64 = 999_999.0;

/// Body of `POST /config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPayload {
    pub receiver_emails: Vec<String>,
    pub locations: Vec<String>,
    pub salary_ranges: Vec<SalaryRange>,
    pub experience_min: Option<f64>,
    pub experience_max: Option<f64>,
    pub job_title: String,
}

/// A salary range with both bounds made explicit, in LPA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryRange {
    #[serde(deserialize_with = "null_as_zero")]
    pub min: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub max: f64,
}

/// A `null` bound reads the same as an omitted one.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl SalaryRange {
    /// `None` for a row with neither bound filled in.
    pub fn from_input(input: &SalaryRangeInput) -> Option<Self> {
        if input.is_blank() {
            return None;
        }
        Some(Self {
            min: input.min.unwrap_or(0.0),
            max: input.max.unwrap_or(OPEN_SALARY_MAX),
        })
    }
}

impl FormState {
    /// Validates the receiver list and converts the sparse form input into the explicit
    /// representation the configuration service expects.
    pub fn prepare(&self) -> Result<ConfigPayload, SubmitError> {
        let receiver_emails = receiver_emails(&self.emails)?;

        Ok(ConfigPayload {
            receiver_emails,
            locations: non_blank(&self.locations),
            salary_ranges: self
                .salary_ranges
                .iter()
                .filter_map(SalaryRange::from_input)
                .collect(),
            experience_min: self.experience.min,
            experience_max: self.experience.max,
            job_title: self.job_title.trim().to_string(),
        })
    }
}
