use std::fmt;

use serde::Serialize;

use super::outcome::{Outcome, OutcomeKind, OutcomeView};
use super::state::{ExperienceBounds, FormState};

const SUBMIT_LABEL: &str = "Save Configuration";
const BUSY_LABEL: &str = "Saving...";

/// Snapshot of everything a front end needs to draw the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub emails: Vec<TextRow>,
    pub locations: Vec<TextRow>,
    pub salary_ranges: Vec<SalaryRow>,
    pub experience: ExperienceBounds,
    pub job_title: String,
    pub submit: SubmitControl,
    pub outcome: Option<OutcomeView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRow {
    pub value: String,
    pub required: bool,
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRow {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl FormView {
    pub fn build(state: &FormState, busy: bool, outcome: Option<&Outcome>) -> Self {
        Self {
            emails: text_rows(&state.emails, true),
            locations: text_rows(&state.locations, false),
            salary_ranges: state
                .salary_ranges
                .iter()
                .map(|range| SalaryRow {
                    min: range.min,
                    max: range.max,
                    removable: state.salary_ranges.len() > 1,
                })
                .collect(),
            experience: state.experience,
            job_title: state.job_title.clone(),
            submit: SubmitControl {
                enabled: !busy,
                label: if busy { BUSY_LABEL } else { SUBMIT_LABEL },
            },
            outcome: outcome.map(Outcome::view),
        }
    }
}

fn text_rows(rows: &[String], first_required: bool) -> Vec<TextRow> {
    rows.iter()
        .enumerate()
        .map(|(index, value)| TextRow {
            value: value.clone(),
            required: first_required && index == 0,
            removable: rows.len() > 1,
        })
        .collect()
}

fn bound(value: Option<f64>) -> String {
    value.map_or_else(|| "any".to_string(), |value| value.to_string())
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Receiver emails:")?;
        write_text_rows(f, &self.emails)?;
        writeln!(f, "Preferred locations:")?;
        write_text_rows(f, &self.locations)?;
        writeln!(f, "Salary ranges (LPA):")?;
        for (index, row) in self.salary_ranges.iter().enumerate() {
            if row.min.is_none() && row.max.is_none() {
                writeln!(f, "  [{}]  (blank)", index + 1)?;
            } else {
                writeln!(
                    f,
                    "  [{}]  {} - {}",
                    index + 1,
                    bound(row.min),
                    bound(row.max)
                )?;
            }
        }
        writeln!(
            f,
            "Experience (years): {} - {}",
            bound(self.experience.min),
            bound(self.experience.max)
        )?;
        if self.job_title.is_empty() {
            writeln!(f, "Job title: (any)")?;
        } else {
            writeln!(f, "Job title: {}", self.job_title)?;
        }

        if self.submit.enabled {
            write!(f, "[ {} ]", self.submit.label)?;
        } else {
            write!(f, "[ {} ] (disabled)", self.submit.label)?;
        }

        if let Some(outcome) = &self.outcome {
            let marker = match outcome.kind {
                OutcomeKind::Success => "ok",
                OutcomeKind::Error => "error",
            };
            write!(f, "\n{marker}: {}", outcome.message)?;
        }
        Ok(())
    }
}

fn write_text_rows(f: &mut fmt::Formatter<'_>, rows: &[TextRow]) -> fmt::Result {
    for (index, row) in rows.iter().enumerate() {
        let marker = if row.required { '*' } else { ' ' };
        if row.value.trim().is_empty() {
            writeln!(f, "  [{}]{marker} (blank)", index + 1)?;
        } else {
            writeln!(f, "  [{}]{marker} {}", index + 1, row.value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::outcome::SubmitError;
    use crate::form::state::{FormEvent, SalaryRangeInput};

    fn filled_state() -> FormState {
        FormState::default()
            .reduce(FormEvent::UpdateEmail {
                index: 0,
                value: "a@b.com".into(),
            })
            .reduce(FormEvent::AddEmail)
            .reduce(FormEvent::UpdateSalaryRange {
                index: 0,
                range: SalaryRangeInput::new(Some(7.5), None),
            })
    }

    #[test]
    fn only_the_first_email_row_is_required() {
        let view = FormView::build(&filled_state(), false, None);

        let required: Vec<bool> = view.emails.iter().map(|row| row.required).collect();
        assert_eq!(required, vec![true, false]);
        assert!(view.locations.iter().all(|row| !row.required));
    }

    #[test]
    fn single_rows_are_not_removable() {
        let view = FormView::build(&filled_state(), false, None);

        assert!(view.emails.iter().all(|row| row.removable));
        assert!(!view.locations[0].removable);
        assert!(!view.salary_ranges[0].removable);
    }

    #[test]
    fn busy_form_disables_submit() {
        let view = FormView::build(&FormState::default(), true, None);
        assert!(!view.submit.enabled);
        assert_eq!(view.submit.label, BUSY_LABEL);

        let idle = FormView::build(&FormState::default(), false, None);
        assert!(idle.submit.enabled);
        assert_eq!(idle.submit.label, SUBMIT_LABEL);
    }

    #[test]
    fn renders_rows_and_outcome_as_text() {
        let outcome = Outcome::Error(SubmitError::Rejected("duplicate email".into()));
        let rendered = FormView::build(&filled_state(), false, Some(&outcome)).to_string();

        assert!(rendered.contains("  [1]* a@b.com"));
        assert!(rendered.contains("  [2]  (blank)"));
        assert!(rendered.contains("  [1]  7.5 - any"));
        assert!(rendered.contains("Experience (years): any - any"));
        assert!(rendered.ends_with("error: duplicate email"));
    }
}
