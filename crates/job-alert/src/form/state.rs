use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Ordered list backing a repeatable form field. Always holds at least one row so the
/// user has somewhere to type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RowList<T> {
    rows: Vec<T>,
}

impl<T: Default> RowList<T> {
    pub fn new() -> Self {
        Self {
            rows: vec![T::default()],
        }
    }

    /// Appends one blank row.
    pub fn add(&mut self) {
        self.rows.push(T::default());
    }

    /// Removes the row at `index`. Returns `false` without touching the list when it holds a
    /// single row or the index is out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    /// Replaces the row at `index` in place.
    pub fn update(&mut self, index: usize, value: T) -> bool {
        match self.rows.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl<T: Default> Default for RowList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for RowList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.rows
    }
}

/// One editable salary row. Either bound may be left blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryRangeInput {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SalaryRangeInput {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_blank(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Years of experience; `None` on either side means unbounded. Fractions such as 1.5 are allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Everything the user has typed into the form so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    pub emails: RowList<String>,
    pub locations: RowList<String>,
    pub salary_ranges: RowList<SalaryRangeInput>,
    pub experience: ExperienceBounds,
    pub job_title: String,
}

/// Discrete user input applied to a [`FormState`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    AddEmail,
    RemoveEmail(usize),
    UpdateEmail { index: usize, value: String },
    AddLocation,
    RemoveLocation(usize),
    UpdateLocation { index: usize, value: String },
    AddSalaryRange,
    RemoveSalaryRange(usize),
    UpdateSalaryRange { index: usize, range: SalaryRangeInput },
    SetExperience(ExperienceBounds),
    SetJobTitle(String),
    Reset,
}

impl FormState {
    /// Pure event handler: consumes the current state and returns the next one.
    pub fn reduce(mut self, event: FormEvent) -> Self {
        self.apply(event);
        self
    }

    /// Applies `event` in place. Returns `false` when the event was a no-op, such as removing
    /// the last remaining row or addressing a row that does not exist.
    pub fn apply(&mut self, event: FormEvent) -> bool {
        match event {
            FormEvent::AddEmail => {
                self.emails.add();
                true
            }
            FormEvent::RemoveEmail(index) => self.emails.remove(index),
            FormEvent::UpdateEmail { index, value } => self.emails.update(index, value),
            FormEvent::AddLocation => {
                self.locations.add();
                true
            }
            FormEvent::RemoveLocation(index) => self.locations.remove(index),
            FormEvent::UpdateLocation { index, value } => self.locations.update(index, value),
            FormEvent::AddSalaryRange => {
                self.salary_ranges.add();
                true
            }
            FormEvent::RemoveSalaryRange(index) => self.salary_ranges.remove(index),
            FormEvent::UpdateSalaryRange { index, range } => {
                self.salary_ranges.update(index, range)
            }
            FormEvent::SetExperience(bounds) => {
                self.experience = bounds;
                true
            }
            FormEvent::SetJobTitle(title) => {
                self.job_title = title;
                true
            }
            FormEvent::Reset => {
                *self = Self::default();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_blank_row_per_list() {
        let state = FormState::default();
        assert_eq!(state.emails.len(), 1);
        assert_eq!(state.emails[0], "");
        assert_eq!(state.locations.len(), 1);
        assert_eq!(state.salary_ranges.len(), 1);
        assert!(state.salary_ranges[0].is_blank());
        assert_eq!(state.experience, ExperienceBounds::default());
        assert!(state.job_title.is_empty());
    }

    #[test]
    fn remove_on_single_row_is_a_noop() {
        let mut state = FormState::default()
            .reduce(FormEvent::UpdateEmail {
                index: 0,
                value: "only@example.com".into(),
            })
            .reduce(FormEvent::UpdateLocation {
                index: 0,
                value: "Pune".into(),
            })
            .reduce(FormEvent::UpdateSalaryRange {
                index: 0,
                range: SalaryRangeInput::new(Some(4.0), None),
            });
        let before = state.clone();

        assert!(!state.apply(FormEvent::RemoveEmail(0)));
        assert!(!state.apply(FormEvent::RemoveLocation(0)));
        assert!(!state.apply(FormEvent::RemoveSalaryRange(0)));
        assert_eq!(state, before);
    }

    #[test]
    fn add_then_remove_last_restores_previous_lists() {
        let original = FormState::default()
            .reduce(FormEvent::UpdateEmail {
                index: 0,
                value: "a@b.com".into(),
            })
            .reduce(FormEvent::AddLocation)
            .reduce(FormEvent::UpdateLocation {
                index: 1,
                value: "Remote".into(),
            });

        let emails = original
            .clone()
            .reduce(FormEvent::AddEmail)
            .reduce(FormEvent::RemoveEmail(1));
        assert_eq!(emails, original);

        let locations = original
            .clone()
            .reduce(FormEvent::AddLocation)
            .reduce(FormEvent::RemoveLocation(2));
        assert_eq!(locations, original);

        let salaries = original
            .clone()
            .reduce(FormEvent::AddSalaryRange)
            .reduce(FormEvent::RemoveSalaryRange(1));
        assert_eq!(salaries, original);
    }

    #[test]
    fn update_replaces_only_the_addressed_row() {
        let state = FormState::default()
            .reduce(FormEvent::AddEmail)
            .reduce(FormEvent::AddEmail)
            .reduce(FormEvent::UpdateEmail {
                index: 0,
                value: "first@x.io".into(),
            })
            .reduce(FormEvent::UpdateEmail {
                index: 2,
                value: "third@x.io".into(),
            })
            .reduce(FormEvent::UpdateEmail {
                index: 1,
                value: "second@x.io".into(),
            });

        assert_eq!(&*state.emails, &["first@x.io", "second@x.io", "third@x.io"]);
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut state = FormState::default().reduce(FormEvent::AddSalaryRange);
        let before = state.clone();

        assert!(!state.apply(FormEvent::UpdateEmail {
            index: 3,
            value: "x@y.z".into(),
        }));
        assert!(!state.apply(FormEvent::RemoveSalaryRange(7)));
        assert_eq!(state, before);
    }

    #[test]
    fn removing_middle_row_keeps_order() {
        let state = FormState::default()
            .reduce(FormEvent::UpdateLocation {
                index: 0,
                value: "Delhi".into(),
            })
            .reduce(FormEvent::AddLocation)
            .reduce(FormEvent::UpdateLocation {
                index: 1,
                value: "Mumbai".into(),
            })
            .reduce(FormEvent::AddLocation)
            .reduce(FormEvent::UpdateLocation {
                index: 2,
                value: "Chennai".into(),
            })
            .reduce(FormEvent::RemoveLocation(1));

        assert_eq!(&*state.locations, &["Delhi", "Chennai"]);
    }

    #[test]
    fn reset_returns_to_initial_blank_state() {
        let state = FormState::default()
            .reduce(FormEvent::AddEmail)
            .reduce(FormEvent::SetJobTitle("Rust engineer".into()))
            .reduce(FormEvent::SetExperience(ExperienceBounds {
                min: Some(2.0),
                max: Some(6.5),
            }))
            .reduce(FormEvent::Reset);

        assert_eq!(state, FormState::default());
    }
}
