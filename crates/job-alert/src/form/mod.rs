//! Job-alert configuration form: editable rows, validation, payload normalization, and the
//! controller that submits to the configuration service.

pub mod controller;
pub mod outcome;
pub mod payload;
pub mod state;
pub mod validation;
pub mod view;

#[cfg(test)]
mod tests;

pub use controller::{FormController, Observer};
pub use outcome::{Outcome, OutcomeKind, OutcomeView, SubmitError};
pub use payload::{ConfigPayload, SalaryRange, OPEN_SALARY_MAX};
pub use state::{ExperienceBounds, FormEvent, FormState, RowList, SalaryRangeInput};
pub use validation::{is_valid_email, receiver_emails};
pub use view::{FormView, SalaryRow, SubmitControl, TextRow};
