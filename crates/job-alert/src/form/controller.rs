use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::outcome::{Outcome, SubmitError};
use super::state::{FormEvent, FormState};
use super::view::FormView;
use crate::client::{ClientError, ConfigClient};
use crate::config::FormConfig;

/// Redraw hook invoked with a fresh view after every change.
pub type Observer = Arc<dyn Fn(&FormView) + Send + Sync>;

/// Owns the editable form, runs submissions against a [`ConfigClient`], and reverts the form
/// to blank rows a fixed delay after a successful save.
pub struct FormController<C> {
    client: Arc<C>,
    model: Arc<Mutex<FormModel>>,
    observer: Option<Observer>,
    reset_delay: Duration,
}

impl<C> Clone for FormController<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            model: Arc::clone(&self.model),
            observer: self.observer.clone(),
            reset_delay: self.reset_delay,
        }
    }
}

#[derive(Default)]
struct FormModel {
    state: FormState,
    busy: bool,
    outcome: Option<Outcome>,
    /// Sequence number of the latest submission attempt.
    submission: u64,
    pending_reset: Option<PendingReset>,
}

impl FormModel {
    fn view(&self) -> FormView {
        FormView::build(&self.state, self.busy, self.outcome.as_ref())
    }
}

struct PendingReset {
    submission: u64,
    handle: JoinHandle<()>,
}

fn lock(model: &Mutex<FormModel>) -> MutexGuard<'_, FormModel> {
    model.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the busy flag however the submission ends, including when the submitting future is
/// dropped mid-request.
struct BusyGuard<'a> {
    model: &'a Mutex<FormModel>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        lock(self.model).busy = false;
    }
}

impl<C> FormController<C>
where
    C: ConfigClient + 'static,
{
    pub fn new(client: C) -> Self {
        Self::with_config(client, &FormConfig::default())
    }

    pub fn with_config(client: C, config: &FormConfig) -> Self {
        Self {
            client: Arc::new(client),
            model: Arc::new(Mutex::new(FormModel::default())),
            observer: None,
            reset_delay: config.reset_delay,
        }
    }

    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&FormView) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn state(&self) -> FormState {
        lock(&self.model).state.clone()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        lock(&self.model).outcome.clone()
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.model).busy
    }

    pub fn view(&self) -> FormView {
        lock(&self.model).view()
    }

    /// Applies one edit. Edits are accepted while a submission is in flight; they do not
    /// affect the payload already sent.
    pub fn dispatch(&self, event: FormEvent) -> bool {
        let (changed, view) = {
            let mut model = lock(&self.model);
            let changed = model.state.apply(event);
            (changed, model.view())
        };
        if changed {
            self.notify(&view);
        }
        changed
    }

    /// Runs one submission. Returns `None` without doing anything when another submission is
    /// still in flight, which is the only state in which the submit control is disabled.
    pub async fn submit(&self) -> Option<Outcome> {
        let (submission, prepared, view) = {
            let mut model = lock(&self.model);
            if model.busy {
                debug!("submission ignored, previous request still in flight");
                return None;
            }
            model.busy = true;
            model.outcome = None;
            model.submission += 1;
            if let Some(pending) = model.pending_reset.take() {
                debug!(
                    superseded = pending.submission,
                    "cancelling pending form reset"
                );
                pending.handle.abort();
            }
            (model.submission, model.state.prepare(), model.view())
        };
        let guard = BusyGuard { model: &self.model };
        self.notify(&view);

        let outcome = match prepared {
            Err(err) => {
                warn!(submission, error = %err, "form validation failed");
                Outcome::Error(err)
            }
            Ok(payload) => {
                info!(
                    submission,
                    receivers = payload.receiver_emails.len(),
                    locations = payload.locations.len(),
                    salary_ranges = payload.salary_ranges.len(),
                    "submitting configuration"
                );
                match self.client.submit_config(&payload).await {
                    Ok(response) => {
                        info!(
                            submission,
                            updated_count = response.updated_count,
                            "configuration saved"
                        );
                        Outcome::Success {
                            updated_count: response.updated_count,
                        }
                    }
                    Err(ClientError::Rejected { status, message }) => {
                        warn!(submission, status, %message, "configuration rejected");
                        Outcome::Error(SubmitError::Rejected(message))
                    }
                    Err(err) => {
                        warn!(submission, error = %err, "configuration request failed");
                        Outcome::Error(SubmitError::Transport(err.to_string()))
                    }
                }
            }
        };

        let view = {
            let mut model = lock(&self.model);
            model.busy = false;
            model.outcome = Some(outcome.clone());
            if outcome.is_success() {
                let handle = self.schedule_reset(submission);
                model.pending_reset = Some(PendingReset { submission, handle });
            }
            model.view()
        };
        drop(guard);
        self.notify(&view);

        Some(outcome)
    }

    fn schedule_reset(&self, submission: u64) -> JoinHandle<()> {
        let model = Arc::clone(&self.model);
        let observer = self.observer.clone();
        let delay = self.reset_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let view = {
                let mut model = lock(&model);
                if model.submission != submission {
                    return;
                }
                model.state = FormState::default();
                model.outcome = None;
                model.pending_reset = None;
                model.view()
            };
            debug!(submission, "form reset after successful save");
            if let Some(observer) = observer {
                observer(&view);
            }
        })
    }

    fn notify(&self, view: &FormView) {
        if let Some(observer) = &self.observer {
            observer(view);
        }
    }
}
