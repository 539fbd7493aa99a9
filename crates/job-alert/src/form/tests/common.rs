use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::client::{ClientError, ConfigClient};
use crate::form::{ConfigPayload, FormController, FormEvent, FormView};
use crate::profiles::ConfigUpdateResponse;

/// Replays queued responses and records every payload it was sent. When gated, each call
/// waits for a permit before answering.
#[derive(Default)]
pub(super) struct ScriptedClient {
    responses: Mutex<VecDeque<Result<ConfigUpdateResponse, ClientError>>>,
    calls: Mutex<Vec<ConfigPayload>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedClient {
    pub(super) fn replying(
        responses: impl IntoIterator<Item = Result<ConfigUpdateResponse, ClientError>>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            ..Self::default()
        }
    }

    pub(super) fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(super) fn calls(&self) -> Vec<ConfigPayload> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl ConfigClient for ScriptedClient {
    async fn submit_config(
        &self,
        payload: &ConfigPayload,
    ) -> Result<ConfigUpdateResponse, ClientError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(payload.clone());
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate open").forget();
        }
        self.responses
            .lock()
            .expect("responses mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted response".to_string())))
    }
}

pub(super) fn updated(count: u64) -> Result<ConfigUpdateResponse, ClientError> {
    Ok(ConfigUpdateResponse {
        message: "Configuration updated successfully".to_string(),
        profiles: Vec::new(),
        updated_count: count,
    })
}

pub(super) fn rejected(message: &str) -> Result<ConfigUpdateResponse, ClientError> {
    Err(ClientError::Rejected {
        status: 400,
        message: message.to_string(),
    })
}

/// Records the submit-enabled flag of every view the observer receives.
#[derive(Default, Clone)]
pub(super) struct ViewLog {
    views: Arc<Mutex<Vec<FormView>>>,
}

impl ViewLog {
    pub(super) fn observer(&self) -> impl Fn(&FormView) + Send + Sync + 'static {
        let views = Arc::clone(&self.views);
        move |view: &FormView| views.lock().expect("views mutex poisoned").push(view.clone())
    }

    pub(super) fn views(&self) -> Vec<FormView> {
        self.views.lock().expect("views mutex poisoned").clone()
    }
}

pub(super) fn fill_valid_form<C: ConfigClient + 'static>(controller: &FormController<C>) {
    controller.dispatch(FormEvent::UpdateEmail {
        index: 0,
        value: "dev@jobs.io".to_string(),
    });
    controller.dispatch(FormEvent::UpdateLocation {
        index: 0,
        value: "Remote".to_string(),
    });
    controller.dispatch(FormEvent::SetJobTitle("Rust Engineer".to_string()));
}
