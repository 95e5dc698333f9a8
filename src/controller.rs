//! Client-side owner of the contact form: field values, the submission
//! lifecycle and the timed close after a successful send.

mod dispatch_client;
mod submission_state;

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use tokio::task::JoinHandle;

pub use dispatch_client::{DispatchClient, DispatchError, DispatchReceipt};
pub use submission_state::SubmissionState;

use crate::domain::{FormField, SubmissionForm};

/// How long the success confirmation stays up before the form closes.
pub const CLOSE_DELAY: Duration = Duration::from_millis(2000);

/// The only failure text shown to the visitor, whatever went wrong.
pub const GENERIC_ERROR_MESSAGE: &str = "Failed to send your message. Please try again.";

/// What a call to [`ContactController::submit`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submit was disabled or the form was closed, no request was sent.
    Ignored,
    Succeeded,
    Failed,
    /// The form was cancelled or reopened while the request was in flight;
    /// its result was dropped.
    Superseded,
}

#[derive(Default)]
struct ControllerState {
    form: SubmissionForm,
    submission: SubmissionState,
    open: bool,
    // bumped on every reset so late results and timers can tell they are stale
    generation: u64,
    close_task: Option<JoinHandle<()>>,
}

impl ControllerState {
    fn reset(&mut self, open: bool) {
        if let Some(task) = self.close_task.take() {
            task.abort();
        }
        self.generation += 1;
        self.form.clear();
        self.submission = SubmissionState::Idle;
        self.open = open;
    }
}

pub struct ContactController {
    state: Arc<Mutex<ControllerState>>,
    client: DispatchClient,
    close_delay: Duration,
}

impl ContactController {
    pub fn new(client: DispatchClient) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState::default())),
            client,
            close_delay: CLOSE_DELAY,
        }
    }

    pub fn with_close_delay(mut self, close_delay: Duration) -> Self {
        self.close_delay = close_delay;
        self
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        lock(&self.state)
    }

    /// Shows the form with empty fields. Does nothing if it is already open.
    pub fn open(&self) {
        let mut state = self.lock();
        if !state.open {
            state.reset(true);
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().submission
    }

    pub fn form(&self) -> SubmissionForm {
        self.lock().form.clone()
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        let state = self.lock();
        state.open && state.submission.can_submit()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        (self.state() == SubmissionState::Error).then_some(GENERIC_ERROR_MESSAGE)
    }

    pub fn update_field(&self, field: FormField, value: impl Into<String>) {
        self.lock().form.update_field(field, value);
    }

    /// `mailto:` link for the current fields, offered when sending fails.
    pub fn fallback_mailto(&self, recipient: &str) -> String {
        self.lock().form.mailto_link(recipient)
    }

    /// Closes the form and resets it to `Idle` from any state.
    /// A request already sent is not aborted; its result is ignored.
    pub fn cancel(&self) {
        let mut state = self.lock();
        if state.submission == SubmissionState::Submitting {
            tracing::info!("contact form cancelled with a request in flight.");
        }
        state.reset(false);
    }

    /// Sends the current fields to the dispatch endpoint.
    ///
    /// Only one request is ever in flight: calling this while `Submitting`,
    /// while the success confirmation is showing, or while the form is
    /// closed returns [`SubmitOutcome::Ignored`] without touching the network.
    pub async fn submit(&self) -> SubmitOutcome {
        let (form, generation) = {
            let mut state = self.lock();
            if !state.open || !state.submission.can_submit() {
                tracing::debug!(
                    open = state.open,
                    state = state.submission.as_str(),
                    "submit ignored."
                );
                return SubmitOutcome::Ignored;
            }
            state.submission = SubmissionState::Submitting;
            (state.form.clone(), state.generation)
        };

        let result = self.client.dispatch(&form).await;

        let mut state = self.lock();
        if state.generation != generation {
            tracing::info!(ok = result.is_ok(), "dropped result of a cancelled submission.");
            return SubmitOutcome::Superseded;
        }

        match result {
            Ok(_) => {
                state.submission = SubmissionState::Success;
                state.form.clear();
                state.close_task = Some(self.schedule_close(generation));
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "contact form submission failed."
                );
                state.submission = SubmissionState::Error;
                SubmitOutcome::Failed
            }
        }
    }

    fn schedule_close(&self, generation: u64) -> JoinHandle<()> {
        let state: Weak<Mutex<ControllerState>> = Arc::downgrade(&self.state);
        let close_delay = self.close_delay;

        tokio::spawn(async move {
            tokio::time::sleep(close_delay).await;
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut state = lock(&state);
            if state.generation == generation && state.submission == SubmissionState::Success {
                state.close_task = None;
                state.reset(false);
            }
        })
    }
}

impl Drop for ContactController {
    fn drop(&mut self) {
        if let Some(task) = self.lock().close_task.take() {
            task.abort();
        }
    }
}

fn lock(state: &Mutex<ControllerState>) -> MutexGuard<'_, ControllerState> {
    // every critical section leaves the state consistent, so a poisoned lock is still usable
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
