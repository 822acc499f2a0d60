//! The newsletter subscription form.
//!
//! `SubscriptionForm` owns the raw field values, the derived validation flags and the
//! state of the current subscription attempt. Rendering layers only ever read [`FormView`].

use serde::Serialize;
use tracing::{info, warn};

use super::client::{NewsletterApi, SubmitOutcome, SubscribeRequest};
use super::email::{is_valid_email, ValidEmail};
use crate::analytics::GoalTracker;

/// Shown after the newsletter API acknowledged the subscription.
pub const SUCCESS_MESSAGE: &str = "Check your inbox to confirm your subscription!";
pub const SUBMIT_LABEL: &str = "Subscribe";
pub const SUBMIT_BUSY_LABEL: &str = "Subscribing...";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// The message to display, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionState::Succeeded(msg) | SubmissionState::Failed(msg) => Some(msg),
            SubmissionState::Idle | SubmissionState::Submitting => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SubscriptionForm {
    input: FormInput,
    email_is_valid: bool,
    email_is_dirty: bool,
    state: SubmissionState,
    goal_id: String,
}

impl SubscriptionForm {
    /// `goal_id` is the conversion goal reported after a successful subscription.
    pub fn new(goal_id: impl Into<String>) -> Self {
        Self {
            goal_id: goal_id.into(),
            ..Default::default()
        }
    }

    pub fn update_name(&mut self, value: impl Into<String>) {
        self.input.name = value.into();
    }

    pub fn update_email(&mut self, value: impl Into<String>) {
        self.input.email = value.into();
        self.email_is_dirty = true;
        self.email_is_valid = is_valid_email(&self.input.email);
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn email_is_valid(&self) -> bool {
        self.email_is_valid
    }

    pub fn email_is_dirty(&self) -> bool {
        self.email_is_dirty
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.email_is_valid && !self.state.is_submitting()
    }

    /// Starts an attempt and hands out the payload to send.
    ///
    /// Returns `None` without touching the state when the email is invalid
    /// or an attempt is already in flight.
    pub fn begin_submit(&mut self) -> Option<SubscribeRequest> {
        if !self.can_submit() {
            return None;
        }
        let email = ValidEmail::parse(&self.input.email).ok()?;

        self.state = SubmissionState::Submitting;
        Some(SubscribeRequest {
            name: self.input.name.clone(),
            email,
        })
    }

    /// Ends the in-flight attempt. Outcomes arriving with no attempt in flight are dropped.
    pub fn resolve<T>(&mut self, outcome: SubmitOutcome, tracker: &T)
    where
        T: GoalTracker + ?Sized,
    {
        if !self.state.is_submitting() {
            warn!(?outcome, "dropping an outcome with no submission in flight");
            return;
        }

        self.state = match outcome {
            SubmitOutcome::Acknowledged => {
                info!("newsletter subscription acknowledged");
                tracker.track_goal(&self.goal_id);
                SubmissionState::Succeeded(SUCCESS_MESSAGE.to_string())
            }
            SubmitOutcome::Rejected { message } => SubmissionState::Failed(message),
            SubmitOutcome::Transport { detail } => SubmissionState::Failed(detail),
        };
    }

    /// Runs one full subscription attempt. A guarded no-op when submitting isn't allowed.
    pub async fn submit<A, T>(&mut self, api: &A, tracker: &T) -> &SubmissionState
    where
        A: NewsletterApi,
        T: GoalTracker + ?Sized,
    {
        if let Some(request) = self.begin_submit() {
            let outcome = api.subscribe(&request).await;
            self.resolve(outcome, tracker);
        }
        &self.state
    }

    pub fn view(&self) -> FormView<'_> {
        let busy = self.state.is_submitting();
        let message = match &self.state {
            SubmissionState::Succeeded(text) => Some(MessageView {
                kind: MessageKind::Success,
                text,
            }),
            SubmissionState::Failed(text) => Some(MessageView {
                kind: MessageKind::Error,
                text,
            }),
            SubmissionState::Idle | SubmissionState::Submitting => None,
        };

        FormView {
            name: &self.input.name,
            email: &self.input.email,
            email_invalid: self.email_is_dirty && !self.email_is_valid,
            submit_enabled: self.can_submit(),
            busy,
            submit_label: if busy { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL },
            busy_label: SUBMIT_BUSY_LABEL,
            succeeded: matches!(self.state, SubmissionState::Succeeded(_)),
            message,
        }
    }
}

/// Everything a template needs to draw the form.
#[derive(Debug, Serialize)]
pub struct FormView<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub email_invalid: bool,
    pub submit_enabled: bool,
    pub busy: bool,
    pub submit_label: &'static str,
    /// Label the browser switches to while the post is in flight.
    pub busy_label: &'static str,
    pub succeeded: bool,
    pub message: Option<MessageView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct MessageView<'a> {
    pub kind: MessageKind,
    pub text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}
