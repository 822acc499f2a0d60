//! Newsletter signup: the email check, the form state machine and the API client.

pub mod client;
pub mod email;
pub mod form;

pub use client::{NewsletterApi, NewsletterClient, SubmitOutcome, SubscribeRequest};
pub use email::{is_valid_email, ValidEmail};
pub use form::{FormView, SubmissionState, SubscriptionForm};
