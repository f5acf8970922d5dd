//! Contact form submission. Nothing is delivered: the message is logged and the form reports success.
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::session::Labels;

/// How long the submit button shows the confirmation before going back to normal.
pub const RESET_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// What the form should display once submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub button_label: String,
    pub reset_after: Duration,
}

impl SubmissionReceipt {
    pub fn new(labels: &Labels) -> Self {
        Self {
            button_label: labels.message_sent.clone(),
            reset_after: RESET_DELAY,
        }
    }
}

pub fn simulate_submission(message: &ContactMessage, labels: &Labels) -> SubmissionReceipt {
    info!(
        target: "contact",
        name = message.name.as_str(),
        email = message.email.as_str(),
        subject = message.subject.as_str();
        "form submitted ({} characters), not delivered",
        message.message.chars().count()
    );

    SubmissionReceipt::new(labels)
}
