use tracing::{error, info};

use crate::traits::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn color(self) -> &'static str {
        match self {
            Severity::Success => "green",
            Severity::Error => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn submit_failed() -> Self {
        Self::new(
            Severity::Error,
            "Error submitting",
            "An error occurred while submitting. Please try again later.",
        )
    }

    pub fn empty_comment() -> Self {
        Self::new(
            Severity::Error,
            "Empty content",
            "Please write a comment before submitting.",
        )
    }

    pub fn comment_posted() -> Self {
        Self::new(
            Severity::Success,
            "Success submitting",
            "Thank you for your feedback",
        )
    }

    pub fn comment_deleted() -> Self {
        Self::new(
            Severity::Success,
            "Successfully deleted",
            "You can write a new comment",
        )
    }
}

/// Writes notifications to the log instead of a toast.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show(&self, n: Notification) {
        match n.severity {
            Severity::Success => info!(color = n.severity.color(), "{}: {}", n.title, n.message),
            Severity::Error => error!(color = n.severity.color(), "{}: {}", n.title, n.message),
        }
    }
}
