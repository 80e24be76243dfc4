// core/src/feedback.rs

//! Toast-equivalent outcome reporting for collection mutations.
//!
//! The sink is stateless and fire-and-forget: at most one message is
//! conceptually "current" from the UI's perspective, but no queuing
//! semantics are required of implementations.

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Neutral,
  Destructive,
}

/// A short-lived title/description pair surfaced after each mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
  pub severity: Severity,
  pub title: String,
  pub description: String,
}

impl Feedback {
  pub fn neutral(title: impl Into<String>, description: impl Into<String>) -> Self {
    Feedback {
      severity: Severity::Neutral,
      title: title.into(),
      description: description.into(),
    }
  }

  pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
    Feedback {
      severity: Severity::Destructive,
      title: title.into(),
      description: description.into(),
    }
  }
}

/// Presentation seam for mutation outcomes. Implementations must not block.
pub trait FeedbackSink: Send + Sync {
  fn notify(&self, feedback: Feedback);
}

/// Default sink: renders feedback into the tracing stream.
#[derive(Debug, Default)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
  fn notify(&self, feedback: Feedback) {
    match feedback.severity {
      Severity::Neutral => {
        info!(title = %feedback.title, description = %feedback.description, "feedback");
      }
      Severity::Destructive => {
        warn!(title = %feedback.title, description = %feedback.description, "feedback");
      }
    }
  }
}
