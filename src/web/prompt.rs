use crate::board::controls::{ClickTarget, ACTIVITY_KEY, EMAIL_KEY};
use crate::board::Confirm;

/// A removal the visitor still has to answer, with the control data the dialog re-posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub question: String,
    pub role: String,
    pub activity: String,
    pub email: String,
}

impl PendingConfirmation {
    pub fn new(question: String, target: &ClickTarget) -> Self {
        Self {
            question,
            role: target.role.clone().unwrap_or_default(),
            activity: target.data(ACTIVITY_KEY).unwrap_or_default().to_string(),
            email: target.data(EMAIL_KEY).unwrap_or_default().to_string(),
        }
    }
}

/// Confirmation prompt backed by form posts.
///
/// A click arrives with the visitor's answer already attached (`confirmed=yes|no`) or without
/// one. Without an answer the prompt declines and remembers the question so the page can ask it.
#[derive(Debug, Default)]
pub struct FormPrompt {
    answer: Option<bool>,
    asked: Option<String>,
}

impl FormPrompt {
    pub fn answering(answer: Option<bool>) -> Self {
        Self {
            answer,
            asked: None,
        }
    }

    pub fn take_asked(&mut self) -> Option<String> {
        self.asked.take()
    }
}

impl Confirm for FormPrompt {
    fn confirm(&mut self, question: &str) -> bool {
        match self.answer.take() {
            Some(answer) => answer,
            None => {
                self.asked = Some(question.to_string());
                false
            }
        }
    }
}
