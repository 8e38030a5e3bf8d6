use serde::Deserialize;
use serde_json::Value;

/// Body of a signup/unregister reply. Success carries `message`, failure carries `detail`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceReplyBody {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ServiceReplyBody {
    pub fn message_text(&self) -> Option<&str> {
        non_empty_text(self.message.as_ref())
    }

    pub fn detail_text(&self) -> Option<&str> {
        non_empty_text(self.detail.as_ref())
    }
}

// Validation errors come back as structured `detail` arrays; only plain text is shown.
fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
