use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

/// The one transient status area of the page.
///
/// Showing a message replaces the previous one together with its hide deadline, so an older
/// deadline can never hide a newer message.
#[derive(Debug, Default)]
pub struct MessageSlot {
    current: Option<Message>,
    hide_at: Option<Instant>,
}

impl MessageSlot {
    pub fn show(&mut self, text: impl Into<String>, kind: MessageKind, duration: Duration) {
        self.current = Some(Message {
            text: text.into(),
            kind,
        });
        self.hide_at = Some(Instant::now() + duration);
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.hide_at = None;
    }

    pub fn visible(&self) -> Option<&Message> {
        match self.hide_at {
            Some(deadline) if Instant::now() < deadline => self.current.as_ref(),
            _ => None,
        }
    }

    /// Time until the visible message hides itself.
    pub fn expires_in(&self) -> Option<Duration> {
        self.visible()?;
        self.hide_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn hides_after_its_duration() {
        let mut slot = MessageSlot::default();
        slot.show("Signed up", MessageKind::Success, Duration::from_secs(5));

        tokio::time::advance(Duration::from_millis(4_999)).await;
        assert_eq!(slot.visible().map(|m| m.text.as_str()), Some("Signed up"));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(slot.visible().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_message_outlives_older_deadline() {
        let mut slot = MessageSlot::default();
        slot.show("first", MessageKind::Success, Duration::from_secs(5));

        tokio::time::advance(Duration::from_secs(3)).await;
        slot.show("second", MessageKind::Error, Duration::from_secs(4));

        // The first message would have hidden at t=5s.
        tokio::time::advance(Duration::from_secs(3)).await;
        let visible = slot.visible().unwrap();
        assert_eq!(visible.text, "second");
        assert_eq!(visible.kind, MessageKind::Error);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(slot.visible().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_hides_immediately() {
        let mut slot = MessageSlot::default();
        slot.show("gone", MessageKind::Error, Duration::from_secs(4));
        slot.clear();
        assert!(slot.visible().is_none());
        assert!(slot.expires_in().is_none());
    }
}
