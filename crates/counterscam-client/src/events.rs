use serde::Serialize;
use tokio::sync::broadcast;

/// Capacity of the session event channel. Slow subscribers lag, they do
/// not block publishers.
const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEndReason {
    /// The service answered 401.
    Unauthorized,
    /// The user signed out.
    Logout,
}

/// Session lifecycle notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Started,
    /// Route the user to authentication.
    Ended { reason: SessionEndReason },
}

/// Publisher side of the session event channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: SessionEvent) {
        if self.tx.send(event.clone()).is_err() {
            tracing::debug!(?event, "No subscriber for session event");
        }
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_reaches_subscribers() {
        let events = SessionEvents::new();
        let mut rx = events.subscribe();

        events.emit(SessionEvent::Ended {
            reason: SessionEndReason::Unauthorized,
        });

        assert_eq!(
            rx.recv().await.unwrap(),
            SessionEvent::Ended {
                reason: SessionEndReason::Unauthorized
            }
        );
    }

    #[test]
    fn test_emit_without_subscribers_is_harmless() {
        SessionEvents::new().emit(SessionEvent::Started);
    }
}
