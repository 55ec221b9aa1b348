use learnfeed_types::FeedEvent;
use std::sync::Mutex;

/// Receives timeline change notifications.
///
/// Called synchronously after each mutation has completed.
pub trait FeedObserver: Send + Sync {
    fn on_event(&self, event: &FeedEvent);
}

/// Observer that keeps every event it sees, for polling UIs and tests
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<FeedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FeedEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drains recorded events
    pub fn take(&self) -> Vec<FeedEvent> {
        std::mem::take(
            &mut *self
                .events
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl FeedObserver for RecordingObserver {
    fn on_event(&self, event: &FeedEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}
