use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
struct Entry {
    message: String,
    raised_at: Instant,
}

/// Single last-write-wins slot for the most recent failure message.
///
/// The slot is cleared by the next successful operation. With a TTL set, a
/// message older than the TTL reads as absent.
#[derive(Clone, Debug, Default)]
pub struct ErrorChannel {
    current: Option<Entry>,
    ttl: Option<Duration>,
}

impl ErrorChannel {
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        Self { current: None, ttl }
    }

    pub fn raise(&mut self, message: impl Into<String>) {
        self.raise_at(message, Instant::now());
    }

    pub fn raise_at(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Entry {
            message: message.into(),
            raised_at: now,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current_at(Instant::now())
    }

    #[must_use]
    pub fn current_at(&self, now: Instant) -> Option<&str> {
        let entry = self.current.as_ref()?;
        match self.ttl {
            Some(ttl) if now.saturating_duration_since(entry.raised_at) >= ttl => None,
            _ => Some(entry.message.as_str()),
        }
    }
}
