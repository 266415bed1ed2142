//! Deferred log buffer
//!
//! Settings are resolved before the logger exists, so every resolution
//! records its outcome here. Once logging is up the buffer is flushed into
//! it in the order the messages were recorded.

/// Ordered, append-only queue of diagnostic messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeferredLog {
    messages: Vec<String>,
}

impl DeferredLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for the logger
    pub fn defer<S: Into<String>>(&mut self, message: S) {
        self.messages.push(message.into());
    }

    /// Emit every queued message to `sink` in insertion order, then clear
    /// the queue. Flushing an empty buffer does nothing.
    pub fn flush<F>(&mut self, mut sink: F)
    where
        F: FnMut(&str),
    {
        for message in &self.messages {
            sink(message);
        }
        self.reset();
    }

    /// Drop every queued message without emitting it
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_preserves_order_and_empties() {
        let mut log = DeferredLog::new();
        log.defer("first");
        log.defer(String::from("second"));
        log.defer("third");

        let mut seen = Vec::new();
        log.flush(|msg| seen.push(msg.to_string()));

        assert_eq!(seen, vec!["first", "second", "third"]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_second_flush_is_noop() {
        let mut log = DeferredLog::new();
        log.defer("only once");
        log.flush(|_| {});

        let mut calls = 0;
        log.flush(|_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_reset_discards_without_emitting() {
        let mut log = DeferredLog::new();
        log.defer("dropped");
        log.defer("also dropped");
        assert_eq!(log.len(), 2);

        log.reset();
        assert!(log.is_empty());

        let mut calls = 0;
        log.flush(|_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_messages_after_flush_start_new_batch() {
        let mut log = DeferredLog::new();
        log.defer("startup");
        log.flush(|_| {});

        log.defer("late");
        assert_eq!(log.messages(), ["late".to_string()]);
    }
}
