//! Non-fatal diagnostic sinks.

use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Receives error messages for expressions that failed to evaluate.
///
/// Reporting never aborts an expansion.
pub trait FeedbackSink: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Reports errors as `tracing` warnings. The engine's default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
    fn report_error(&self, message: &str) {
        tracing::warn!(target: "funcx", "{message}");
    }
}

/// Collects reported errors in memory.
#[derive(Debug, Default)]
pub struct CollectingFeedback {
    messages: Mutex<Vec<String>>,
}

impl CollectingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of messages reported so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain all collected messages.
    pub fn take(&self) -> Vec<String> {
        mem::take(&mut *self.lock())
    }

    /// Lock the messages, recovering them if a reporter panicked.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FeedbackSink for CollectingFeedback {
    fn report_error(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}

impl<F> FeedbackSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report_error(&self, message: &str) {
        self(message);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn collecting_survives_a_poisoned_lock() {
        let feedback = CollectingFeedback::new();
        feedback.report_error("first");

        thread::scope(|scope| {
            let result = scope
                .spawn(|| {
                    let _guard = feedback.messages.lock();
                    panic!("reporter panicked while holding the lock");
                })
                .join();
            assert!(result.is_err());
        });
        assert!(feedback.messages.is_poisoned());

        feedback.report_error("second");
        assert_eq!(feedback.len(), 2);
        assert_eq!(feedback.messages(), vec!["first", "second"]);
        assert_eq!(feedback.take(), vec!["first", "second"]);
        assert!(feedback.is_empty());
    }
}
