//! Scoped, auto-dismissing status messages.
//!
//! Each UI region (`FeedbackScope`) shows at most one message. Every `show`
//! queues a `DismissTicket`; the host drains the queue with
//! `take_dismissals` and calls `expire` once the dismiss interval has passed.
//! A ticket only hides the message it was issued for, so an old timer never
//! cuts a newer message in the same scope short, and scopes never affect one
//! another.

use std::collections::HashMap;

/// UI region a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeedbackScope {
    Upload,
    MissingValues,
    Normalize,
    Encoding,
    DropColumns,
    Visualization,
}

impl FeedbackScope {
    pub fn id(&self) -> &'static str {
        match self {
            FeedbackScope::Upload => "upload",
            FeedbackScope::MissingValues => "missing-values",
            FeedbackScope::Normalize => "normalize",
            FeedbackScope::Encoding => "encoding",
            FeedbackScope::DropColumns => "drop-columns",
            FeedbackScope::Visualization => "visualization",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub severity: Severity,
    generation: u64,
}

/// Identifies one shown message; handed back to `FeedbackReporter::expire`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissTicket {
    pub scope: FeedbackScope,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct FeedbackReporter {
    visible: HashMap<FeedbackScope, Feedback>,
    pending: Vec<DismissTicket>,
    next_generation: u64,
}

impl FeedbackReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `message` in `scope`, replacing whatever was there.
    pub fn show(
        &mut self,
        scope: FeedbackScope,
        message: impl Into<String>,
        severity: Severity,
    ) -> DismissTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        let message = message.into();
        match severity {
            Severity::Success => log::info!("[{}] {}", scope.id(), message),
            Severity::Danger => log::error!("[{}] {}", scope.id(), message),
        }
        self.visible.insert(
            scope,
            Feedback {
                message,
                severity,
                generation,
            },
        );
        let ticket = DismissTicket { scope, generation };
        self.pending.push(ticket);
        ticket
    }

    pub fn success(&mut self, scope: FeedbackScope, message: impl Into<String>) -> DismissTicket {
        self.show(scope, message, Severity::Success)
    }

    pub fn danger(&mut self, scope: FeedbackScope, message: impl Into<String>) -> DismissTicket {
        self.show(scope, message, Severity::Danger)
    }

    /// Hides the message `ticket` was issued for. Returns `false` when that
    /// message was already replaced or hidden.
    pub fn expire(&mut self, ticket: DismissTicket) -> bool {
        match self.visible.get(&ticket.scope) {
            Some(current) if current.generation == ticket.generation => {
                self.visible.remove(&ticket.scope);
                true
            }
            _ => false,
        }
    }

    pub fn current(&self, scope: FeedbackScope) -> Option<&Feedback> {
        self.visible.get(&scope)
    }

    /// Tickets issued since the last call, in issue order.
    pub fn take_dismissals(&mut self) -> Vec<DismissTicket> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_expire_hides() {
        let mut reporter = FeedbackReporter::new();
        let ticket = reporter.success(FeedbackScope::Upload, "File uploaded successfully!");
        assert_eq!(
            reporter.current(FeedbackScope::Upload).map(|f| f.message.as_str()),
            Some("File uploaded successfully!")
        );
        assert!(reporter.expire(ticket));
        assert!(reporter.current(FeedbackScope::Upload).is_none());
        assert!(!reporter.expire(ticket));
    }

    #[test]
    fn stale_ticket_keeps_newer_message() {
        let mut reporter = FeedbackReporter::new();
        let first = reporter.danger(FeedbackScope::Normalize, "Invalid method");
        let second = reporter.success(FeedbackScope::Normalize, "Normalized 2 columns");

        assert!(!reporter.expire(first));
        let shown = reporter.current(FeedbackScope::Normalize).unwrap();
        assert_eq!(shown.message, "Normalized 2 columns");
        assert_eq!(shown.severity, Severity::Success);

        assert!(reporter.expire(second));
        assert!(reporter.current(FeedbackScope::Normalize).is_none());
    }

    #[test]
    fn scopes_are_independent() {
        let mut reporter = FeedbackReporter::new();
        let upload = reporter.success(FeedbackScope::Upload, "ok");
        reporter.danger(FeedbackScope::Encoding, "bad");

        assert!(reporter.expire(upload));
        assert!(reporter.current(FeedbackScope::Upload).is_none());
        assert_eq!(reporter.current(FeedbackScope::Encoding).unwrap().message, "bad");
    }

    #[test]
    fn dismissals_are_drained_once() {
        let mut reporter = FeedbackReporter::new();
        let a = reporter.success(FeedbackScope::Upload, "a");
        let b = reporter.danger(FeedbackScope::DropColumns, "b");
        assert_eq!(reporter.take_dismissals(), vec![a, b]);
        assert!(reporter.take_dismissals().is_empty());
    }
}
