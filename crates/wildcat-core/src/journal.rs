//! Notification feed and decision log.
//!
//! Both are append-only outputs for the presentation layer. The
//! notification feed keeps only a bounded recent history; the decision log
//! keeps everything for the end-of-run report.

use std::collections::VecDeque;

use serde::Serialize;
use wildcat_logic::costs::NOTIFICATION_CAP;

/// Severity tag on a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// One entry in the notification feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    /// Period index the notification was raised in.
    pub period: usize,
    /// Project day stamp.
    pub day: u32,
}

/// Bounded recent-history notification feed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationFeed {
    entries: VecDeque<Notification>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append, discarding the oldest entry past the cap.
    pub fn push(&mut self, notification: Notification) {
        if self.entries.len() == NOTIFICATION_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(notification);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }
}

/// One entry in the decision log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRecord {
    pub action: String,
    pub cost: f64,
    pub outcome: String,
    pub risk_summary: String,
    pub justification: String,
    pub day: u32,
}

/// Append-only, uncapped decision log for the end-of-run report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecisionLog {
    entries: Vec<DecisionRecord>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DecisionRecord) {
        self.entries.push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecisionRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
