use pkgtree::prelude::*;
use std::sync::{Arc, Mutex};

/// One call received by [`MockProgressReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Info(String),
    Progress { current: usize, total: usize },
    Warning(String),
    Completed(String),
}

/// Mock ProgressReporter recording every call in order
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Info(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Warning(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// `(current, total)` of the last progress update
    pub fn last_progress(&self) -> Option<(usize, usize)> {
        self.events().into_iter().rev().find_map(|e| match e {
            ProgressEvent::Progress { current, total } => Some((current, total)),
            _ => None,
        })
    }

    /// `(package, group)` pairs from the "listed in ... but is not installed" warnings
    pub fn not_installed_warnings(&self) -> Vec<(String, String)> {
        self.warnings()
            .iter()
            .filter_map(|w| {
                let rest = w.split_once('\'')?.1;
                let (package, rest) = rest.split_once("' is listed in ")?;
                let group = rest.strip_suffix(" but is not installed.")?;
                Some((package.to_string(), group.to_string()))
            })
            .collect()
    }

    fn push(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.push(ProgressEvent::Info(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.push(ProgressEvent::Progress { current, total });
    }

    fn report_error(&self, message: &str) {
        self.push(ProgressEvent::Warning(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.push(ProgressEvent::Completed(message.to_string()));
    }
}
