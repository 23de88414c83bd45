use std::sync::{Arc, Mutex};
use vulnscan::prelude::*;

/// Mock ProgressReporter for testing that records everything the
/// pipeline reports, in order.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    recorded: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn error_count(&self) -> usize {
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.starts_with("Error:"))
            .count()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.recorded.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let entry = match message {
            Some(m) => format!("Progress: {}/{} {}", current, total, m),
            None => format!("Progress: {}/{}", current, total),
        };
        self.recorded.lock().unwrap().push(entry);
    }

    fn report_error(&self, message: &str) {
        self.recorded
            .lock()
            .unwrap()
            .push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.recorded.lock().unwrap().push(message.to_string());
    }
}
