use std::sync::{Arc, Mutex};
use vulnscan::prelude::*;

/// Mock PinStorage for testing that keeps the pinned set in memory
/// and counts persistence calls.
#[derive(Default, Clone)]
pub struct MockPinStorage {
    pub contents: Arc<Mutex<Vec<Vulnerability>>>,
    pub save_count: Arc<Mutex<usize>>,
    pub fail_on_load: bool,
}

impl MockPinStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: Vec<Vulnerability>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(contents)),
            save_count: Arc::new(Mutex::new(0)),
            fail_on_load: false,
        }
    }

    pub fn with_load_failure() -> Self {
        Self {
            fail_on_load: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<Vulnerability> {
        self.contents.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }
}

impl PinStorage for MockPinStorage {
    fn load(&self) -> Result<Vec<Vulnerability>> {
        if self.fail_on_load {
            anyhow::bail!("Mock pin storage load failure");
        }
        Ok(self.contents.lock().unwrap().clone())
    }

    fn save(&self, vulnerabilities: &[Vulnerability]) -> Result<()> {
        *self.contents.lock().unwrap() = vulnerabilities.to_vec();
        *self.save_count.lock().unwrap() += 1;
        Ok(())
    }
}
