//! Navigator that records redirects.

use std::sync::{Arc, Mutex};

use crate::traits::Navigator;

/// Records every route it is asked to navigate to.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    routes: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.routes.lock().unwrap().len()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}
