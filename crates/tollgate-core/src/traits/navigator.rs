//! Navigation trait.

use crate::types::RoutePath;

/// The navigation framework's redirect hook.
pub trait Navigator {
    /// Commit a navigation to `target`.
    fn navigate(&mut self, target: &RoutePath);
}

/// Records every navigation it is asked to perform.
///
/// Useful where the caller wants to inspect redirects rather than act on them.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    history: Vec<RoutePath>,
}

impl RecordingNavigator {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigations in the order they were requested.
    pub fn history(&self) -> &[RoutePath] {
        &self.history
    }

    /// The most recent navigation, if any.
    pub fn last(&self) -> Option<&RoutePath> {
        self.history.last()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, target: &RoutePath) {
        self.history.push(target.clone());
    }
}
