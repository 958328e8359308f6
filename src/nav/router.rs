//! Routing collaborator: owns the current route and the back stack.

use tracing::info;

/// Source of the current route and sink for navigation requests.
///
/// Paths are opaque identifiers; implementations do not validate them.
pub trait Router {
    fn current(&self) -> &str;
    fn navigate(&mut self, path: &str);
}

#[derive(Debug, Clone)]
pub struct HistoryRouter {
    current: String,
    history: Vec<String>,
    requests: u64,
    max_history: usize,
}

impl HistoryRouter {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: initial.into(),
            history: Vec::new(),
            requests: 0,
            max_history: 64,
        }
    }

    /// Return to the previous route. Returns false when there is none.
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        info!(from = %self.current, to = %previous, "route back");
        self.current = previous;
        true
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Number of navigation requests received, including no-op ones.
    pub fn request_count(&self) -> u64 {
        self.requests
    }
}

impl Router for HistoryRouter {
    fn current(&self) -> &str {
        &self.current
    }

    fn navigate(&mut self, path: &str) {
        self.requests += 1;
        if path == self.current {
            return;
        }
        info!(from = %self.current, to = %path, "route change");
        let previous = std::mem::replace(&mut self.current, path.to_string());
        self.history.push(previous);
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }
    }
}

impl Default for HistoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_and_back() {
        let mut router = HistoryRouter::default();
        router.navigate("/transactions");
        router.navigate("/user");
        assert_eq!(router.current(), "/user");
        assert!(router.back());
        assert_eq!(router.current(), "/transactions");
        assert!(router.back());
        assert_eq!(router.current(), "/");
        assert!(!router.back());
    }

    #[test]
    fn same_path_counts_request_without_history() {
        let mut router = HistoryRouter::new("/insights");
        router.navigate("/insights");
        assert_eq!(router.request_count(), 1);
        assert!(!router.can_go_back());
    }

    #[test]
    fn history_is_bounded() {
        let mut router = HistoryRouter::default();
        for i in 0..100 {
            router.navigate(&format!("/p{i}"));
        }
        assert_eq!(router.history().len(), 64);
        assert_eq!(router.current(), "/p99");
    }
}
