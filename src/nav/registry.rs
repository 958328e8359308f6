//! Ordered, immutable list of navigable destinations.

/// One clickable destination in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub path: String,
    pub label: String,
}

impl NavigationEntry {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// Paths of the standard routes.
pub mod routes {
    pub const DASHBOARD: &str = "/";
    pub const TRANSACTIONS: &str = "/transactions";
    pub const PORTFOLIO: &str = "/portfolio";
    pub const INSIGHTS: &str = "/insights";
    pub const USER: &str = "/user";
}

const STANDARD_ROUTES: [(&str, &str); 5] = [
    (routes::DASHBOARD, "Dashboard"),
    (routes::TRANSACTIONS, "Transactions"),
    (routes::PORTFOLIO, "My portfolio"),
    (routes::INSIGHTS, "Insights"),
    (routes::USER, "User"),
];

/// Fixed set of routes, built once at startup.
///
/// Paths are expected to be unique. Duplicates are not rejected; every entry
/// sharing the current path is rendered active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRegistry {
    entries: Vec<NavigationEntry>,
}

impl RouteRegistry {
    pub fn new(entries: Vec<NavigationEntry>) -> Self {
        Self { entries }
    }

    /// The application's route table.
    pub fn standard() -> Self {
        Self::new(
            STANDARD_ROUTES
                .iter()
                .map(|(path, label)| NavigationEntry::new(*path, *label))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NavigationEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.path == path)
    }

    /// Resolve a user-typed target: exact path first, then a case-insensitive label.
    pub fn find(&self, target: &str) -> Option<&NavigationEntry> {
        let target = target.trim();
        self.entries
            .iter()
            .find(|entry| entry.path == target)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|entry| entry.label.eq_ignore_ascii_case(target))
            })
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_keeps_declaration_order() {
        let registry = RouteRegistry::standard();
        let paths: Vec<&str> = registry.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/", "/transactions", "/portfolio", "/insights", "/user"]
        );
    }

    #[test]
    fn find_prefers_path_then_label() {
        let registry = RouteRegistry::standard();
        assert_eq!(registry.find("/user").map(|e| e.label.as_str()), Some("User"));
        assert_eq!(
            registry.find("my portfolio").map(|e| e.path.as_str()),
            Some("/portfolio")
        );
        assert!(registry.find("/nowhere").is_none());
    }
}
