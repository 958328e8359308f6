//! Navigation bar state: active-route projection and the compact menu.

use tracing::debug;

use super::registry::{NavigationEntry, RouteRegistry};
use super::router::Router;

/// Visibility of the compact (hamburger) menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

/// A registry entry paired with whether it matches the current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem<'a> {
    pub entry: &'a NavigationEntry,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NavigationBar {
    registry: RouteRegistry,
    menu: MenuState,
}

impl NavigationBar {
    pub fn new(registry: RouteRegistry) -> Self {
        Self {
            registry,
            menu: MenuState::Closed,
        }
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    /// Project the registry against `current_route`, preserving registry order.
    ///
    /// Matching is exact string equality; no prefix or wildcard matching.
    pub fn render(&self, current_route: &str) -> Vec<NavItem<'_>> {
        self.registry
            .entries()
            .iter()
            .map(|entry| NavItem {
                entry,
                is_active: entry.path == current_route,
            })
            .collect()
    }

    /// Ask the router to go to `entry.path` and close the menu.
    ///
    /// The request is issued even when the router is already on that path.
    pub fn activate<R: Router + ?Sized>(&mut self, entry: &NavigationEntry, router: &mut R) {
        debug!(path = %entry.path, label = %entry.label, "navigation entry activated");
        router.navigate(&entry.path);
        self.menu = MenuState::Closed;
    }

    /// Activate the entry at `index`; returns false when out of range.
    pub fn activate_index<R: Router + ?Sized>(&mut self, index: usize, router: &mut R) -> bool {
        let Some(entry) = self.registry.get(index).cloned() else {
            return false;
        };
        self.activate(&entry, router);
        true
    }

    /// Activate the entry after (or before) the current route, wrapping around.
    /// From a route not in the registry, forward starts at the first entry.
    pub fn activate_adjacent<R: Router + ?Sized>(&mut self, forward: bool, router: &mut R) {
        let len = self.registry.len();
        if len == 0 {
            return;
        }
        let next = match self.registry.position(router.current()) {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.activate_index(next, router);
    }

    pub fn toggle_menu(&mut self) {
        self.menu = self.menu.toggled();
    }
}

impl Default for NavigationBar {
    fn default() -> Self {
        Self::new(RouteRegistry::standard())
    }
}
