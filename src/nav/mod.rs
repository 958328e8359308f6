//! Navigation: the route registry, the navigation bar and the router it talks to.

pub mod bar;
pub mod registry;
pub mod router;

pub use bar::{MenuState, NavItem, NavigationBar};
pub use registry::{routes, NavigationEntry, RouteRegistry};
pub use router::{HistoryRouter, Router};
