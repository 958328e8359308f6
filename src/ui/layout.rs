use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::nav::NavigationEntry;

pub const HAMBURGER: &str = "≡ Menu";
const BRAND: &str = "finboard";

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header: vertical[0],
        main: vertical[1],
        footer: vertical[2],
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

/// Screen positions of the navigation controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavRegions {
    /// `(registry index, rect)`; inline links when wide, menu rows when compact.
    pub items: Vec<(usize, Rect)>,
    pub hamburger: Option<Rect>,
    /// Dropdown frame, present only while the compact menu is open.
    pub menu: Option<Rect>,
}

/// Text of a navigation link as drawn in the header.
pub fn nav_item_text(index: usize, entry: &NavigationEntry) -> String {
    format!(" {} {} ", index + 1, entry.label)
}

fn text_width(text: &str) -> u16 {
    text.chars().count() as u16
}

pub fn nav_regions(
    areas: &UiAreas,
    entries: &[NavigationEntry],
    compact: bool,
    menu_open: bool,
) -> NavRegions {
    let header = areas.header;
    let inner = rect_inner(header);
    let mut regions = NavRegions::default();
    if inner.width == 0 || inner.height == 0 {
        return regions;
    }
    let right = inner.x.saturating_add(inner.width);

    if !compact {
        let mut x = inner.x + text_width(BRAND) + 2;
        for (index, entry) in entries.iter().enumerate() {
            let width = text_width(&nav_item_text(index, entry));
            if x.saturating_add(width) > right {
                break;
            }
            regions.items.push((index, Rect::new(x, inner.y, width, 1)));
            x = x.saturating_add(width + 1);
        }
        return regions;
    }

    let hamburger = Rect::new(inner.x, inner.y, text_width(HAMBURGER).min(inner.width), 1);
    regions.hamburger = Some(hamburger);
    if !menu_open {
        return regions;
    }

    let widest = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| text_width(&nav_item_text(index, entry)))
        .max()
        .unwrap_or(0);
    let bottom = areas.size.y.saturating_add(areas.size.height);
    let top = header.y.saturating_add(header.height);
    let height = (entries.len() as u16 + 2).min(bottom.saturating_sub(top));
    let width = (widest + 4).min(areas.size.width.saturating_sub(header.x));
    let menu = Rect::new(header.x, top, width, height);
    regions.menu = Some(menu);

    let menu_inner = rect_inner(menu);
    for (index, _) in entries.iter().enumerate() {
        let y = menu_inner.y + index as u16;
        if y >= menu_inner.y.saturating_add(menu_inner.height) {
            break;
        }
        regions
            .items
            .push((index, Rect::new(menu_inner.x, y, menu_inner.width, 1)));
    }
    regions
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::RouteRegistry;

    #[test]
    fn wide_layout_places_every_link() {
        let areas = areas(Rect::new(0, 0, 120, 30));
        let registry = RouteRegistry::standard();
        let regions = nav_regions(&areas, registry.entries(), false, false);
        assert_eq!(regions.items.len(), registry.len());
        assert!(regions.hamburger.is_none());
        // links do not overlap and stay on the header row
        for pair in regions.items.windows(2) {
            let (_, a) = pair[0];
            let (_, b) = pair[1];
            assert!(a.x + a.width < b.x + 1);
            assert_eq!(a.y, 1);
        }
    }

    #[test]
    fn compact_layout_hides_links_until_menu_opens() {
        let areas = areas(Rect::new(0, 0, 60, 30));
        let registry = RouteRegistry::standard();
        let closed = nav_regions(&areas, registry.entries(), true, false);
        assert!(closed.items.is_empty());
        assert!(closed.hamburger.is_some());

        let open = nav_regions(&areas, registry.entries(), true, true);
        assert_eq!(open.items.len(), registry.len());
        assert_eq!(open.items[0].1.y, 4);
        assert!(open.menu.is_some());
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(2, 2, 3, 1);
        assert!(rect_contains(rect, 2, 2));
        assert!(rect_contains(rect, 4, 2));
        assert!(!rect_contains(rect, 5, 2));
        assert!(!rect_contains(rect, 2, 3));
    }
}
