//! Layout helpers: split the terminal area into regions and place every
//! piece of the scrolled page.
//!
//! Page geometry is expressed in *page rows*: row 0 is the top of the page
//! content, independent of the current vertical scroll.  [`PageView`] maps
//! page rows onto screen rows.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::portfolio::{Portfolio, Section};
use crate::core::strip::{CardSize, DraggableImageStrip};
use crate::core::units::{cols_to_units, units_to_cols, CELL_HEIGHT_UNITS};

use super::page::{button_text, compose, PagePiece, BUTTON_GAP};

/// Horizontal margin on each side of the page content.
pub const PAGE_MARGIN: u16 = 2;

/// Primary screen layout: a sticky nav bar, the page pane and a bottom
/// status bar.
pub struct AppLayout {
    pub nav_area: Rect,
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // nav bar
                Constraint::Min(3),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            nav_area: chunks[0],
            page_area: chunks[1],
            status_area: chunks[2],
        }
    }
}

// ───────────────────────────────────────── strip ─────────────

/// Regions of one image strip: a header row with the arrow buttons, then a
/// bordered viewport the cards scroll through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripGeometry {
    pub area: Rect,
    pub header: Rect,
    pub prev_button: Rect,
    pub next_button: Rect,
    /// Inside of the viewport border: where cards are drawn.
    pub viewport: Rect,
}

impl StripGeometry {
    pub fn for_area(area: Rect) -> Self {
        let header = Rect::new(area.x, area.y, area.width, 1u16.min(area.height));
        let right = area.x + area.width;
        let next_button = Rect::new(right.saturating_sub(3), area.y, 3u16.min(area.width), 1);
        let prev_button = Rect::new(right.saturating_sub(7), area.y, 3u16.min(area.width), 1);
        let frame = Rect::new(
            area.x,
            area.y.saturating_add(1),
            area.width,
            area.height.saturating_sub(1),
        );
        let viewport = Rect::new(
            frame.x.saturating_add(1),
            frame.y.saturating_add(1),
            frame.width.saturating_sub(2),
            frame.height.saturating_sub(2),
        );
        Self {
            area,
            header,
            prev_button,
            next_button,
            viewport,
        }
    }

    /// Rows of one card: border, 16:9 image, caption.
    pub fn card_rows(card_size: CardSize) -> u16 {
        let image_units = card_size.width() * 9.0 / 16.0;
        let image_rows = (image_units / CELL_HEIGHT_UNITS).round() as u16;
        image_rows + 3
    }

    pub fn card_cols(card_size: CardSize) -> u16 {
        units_to_cols(card_size.width()).max(1) as u16
    }

    /// Total rows of a strip: header, viewport border, one card.
    pub fn height(card_size: CardSize) -> u16 {
        1 + 2 + Self::card_rows(card_size)
    }
}

// ───────────────────────────────────────── page ──────────────

/// Position of every page piece for one page width.
#[derive(Debug)]
pub struct PageLayout {
    pub width: u16,
    /// Total page height in rows.
    pub height: u16,
    pub card_size: CardSize,
    /// Content column span (page coordinates).
    pub content_x: u16,
    pub content_width: u16,
    /// `(row, piece)` in page order.
    pub pieces: Vec<(u16, PagePiece)>,
    /// `(work index, geometry)` for every strip that renders.
    pub strips: Vec<(usize, StripGeometry)>,
    /// First row of each section, in page order.
    pub sections: Vec<(Section, u16)>,
    /// Page-space rects of the in-page section buttons.
    pub links: Vec<(Rect, Section)>,
}

impl PageLayout {
    pub fn compute(portfolio: &Portfolio, strips: &[DraggableImageStrip], width: u16) -> Self {
        let card_size = CardSize::for_page_width(cols_to_units(width));
        let content_x = PAGE_MARGIN.min(width / 4);
        let content_width = width.saturating_sub(content_x * 2).max(1);
        let strip_height = StripGeometry::height(card_size);

        let mut y: u16 = 0;
        let mut pieces = Vec::new();
        let mut strip_slots = Vec::new();
        let mut sections = Vec::new();
        let mut links = Vec::new();
        for piece in compose(portfolio, strips, content_width) {
            let rows = match &piece {
                PagePiece::Line(_) => 1,
                PagePiece::Strip(work) => {
                    let area = Rect::new(content_x, y, content_width, strip_height);
                    strip_slots.push((*work, StripGeometry::for_area(area)));
                    strip_height
                }
                PagePiece::Anchor(section) => {
                    sections.push((*section, y));
                    0
                }
                PagePiece::Buttons(buttons) => {
                    let right = content_x + content_width;
                    let mut x = content_x;
                    for (label, target) in buttons {
                        let w = button_text(label).chars().count() as u16;
                        if x + w > right {
                            break;
                        }
                        links.push((Rect::new(x, y, w, 1), *target));
                        x += w + BUTTON_GAP;
                    }
                    1
                }
            };
            pieces.push((y, piece));
            y = y.saturating_add(rows);
        }

        Self {
            width,
            height: y,
            card_size,
            content_x,
            content_width,
            pieces,
            strips: strip_slots,
            sections,
            links,
        }
    }

    pub fn strip_geometry(&self, work: usize) -> Option<&StripGeometry> {
        self.strips.iter().find(|(w, _)| *w == work).map(|(_, g)| g)
    }

    pub fn section_row(&self, section: Section) -> Option<u16> {
        self.sections.iter().find(|(s, _)| *s == section).map(|(_, row)| *row)
    }

    /// The section the page row `row` belongs to; `None` above the first.
    pub fn section_at(&self, row: u16) -> Option<Section> {
        self.sections
            .iter()
            .take_while(|(_, start)| *start <= row)
            .last()
            .map(|(s, _)| *s)
    }
}

/// The visible window onto the page.
#[derive(Debug, Clone, Copy)]
pub struct PageView {
    /// Screen area the page is drawn into.
    pub area: Rect,
    /// First page row shown at the top of `area`.
    pub scroll_row: u16,
}

impl PageView {
    /// Translate a page-space rect to screen space, clipped to the view.
    /// Returns `None` when nothing of it is visible.
    pub fn to_screen(&self, rect: Rect) -> Option<Rect> {
        let top = i32::from(rect.y) - i32::from(self.scroll_row) + i32::from(self.area.y);
        let bottom = top + i32::from(rect.height);
        let clip_top = i32::from(self.area.y);
        let clip_bottom = clip_top + i32::from(self.area.height);
        let vis_top = top.max(clip_top);
        let vis_bottom = bottom.min(clip_bottom);
        if vis_bottom <= vis_top || rect.width == 0 {
            return None;
        }
        Some(Rect::new(
            self.area.x + rect.x,
            vis_top as u16,
            rect.width,
            (vis_bottom - vis_top) as u16,
        ))
    }
}

/// Is the screen cell `(col, row)` inside `area`?
pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::strip::ImageItem;

    fn strips_for(page: &Portfolio) -> Vec<DraggableImageStrip> {
        page.works
            .iter()
            .map(|w| DraggableImageStrip::new(w.title, w.images.clone()))
            .collect()
    }

    #[test]
    fn strip_geometry_places_buttons_and_viewport() {
        let g = StripGeometry::for_area(Rect::new(2, 10, 60, 16));
        assert_eq!(g.header, Rect::new(2, 10, 60, 1));
        assert_eq!(g.next_button, Rect::new(59, 10, 3, 1));
        assert_eq!(g.prev_button, Rect::new(55, 10, 3, 1));
        assert_eq!(g.viewport, Rect::new(3, 12, 58, 13));
    }

    #[test]
    fn card_rows_follow_breakpoints() {
        assert_eq!(StripGeometry::card_rows(CardSize::Narrow), 11);
        assert_eq!(StripGeometry::card_rows(CardSize::Standard), 13);
        assert_eq!(StripGeometry::card_rows(CardSize::Wide), 14);
        assert_eq!(StripGeometry::card_cols(CardSize::Standard), 35);
    }

    #[test]
    fn only_non_empty_strips_get_rows() {
        let page = Portfolio::builtin();
        let strips = strips_for(&page);
        let layout = PageLayout::compute(&page, &strips, 100);
        assert_eq!(layout.strips.len(), 1);
        assert_eq!(layout.strips[0].0, 0);
        assert!(layout.strip_geometry(1).is_none());
        assert_eq!(layout.card_size, CardSize::Standard);
    }

    #[test]
    fn adding_images_adds_a_strip() {
        let mut page = Portfolio::builtin();
        page.works[1].images = vec![ImageItem::new("/images/bridge.png")];
        let strips = strips_for(&page);
        let before = PageLayout::compute(&Portfolio::builtin(), &strips_for(&Portfolio::builtin()), 100);
        let after = PageLayout::compute(&page, &strips, 100);
        assert_eq!(after.strips.len(), 2);
        assert_eq!(after.height, before.height + StripGeometry::height(CardSize::Standard));
    }

    #[test]
    fn sections_and_hero_buttons_are_located() {
        let page = Portfolio::builtin();
        let layout = PageLayout::compute(&page, &strips_for(&page), 100);
        let rows: Vec<u16> = Section::ALL.iter().map(|&s| layout.section_row(s).unwrap()).collect();
        assert!(rows.windows(2).all(|w| w[0] < w[1]));
        // Works starts before its strip.
        assert!(rows[0] < layout.strips[0].1.area.y);

        assert_eq!(layout.section_at(0), None);
        assert_eq!(layout.section_at(rows[0]), Some(Section::Works));
        assert_eq!(layout.section_at(rows[1] - 1), Some(Section::Works));
        assert_eq!(layout.section_at(rows[2]), Some(Section::Contact));

        assert_eq!(layout.links.len(), 2);
        let (first, second) = (layout.links[0], layout.links[1]);
        assert_eq!(first.1, Section::Works);
        assert_eq!(second.1, Section::Contact);
        assert_eq!(first.0.x, layout.content_x);
        assert_eq!(second.0.x, first.0.x + first.0.width + BUTTON_GAP);
        assert!(first.0.y < rows[0]);
    }

    #[test]
    fn app_layout_pins_nav_and_status_rows() {
        let l = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(l.nav_area, Rect::new(0, 0, 80, 1));
        assert_eq!(l.page_area, Rect::new(0, 1, 80, 22));
        assert_eq!(l.status_area, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn page_view_clips_to_the_visible_window() {
        let view = PageView {
            area: Rect::new(0, 0, 80, 20),
            scroll_row: 10,
        };
        assert_eq!(view.to_screen(Rect::new(2, 5, 10, 3)), None);
        assert_eq!(view.to_screen(Rect::new(2, 8, 10, 5)), Some(Rect::new(2, 0, 10, 3)));
        assert_eq!(view.to_screen(Rect::new(2, 25, 10, 10)), Some(Rect::new(2, 15, 10, 5)));
        assert_eq!(view.to_screen(Rect::new(2, 30, 10, 1)), None);
    }
}
