//! Floating "back to top" button, pinned to the bottom-right of the page.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::theme::Theme;

const LABEL: &str = " ↑ Top ";
const LABEL_WIDTH: u16 = 7;
/// Gap to the right and bottom edges of the page area.
const INSET: u16 = 2;

/// Where the button sits inside `page_area`, or `None` if the page area is
/// too small to host it.
pub fn button_rect(page_area: Rect) -> Option<Rect> {
    if page_area.width < LABEL_WIDTH + INSET || page_area.height < 1 + INSET {
        return None;
    }
    Some(Rect::new(
        page_area.x + page_area.width - LABEL_WIDTH - INSET,
        page_area.y + page_area.height - 1 - INSET,
        LABEL_WIDTH,
        1,
    ))
}

/// Drawn only while visible; when hidden it occupies nothing and clicks
/// reach the page underneath.
pub struct BackToTopButton {
    pub visible: bool,
}

impl Widget for BackToTopButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible {
            return;
        }
        let Some(rect) = button_rect(area) else {
            return;
        };
        buf.set_string(rect.x, rect.y, LABEL, Theme::floating_button_style());
    }
}
