//! Sticky nav bar: brand on the left, section links on the right.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::portfolio::Section;

use super::layout::PAGE_MARGIN;
use super::theme::Theme;

const ENTRY_GAP: u16 = 3;

/// Where each section link sits inside `area`.  Links are packed from the
/// right edge; ones that no longer fit on a narrow bar are left out.
pub fn entry_rects(area: Rect) -> Vec<(Rect, Section)> {
    let left = area.x + PAGE_MARGIN.min(area.width / 4);
    let mut right = area.x + area.width - PAGE_MARGIN.min(area.width / 4);
    let mut out = Vec::new();
    for &section in Section::ALL.iter().rev() {
        let w = section.label().chars().count() as u16;
        if right < left + w {
            break;
        }
        right -= w;
        out.push((Rect::new(right, area.y, w, 1), section));
        right = right.saturating_sub(ENTRY_GAP);
    }
    out.reverse();
    out
}

pub struct NavBar<'a> {
    pub brand: &'a str,
    /// Section currently at the top of the page, if any.
    pub active: Option<Section>,
}

impl<'a> Widget for NavBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, Theme::nav_bar_style());

        let entries = entry_rects(area);
        let x = area.x + PAGE_MARGIN.min(area.width / 4);
        let brand_end = entries.first().map_or(area.x + area.width, |(r, _)| r.x.saturating_sub(1));
        if brand_end > x {
            buf.set_stringn(x, area.y, self.brand, usize::from(brand_end - x), Theme::nav_brand_style());
        }
        for (rect, section) in entries {
            let style = Theme::nav_entry_style(self.active == Some(section));
            buf.set_string(rect.x, rect.y, section.label(), style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Position;

    fn row_text(buf: &Buffer) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell(Position::new(x, 0)))
            .map(|c| c.symbol().to_string())
            .collect()
    }

    #[test]
    fn entries_pack_from_the_right_in_nav_order() {
        let rects = entry_rects(Rect::new(0, 0, 80, 1));
        let sections: Vec<Section> = rects.iter().map(|(_, s)| *s).collect();
        assert_eq!(sections, Section::ALL);
        let last = rects.last().unwrap().0;
        assert_eq!(last.x + last.width, 80 - PAGE_MARGIN);
        assert!(rects.windows(2).all(|w| w[0].0.x + w[0].0.width + ENTRY_GAP == w[1].0.x));
    }

    #[test]
    fn narrow_bar_drops_leading_entries() {
        let rects = entry_rects(Rect::new(0, 0, 12, 1));
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].1, Section::Contact);
    }

    #[test]
    fn renders_brand_and_links() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        NavBar {
            brand: "Nick · portfolio",
            active: Some(Section::Stack),
        }
        .render(area, &mut buf);
        let text = row_text(&buf);
        assert!(text.starts_with("  Nick · portfolio"), "{text}");
        assert!(text.trim_end().ends_with("Works   Tech stack   Contact"), "{text}");

        let (stack, _) = entry_rects(area)[1];
        let cell = buf.cell(Position::new(stack.x, 0)).unwrap();
        assert_eq!(cell.fg, ratatui::style::Color::LightBlue);
        assert!(cell.modifier.contains(ratatui::style::Modifier::BOLD));
    }
}
