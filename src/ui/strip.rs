//! Screenshot strip widget.
//!
//! Header row with the `[←]`/`[→]` buttons, then a bordered viewport showing
//! the cards shifted by the strip's horizontal offset.  Each card is drawn
//! off-screen and clipped into the viewport, so cards slide in and out
//! column by column while dragging.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::strip::{DraggableImageStrip, ImageItem};
use crate::core::units::units_to_cols;

use super::blit::{blit, clip_span};
use super::halfblocks::render_cover;
use super::layout::StripGeometry;
use super::theme::Theme;

pub struct ImageStripWidget<'a> {
    pub strip: &'a DraggableImageStrip,
    pub image_cache: &'a HashMap<ImageItem, Arc<image::RgbaImage>>,
    pub failed_images: &'a HashSet<ImageItem>,
    pub focused: bool,
}

impl<'a> Widget for ImageStripWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // An empty strip draws nothing, not even its chrome.
        if self.strip.is_empty() || area.width < 8 || area.height < 4 {
            return;
        }
        let geom = StripGeometry::for_area(area);

        // ── header ───────────────────────────────────────────────
        let (at_start, at_end) = self
            .strip
            .viewport()
            .map_or((true, true), |vp| (vp.at_start(), vp.at_end()));
        Paragraph::new(Line::from(Span::styled("Screenshots", Theme::muted_style())))
            .render(geom.header, buf);
        buf.set_string(geom.prev_button.x, geom.prev_button.y, "[←]", Theme::button_style(!at_start));
        buf.set_string(geom.next_button.x, geom.next_button.y, "[→]", Theme::button_style(!at_end));

        // ── viewport frame ───────────────────────────────────────
        let frame = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::strip_border_style(self.focused));
        if self.strip.is_dragging() {
            block = block.title_bottom(Line::from(" dragging ").right_aligned());
        }
        block.render(frame, buf);

        // ── cards ────────────────────────────────────────────────
        let vp = geom.viewport;
        if vp.width == 0 || vp.height == 0 {
            return;
        }
        let offset = self.strip.scroll_offset().unwrap_or(0.0);
        let card_cols = StripGeometry::card_cols(self.strip.card_size());
        let card_rows = StripGeometry::card_rows(self.strip.card_size()).min(vp.height);

        for card in self.strip.cards() {
            let x = i32::from(vp.x) + units_to_cols(card.left - offset);
            let Some((skip, dst_x, width)) = clip_span(x, card_cols, vp.x, vp.width) else {
                continue;
            };
            let scratch_area = Rect::new(0, 0, card_cols, card_rows);
            let mut scratch = Buffer::empty(scratch_area);
            self.render_card(card.index, card.item, scratch_area, &mut scratch);
            blit(&scratch, Rect::new(skip, 0, width, card_rows), buf, dst_x, vp.y);
        }
    }
}

impl<'a> ImageStripWidget<'a> {
    fn render_card(&self, index: usize, item: &ImageItem, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::card_border_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 {
            return;
        }

        let image_area = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
        if let Some(thumb) = self.image_cache.get(item) {
            render_cover(thumb, image_area, buf);
        } else {
            let msg = if self.failed_images.contains(item) {
                "image unavailable"
            } else {
                "Loading…"
            };
            let y = image_area.y + image_area.height / 2;
            Paragraph::new(Line::from(Span::styled(msg, Theme::muted_style())).centered())
                .render(Rect::new(image_area.x, y, image_area.width, 1), buf);
        }

        let caption = format!("{} screenshot {}", self.strip.label(), index + 1);
        Paragraph::new(Line::from(Span::styled(caption, Theme::muted_style())))
            .render(Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::strip::CardSize;
    use crate::core::units::cols_to_units;
    use ratatui::layout::Position;

    fn strip(uris: &[&str]) -> DraggableImageStrip {
        DraggableImageStrip::new("Demo", uris.iter().map(|u| ImageItem::new(*u)).collect())
    }

    fn render(strip: &DraggableImageStrip, area: Rect) -> Buffer {
        let cache = HashMap::new();
        let failed = HashSet::new();
        let mut buf = Buffer::empty(area);
        ImageStripWidget {
            strip,
            image_cache: &cache,
            failed_images: &failed,
            focused: false,
        }
        .render(area, &mut buf);
        buf
    }

    fn count_symbol(buf: &Buffer, y: u16, symbol: &str) -> usize {
        (buf.area.x..buf.area.x + buf.area.width)
            .filter(|&x| buf.cell(Position::new(x, y)).is_some_and(|c| c.symbol() == symbol))
            .count()
    }

    #[test]
    fn empty_strip_renders_nothing() {
        let area = Rect::new(0, 0, 80, 20);
        let buf = render(&strip(&[]), area);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn renders_one_card_per_image() {
        let mut s = strip(&["a.png", "b.png"]);
        let area = Rect::new(0, 0, 100, StripGeometry::height(CardSize::Standard));
        let geom = StripGeometry::for_area(area);
        s.mount_viewport(cols_to_units(geom.viewport.width), CardSize::Standard);
        let buf = render(&s, area);

        // Top border of each card sits on the first viewport row.
        assert_eq!(count_symbol(&buf, geom.viewport.y, "╭"), 2);
        assert_eq!(count_symbol(&buf, geom.viewport.y, "╮"), 2);
    }

    #[test]
    fn offset_slides_cards_left() {
        let mut s = strip(&["a.png", "b.png", "c.png"]).with_drag_speed(1.0);
        let area = Rect::new(0, 0, 60, StripGeometry::height(CardSize::Standard));
        let geom = StripGeometry::for_area(area);
        s.mount_viewport(cols_to_units(geom.viewport.width), CardSize::Standard);

        // Scroll exactly one card: the second card now starts at the left edge.
        s.pointer_down(296.0);
        s.pointer_move(0.0);
        assert_eq!(s.scroll_offset(), Some(296.0));

        let buf = render(&s, area);
        let left = buf.cell(Position::new(geom.viewport.x, geom.viewport.y)).unwrap();
        assert_eq!(left.symbol(), "╭");
        let caption_row = geom.viewport.y + StripGeometry::card_rows(CardSize::Standard) - 2;
        let caption: String = (geom.viewport.x + 1..geom.viewport.x + 20)
            .filter_map(|x| buf.cell(Position::new(x, caption_row)))
            .map(|c| c.symbol().to_string())
            .collect();
        assert!(caption.contains("screenshot 2"), "{caption}");
    }
}
