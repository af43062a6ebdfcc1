//! Off-screen rendering helpers.
//!
//! Scrolled content (the page, cards sliding through a strip) is drawn into a
//! scratch [`Buffer`] at full size and then copied cell by cell, so partially
//! visible widgets clip cleanly at any offset.

use ratatui::{buffer::Buffer, layout::Position, layout::Rect};

/// Copy the `src_rect` region of `src` into `dst` with its top-left corner at
/// `(x, y)`.  Cells falling outside `dst` are dropped.
pub fn blit(src: &Buffer, src_rect: Rect, dst: &mut Buffer, x: u16, y: u16) {
    for row in 0..src_rect.height {
        let (Some(sy), Some(dy)) = (src_rect.y.checked_add(row), y.checked_add(row)) else {
            break;
        };
        for col in 0..src_rect.width {
            let (Some(sx), Some(dx)) = (src_rect.x.checked_add(col), x.checked_add(col)) else {
                break;
            };
            let Some(cell) = src.cell(Position::new(sx, sy)) else {
                continue;
            };
            if let Some(target) = dst.cell_mut(Position::new(dx, dy)) {
                *target = cell.clone();
            }
        }
    }
}

/// Intersection of a horizontal span `[start, start + len)` (which may begin
/// left of zero) with `[clip_start, clip_start + clip_len)`.
///
/// Returns `(skip, dst_start, len)`: how many leading columns of the span are
/// cut off, where the visible part starts, and how wide it is.
pub fn clip_span(start: i32, len: u16, clip_start: u16, clip_len: u16) -> Option<(u16, u16, u16)> {
    let span_end = start + i32::from(len);
    let clip_end = i32::from(clip_start) + i32::from(clip_len);
    let visible_start = start.max(i32::from(clip_start));
    let visible_end = span_end.min(clip_end);
    if visible_end <= visible_start {
        return None;
    }
    let skip = (visible_start - start) as u16;
    Some((skip, visible_start as u16, (visible_end - visible_start) as u16))
}
