//! Draw RGBA thumbnails with Unicode `▀` half-blocks (2 pixels per cell).

use image::imageops::{self, FilterType};
use image::RgbaImage;
use ratatui::{buffer::Buffer, layout::Position, layout::Rect, style::Color};

/// Fill `area` with `thumb`, scaling to cover and cropping the overflow
/// around the centre (CSS `object-fit: cover`).
pub fn render_cover(thumb: &RgbaImage, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 || thumb.width() == 0 || thumb.height() == 0 {
        return;
    }

    // Pixel budget: each column = 1 px wide, each row = 2 px tall.
    let want_w = u32::from(area.width);
    let want_h = u32::from(area.height) * 2;

    let src_w = f64::from(thumb.width());
    let src_h = f64::from(thumb.height());
    let scale = (f64::from(want_w) / src_w).max(f64::from(want_h) / src_h);
    let scaled_w = ((src_w * scale).ceil() as u32).max(want_w);
    let scaled_h = ((src_h * scale).ceil() as u32).max(want_h);

    let scaled = imageops::resize(thumb, scaled_w, scaled_h, FilterType::Triangle);
    let crop_x = (scaled_w - want_w) / 2;
    let crop_y = (scaled_h - want_h) / 2;
    let rgba = imageops::crop_imm(&scaled, crop_x, crop_y, want_w, want_h).to_image();

    for row in 0..area.height {
        let yt = u32::from(row) * 2;
        for col in 0..area.width {
            let t = rgba.get_pixel(u32::from(col), yt);
            let b = rgba.get_pixel(u32::from(col), yt + 1);
            if let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) {
                cell.set_char('▀')
                    .set_fg(Color::Rgb(t[0], t[1], t[2]))
                    .set_bg(Color::Rgb(b[0], b[1], b[2]));
            }
        }
    }
}
