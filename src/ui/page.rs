//! The scrolled portfolio page.
//!
//! [`compose`] flattens the content into one-row text lines plus strip
//! slots.  [`PageWidget`] draws the whole page off-screen and copies the
//! window selected by the vertical scroll into the frame.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::portfolio::{Highlight, LinkItem, Portfolio, Section};
use crate::core::strip::{DraggableImageStrip, ImageItem};

use super::blit::blit;
use super::layout::PageLayout;
use super::strip::ImageStripWidget;
use super::theme::Theme;

/// One piece of the page, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum PagePiece {
    /// A single row of text.
    Line(Line<'static>),
    /// The screenshot strip of the work at this index.
    Strip(usize),
    /// Zero-height marker: the section starts on the next row.
    Anchor(Section),
    /// One row of buttons, each jumping to a section.
    Buttons(Vec<(&'static str, Section)>),
}

/// Gap between two buttons in a [`PagePiece::Buttons`] row.
pub const BUTTON_GAP: u16 = 2;

/// Text of one button, e.g. `[ View works ]`.
pub fn button_text(label: &str) -> String {
    format!("[ {label} ]")
}

/// Flatten the page into rows wrapped to `width` columns.  Works whose strip
/// is empty get no strip slot at all.
pub fn compose(portfolio: &Portfolio, strips: &[DraggableImageStrip], width: u16) -> Vec<PagePiece> {
    let width = usize::from(width.max(8));
    let mut pieces = Vec::new();

    // ── hero ──
    let mut hero = vec![
        Line::raw(""),
        styled(portfolio.brand(), Theme::muted_style()),
        styled(portfolio.headline.to_string(), Theme::headline_style()),
        Line::raw(""),
    ];
    hero.extend(wrap(portfolio.intro, width).into_iter().map(|l| styled(l, Theme::body_style())));
    hero.push(Line::raw(""));
    push_lines(&mut pieces, hero);
    if !portfolio.calls_to_action.is_empty() {
        pieces.push(PagePiece::Buttons(
            portfolio.calls_to_action.iter().map(|c| (c.label, c.target)).collect(),
        ));
        pieces.push(PagePiece::Line(Line::raw("")));
    }
    let mut hero = Vec::new();
    for h in &portfolio.hero_highlights {
        hero.extend(highlight_lines(h, width));
    }
    hero.push(Line::raw(""));
    push_lines(&mut pieces, hero);

    // ── works ──
    pieces.push(PagePiece::Anchor(Section::Works));
    push_lines(&mut pieces, section_title(Section::Works.label(), width));
    for (i, work) in portfolio.works.iter().enumerate() {
        let mut body = vec![Line::raw("")];
        for l in wrap(work.title, width) {
            body.push(styled(l, Theme::headline_style()));
        }
        for l in wrap(work.subtitle, width) {
            body.push(styled(l, Theme::body_style()));
        }
        body.push(Line::raw(""));
        body.extend(chip_lines(&work.tags, width));
        body.push(Line::raw(""));
        for bullet in &work.bullets {
            body.extend(bullet_lines(bullet, width));
        }
        for link in &work.links {
            body.extend(link_lines(link, width));
        }
        push_lines(&mut pieces, body);

        if strips.get(i).is_some_and(|s| !s.is_empty()) {
            pieces.push(PagePiece::Strip(i));
        }

        let mut tail = vec![Line::raw("")];
        for h in &work.highlights {
            tail.extend(highlight_lines(h, width));
        }
        push_lines(&mut pieces, tail);
    }

    // ── stack ──
    pieces.push(PagePiece::Line(Line::raw("")));
    pieces.push(PagePiece::Anchor(Section::Stack));
    let mut stack = section_title(Section::Stack.label(), width);
    stack.extend(chip_lines(&portfolio.tech_stack, width));
    stack.push(Line::raw(""));
    push_lines(&mut pieces, stack);

    // ── contact ──
    let contact = &portfolio.contact;
    pieces.push(PagePiece::Anchor(Section::Contact));
    let mut body = section_title(Section::Contact.label(), width);
    body.push(styled(contact.name.to_string(), Theme::headline_style()));
    for l in wrap(contact.blurb, width) {
        body.push(styled(l, Theme::body_style()));
    }
    body.push(Line::raw(""));
    for link in &contact.links {
        body.extend(link_lines(link, width));
    }
    body.push(Line::raw(""));

    // ── footer ──
    body.push(styled("─".repeat(width), Theme::muted_style()));
    body.push(styled(portfolio.copyright(), Theme::muted_style()));
    body.push(styled(portfolio.footer_note.to_string(), Theme::muted_style()));
    push_lines(&mut pieces, body);

    pieces
}

fn push_lines(pieces: &mut Vec<PagePiece>, lines: Vec<Line<'static>>) {
    pieces.extend(lines.into_iter().map(PagePiece::Line));
}

/// A link with its target spelled out, e.g. `Email: a@b.c  <mailto:a@b.c>`.
/// The target drops to its own indented rows when both don't fit.
fn link_lines(link: &LinkItem, width: usize) -> Vec<Line<'static>> {
    let target = format!("<{}>", link.href);
    let label_width = link.label.chars().count();
    if label_width + 2 + target.chars().count() <= width {
        return vec![Line::from(vec![
            Span::styled(link.label.to_string(), Theme::link_style()),
            Span::styled(format!("  {target}"), Theme::muted_style()),
        ])];
    }
    let mut out: Vec<Line<'static>> = wrap(link.label, width)
        .into_iter()
        .map(|l| styled(l, Theme::link_style()))
        .collect();
    out.extend(
        wrap(&target, width.saturating_sub(2))
            .into_iter()
            .map(|l| styled(format!("  {l}"), Theme::muted_style())),
    );
    out
}

/// Render a row of section buttons.
fn buttons_line(buttons: &[(&'static str, Section)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (label, _)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" ".repeat(usize::from(BUTTON_GAP))));
        }
        let style = if i == 0 {
            Theme::cta_primary_style()
        } else {
            Theme::cta_style()
        };
        spans.push(Span::styled(button_text(label), style));
    }
    Line::from(spans)
}

fn styled(text: String, style: Style) -> Line<'static> {
    Line::from(Span::styled(text, style))
}

fn section_title(title: &str, width: usize) -> Vec<Line<'static>> {
    let rule = "─".repeat(width.saturating_sub(title.chars().count() + 4));
    vec![Line::from(vec![
        Span::styled(format!("── {title} "), Theme::section_title_style()),
        Span::styled(rule, Theme::muted_style()),
    ])]
}

fn highlight_lines(h: &Highlight, width: usize) -> Vec<Line<'static>> {
    let label = format!("▌ {}  ", h.label);
    let indent = label.chars().count();
    wrap(h.value, width.saturating_sub(indent).max(8))
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            let lead = if i == 0 { label.clone() } else { " ".repeat(indent) };
            Line::from(vec![
                Span::styled(lead, Theme::highlight_label_style()),
                Span::styled(part, Theme::highlight_value_style()),
            ])
        })
        .collect()
}

fn bullet_lines(text: &str, width: usize) -> Vec<Line<'static>> {
    wrap(text, width.saturating_sub(2).max(8))
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            let lead = if i == 0 { "• " } else { "  " };
            styled(format!("{lead}{part}"), Theme::body_style())
        })
        .collect()
}

/// Lay chips out left to right, wrapping between chips.
fn chip_lines(chips: &[&str], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for chip in chips {
        let text = format!("[{chip}]");
        let w = text.chars().count();
        if used > 0 && used + 1 + w > width {
            lines.push(Line::from(std::mem::take(&mut spans)));
            used = 0;
        }
        if used > 0 {
            spans.push(Span::raw(" "));
            used += 1;
        }
        spans.push(Span::styled(text, Theme::chip_style()));
        used += w;
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

/// Greedy word wrap on character counts.  Words longer than `width` are
/// split hard.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if used > 0 {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if used > 0 && used + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if used > 0 {
            current.push(' ');
            used += 1;
        }
        used += word.len();
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ───────────────────────────────────────── widget ────────────

/// Draws the page scrolled to `scroll_row`.
pub struct PageWidget<'a> {
    pub layout: &'a PageLayout,
    pub strips: &'a [DraggableImageStrip],
    pub image_cache: &'a HashMap<ImageItem, Arc<image::RgbaImage>>,
    pub failed_images: &'a HashSet<ImageItem>,
    pub focused_strip: Option<usize>,
    pub scroll_row: u16,
}

impl<'a> Widget for PageWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.layout;
        if area.width == 0 || area.height == 0 || layout.height == 0 {
            return;
        }

        let mut page = Buffer::empty(Rect::new(0, 0, layout.width, layout.height));
        for (y, piece) in &layout.pieces {
            match piece {
                PagePiece::Line(line) => {
                    page.set_line(layout.content_x, *y, line, layout.content_width);
                }
                PagePiece::Buttons(buttons) => {
                    page.set_line(layout.content_x, *y, &buttons_line(buttons), layout.content_width);
                }
                PagePiece::Anchor(_) => {}
                PagePiece::Strip(work) => {
                    let (Some(strip), Some(geom)) =
                        (self.strips.get(*work), layout.strip_geometry(*work))
                    else {
                        continue;
                    };
                    ImageStripWidget {
                        strip,
                        image_cache: self.image_cache,
                        failed_images: self.failed_images,
                        focused: self.focused_strip == Some(*work),
                    }
                    .render(geom.area, &mut page);
                }
            }
        }

        let visible_rows = layout
            .height
            .saturating_sub(self.scroll_row)
            .min(area.height);
        let width = layout.width.min(area.width);
        blit(
            &page,
            Rect::new(0, self.scroll_row, width, visible_rows),
            buf,
            area.x,
            area.y,
        );
    }
}
