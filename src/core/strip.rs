//! Horizontally draggable image strip.
//!
//! The strip owns the ordered list of screenshots, the card geometry and the
//! ephemeral drag session.  The scroll offset itself lives in a host-owned
//! [`ScrollViewport`]; until the host mounts one, every drag and advance
//! request is silently ignored.

use std::fmt;

use super::scroll::{ScrollContainer, ScrollViewport};

/// Horizontal space between two neighbouring cards.
pub const CARD_GAP: f64 = 16.0;

/// How far content moves per unit of pointer travel while dragging.
pub const DEFAULT_DRAG_SPEED: f64 = 1.2;

// ───────────────────────────────────────── items ─────────────

/// Opaque reference to a displayable image (a URI such as `/images/a.png`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageItem(String);

impl ImageItem {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn uri(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ───────────────────────────────────────── geometry ──────────

/// Card width breakpoint, chosen from the page width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardSize {
    Narrow,
    #[default]
    Standard,
    Wide,
}

impl CardSize {
    /// Pick the breakpoint for a page that is `page_width` units wide.
    pub fn for_page_width(page_width: f64) -> Self {
        if page_width < 640.0 {
            CardSize::Narrow
        } else if page_width < 1024.0 {
            CardSize::Standard
        } else {
            CardSize::Wide
        }
    }

    /// Card width in logical units.
    pub fn width(self) -> f64 {
        match self {
            CardSize::Narrow => 220.0,
            CardSize::Standard => 280.0,
            CardSize::Wide => 320.0,
        }
    }

    /// Distance between the left edges of two neighbouring cards.
    pub fn pitch(self) -> f64 {
        self.width() + CARD_GAP
    }
}

/// Placement of one card inside the strip content.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSlot<'a> {
    pub index: usize,
    pub item: &'a ImageItem,
    /// Left edge, in content coordinates.
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

// ───────────────────────────────────────── drag ──────────────

/// State captured on pointer-down and consulted on every pointer-move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub anchor_pointer_x: f64,
    pub anchor_scroll_offset: f64,
}

impl DragSession {
    /// Scroll offset for the pointer at `pointer_x`.  Dragging right reveals
    /// earlier content, dragging left reveals later content.
    pub fn offset_for(&self, pointer_x: f64, speed: f64) -> f64 {
        let delta = (pointer_x - self.anchor_pointer_x) * speed;
        self.anchor_scroll_offset - delta
    }
}

// ───────────────────────────────────────── strip ─────────────

#[derive(Debug)]
pub struct DraggableImageStrip {
    label: String,
    images: Vec<ImageItem>,
    card_size: CardSize,
    drag_speed: f64,
    /// `Some` exactly while a drag gesture is in progress.
    drag: Option<DragSession>,
    /// Host scroll container; `None` until the first layout pass.
    viewport: Option<ScrollViewport>,
}

impl DraggableImageStrip {
    pub fn new(label: impl Into<String>, images: Vec<ImageItem>) -> Self {
        Self {
            label: label.into(),
            images,
            card_size: CardSize::default(),
            drag_speed: DEFAULT_DRAG_SPEED,
            drag: None,
            viewport: None,
        }
    }

    pub fn with_drag_speed(mut self, speed: f64) -> Self {
        self.drag_speed = speed;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn images(&self) -> &[ImageItem] {
        &self.images
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn card_size(&self) -> CardSize {
        self.card_size
    }

    pub fn drag_speed(&self) -> f64 {
        self.drag_speed
    }

    /// Total content width of all cards and the gaps between them.
    pub fn content_width(&self) -> f64 {
        let n = self.images.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        n * self.card_size.width() + (n - 1.0) * CARD_GAP
    }

    /// One slot per image, left to right in input order.  Empty strips
    /// produce nothing at all.
    pub fn cards(&self) -> Vec<CardSlot<'_>> {
        let pitch = self.card_size.pitch();
        self.images
            .iter()
            .enumerate()
            .map(|(index, item)| CardSlot {
                index,
                item,
                left: index as f64 * pitch,
                width: self.card_size.width(),
            })
            .collect()
    }

    // ── host container ──────────────────────────────────────────

    /// Attach (or resize) the host scroll container.
    pub fn mount_viewport(&mut self, width: f64, card_size: CardSize) {
        self.card_size = card_size;
        let content = self.content_width();
        match self.viewport.as_mut() {
            Some(vp) => vp.resize(width, content),
            None => self.viewport = Some(ScrollViewport::new(width, content)),
        }
    }

    /// Detach the host container.  Any drag in progress ends with it.
    pub fn unmount_viewport(&mut self) {
        self.viewport = None;
        self.drag = None;
    }

    pub fn viewport(&self) -> Option<&ScrollViewport> {
        self.viewport.as_ref()
    }

    pub fn scroll_offset(&self) -> Option<f64> {
        self.viewport.as_ref().map(|vp| vp.scroll_offset())
    }

    // ── navigation ─────────────────────────────────────────────

    /// Smoothly scroll by one card plus the gap.  The viewport clamps at
    /// both ends; there is no wraparound.
    pub fn advance(&mut self, direction: Direction) {
        let pitch = self.card_size.pitch();
        let Some(vp) = self.viewport.as_mut() else {
            return;
        };
        vp.scroll_by_smooth(direction.sign() * pitch);
        tracing::trace!(strip = %self.label, ?direction, target = vp.scroll_target(), "advance");
    }

    /// Horizontal wheel: settle on the next card edge in `direction`.
    pub fn wheel(&mut self, direction: Direction) {
        let pitch = self.card_size.pitch();
        let Some(vp) = self.viewport.as_mut() else {
            return;
        };
        let from = vp.scroll_target() / pitch;
        let index = match direction {
            Direction::Right => (from + 1e-6).floor() + 1.0,
            Direction::Left => (from - 1e-6).ceil() - 1.0,
        };
        vp.scroll_to_smooth(index.max(0.0) * pitch);
    }

    // ── pointer drag ───────────────────────────────────────────

    pub fn pointer_down(&mut self, pointer_x: f64) {
        let Some(vp) = self.viewport.as_ref() else {
            return;
        };
        self.drag = Some(DragSession {
            anchor_pointer_x: pointer_x,
            anchor_scroll_offset: vp.scroll_offset(),
        });
    }

    pub fn pointer_move(&mut self, pointer_x: f64) {
        let (Some(session), Some(vp)) = (self.drag, self.viewport.as_mut()) else {
            return;
        };
        vp.set_scroll_offset(session.offset_for(pointer_x, self.drag_speed));
    }

    /// End the drag, leaving the offset where the last move put it.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn pointer_leave(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Advance the viewport animation.  Returns `true` if anything moved.
    pub fn tick(&mut self) -> bool {
        self.viewport.as_mut().is_some_and(|vp| vp.tick())
    }
}
