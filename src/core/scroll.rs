//! Scroll containers: the host side of every scrollable area.
//!
//! A [`ScrollViewport`] owns one axis of a scrollable region: how much is
//! visible, how much content there is, and the current offset.  Out-of-range
//! requests are clamped here, never by the components that issue them.
//! Smooth requests are fire-and-forget: they set a target that
//! [`SmoothScroll`] eases toward on every tick.

/// Exponential ease-out animator over a single scalar offset.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current (displayed) position.
    position: f64,
    /// Where the animation is heading.  Equal to `position` when idle.
    target: f64,
    /// Fraction of the remaining distance covered per tick.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Move instantly, cancelling any animation in flight.
    pub fn jump_to(&mut self, value: f64) {
        self.position = value;
        self.target = value;
    }

    /// Start (or retarget) an animation toward `value`.
    pub fn animate_to(&mut self, value: f64) {
        self.target = value;
    }

    /// Advance one frame.  Returns `true` if the position moved.
    pub fn tick(&mut self) -> bool {
        let remaining = self.target - self.position;
        if remaining == 0.0 {
            return false;
        }
        if remaining.abs() < 0.5 {
            self.position = self.target;
        } else {
            self.position += remaining * self.speed;
        }
        true
    }

    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}

/// Something that owns a scroll offset along one axis.
pub trait ScrollContainer {
    /// Offset currently displayed.
    fn scroll_offset(&self) -> f64;

    /// Offset the container is settling toward (same as the displayed
    /// offset when no animation is running).
    fn scroll_target(&self) -> f64 {
        self.scroll_offset()
    }

    /// Set the offset immediately.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Animate toward an absolute offset.
    fn scroll_to_smooth(&mut self, offset: f64);

    /// Animate by a relative amount.  Successive calls compose against the
    /// pending target, so `+d` followed by `-d` lands where it started.
    fn scroll_by_smooth(&mut self, delta: f64) {
        let target = self.scroll_target() + delta;
        self.scroll_to_smooth(target);
    }
}

/// One scrollable axis with clamping and smooth scrolling.
#[derive(Debug, Clone)]
pub struct ScrollViewport {
    /// Visible length along the axis.
    extent: f64,
    /// Total content length along the axis.
    content_len: f64,
    scroll: SmoothScroll,
}

/// Default easing speed for smooth scroll requests (per tick).
pub const DEFAULT_SMOOTH_SPEED: f64 = 0.35;

impl ScrollViewport {
    pub fn new(extent: f64, content_len: f64) -> Self {
        Self {
            extent: extent.max(0.0),
            content_len: content_len.max(0.0),
            scroll: SmoothScroll::new(DEFAULT_SMOOTH_SPEED),
        }
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn content_len(&self) -> f64 {
        self.content_len
    }

    /// Largest reachable offset.
    pub fn max_offset(&self) -> f64 {
        (self.content_len - self.extent).max(0.0)
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset())
    }

    /// Update the geometry (terminal resize) and pull the offset back into
    /// range if the content no longer reaches that far.
    pub fn resize(&mut self, extent: f64, content_len: f64) {
        self.extent = extent.max(0.0);
        self.content_len = content_len.max(0.0);
        let position = self.clamp(self.scroll.position());
        let target = self.clamp(self.scroll.target());
        self.scroll.jump_to(position);
        self.scroll.animate_to(target);
    }

    /// Advance any running animation.  Returns `true` if the offset moved.
    pub fn tick(&mut self) -> bool {
        self.scroll.tick()
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }

    pub fn at_start(&self) -> bool {
        self.scroll.target() <= 0.0
    }

    pub fn at_end(&self) -> bool {
        self.scroll.target() >= self.max_offset()
    }
}

impl ScrollContainer for ScrollViewport {
    fn scroll_offset(&self) -> f64 {
        self.scroll.position()
    }

    fn scroll_target(&self) -> f64 {
        self.scroll.target()
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        let offset = self.clamp(offset);
        self.scroll.jump_to(offset);
    }

    fn scroll_to_smooth(&mut self, offset: f64) {
        let offset = self.clamp(offset);
        self.scroll.animate_to(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(vp: &mut ScrollViewport) {
        for _ in 0..200 {
            if !vp.tick() {
                break;
            }
        }
    }

    #[test]
    fn instant_offsets_are_clamped() {
        let mut vp = ScrollViewport::new(100.0, 300.0);
        vp.set_scroll_offset(-50.0);
        assert_eq!(vp.scroll_offset(), 0.0);
        vp.set_scroll_offset(1000.0);
        assert_eq!(vp.scroll_offset(), 200.0);
    }

    #[test]
    fn smooth_scroll_eases_onto_target() {
        let mut vp = ScrollViewport::new(100.0, 1000.0);
        vp.scroll_to_smooth(300.0);
        assert_eq!(vp.scroll_offset(), 0.0);
        assert!(vp.tick());
        let first = vp.scroll_offset();
        assert!(first > 0.0 && first < 300.0);
        settle(&mut vp);
        assert_eq!(vp.scroll_offset(), 300.0);
        assert!(!vp.is_animating());
    }

    #[test]
    fn relative_requests_compose_against_pending_target() {
        let mut vp = ScrollViewport::new(100.0, 1000.0);
        vp.set_scroll_offset(200.0);
        vp.scroll_by_smooth(150.0);
        vp.scroll_by_smooth(-150.0);
        assert_eq!(vp.scroll_target(), 200.0);
        settle(&mut vp);
        assert_eq!(vp.scroll_offset(), 200.0);
    }

    #[test]
    fn content_shorter_than_extent_never_scrolls() {
        let mut vp = ScrollViewport::new(500.0, 200.0);
        vp.scroll_by_smooth(100.0);
        settle(&mut vp);
        assert_eq!(vp.scroll_offset(), 0.0);
        assert!(vp.at_start() && vp.at_end());
    }

    #[test]
    fn resize_pulls_offset_back_into_range() {
        let mut vp = ScrollViewport::new(100.0, 1000.0);
        vp.set_scroll_offset(900.0);
        vp.resize(100.0, 400.0);
        assert_eq!(vp.scroll_offset(), 300.0);
        assert!(!vp.is_animating());
    }

    #[test]
    fn jump_cancels_animation() {
        let mut s = SmoothScroll::new(0.5);
        s.animate_to(100.0);
        s.tick();
        s.jump_to(10.0);
        assert!(!s.is_animating());
        assert!(!s.tick());
        assert_eq!(s.position(), 10.0);
    }
}
