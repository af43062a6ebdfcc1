//! Scroll-linked visibility of the floating "back to top" control.
//!
//! The derivation is a pure function of the latest vertical offset.  The
//! page-wide scroll notifications travel over a [`ScrollBus`]; a mounted
//! [`BackToTop`] holds the only subscription it needs and releases it when
//! dropped.

use tokio::sync::watch;

use super::scroll::ScrollContainer;

/// Default offset (logical units) past which the control appears.
pub const DEFAULT_THRESHOLD: f64 = 400.0;

/// Should the control be visible at `offset`?
///
/// `hysteresis` widens the switch points around `threshold` depending on the
/// previous state: a hidden control appears above `threshold + hysteresis`,
/// a visible one disappears at or below `threshold - hysteresis`.  With zero
/// hysteresis this is exactly `offset > threshold`.
pub fn visibility_for(offset: f64, threshold: f64, hysteresis: f64, previous: bool) -> bool {
    if previous {
        offset > threshold - hysteresis
    } else {
        offset > threshold + hysteresis
    }
}

/// Threshold comparison plus the last published value for change detection.
#[derive(Debug, Clone)]
pub struct ScrollVisibilityToggle {
    threshold: f64,
    hysteresis: f64,
    visible: bool,
}

impl ScrollVisibilityToggle {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            hysteresis: 0.0,
            visible: false,
        }
    }

    pub fn with_hysteresis(mut self, hysteresis: f64) -> Self {
        self.hysteresis = hysteresis.max(0.0);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Recompute for a new offset.  Returns the new value only if it changed.
    pub fn observe(&mut self, offset: f64) -> Option<bool> {
        let next = visibility_for(offset, self.threshold, self.hysteresis, self.visible);
        if next == self.visible {
            return None;
        }
        self.visible = next;
        Some(next)
    }
}

impl Default for ScrollVisibilityToggle {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

// ───────────────────────────────────────── bus ───────────────

/// Page-wide vertical scroll notifications.
#[derive(Debug)]
pub struct ScrollBus {
    tx: watch::Sender<f64>,
}

impl ScrollBus {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0.0);
        Self { tx }
    }

    /// Announce the current vertical offset.  Works with or without
    /// subscribers; unchanged offsets are not re-announced.
    pub fn publish(&self, offset: f64) {
        self.tx.send_if_modified(|current| {
            if *current == offset {
                return false;
            }
            *current = offset;
            true
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ScrollBus {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────── control ───────────

/// The mounted back-to-top control: a toggle bound to a bus subscription.
///
/// The subscription is owned by this value and released on drop, so it can
/// never outlive the control.
#[derive(Debug)]
pub struct BackToTop {
    toggle: ScrollVisibilityToggle,
    rx: watch::Receiver<f64>,
}

impl BackToTop {
    pub fn mount(bus: &ScrollBus, mut toggle: ScrollVisibilityToggle) -> Self {
        let mut rx = bus.subscribe();
        let offset = *rx.borrow_and_update();
        toggle.observe(offset);
        tracing::trace!(subscribers = bus.subscriber_count(), offset, "back-to-top mounted");
        Self { toggle, rx }
    }

    /// Consume any pending scroll notification.  Returns the new visibility
    /// when it changed.
    pub fn poll(&mut self) -> Option<bool> {
        if !self.rx.has_changed().unwrap_or(false) {
            return None;
        }
        let offset = *self.rx.borrow_and_update();
        let changed = self.toggle.observe(offset);
        if let Some(visible) = changed {
            tracing::debug!(offset, visible, "back-to-top visibility changed");
        }
        changed
    }

    pub fn visible(&self) -> bool {
        self.toggle.visible()
    }

    pub fn threshold(&self) -> f64 {
        self.toggle.threshold()
    }

    /// Smoothly scroll `page` back to the top.
    pub fn activate(&self, page: &mut impl ScrollContainer) {
        page.scroll_to_smooth(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scroll::ScrollViewport;

    #[test]
    fn visible_iff_past_threshold() {
        assert!(!visibility_for(0.0, 400.0, 0.0, false));
        assert!(!visibility_for(400.0, 400.0, 0.0, false));
        assert!(visibility_for(401.0, 400.0, 0.0, false));
        assert!(!visibility_for(400.0, 400.0, 0.0, true));
    }

    #[test]
    fn crossing_up_then_down_toggles_twice() {
        let mut toggle = ScrollVisibilityToggle::new(400.0);
        let changes: Vec<bool> = [0.0, 200.0, 390.0, 410.0, 800.0, 500.0, 399.0, 100.0, 0.0]
            .into_iter()
            .filter_map(|offset| toggle.observe(offset))
            .collect();
        assert_eq!(changes, [true, false]);
    }

    #[test]
    fn hysteresis_suppresses_flicker_at_the_boundary() {
        let mut toggle = ScrollVisibilityToggle::new(400.0).with_hysteresis(8.0);
        assert_eq!(toggle.observe(405.0), None);
        assert_eq!(toggle.observe(409.0), Some(true));
        assert_eq!(toggle.observe(395.0), None);
        assert_eq!(toggle.observe(405.0), None);
        assert_eq!(toggle.observe(392.0), Some(false));
    }

    #[test]
    fn mounted_control_follows_the_bus() {
        let bus = ScrollBus::new();
        let mut control = BackToTop::mount(&bus, ScrollVisibilityToggle::new(400.0));
        assert!(!control.visible());
        assert_eq!(control.poll(), None);

        bus.publish(500.0);
        assert_eq!(control.poll(), Some(true));
        assert_eq!(control.poll(), None);

        bus.publish(600.0);
        assert_eq!(control.poll(), None);
        assert!(control.visible());

        bus.publish(10.0);
        assert_eq!(control.poll(), Some(false));
    }

    #[test]
    fn mounting_reads_the_current_offset() {
        let bus = ScrollBus::new();
        bus.publish(900.0);
        let control = BackToTop::mount(&bus, ScrollVisibilityToggle::new(400.0));
        assert!(control.visible());
    }

    #[test]
    fn dropping_the_control_unsubscribes() {
        let bus = ScrollBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        let control = BackToTop::mount(&bus, ScrollVisibilityToggle::default());
        assert_eq!(bus.subscriber_count(), 1);
        drop(control);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(1000.0);
    }

    #[test]
    fn activate_scrolls_page_to_top() {
        let bus = ScrollBus::new();
        let control = BackToTop::mount(&bus, ScrollVisibilityToggle::default());
        let mut page = ScrollViewport::new(320.0, 4000.0);
        page.set_scroll_offset(1200.0);

        control.activate(&mut page);
        for _ in 0..200 {
            page.tick();
        }
        assert_eq!(page.scroll_offset(), 0.0);

        control.activate(&mut page);
        assert_eq!(page.scroll_offset(), 0.0);
        assert!(!page.is_animating());
    }
}
