//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    portfolio::{Portfolio, Section},
    scroll::{ScrollContainer, ScrollViewport},
    strip::{DraggableImageStrip, ImageItem},
    units::{cols_to_units, rows_to_units, units_to_rows},
    visibility::{BackToTop, ScrollBus, ScrollVisibilityToggle},
};
use crate::ui::layout::{AppLayout, PageLayout, PageView};

/// Top-level application state.
pub struct AppState {
    pub portfolio: Portfolio,
    /// One strip per work, index-aligned with `portfolio.works`.
    pub strips: Vec<DraggableImageStrip>,
    /// Vertical scroll of the whole page (logical units).
    pub page: ScrollViewport,
    /// Page-wide scroll notifications.
    pub scroll_bus: ScrollBus,
    /// Mounted back-to-top control (owns its bus subscription).
    pub back_to_top: BackToTop,
    /// Strip that keyboard navigation applies to.
    pub focused_strip: Option<usize>,
    /// Work index of the strip that owns the current drag, if any.
    pub drag_owner: Option<usize>,
    pub config: AppConfig,
    /// Full terminal area, refreshed on resize.
    pub terminal_area: Rect,
    /// Page geometry for the current width.
    pub layout: PageLayout,
    /// Decoded thumbnails, keyed by image URI.
    pub image_cache: HashMap<ImageItem, Arc<image::RgbaImage>>,
    /// Images that could not be loaded (shown as placeholders).
    pub failed_images: HashSet<ImageItem>,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(portfolio: Portfolio, config: AppConfig, terminal_area: Rect) -> Self {
        let strips: Vec<DraggableImageStrip> = portfolio
            .works
            .iter()
            .map(|w| DraggableImageStrip::new(w.title, w.images.clone()).with_drag_speed(config.drag_speed))
            .collect();
        let scroll_bus = ScrollBus::new();
        let toggle = ScrollVisibilityToggle::new(config.back_to_top_threshold)
            .with_hysteresis(config.threshold_hysteresis);
        let back_to_top = BackToTop::mount(&scroll_bus, toggle);
        let layout = PageLayout::compute(&portfolio, &strips, terminal_area.width);

        let mut state = Self {
            portfolio,
            strips,
            page: ScrollViewport::new(0.0, 0.0),
            scroll_bus,
            back_to_top,
            focused_strip: None,
            drag_owner: None,
            config,
            terminal_area,
            layout,
            image_cache: HashMap::new(),
            failed_images: HashSet::new(),
            status_message: None,
            should_quit: false,
        };
        state.relayout(terminal_area);
        state
    }

    pub fn app_layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    /// Recompute page geometry for a (new) terminal size and mount every
    /// non-empty strip's viewport at its new width.
    pub fn relayout(&mut self, area: Rect) {
        self.terminal_area = area;
        let page_area = self.app_layout().page_area;
        self.layout = PageLayout::compute(&self.portfolio, &self.strips, page_area.width);

        for (work, strip) in self.strips.iter_mut().enumerate() {
            match self.layout.strip_geometry(work) {
                Some(geom) => {
                    strip.mount_viewport(cols_to_units(geom.viewport.width), self.layout.card_size)
                }
                None => strip.unmount_viewport(),
            }
        }
        self.drag_owner = self.drag_owner.filter(|&w| self.strips[w].is_dragging());

        self.page
            .resize(rows_to_units(page_area.height), rows_to_units(self.layout.height));
        tracing::debug!(
            width = area.width,
            height = area.height,
            page_rows = self.layout.height,
            card_size = ?self.layout.card_size,
            "relayout"
        );
        self.sync_scroll();
    }

    /// First page row currently shown.
    pub fn scroll_row(&self) -> u16 {
        units_to_rows(self.page.scroll_offset()).max(0) as u16
    }

    pub fn page_view(&self) -> PageView {
        PageView {
            area: self.app_layout().page_area,
            scroll_row: self.scroll_row(),
        }
    }

    /// Announce the page offset and let the back-to-top control react.
    pub fn sync_scroll(&mut self) {
        self.scroll_bus.publish(self.page.scroll_offset());
        self.back_to_top.poll();
    }

    /// Advance every running animation by one frame.
    pub fn tick(&mut self) {
        if self.page.tick() {
            self.sync_scroll();
        }
        for strip in &mut self.strips {
            strip.tick();
        }
    }

    /// Section at the top of the visible page, for the nav highlight.
    pub fn active_section(&self) -> Option<Section> {
        self.layout.section_at(self.scroll_row())
    }

    /// Strips that actually render, in page order.
    pub fn visible_strips(&self) -> impl Iterator<Item = usize> + '_ {
        self.layout.strips.iter().map(|(work, _)| *work)
    }

    /// Record a finished thumbnail decode.
    pub fn image_loaded(&mut self, item: ImageItem, image: image::RgbaImage) {
        self.failed_images.remove(&item);
        self.image_cache.insert(item, Arc::new(image));
    }

    pub fn image_failed(&mut self, item: ImageItem) {
        self.failed_images.insert(item);
    }
}
