//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::portfolio::Section;
use crate::core::scroll::ScrollContainer;
use crate::core::strip::Direction;
use crate::core::units::{cols_to_units, rows_to_units};
use crate::ui::back_to_top::button_rect;
use crate::ui::layout::point_in_rect;
use crate::ui::nav::entry_rects;

use super::event::AppEvent;
use super::state::AppState;

/// Rows moved by one vertical wheel notch.
const WHEEL_ROWS: u16 = 3;

/// Dispatch one event from the reader.
pub fn handle_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(state, key),
        AppEvent::Mouse(mouse) => handle_mouse(state, mouse),
        AppEvent::Resize(w, h) => state.relayout(Rect::new(0, 0, w, h)),
        AppEvent::FocusLost => end_drag(state),
        AppEvent::Tick => state.tick(),
    }
}

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let page_rows = state.app_layout().page_area.height.max(1);

    match action {
        Action::ScrollUp => scroll_page_by(state, -rows_to_units(1)),
        Action::ScrollDown => scroll_page_by(state, rows_to_units(1)),
        Action::PageUp => scroll_page_by(state, -rows_to_units(page_rows)),
        Action::PageDown => scroll_page_by(state, rows_to_units(page_rows)),
        Action::StripPrev => advance_focused(state, Direction::Left),
        Action::StripNext => advance_focused(state, Direction::Right),
        Action::FocusNextStrip => focus_next_strip(state),
        Action::BackToTop => {
            state.back_to_top.activate(&mut state.page);
        }
        Action::JumpWorks => jump_to_section(state, Section::Works),
        Action::JumpStack => jump_to_section(state, Section::Stack),
        Action::JumpContact => jump_to_section(state, Section::Contact),
        Action::Quit => state.should_quit = true,
    }
}

/// Smoothly bring a section's first row to the top of the page.
fn jump_to_section(state: &mut AppState, section: Section) {
    let Some(row) = state.layout.section_row(section) else {
        return;
    };
    state.page.scroll_to_smooth(rows_to_units(row));
    tracing::debug!(?section, row, "jump to section");
    state.sync_scroll();
}

/// Smooth page scroll relative to the pending target.
fn scroll_page_by(state: &mut AppState, delta: f64) {
    state.page.scroll_by_smooth(delta);
    state.sync_scroll();
}

fn advance_focused(state: &mut AppState, direction: Direction) {
    if state.focused_strip.is_none() {
        let first = state.visible_strips().next();
        state.focused_strip = first;
    }
    if let Some(work) = state.focused_strip {
        state.strips[work].advance(direction);
    }
}

/// Cycle focus through the strips that render.
fn focus_next_strip(state: &mut AppState) {
    let visible: Vec<usize> = state.visible_strips().collect();
    if visible.is_empty() {
        state.focused_strip = None;
        return;
    }
    let next = match state.focused_strip.and_then(|f| visible.iter().position(|&w| w == f)) {
        Some(i) => visible[(i + 1) % visible.len()],
        None => visible[0],
    };
    state.focused_strip = Some(next);
    state.status_message = Some(format!("Focused: {}", state.strips[next].label()));
}

fn end_drag(state: &mut AppState) {
    if let Some(work) = state.drag_owner.take() {
        state.strips[work].pointer_leave();
    }
}

/// Where a mouse cell lands on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Nav(Section),
    Link(Section),
    BackToTop,
    Prev(usize),
    Next(usize),
    Viewport(usize),
    Page,
}

fn hit_test(state: &AppState, col: u16, row: u16) -> Option<Hit> {
    let app_layout = state.app_layout();
    if point_in_rect(app_layout.nav_area, col, row) {
        return entry_rects(app_layout.nav_area)
            .into_iter()
            .find(|(r, _)| point_in_rect(*r, col, row))
            .map(|(_, section)| Hit::Nav(section));
    }
    let page_area = app_layout.page_area;
    if !point_in_rect(page_area, col, row) {
        return None;
    }
    // The floating button sits above everything else.
    if state.back_to_top.visible()
        && button_rect(page_area).is_some_and(|r| point_in_rect(r, col, row))
    {
        return Some(Hit::BackToTop);
    }

    let view = state.page_view();
    for &(work, geom) in &state.layout.strips {
        let on = |rect: Rect| view.to_screen(rect).is_some_and(|r| point_in_rect(r, col, row));
        if on(geom.prev_button) {
            return Some(Hit::Prev(work));
        }
        if on(geom.next_button) {
            return Some(Hit::Next(work));
        }
        if on(geom.viewport) {
            return Some(Hit::Viewport(work));
        }
    }
    for &(rect, section) in &state.layout.links {
        if view.to_screen(rect).is_some_and(|r| point_in_rect(r, col, row)) {
            return Some(Hit::Link(section));
        }
    }
    Some(Hit::Page)
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let hit = hit_test(state, mouse.column, mouse.row);
    let pointer_x = cols_to_units(mouse.column);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match hit {
            Some(Hit::BackToTop) => {
                state.back_to_top.activate(&mut state.page);
            }
            Some(Hit::Nav(section) | Hit::Link(section)) => jump_to_section(state, section),
            Some(Hit::Prev(work)) => {
                state.focused_strip = Some(work);
                state.strips[work].advance(Direction::Left);
            }
            Some(Hit::Next(work)) => {
                state.focused_strip = Some(work);
                state.strips[work].advance(Direction::Right);
            }
            Some(Hit::Viewport(work)) => {
                end_drag(state);
                state.focused_strip = Some(work);
                state.strips[work].pointer_down(pointer_x);
                if let Some(session) = state.strips[work].drag_session() {
                    tracing::trace!(work, anchor = session.anchor_scroll_offset, "drag start");
                    state.drag_owner = Some(work);
                }
            }
            _ => {}
        },
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(work) = state.drag_owner else {
                return;
            };
            if hit == Some(Hit::Viewport(work)) {
                state.strips[work].pointer_move(pointer_x);
            } else {
                end_drag(state);
            }
        }
        MouseEventKind::Up(_) => {
            if let Some(work) = state.drag_owner.take() {
                state.strips[work].pointer_up();
            }
        }
        MouseEventKind::Moved => {
            if let Some(work) = state.drag_owner {
                if hit != Some(Hit::Viewport(work)) {
                    end_drag(state);
                }
            }
        }
        MouseEventKind::ScrollUp => {
            let offset = state.page.scroll_offset() - rows_to_units(WHEEL_ROWS);
            state.page.set_scroll_offset(offset);
            state.sync_scroll();
        }
        MouseEventKind::ScrollDown => {
            let offset = state.page.scroll_offset() + rows_to_units(WHEEL_ROWS);
            state.page.set_scroll_offset(offset);
            state.sync_scroll();
        }
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
            let direction = if mouse.kind == MouseEventKind::ScrollLeft {
                Direction::Left
            } else {
                Direction::Right
            };
            if let Some(Hit::Viewport(work) | Hit::Prev(work) | Hit::Next(work)) = hit {
                state.strips[work].wheel(direction);
            }
        }
        _ => {}
    }
}
