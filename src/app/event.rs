//! Terminal event abstraction.
//!
//! A background task polls crossterm and forwards a reduced event set over a
//! channel, interleaved with animation ticks, so the main loop stays
//! non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The terminal lost focus; any pointer gesture in progress is over.
    FocusLost,
    /// Animation frame.
    Tick,
}

impl AppEvent {
    /// Reduce a raw crossterm event.  Key releases and repeats on terminals
    /// that report them are dropped, as are pastes and focus gains.
    fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) if k.kind == KeyEventKind::Press => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            CtEvent::FocusLost => Some(AppEvent::FocusLost),
            _ => None,
        }
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.  A `Tick` is sent whenever `tick_rate`
/// elapses without input.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let next = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(ev) => match AppEvent::from_crossterm(ev) {
                    Some(app_event) => app_event,
                    None => continue,
                },
                Err(e) => {
                    tracing::warn!("terminal read failed: {e}");
                    continue;
                }
            },
            Ok(false) => AppEvent::Tick,
            Err(e) => {
                tracing::warn!("terminal poll failed: {e}");
                AppEvent::Tick
            }
        };
        if tx.send(next).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
