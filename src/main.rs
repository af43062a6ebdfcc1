//! A terminal portfolio viewer.
//!
//! Run the binary to browse the built-in portfolio page.  Screenshots are
//! read from `--assets` (default `public/`), so `/images/home.png` resolves
//! to `public/images/home.png`.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use crate::app::{event::spawn_event_reader, handler, state::AppState};
use crate::core::{images, portfolio::Portfolio};
use crate::ui::{back_to_top::BackToTopButton, nav::NavBar, page::PageWidget, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal portfolio viewer")]
struct Cli {
    /// Directory that image paths like `/images/home.png` are resolved against.
    #[arg(long, default_value = "public")]
    assets: PathBuf,

    /// Animation frame interval in milliseconds.
    #[arg(long = "tick-ms", default_value_t = 33)]
    tick_ms: u64,

    /// Write the effective configuration to disk and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

type Term = Terminal<CrosstermBackend<Stdout>>;

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; the UI owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let user_config = config::AppConfig::load();

    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let portfolio = Portfolio::builtin();
    let mut image_results = images::spawn_loader(cli.assets.clone(), portfolio.image_items());

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let area = terminal.size()?;
    let mut state = AppState::new(
        portfolio,
        user_config,
        ratatui::layout::Rect::new(0, 0, area.width, area.height),
    );
    tracing::info!(assets = %cli.assets.display(), "started");

    let tick_rate = Duration::from_millis(cli.tick_ms.max(1));
    let outcome = run(&mut terminal, &mut state, &mut image_results, tick_rate).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    outcome
}

async fn run(
    terminal: &mut Term,
    state: &mut AppState,
    image_results: &mut tokio::sync::mpsc::UnboundedReceiver<images::LoadResult>,
    tick_rate: Duration,
) -> Result<()> {
    let mut events = spawn_event_reader(tick_rate);

    loop {
        terminal.draw(|frame| {
            let layout = state.app_layout();
            let brand = state.portfolio.brand();

            frame.render_widget(
                NavBar {
                    brand: &brand,
                    active: state.active_section(),
                },
                layout.nav_area,
            );

            frame.render_widget(
                PageWidget {
                    layout: &state.layout,
                    strips: &state.strips,
                    image_cache: &state.image_cache,
                    failed_images: &state.failed_images,
                    focused_strip: state.focused_strip,
                    scroll_row: state.scroll_row(),
                },
                layout.page_area,
            );
            frame.render_widget(
                BackToTopButton {
                    visible: state.back_to_top.visible(),
                },
                layout.page_area,
            );

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                handler::handle_event(state, event);
            }

            Some((item, result)) = image_results.recv() => {
                match result {
                    Ok(thumb) => state.image_loaded(item, thumb),
                    Err(e) => {
                        tracing::warn!("{e}");
                        state.image_failed(item);
                    }
                }
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
