use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::debug;

use crate::app::{App, AppEvent};

/// How often a pending image export is polled when no key arrives.
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// Polls for crossterm events and maps them to `AppEvent`s.
pub fn poll(timeout: Duration) -> Result<Option<AppEvent>> {
    if event::poll(timeout)? {
        return match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(Some(AppEvent::KeyPress(key.code)))
            }
            // Resizes only need a redraw, which the loop does anyway.
            _ => Ok(None),
        };
    }
    Ok(Some(AppEvent::Tick))
}

/// Runs the main event loop.
pub fn run(app: &mut App, terminal: &mut crate::tui::Terminal) -> Result<()> {
    debug!("event loop started");
    while app.running {
        terminal.draw(|frame| crate::ui::draw(frame, app))?;

        if let Some(event) = poll(TICK_RATE)? {
            app.update(event);
        }
    }
    debug!("event loop finished");
    Ok(())
}
