use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use super::action_queue::channel;
use super::actions::run_action;
use super::views::handle_key;
use super::Runtime;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rt: &mut Runtime,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();

    loop {
        terminal.draw(|f| ui::render(f, app, &rt.session))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, &rt.session, &action_tx);
                }
            }
        }

        while let Some(poll_event) = rt.try_next_poll_event() {
            app.apply_poll_event(poll_event);
        }

        while let Ok(action) = action_rx.try_recv() {
            // Backend calls are awaited inline; show the throbber meanwhile.
            app.is_loading = true;
            app.throbber_state.calc_next();
            terminal.draw(|f| ui::render(f, app, &rt.session))?;

            run_action(action, app, rt).await;
            app.is_loading = false;
        }

        if !app.running {
            break;
        }
    }

    rt.stop_polling();
    Ok(())
}
