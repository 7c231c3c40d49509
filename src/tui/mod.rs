pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;

use crate::app::{AppContext, Result};
use crate::loader::LoadTicket;
use crate::presenter::StoryView;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler, InputAction};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: &AppContext) -> Result<()> {
    let mut tui_app = TuiApp::new(ctx.params());
    let event_handler = EventHandler::new(Duration::from_millis(100));

    let mut pending = start_load(terminal, ctx, &mut tui_app, false).await?;

    loop {
        // Deliveries land here, on the loop that owns the view.
        if let Some(ticket) = pending.take() {
            pending = poll_ticket(ticket, &mut tui_app);
        }

        terminal.draw(|frame| layout::render(frame, &tui_app))?;

        let key = match event_handler.next()? {
            AppEvent::Key(key) => key,
            AppEvent::Tick => continue,
        };

        if tui_app.is_editing_section() {
            match InputAction::from(key) {
                InputAction::Insert(c) => tui_app.push_section_char(c),
                InputAction::Backspace => tui_app.pop_section_char(),
                InputAction::Cancel => tui_app.cancel_section_edit(),
                InputAction::Confirm => {
                    if tui_app.confirm_section_edit() {
                        pending = start_load(terminal, ctx, &mut tui_app, true).await?;
                        let section = tui_app.params.section.clone();
                        tui_app.set_status(format!("Section set to {}", section));
                    }
                }
                InputAction::None => {}
            }
            continue;
        }

        match Action::from(key) {
            Action::Quit => {
                tui_app.should_quit = true;
            }
            Action::MoveUp => {
                tui_app.move_up();
            }
            Action::MoveDown => {
                tui_app.move_down();
            }
            Action::OpenInBrowser => {
                open_selected(&mut tui_app);
            }
            Action::Refresh => {
                pending = start_load(terminal, ctx, &mut tui_app, true).await?;
            }
            Action::CycleOrder => {
                tui_app.params.order_by = tui_app.params.order_by.next();
                pending = start_load(terminal, ctx, &mut tui_app, true).await?;
                let order_by = tui_app.params.order_by.clone();
                tui_app.set_status(format!("Ordering by {}", order_by));
            }
            Action::EditSection => {
                tui_app.begin_section_edit();
            }
            Action::None => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    ctx.presenter.teardown(&mut tui_app);
    Ok(())
}

/// Start a load for the current preferences. `force` bypasses a delivered
/// result for the same request.
async fn start_load(
    terminal: &mut Tui,
    ctx: &AppContext,
    tui_app: &mut TuiApp,
    force: bool,
) -> Result<Option<LoadTicket>> {
    // The connectivity probe can take a while; show the loading state first
    tui_app.on_load_started();
    terminal.draw(|frame| layout::render(frame, &*tui_app))?;

    let params = tui_app.params.clone();
    if force {
        ctx.presenter.refresh(&params, tui_app).await
    } else {
        ctx.presenter.begin(&params, tui_app).await
    }
}

fn poll_ticket(ticket: LoadTicket, tui_app: &mut TuiApp) -> Option<LoadTicket> {
    match ticket.try_take() {
        Ok(delivery) => {
            delivery.dispatch(tui_app);
            None
        }
        Err(ticket) => Some(ticket),
    }
}

fn open_selected(tui_app: &mut TuiApp) {
    let Some(story) = tui_app.selected_story() else {
        return;
    };
    if !story.has_url() {
        tui_app.set_status("Story has no link".to_string());
        return;
    }

    let url = story.url().to_string();
    if let Err(e) = open::that(&url) {
        warn!("Failed to open {}: {}", url, e);
        tui_app.set_status(format!("Failed to open browser: {}", e));
    }
}
