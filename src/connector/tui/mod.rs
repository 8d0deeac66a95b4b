//! Terminal chat surface: credential field, chat history, message input and
//! an about panel.

mod app;
mod ui;

pub use app::*;
pub use ui::{draw, history_lines, max_scroll_back};

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::Terminal;
use secrecy::SecretString;
use tracing::info;

use crate::application::SubmitMessageUseCase;
use crate::domain::ChatSession;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Restores the terminal when dropped, including on early `?` returns.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
    let _ = io::stdout().execute(Show);
}

/// Restore the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

/// Run the interactive chat until the user quits, returning the finished
/// session.
pub async fn run(
    use_case: &SubmitMessageUseCase,
    credential: Option<SecretString>,
) -> Result<ChatSession> {
    let mut app = ChatApp::new(credential);
    info!(session_id = %app.session().id(), "Chat session started");

    install_panic_hook();
    enable_raw_mode()?;
    let guard = TerminalGuard;
    io::stdout().execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, use_case).await;
    drop(guard);

    info!(
        session_id = %app.session().id(),
        exchanges = app.session().exchange_count(),
        "Chat session ended"
    );
    result.map(|()| app.into_session())
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut ChatApp,
    use_case: &SubmitMessageUseCase,
) -> Result<()> {
    loop {
        let size = terminal.size()?;
        app.clamp_scroll(max_scroll_back(app, Rect::new(0, 0, size.width, size.height)));
        terminal.draw(|frame| draw(frame, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Action::None => {}
            Action::Quit => break,
            Action::Submit(text) => {
                app.begin_request(&text);
                terminal.draw(|frame| draw(frame, app))?;
                app.submit(use_case, &text).await;
            }
        }
    }

    Ok(())
}
