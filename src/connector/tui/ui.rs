use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{ChatApp, Focus, CREDENTIAL_PROMPT};
use crate::domain::{Role, Turn};

pub const TITLE: &str = "🤖 Intelligent Customer Support Chatbot";
pub const WELCOME: &str =
    "Welcome to our automated assistant! Ask your questions below, and I'll assist you promptly.";
pub const CREDENTIAL_LABEL: &str = " 🔑 Enter your OpenAI API Key ";
pub const INPUT_LABEL: &str = " 💬 Type your question here... ";
pub const THINKING: &str = "🤔 Thinking...";
pub const ABOUT_TITLE: &str = " 📌 About the Project ";

const ABOUT_LINES: [&str; 8] = [
    "Revolutionizing Customer Support with an Intelligent Chatbot",
    "",
    "This chatbot uses OpenAI's API to simulate an automated assistant capable of real-time intelligent conversations.",
    "",
    "Features:",
    "- Real-time chat interface",
    "- OpenAI-powered natural language responses",
    "- Terminal-based intuitive interface",
];

/// Sidebar, then header, credential, chat, status and input.
fn layout(area: Rect) -> (Rect, [Rect; 5]) {
    let [sidebar, main] =
        Layout::horizontal([Constraint::Percentage(28), Constraint::Min(40)]).areas(area);
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(main);
    (sidebar, rows)
}

pub fn draw(frame: &mut Frame, app: &ChatApp) {
    let (sidebar, [header, credential, chat, status, input]) = layout(frame.area());

    draw_sidebar(frame, sidebar);
    draw_header(frame, header);
    draw_credential(frame, credential, app);
    draw_chat(frame, chat, app);
    draw_status(frame, status, app);
    draw_input(frame, input, app);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_sidebar(frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::with_capacity(ABOUT_LINES.len());
    for (i, text) in ABOUT_LINES.into_iter().enumerate() {
        let line = match i {
            0 => Line::from(text.italic()),
            4 => Line::from(text.bold()),
            _ => Line::from(text),
        };
        lines.push(line);
    }

    let about = Paragraph::new(lines)
        .block(Block::bordered().title(ABOUT_TITLE))
        .wrap(Wrap { trim: false });
    frame.render_widget(about, area);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(TITLE.bold()),
        Line::from(WELCOME.dark_gray()),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(header, area);
}

fn draw_credential(frame: &mut Frame, area: Rect, app: &ChatApp) {
    let focused = app.focus() == Focus::Credential;
    let masked = app.masked_credential();
    let field = Paragraph::new(masked.as_str()).block(
        Block::bordered()
            .title(CREDENTIAL_LABEL)
            .border_style(focus_style(focused)),
    );
    frame.render_widget(field, area);

    if focused {
        frame.set_cursor_position((cursor_x(area, masked.chars().count()), area.y + 1));
    }
}

fn turn_lines(role: Role, content: &str) -> Vec<Line<'static>> {
    let label_style = match role {
        Role::User => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Role::Assistant => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    };

    let mut lines = Vec::new();
    let mut parts = content.lines();
    let first = parts.next().unwrap_or_default().to_string();
    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", role.label()), label_style),
        Span::raw(first),
    ]));
    for part in parts {
        lines.push(Line::from(part.to_string()));
    }
    lines
}

/// Chat history as display lines, oldest first, blank line between turns.
pub fn history_lines(turns: &[Turn], pending: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for turn in turns {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(turn_lines(turn.role(), turn.content()));
    }
    if let Some(text) = pending {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(turn_lines(Role::User, text));
    }
    lines
}

/// Column just past `text_width` cells of a bordered field, kept inside it.
fn cursor_x(area: Rect, text_width: usize) -> u16 {
    let offset = u16::try_from(text_width).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(offset)
        .min(area.right().saturating_sub(2))
}

/// History paragraph (unbordered) and the rows it needs once word-wrapped
/// into the chat box's inner width.
fn history_paragraph(app: &ChatApp, chat: Rect) -> (Paragraph<'static>, usize) {
    let lines = history_lines(app.session().turns(), app.pending());
    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    let rows = paragraph.line_count(chat.width.saturating_sub(2));
    (paragraph, rows)
}

/// Rows of history above the view when it is pinned to the newest line.
fn bottom_offset(rows: usize, chat: Rect) -> usize {
    rows.saturating_sub(usize::from(chat.height.saturating_sub(2)))
}

/// How far the history can be scrolled back on a screen of `area`.
pub fn max_scroll_back(app: &ChatApp, area: Rect) -> usize {
    let (_, [_, _, chat, _, _]) = layout(area);
    let (_, rows) = history_paragraph(app, chat);
    bottom_offset(rows, chat)
}

fn draw_chat(frame: &mut Frame, area: Rect, app: &ChatApp) {
    let (paragraph, rows) = history_paragraph(app, area);
    let scroll = bottom_offset(rows, area).saturating_sub(app.scroll_back());

    let chat = paragraph
        .block(Block::bordered().title(" Chat "))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(chat, area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &ChatApp) {
    let line = if app.pending().is_some() {
        Line::from(THINKING.yellow())
    } else if let Some(notice) = app.notice() {
        Line::from(notice.to_string().yellow())
    } else if !app.has_credential() {
        Line::from(CREDENTIAL_PROMPT.yellow())
    } else {
        Line::from("Enter: send  Tab: switch field  PgUp/PgDn: scroll  Esc: quit".dark_gray())
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &ChatApp) {
    let focused = app.focus() == Focus::Message;
    let field = Paragraph::new(app.input()).block(
        Block::bordered()
            .title(INPUT_LABEL)
            .border_style(focus_style(focused)),
    );
    frame.render_widget(field, area);

    if focused && app.pending().is_none() {
        let width = Line::from(app.input()).width();
        frame.set_cursor_position((cursor_x(area, width), area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use secrecy::SecretString;

    use super::*;
    use crate::application::{FetchReplyUseCase, SubmitMessageUseCase};
    use crate::connector::adapter::MockTransport;

    fn render(app: &ChatApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_page_furniture() {
        let screen = render(&ChatApp::new(None));

        assert!(screen.contains("About the Project"));
        assert!(screen.contains("Intelligent Customer Support Chatbot"));
        assert!(screen.contains("Enter your OpenAI API Key"));
        assert!(screen.contains("Please enter your OpenAI API key to continue."));
    }

    #[test]
    fn test_pending_request_shows_thinking() {
        let mut app = ChatApp::new(Some(SecretString::from("sk-1".to_string())));
        app.begin_request("hello");

        let screen = render(&app);

        assert!(screen.contains("Thinking..."));
        assert!(screen.contains("You: hello"));
    }

    #[test]
    fn test_credential_is_never_drawn_in_clear() {
        let screen = render(&ChatApp::new(Some(SecretString::from(
            "sk-visible".to_string(),
        ))));

        assert!(!screen.contains("sk-visible"));
    }

    #[test]
    fn test_history_lines_keep_order_and_labels() {
        let turns = vec![
            Turn::user("first"),
            Turn::assistant("line one\nline two"),
            Turn::user("second"),
        ];

        let lines: Vec<String> = history_lines(&turns, None)
            .iter()
            .map(|l| l.to_string())
            .collect();

        assert_eq!(
            lines,
            vec![
                "You: first",
                "",
                "Assistant: line one",
                "line two",
                "",
                "You: second",
            ]
        );
    }

    /// Thirty 50-character words ending in a marker; wraps to one word per row.
    fn long_message() -> String {
        let mut words: Vec<String> = (0..30)
            .map(|i| format!("w{i:02}{}", "x".repeat(47)))
            .collect();
        words.push("ZZZEND".to_string());
        words.join(" ")
    }

    async fn app_with_long_exchange() -> ChatApp {
        let use_case = SubmitMessageUseCase::new(FetchReplyUseCase::new(Arc::new(
            MockTransport::new(),
        )));
        let mut app = ChatApp::new(Some(SecretString::from("offline".to_string())));
        app.submit(&use_case, &long_message()).await;
        app
    }

    #[tokio::test]
    async fn test_end_of_long_reply_is_visible() {
        let app = app_with_long_exchange().await;

        let screen = render(&app);

        assert!(screen.contains("ZZZEND"));
        assert!(!screen.contains("You: w00"));
    }

    #[tokio::test]
    async fn test_scrolling_back_reaches_first_turn() {
        let mut app = app_with_long_exchange().await;
        let max = max_scroll_back(&app, Rect::new(0, 0, 120, 30));
        assert!(max > 0);

        for _ in 0..20 {
            app.handle_key(KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE));
        }
        app.clamp_scroll(max);
        assert_eq!(app.scroll_back(), max);

        let screen = render(&app);

        assert!(screen.contains("You: w00"));
        assert!(!screen.contains("ZZZEND"));
    }

    #[test]
    fn test_short_history_cannot_scroll() {
        let app = ChatApp::new(None);
        assert_eq!(max_scroll_back(&app, Rect::new(0, 0, 120, 30)), 0);
    }

    #[test]
    fn test_cursor_stays_inside_field() {
        let area = Rect::new(5, 0, 40, 3);

        assert_eq!(cursor_x(area, 3), 9);
        assert_eq!(cursor_x(area, 100_000), 43);
    }

    #[test]
    fn test_huge_input_renders() {
        let mut app = ChatApp::new(Some(SecretString::from("sk-1".to_string())));
        for _ in 0..70_000 {
            app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        }

        let screen = render(&app);

        assert!(screen.contains("aaaa"));
    }
}
