use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::application::SubmitMessageUseCase;
use crate::domain::{ChatError, ChatSession};

pub const CREDENTIAL_PROMPT: &str = "Please enter your OpenAI API key to continue.";

/// Rows moved by PageUp / PageDown.
pub const SCROLL_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Credential,
    Message,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Submit(String),
    Quit,
}

/// State behind the chat screen: the session plus the two input fields.
pub struct ChatApp {
    session: ChatSession,
    credential: Option<SecretString>,
    credential_len: usize,
    credential_input: String,
    input: String,
    focus: Focus,
    pending: Option<String>,
    notice: Option<String>,
    /// Rows scrolled up from the newest line; 0 follows the conversation.
    scroll_back: usize,
}

impl ChatApp {
    pub fn new(credential: Option<SecretString>) -> Self {
        let credential = credential.filter(|c| !c.expose_secret().trim().is_empty());
        let credential_len = credential
            .as_ref()
            .map(|c| c.expose_secret().chars().count())
            .unwrap_or(0);
        let focus = if credential.is_some() {
            Focus::Message
        } else {
            Focus::Credential
        };

        Self {
            session: ChatSession::new(),
            credential,
            credential_len,
            credential_input: String::new(),
            input: String::new(),
            focus,
            pending: None,
            notice: None,
            scroll_back: 0,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn into_session(self) -> ChatSession {
        self.session
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Bullets standing in for the key, one per character.
    pub fn masked_credential(&self) -> String {
        let len = if self.credential_input.is_empty() {
            self.credential_len
        } else {
            self.credential_input.chars().count()
        };
        "•".repeat(len)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::PageUp => {
                self.scroll_back = self.scroll_back.saturating_add(SCROLL_PAGE);
                Action::None
            }
            KeyCode::PageDown => {
                self.scroll_back = self.scroll_back.saturating_sub(SCROLL_PAGE);
                Action::None
            }
            KeyCode::Up => {
                self.scroll_back = self.scroll_back.saturating_add(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll_back = self.scroll_back.saturating_sub(1);
                Action::None
            }
            KeyCode::End => {
                self.scroll_back = 0;
                Action::None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Credential => Focus::Message,
                    Focus::Message => Focus::Credential,
                };
                Action::None
            }
            _ => match self.focus {
                Focus::Credential => self.handle_credential_key(key.code),
                Focus::Message => self.handle_message_key(key.code),
            },
        }
    }

    fn handle_credential_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char(c) => self.credential_input.push(c),
            KeyCode::Backspace => {
                self.credential_input.pop();
            }
            KeyCode::Enter => self.confirm_credential(),
            _ => {}
        }
        Action::None
    }

    fn confirm_credential(&mut self) {
        let entered = std::mem::take(&mut self.credential_input);
        let entered = entered.trim();

        if entered.is_empty() {
            if self.credential.is_none() {
                self.notice = Some(CREDENTIAL_PROMPT.to_string());
            } else {
                self.focus = Focus::Message;
            }
            return;
        }

        self.credential_len = entered.chars().count();
        self.credential = Some(SecretString::from(entered.to_string()));
        self.focus = Focus::Message;
        self.notice = None;
        debug!("Credential updated");
    }

    fn handle_message_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char(c) => {
                self.input.push(c);
                Action::None
            }
            KeyCode::Backspace => {
                self.input.pop();
                Action::None
            }
            KeyCode::Enter => {
                if self.credential.is_none() {
                    self.notice = Some(CREDENTIAL_PROMPT.to_string());
                    self.focus = Focus::Credential;
                    return Action::None;
                }
                if self.input.trim().is_empty() {
                    return Action::None;
                }
                self.notice = None;
                Action::Submit(std::mem::take(&mut self.input))
            }
            _ => Action::None,
        }
    }

    /// Marks `text` as in flight so the next frame shows the thinking indicator.
    pub fn begin_request(&mut self, text: &str) {
        self.pending = Some(text.to_string());
        self.scroll_back = 0;
    }

    /// Clamps the scroll position to the history height seen at the last draw.
    pub fn clamp_scroll(&mut self, max_scroll_back: usize) {
        self.scroll_back = self.scroll_back.min(max_scroll_back);
    }

    /// Runs one exchange to completion. Blocks the surface until the reply
    /// (or the failure text) has been recorded.
    pub async fn submit(&mut self, use_case: &SubmitMessageUseCase, text: &str) {
        let outcome = match self.credential.as_ref() {
            Some(credential) => use_case
                .execute(&mut self.session, text, credential)
                .await
                .map(|_| ()),
            None => Err(ChatError::MissingCredential),
        };

        self.pending = None;
        self.scroll_back = 0;
        if let Err(e) = outcome {
            if e == ChatError::MissingCredential {
                self.focus = Focus::Credential;
            }
            self.notice = Some(e.to_string());
        }
    }
}
