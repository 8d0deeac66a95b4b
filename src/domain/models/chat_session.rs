use uuid::Uuid;

use super::Turn;

/// Ordered chat history for one interactive session.
///
/// Append-only: turns are never edited or removed, and the only way to add
/// one is through the submit flow, which pairs every user turn with exactly
/// one assistant turn. The owning surface decides when the session ends.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    turns: Vec<Turn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of completed user/assistant exchanges.
    pub fn exchange_count(&self) -> usize {
        self.turns.len() / 2
    }

    pub(crate) fn push(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    /// Full history, oldest first, one rendered turn per paragraph.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(Turn::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
