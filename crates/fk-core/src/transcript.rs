//! The append-only interrogation transcript.

use serde::{Deserialize, Serialize};

use crate::scenario::SuspectId;

/// One recorded turn in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Turn {
    /// A question from the player to one suspect.
    Player {
        /// The suspect being questioned.
        target: SuspectId,
        /// The question text.
        text: String,
    },
    /// A suspect's answer.
    Suspect {
        /// The suspect's display name.
        name: String,
        /// The answer text.
        text: String,
    },
    /// A system message about the case, e.g. the accusation reveal.
    Case {
        /// The message text.
        text: String,
    },
}

impl Turn {
    /// The display name of whoever is speaking.
    pub fn speaker(&self) -> &str {
        match self {
            Turn::Player { .. } => "Player",
            Turn::Suspect { name, .. } => name,
            Turn::Case { .. } => "Case",
        }
    }

    /// The spoken text.
    pub fn text(&self) -> &str {
        match self {
            Turn::Player { text, .. } | Turn::Suspect { text, .. } | Turn::Case { text } => text,
        }
    }
}

/// An ordered record of every turn in a session. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of recorded turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether nothing has been said yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order() {
        let mut t = Transcript::new();
        t.push(Turn::Player {
            target: SuspectId::from("s1"),
            text: "Where were you?".to_string(),
        });
        t.push(Turn::Suspect {
            name: "Ava Morgan".to_string(),
            text: "In the kitchen.".to_string(),
        });

        assert_eq!(t.len(), 2);
        assert_eq!(t.turns()[0].speaker(), "Player");
        assert_eq!(t.last().unwrap().speaker(), "Ava Morgan");
    }

    #[test]
    fn turn_serializes_with_role_tag() {
        let turn = Turn::Case {
            text: "Case closed.".to_string(),
        };
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "case");
        assert_eq!(json["text"], "Case closed.");
    }
}
