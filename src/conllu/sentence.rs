//! CoNLL-U sentence block.
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::token::Token;

/// Metadata key holding the sentence identifier.
pub const SENT_ID: &str = "sent_id";

/// Metadata key holding the sentence text.
pub const TEXT: &str = "text";

/// A sentence and its ordered tokens.
///
/// Fields are private: a sentence is not modified once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    sentence_id: String,
    metadata: Vec<(String, String)>,
    file_name: Option<String>,
    tokens: Vec<Token>,
}

impl Sentence {
    /// Create a new sentence.
    ///
    /// `metadata` is kept in order. A `sent_id` entry is added (or replaced) so that it
    /// always matches `sentence_id`.
    pub fn new(
        sentence_id: String,
        mut metadata: Vec<(String, String)>,
        file_name: Option<String>,
        tokens: Vec<Token>,
    ) -> Self {
        match metadata.iter_mut().find(|(k, _)| k == SENT_ID) {
            Some((_, v)) => *v = sentence_id.clone(),
            None => metadata.insert(0, (SENT_ID.to_string(), sentence_id.clone())),
        }

        Self {
            sentence_id,
            metadata,
            file_name,
            tokens,
        }
    }

    pub fn sentence_id(&self) -> &str {
        &self.sentence_id
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    /// Get a metadata value by key.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Name of the CoNLL-U file the sentence was loaded from.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// `text` metadata, or the token forms joined by spaces.
    pub fn text(&self) -> String {
        match self.meta(TEXT) {
            Some(text) => text.to_string(),
            None => self.tokens.iter().map(|t| t.form.as_str()).join(" "),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// CoNLL-U block, including the blank line terminator.
impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.metadata {
            if value.is_empty() {
                writeln!(f, "# {}", key)?;
            } else {
                writeln!(f, "# {} = {}", key, value)?;
            }
        }
        for token in &self.tokens {
            writeln!(f, "{}", token)?;
        }
        writeln!(f)
    }
}
