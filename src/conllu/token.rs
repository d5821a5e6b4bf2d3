//! CoNLL-U token line.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Placeholder for unset CoNLL-U fields.
pub const PLACEHOLDER: &str = "_";

/// Number of columns of a CoNLL-U token line.
pub const NB_COLUMNS: usize = 10;

/// A single token, one line of a CoNLL-U sentence block.
///
/// `None` fields are rendered as [PLACEHOLDER].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub form: String,
    pub lemma: Option<String>,
    pub upos: Option<String>,
    pub xpos: Option<String>,
    pub feats: Option<String>,
    pub head: Option<String>,
    pub deprel: Option<String>,
    pub deps: Option<String>,
    pub misc: Option<String>,
}

/// `"_"` and empty values are unset.
fn optional(field: &str) -> Option<String> {
    if field.is_empty() || field == PLACEHOLDER {
        None
    } else {
        Some(field.to_string())
    }
}

/// Parses `3` as well as `3.0`, which spreadsheet exports tend to produce.
pub(crate) fn index(field: &str) -> Option<usize> {
    if let Ok(i) = field.parse::<usize>() {
        return Some(i);
    }

    // "1.1" is an empty node id, not a float
    match field.split_once('.') {
        Some((int, frac)) if !frac.is_empty() && frac.bytes().all(|b| b == b'0') => {
            int.parse::<usize>().ok()
        }
        _ => None,
    }
}

impl Token {
    /// Builds a token from its id and form, every other field unset.
    pub fn new(id: impl Into<String>, form: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            form: form.into(),
            ..Default::default()
        }
    }

    /// Builds a token from the ten columns in CoNLL-U order.
    ///
    /// Errors if there is not exactly [NB_COLUMNS] fields.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, Error> {
        let f: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
        if f.len() != NB_COLUMNS {
            return Err(Error::MalformedLine {
                line: f.join("\t"),
                reason: format!("expected {} fields, got {}", NB_COLUMNS, f.len()),
            });
        }

        Ok(Self {
            id: f[0].to_string(),
            form: f[1].to_string(),
            lemma: optional(f[2]),
            upos: optional(f[3]),
            xpos: optional(f[4]),
            feats: optional(f[5]),
            head: optional(f[6]),
            deprel: optional(f[7]),
            deps: optional(f[8]),
            misc: optional(f[9]),
        })
    }

    /// The ten columns in CoNLL-U order, unset fields as [PLACEHOLDER].
    pub fn fields(&self) -> [&str; NB_COLUMNS] {
        fn o(f: &Option<String>) -> &str {
            f.as_deref().unwrap_or(PLACEHOLDER)
        }
        [
            self.id.as_str(),
            self.form.as_str(),
            o(&self.lemma),
            o(&self.upos),
            o(&self.xpos),
            o(&self.feats),
            o(&self.head),
            o(&self.deprel),
            o(&self.deps),
            o(&self.misc),
        ]
    }

    /// Word index, if the id is a plain integer.
    ///
    /// Multiword ranges (`1-2`) and empty nodes (`1.1`) return `None`.
    pub fn id_number(&self) -> Option<usize> {
        index(&self.id)
    }

    /// Head index, if set and numeric.
    pub fn head_number(&self) -> Option<usize> {
        self.head.as_deref().and_then(index)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields().join("\t"))
    }
}

impl FromStr for Token {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split('\t').collect();
        Self::from_fields(&fields)
    }
}
