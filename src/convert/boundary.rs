/*! Sentence boundary detection

The corpus does not mark sentences consistently across files, so detection is a set of
rules that can be switched on and off through the [super::Schema]:

- [Boundary::BlankLine]: an empty line (or a row of empty fields) separates sentences.
- [Boundary::SeparatorRow]: a row with neither id nor lemma separates sentences.
- [Boundary::ColumnChange]: a change of value in the sentence id column starts a sentence.
- [Boundary::TokenIdReset]: a token id of `1` (or `1.0`) starts a sentence.

Separator rows are dropped. Rows that start a sentence are kept as its first token.
!*/
use serde::{Deserialize, Serialize};

use super::sanitize::is_unset;
use crate::conllu::index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    BlankLine,
    SeparatorRow,
    ColumnChange,
    TokenIdReset,
}

pub fn default_boundaries() -> Vec<Boundary> {
    vec![
        Boundary::BlankLine,
        Boundary::SeparatorRow,
        Boundary::ColumnChange,
    ]
}

/// What to do with a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Close the open sentence, drop the row.
    Separator,
    /// Close the open sentence, then open a new one with the row.
    Split,
    /// Add the row to the open sentence (opening one if needed).
    Append,
}

/// The parts of a row that boundary rules look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowView<'a> {
    pub id: &'a str,
    pub lemma: &'a str,
    pub sentence_id: Option<&'a str>,
    /// Every field of the row is empty.
    pub blank: bool,
    /// At least one empty line sits between this row and the previous one.
    pub after_blank_line: bool,
}

/// Decide what to do with `row`.
///
/// `open` tells whether a sentence is currently open, `current_id` is its sentence id
/// column value, if any.
pub fn classify(
    rules: &[Boundary],
    row: &RowView,
    open: bool,
    current_id: Option<&str>,
) -> Action {
    let has = |b: Boundary| rules.contains(&b);

    if row.blank && (has(Boundary::BlankLine) || has(Boundary::SeparatorRow)) {
        return Action::Separator;
    }
    if has(Boundary::SeparatorRow) && is_unset(row.id) && is_unset(row.lemma) {
        return Action::Separator;
    }
    if !open {
        return Action::Append;
    }

    if has(Boundary::BlankLine) && row.after_blank_line {
        return Action::Split;
    }
    if has(Boundary::ColumnChange) {
        if let (Some(new), Some(current)) = (row.sentence_id, current_id) {
            if new != current {
                return Action::Split;
            }
        }
    }
    if has(Boundary::TokenIdReset) && index(row.id) == Some(1) {
        return Action::Split;
    }

    Action::Append
}

/// Whether the record read from byte `scan_start` of `text` is preceded by an empty line.
///
/// The csv reader skips empty lines, so they are looked for in the raw text. `scan_start`
/// may point at the record itself or at the line terminators the reader skipped before it.
pub fn preceded_by_blank_line(text: &str, scan_start: usize) -> bool {
    let bytes = text.as_bytes();
    let is_term = |b: &u8| *b == b'\r' || *b == b'\n';

    let mut start = scan_start.min(bytes.len());
    while start < bytes.len() && is_term(&bytes[start]) {
        start += 1;
    }

    let before = &bytes[..start];
    let run_len = before.iter().rev().take_while(|b| is_term(*b)).count();
    let run = &before[before.len() - run_len..];

    // "\r\n" is a single line break
    let line_breaks = run
        .iter()
        .enumerate()
        .filter(|(i, b)| **b == b'\n' || (**b == b'\r' && run.get(i + 1) != Some(&b'\n')))
        .count();
    line_breaks >= 2
}
