//! Source column layout and conversion settings.
//!
//! The corpus export has a fixed set of named columns. [Columns] maps them onto the
//! ten CoNLL-U columns, and [Schema] bundles that mapping with parsing settings.
//! Both deserialize from JSON with every field optional, missing fields taking the
//! corpus defaults.
use std::{fs::File, io::BufReader, path::Path};

use csv::StringRecord;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::boundary::{default_boundaries, Boundary};
use super::sanitize::sanitize_field;
use crate::conllu::{NB_COLUMNS, PLACEHOLDER};
use crate::error::Error;

/// Source column names for each CoNLL-U column. `None` means the column is always unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub id: Option<String>,
    pub form: Option<String>,
    pub lemma: Option<String>,
    pub upos: Option<String>,
    pub xpos: Option<String>,
    pub feats: Option<String>,
    pub head: Option<String>,
    pub deprel: Option<String>,
    pub deps: Option<String>,
    pub misc: Option<String>,
    /// Column carrying sentence identifiers, if any.
    pub sentence_id: Option<String>,
}

impl Default for Columns {
    fn default() -> Self {
        let some = |s: &str| Some(s.to_string());
        Self {
            id: some("id"),
            form: some("transcription"),
            lemma: some("lemma"),
            upos: some("postag"),
            xpos: None,
            feats: some("postfeatures"),
            head: some("head"),
            deprel: some("deprel"),
            deps: some("deps"),
            misc: some("meaning"),
            sentence_id: some("sent_id"),
        }
    }
}

impl Columns {
    /// Source names in CoNLL-U column order.
    fn conllu_order(&self) -> [Option<&str>; NB_COLUMNS] {
        [
            self.id.as_deref(),
            self.form.as_deref(),
            self.lemma.as_deref(),
            self.upos.as_deref(),
            self.xpos.as_deref(),
            self.feats.as_deref(),
            self.head.as_deref(),
            self.deprel.as_deref(),
            self.deps.as_deref(),
            self.misc.as_deref(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub columns: Columns,
    /// Field delimiter. Sniffed from the file content when unset.
    pub delimiter: Option<char>,
    /// Replace undecodable bytes instead of rejecting the file.
    pub lossy: bool,
    /// Sentence boundary rules, see [Boundary].
    pub boundaries: Vec<Boundary>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            columns: Columns::default(),
            delimiter: None,
            lossy: false,
            boundaries: default_boundaries(),
        }
    }
}

impl Schema {
    /// Load a schema from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let f = File::open(path)?;
        let schema: Schema = serde_json::from_reader(BufReader::new(f))?;
        schema.delimiter_byte()?;
        debug!("loaded schema from {:?}: {:#?}", path, schema);
        Ok(schema)
    }

    /// Configured delimiter as a byte, as the csv reader wants it.
    pub fn delimiter_byte(&self) -> Result<Option<u8>, Error> {
        match self.delimiter {
            None => Ok(None),
            Some(c) if c.is_ascii() => Ok(Some(c as u8)),
            Some(c) => Err(Error::Custom(format!(
                "delimiter {:?} is not an ASCII character",
                c
            ))),
        }
    }

    pub fn has_boundary(&self, boundary: Boundary) -> bool {
        self.boundaries.contains(&boundary)
    }
}

/// Position of mapped columns in a given file, resolved from its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    columns: [Option<usize>; NB_COLUMNS],
    sentence_id: Option<usize>,
    width: usize,
}

/// A source row, sanitized and reordered into CoNLL-U columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub line: u64,
    pub fields: Vec<String>,
    pub sentence_id: Option<String>,
}

impl SourceRow {
    pub fn id(&self) -> &str {
        &self.fields[0]
    }

    pub fn lemma(&self) -> &str {
        &self.fields[2]
    }
}

impl Layout {
    /// Resolve `columns` against a header record.
    ///
    /// Names are compared trimmed and case-insensitively.
    /// Mapped columns missing from the header are logged and left unset.
    pub fn from_header(columns: &Columns, header: &StringRecord) -> Self {
        let names: Vec<String> = header
            .iter()
            .map(|h| sanitize_field(h).to_lowercase())
            .collect();
        let find = |name: &str| -> Option<usize> {
            let name = name.trim().to_lowercase();
            names.iter().position(|h| *h == name)
        };

        let mut resolved = [None; NB_COLUMNS];
        for (slot, name) in resolved.iter_mut().zip(columns.conllu_order()) {
            if let Some(name) = name {
                *slot = find(name);
                if slot.is_none() {
                    warn!("column {:?} not found in header, using {:?}", name, PLACEHOLDER);
                }
            }
        }

        let sentence_id = columns.sentence_id.as_deref().and_then(find);
        if sentence_id.is_none() {
            debug!("no sentence id column");
        }

        Self {
            columns: resolved,
            sentence_id,
            width: header.len(),
        }
    }

    /// Number of columns of the header.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Build a [SourceRow] from a record of the right width.
    pub fn row(&self, record: &StringRecord, line: u64) -> SourceRow {
        let get = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(sanitize_field)
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        };

        let fields = self.columns.iter().map(|idx| get(*idx)).collect();
        let sentence_id = Some(get(self.sentence_id)).filter(|s| s.as_str() != PLACEHOLDER);

        SourceRow {
            line,
            fields,
            sentence_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping() {
        let c = Columns::default();
        assert_eq!(c.form.as_deref(), Some("transcription"));
        assert_eq!(c.xpos, None);
        assert_eq!(c.misc.as_deref(), Some("meaning"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s: Schema =
            serde_json::from_str(r#"{"columns": {"form": "word"}, "delimiter": ";"}"#).unwrap();
        assert_eq!(s.columns.form.as_deref(), Some("word"));
        assert_eq!(s.columns.lemma.as_deref(), Some("lemma"));
        assert_eq!(s.delimiter_byte().unwrap(), Some(b';'));
        assert_eq!(s.boundaries, default_boundaries());
    }

    #[test]
    fn non_ascii_delimiter() {
        let s = Schema {
            delimiter: Some('،'),
            ..Default::default()
        };
        assert!(s.delimiter_byte().is_err());
    }

    #[test]
    fn layout_from_header() {
        let header = StringRecord::from(vec![" ID", "Transcription", "lemma", "meaning", "x"]);
        let layout = Layout::from_header(&Columns::default(), &header);
        assert_eq!(layout.width(), 5);
        assert_eq!(layout.sentence_id, None);

        let record = StringRecord::from(vec!["1", " abar\t", "abar", "", "ignored"]);
        let row = layout.row(&record, 2);
        assert_eq!(
            row.fields,
            vec!["1", "abar", "abar", "_", "_", "_", "_", "_", "_", "_"]
        );
        assert_eq!(row.sentence_id, None);
        assert_eq!(row.id(), "1");
    }
}
