//! Source file to CoNLL-U conversion.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, error, info, warn};
use serde::Serialize;

use super::boundary::{classify, preceded_by_blank_line, Action, Boundary, RowView};
use super::encoding::{decode, sniff_delimiter};
use super::sanitize::{is_unset, sanitize_field};
use super::schema::{Layout, Schema, SourceRow};
use crate::conllu::{Sentence, Token, UniqueIds, SENT_ID, TEXT};
use crate::error::Error;
use crate::io::{list_files, ConlluWriter};
use crate::segment::Segmenter;

/// Extensions of the source files.
pub const SOURCE_EXTENSIONS: &[&str] = &["csv", "tsv"];

/// Extension of the produced files.
pub const CONLLU_EXTENSION: &str = "conllu";

/// Prefix of office lock files, which are not data.
const LOCK_FILE_PREFIX: &str = "~$";

/// Outcome of the conversion of a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub sentences: usize,
    pub tokens: usize,
    pub skipped_rows: usize,
}

/// In-memory result of a conversion, before writing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversion {
    pub sentences: Vec<Sentence>,
    pub skipped_rows: usize,
}

impl Conversion {
    pub fn nb_tokens(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }
}

/// Builds [Sentence]s out of grouped rows for one file.
struct SentenceBuilder<'a> {
    stem: &'a str,
    file_name: Option<&'a str>,
    ids: UniqueIds,
    nb_built: usize,
}

impl<'a> SentenceBuilder<'a> {
    fn new(stem: &'a str, file_name: Option<&'a str>) -> Self {
        Self {
            stem,
            file_name,
            ids: UniqueIds::new(),
            nb_built: 0,
        }
    }

    fn build(&mut self, rows: Vec<SourceRow>) -> Result<Sentence, Error> {
        self.nb_built += 1;

        let id = rows
            .iter()
            .find_map(|r| r.sentence_id.clone())
            .unwrap_or_else(|| format!("{}-{}", self.stem, self.nb_built));
        let id = self.ids.claim(id);

        let tokens = rows
            .into_iter()
            .enumerate()
            .map(|(position, mut row)| {
                // CoNLL-U needs an id on every token line
                if is_unset(&row.fields[0]) {
                    debug!(
                        "[{}] line {}: no token id, using position {}",
                        self.stem,
                        row.line,
                        position + 1
                    );
                    row.fields[0] = (position + 1).to_string();
                } else if row.fields[0].starts_with('#') {
                    // would be read back as a comment line
                    warn!(
                        "[{}] line {}: token id {:?} starts with '#', using position {}",
                        self.stem,
                        row.line,
                        row.fields[0],
                        position + 1
                    );
                    row.fields[0] = (position + 1).to_string();
                }
                Token::from_fields(&row.fields)
            })
            .collect::<Result<Vec<Token>, Error>>()?;

        let text = tokens.iter().map(|t| t.form.as_str()).join(" ");
        let metadata = vec![
            (SENT_ID.to_string(), id.clone()),
            (TEXT.to_string(), text),
        ];

        Ok(Sentence::new(
            id,
            metadata,
            self.file_name.map(String::from),
            tokens,
        ))
    }
}

/// Converts corpus exports into CoNLL-U, following a [Schema].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    schema: Schema,
}

impl Converter {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Convert tabular `text`.
    ///
    /// `stem` is used in generated sentence ids and log messages,
    /// `file_name` is attached to the produced sentences.
    ///
    /// Malformed rows are skipped and counted. Errors only if the header can't be read.
    pub fn convert_str(
        &self,
        text: &str,
        stem: &str,
        file_name: Option<&str>,
    ) -> Result<Conversion, Error> {
        let delimiter = match self.schema.delimiter_byte()? {
            Some(d) => d,
            None => sniff_delimiter(text),
        };

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            // tsv exports use quotes as plain characters
            .quoting(delimiter != b'\t')
            .from_reader(text.as_bytes());

        let header = rdr.headers()?.clone();
        if header.iter().all(|h| is_unset(&sanitize_field(h))) {
            return Err(Error::Custom(format!("[{}] no header row", stem)));
        }
        let layout = Layout::from_header(&self.schema.columns, &header);
        let rules = &self.schema.boundaries;
        let blank_is_separator = self.schema.has_boundary(Boundary::BlankLine)
            || self.schema.has_boundary(Boundary::SeparatorRow);

        let mut builder = SentenceBuilder::new(stem, file_name);
        let mut segmenter: Segmenter<SourceRow> = Segmenter::new();
        let mut conversion = Conversion::default();

        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!("[{}] unreadable row, skipped: {}", stem, e);
                    conversion.skipped_rows += 1;
                    continue;
                }
            };
            let (line, byte) = record
                .position()
                .map(|p| (p.line(), p.byte()))
                .unwrap_or_default();

            let blank = record.iter().all(|f| is_unset(&sanitize_field(f)));
            if blank && !blank_is_separator {
                warn!("[{}] line {}: empty row, skipped", stem, line);
                conversion.skipped_rows += 1;
                continue;
            }
            if !blank && record.len() != layout.width() {
                warn!(
                    "[{}] line {}: expected {} columns, got {}. Row skipped",
                    stem,
                    line,
                    layout.width(),
                    record.len()
                );
                conversion.skipped_rows += 1;
                continue;
            }

            let row = layout.row(&record, line);
            let view = RowView {
                id: row.id(),
                lemma: row.lemma(),
                sentence_id: row.sentence_id.as_deref(),
                blank,
                after_blank_line: preceded_by_blank_line(text, byte as usize),
            };
            let current_id = segmenter
                .current()
                .iter()
                .find_map(|r| r.sentence_id.as_deref());
            let open = !segmenter.current().is_empty();

            match classify(rules, &view, open, current_id) {
                Action::Separator => {
                    if let Some(rows) = segmenter.close() {
                        conversion.sentences.push(builder.build(rows)?);
                    }
                }
                Action::Split => {
                    if let Some(rows) = segmenter.close() {
                        conversion.sentences.push(builder.build(rows)?);
                    }
                    segmenter.push(row);
                }
                Action::Append => segmenter.push(row),
            }
        }

        if let Some(rows) = segmenter.finish() {
            conversion.sentences.push(builder.build(rows)?);
        }

        Ok(conversion)
    }

    /// Convert a source file into `dst/<stem>.conllu`, overwriting it if it exists.
    pub fn convert_file(&self, src: &Path, dst: &Path) -> Result<ConversionReport, Error> {
        let stem = src
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Custom(format!("no file name in {:?}", src)))?;
        self.convert_to(src, dst, &stem)
    }

    /// Convert `src` into `dst/<name>.conllu`.
    ///
    /// `name` is also the prefix of generated sentence ids.
    fn convert_to(&self, src: &Path, dst: &Path, name: &str) -> Result<ConversionReport, Error> {
        let output_name = format!("{}.{}", name, CONLLU_EXTENSION);
        let output = dst.join(&output_name);

        let bytes = std::fs::read(src)?;
        let text = decode(&bytes, self.schema.lossy)?;
        let conversion = self.convert_str(&text, name, Some(output_name.as_str()))?;

        let mut writer = ConlluWriter::create(&output)?;
        for sentence in &conversion.sentences {
            writer.write_sentence(sentence)?;
        }
        writer.into_inner()?;

        Ok(ConversionReport {
            source: src.to_path_buf(),
            output,
            sentences: conversion.sentences.len(),
            tokens: conversion.nb_tokens(),
            skipped_rows: conversion.skipped_rows,
        })
    }

    /// Convert every csv/tsv file of `src` into `dst`, creating `dst` if needed.
    ///
    /// Files that fail are logged and skipped, and get no report.
    /// When two sources share a stem (`a.csv`, `a.tsv`), the later one in path order
    /// keeps its extension in the output name (`a.tsv.conllu`).
    /// Errors if `src` does not exist or `dst` can't be created.
    pub fn convert_dir(&self, src: &Path, dst: &Path) -> Result<Vec<ConversionReport>, Error> {
        let files: Vec<PathBuf> = list_files(src, SOURCE_EXTENSIONS)?
            .into_iter()
            .filter(|p| {
                let lock_file = p
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with(LOCK_FILE_PREFIX))
                    .unwrap_or(false);
                if lock_file {
                    debug!("ignoring lock file {:?}", p);
                }
                !lock_file
            })
            .collect();

        std::fs::create_dir_all(dst)?;
        info!("converting {} files from {:?} to {:?}", files.len(), src, dst);

        let mut reports = Vec::with_capacity(files.len());
        let mut names = HashSet::new();
        for path in files {
            let name = match (path.file_stem(), path.file_name()) {
                (Some(stem), Some(file_name)) => {
                    let stem = stem.to_string_lossy().into_owned();
                    if names.contains(&stem) {
                        let name = file_name.to_string_lossy().into_owned();
                        warn!(
                            "{:?}: {}.{} already produced, writing {}.{}",
                            path, stem, CONLLU_EXTENSION, name, CONLLU_EXTENSION
                        );
                        name
                    } else {
                        stem
                    }
                }
                _ => {
                    error!("{:?}: no file name, file skipped", path);
                    continue;
                }
            };
            names.insert(name.clone());

            match self.convert_to(&path, dst, &name) {
                Ok(report) => {
                    info!(
                        "{:?}: {} sentences, {} tokens, {} rows skipped",
                        report.output, report.sentences, report.tokens, report.skipped_rows
                    );
                    reports.push(report);
                }
                Err(e) => error!("{:?}: file skipped: {}", path, e),
            }
        }

        info!("conversion done ({} files)", reports.len());
        Ok(reports)
    }
}
