/*! Corpus loading

Reads a directory of CoNLL-U files into an ordered list of [Sentence]s.

Files are read one after the other (sorted by name), each split into blank-line separated
blocks by [BlockReader]. Inside a block, `#` lines are metadata and other lines are tokens.

Errors are *not* returned for bad lines or unreadable files but rather logged, and the
offending line/file is skipped.
!*/
use std::path::Path;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::conllu::{Sentence, Token, UniqueIds, SENT_ID};
use crate::convert::CONLLU_EXTENSION;
use crate::error::Error;
use crate::io::{list_files, BlockReader};

/// A sentence block before identifiers are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Block {
    sent_id: Option<String>,
    metadata: Vec<(String, String)>,
    tokens: Vec<Token>,
}

/// Parse a `# key = value` comment. Comments without `=` get an empty value.
fn parse_comment(line: &str) -> Option<(String, String)> {
    let content = line.trim_start_matches('#').trim();
    if content.is_empty() {
        return None;
    }
    let (key, value) = content.split_once('=').unwrap_or((content, ""));
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// Parse the lines of a sentence block. `location` prefixes warnings.
fn parse_block(lines: &[String], location: &str) -> Block {
    let mut block = Block::default();
    for line in lines {
        if line.starts_with('#') {
            if let Some((key, value)) = parse_comment(line) {
                if key == SENT_ID && !value.is_empty() {
                    block.sent_id = Some(value.clone());
                }
                block.metadata.push((key, value));
            }
            continue;
        }

        match line.parse::<Token>() {
            Ok(token) => block.tokens.push(token),
            Err(e) => warn!("[{}] {}. Line skipped", location, e),
        }
    }
    block
}

/// Read the blocks of a single CoNLL-U file.
fn read_blocks(path: &Path, stem: &str) -> Result<Vec<Block>, Error> {
    BlockReader::from_path(path)?
        .enumerate()
        .map(|(idx, lines)| {
            let location = format!("{}:{}", stem, idx + 1);
            lines.map(|lines| parse_block(&lines, &location))
        })
        .collect()
}

/// Ordered collection of the sentences of a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Corpus {
    sentences: Vec<Sentence>,
}

impl Corpus {
    /// Load every `.conllu` file of `src`.
    ///
    /// Errors with [Error::DirectoryNotFound] if `src` is not a directory.
    pub fn from_dir(src: &Path) -> Result<Self, Error> {
        let files = list_files(src, &[CONLLU_EXTENSION])?;
        info!("loading {} files from {:?}", files.len(), src);

        let mut ids = UniqueIds::new();
        let mut sentences = Vec::new();

        for path in files {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let stem = path
                .file_stem()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let blocks = match read_blocks(&path, &stem) {
                Ok(blocks) => blocks,
                Err(e) => {
                    error!("{:?}: file skipped: {}", path, e);
                    continue;
                }
            };

            let before = sentences.len();
            for (idx, block) in blocks.into_iter().enumerate() {
                if block.tokens.is_empty() {
                    warn!("[{}:{}] block without tokens, skipped", stem, idx + 1);
                    continue;
                }
                let id = block
                    .sent_id
                    .unwrap_or_else(|| format!("{}-{}", stem, idx + 1));
                let id = ids.claim(id);
                sentences.push(Sentence::new(
                    id,
                    block.metadata,
                    Some(file_name.clone()),
                    block.tokens,
                ));
            }
            info!("{:?}: {} sentences", path, sentences.len() - before);
        }

        info!("loaded {} sentences", sentences.len());
        Ok(Self { sentences })
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }

    pub fn nb_tokens(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }

    /// Find a sentence by id.
    pub fn get(&self, sentence_id: &str) -> Option<&Sentence> {
        self.sentences
            .iter()
            .find(|s| s.sentence_id() == sentence_id)
    }
}

impl From<Vec<Sentence>> for Corpus {
    fn from(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }
}

impl IntoIterator for Corpus {
    type Item = Sentence;
    type IntoIter = std::vec::IntoIter<Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.into_iter()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}
