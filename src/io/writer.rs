//! CoNLL-U file writer.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::conllu::Sentence;
use crate::error::Error;

/// Buffered writer of [Sentence] blocks.
///
/// The destination file is truncated on creation.
pub struct ConlluWriter<W: Write> {
    inner: BufWriter<W>,
    nb_sentences: usize,
}

impl ConlluWriter<File> {
    pub fn create(dst: &Path) -> Result<Self, Error> {
        debug!("creating {:?}", dst);
        let f = File::create(dst)?;
        Ok(Self::new(f))
    }
}

impl<W: Write> ConlluWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            nb_sentences: 0,
        }
    }

    pub fn write_sentence(&mut self, sentence: &Sentence) -> Result<(), Error> {
        write!(self.inner, "{}", sentence)?;
        self.nb_sentences += 1;
        Ok(())
    }

    /// Number of sentences written so far.
    pub fn nb_sentences(&self) -> usize {
        self.nb_sentences
    }

    /// Flush and give back the inner writer.
    pub fn into_inner(self) -> Result<W, Error> {
        self.inner
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conllu::Token;

    #[test]
    fn write_blocks() {
        let mut w = ConlluWriter::new(Vec::new());
        for id in ["a", "b"] {
            let s = Sentence::new(id.to_string(), vec![], None, vec![Token::new("1", id)]);
            w.write_sentence(&s).unwrap();
        }
        assert_eq!(w.nb_sentences(), 2);

        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "# sent_id = a\n1\ta\t_\t_\t_\t_\t_\t_\t_\t_\n\n# sent_id = b\n1\tb\t_\t_\t_\t_\t_\t_\t_\t_\n\n"
        );
    }

    #[test]
    fn create_truncates() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("out.conllu");
        std::fs::write(&path, "stale content that is longer than the new one").unwrap();

        let mut w = ConlluWriter::create(&path).unwrap();
        let s = Sentence::new("x".to_string(), vec![], None, vec![Token::new("1", "y")]);
        w.write_sentence(&s).unwrap();
        w.into_inner().unwrap();

        let out = std::fs::read_to_string(&path).unwrap();
        assert!(out.starts_with("# sent_id = x\n"));
        assert!(!out.contains("stale"));
    }
}
