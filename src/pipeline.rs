//! Pipelines.
//!
//! [Pipeline] is a light trait generic over the return type, so that
//! conversion-only and conversion+loading runs share the same entry point.
use std::path::{Path, PathBuf};

use log::info;

use crate::convert::{ConversionReport, Converter, Schema};
use crate::corpus::Corpus;
use crate::error::Error;

pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}

/// Convert a directory of corpus exports.
pub struct Convert {
    src: PathBuf,
    dst: PathBuf,
    converter: Converter,
}

impl Convert {
    pub fn new(src: PathBuf, dst: PathBuf, schema: Schema) -> Self {
        Self {
            src,
            dst,
            converter: Converter::new(schema),
        }
    }
}

impl Pipeline<Vec<ConversionReport>> for Convert {
    fn run(&self) -> Result<Vec<ConversionReport>, Error> {
        self.converter.convert_dir(&self.src, &self.dst)
    }
}

/// Convert `src` into `dst`, then load `dst`.
pub struct ParseCorpus {
    convert: Convert,
}

impl ParseCorpus {
    pub fn new(src: PathBuf, dst: PathBuf, schema: Schema) -> Self {
        Self {
            convert: Convert::new(src, dst, schema),
        }
    }
}

impl Pipeline<Corpus> for ParseCorpus {
    fn run(&self) -> Result<Corpus, Error> {
        info!("step 1: converting files from {:?}", self.convert.src);
        let reports = self.convert.run()?;
        info!("{} files converted", reports.len());

        info!("step 2: loading files from {:?}", self.convert.dst);
        Corpus::from_dir(&self.convert.dst)
    }
}

/// Run the whole pipeline with the default [Schema].
///
/// Each call is independent: nothing is kept between runs.
pub fn parse_corpus(src: &Path, dst: &Path) -> Result<Corpus, Error> {
    ParseCorpus::new(src.to_path_buf(), dst.to_path_buf(), Schema::default()).run()
}
