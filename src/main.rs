//! # pahlavi-conllu
//!
//! Converts the csv/tsv exports of the Pahlavi corpus into CoNLL-U,
//! and loads CoNLL-U files into sentences and tokens.
//!
//! ```sh
//! pahlavi-conllu 0.1.0
//! Pahlavi corpus to CoNLL-U conversion tool.
//!
//! USAGE:
//!     pahlavi-conllu <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     convert     Convert csv/tsv exports into CoNLL-U files
//!     help        Prints this message or the help of the given subcommand(s)
//!     load        Load CoNLL-U files and print a summary
//!     pipeline    Convert, then load the converted files
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=info`).
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use pahlavi_conllu::convert::Schema;
use pahlavi_conllu::error::Error;
use pahlavi_conllu::pipeline::{self, Pipeline};
use pahlavi_conllu::Corpus;
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn load_schema(path: Option<&Path>) -> Result<Schema, Error> {
    match path {
        Some(p) => Schema::from_path(p),
        None => Ok(Schema::default()),
    }
}

fn summary(corpus: &Corpus) {
    println!(
        "{} sentences, {} tokens",
        corpus.len(),
        corpus.nb_tokens()
    );
}

fn export_json(corpus: &Corpus, dst: &Path) -> Result<(), Error> {
    let w = BufWriter::new(File::create(dst)?);
    serde_json::to_writer_pretty(w, corpus)?;
    info!("corpus exported to {:?}", dst);
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::PahlaviConllu::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::PahlaviConllu::Convert(c) => {
            let schema = load_schema(c.schema.as_deref())?;
            let reports = pipeline::Convert::new(c.src, c.dst, schema).run()?;

            if let Some(report) = c.report {
                let mut out = csv::WriterBuilder::new().from_path(&report)?;
                for r in &reports {
                    out.serialize(r)?;
                }
                out.flush()?;
                info!("report written to {:?}", report);
            }

            let sentences: usize = reports.iter().map(|r| r.sentences).sum();
            let skipped: usize = reports.iter().map(|r| r.skipped_rows).sum();
            println!(
                "{} files converted, {} sentences, {} rows skipped",
                reports.len(),
                sentences,
                skipped
            );
        }

        cli::PahlaviConllu::Load(l) => {
            let corpus = Corpus::from_dir(&l.src)?;
            summary(&corpus);
            if let Some(json) = l.json {
                export_json(&corpus, &json)?;
            }
        }

        cli::PahlaviConllu::Pipeline(p) => {
            let schema = load_schema(p.schema.as_deref())?;
            let corpus = pipeline::ParseCorpus::new(p.src, p.dst, schema).run()?;
            summary(&corpus);
            if let Some(json) = p.json {
                export_json(&corpus, &json)?;
            }
        }
    };
    Ok(())
}
