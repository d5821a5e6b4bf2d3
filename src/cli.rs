//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "pahlavi-conllu",
    about = "Pahlavi corpus to CoNLL-U conversion tool."
)]
/// Holds every command that is callable by the `pahlavi-conllu` command.
pub enum PahlaviConllu {
    #[structopt(about = "Convert csv/tsv exports into CoNLL-U files")]
    Convert(Convert),
    #[structopt(about = "Load CoNLL-U files and print a summary")]
    Load(Load),
    #[structopt(about = "Convert, then load the converted files")]
    Pipeline(Pipeline),
}

#[derive(Debug, StructOpt)]
/// Convert command and parameters.
///
/// ```sh
/// pahlavi-conllu-convert 0.1.0
/// Convert csv/tsv exports into CoNLL-U files
///
/// USAGE:
///     pahlavi-conllu convert [OPTIONS] <src> <dst>
///
/// OPTIONS:
///     -r, --report <report>    write a per-file conversion report (csv)
///     -s, --schema <schema>    column mapping and boundary rules (json)
///
/// ARGS:
///     <src>    source folder (contains .csv/.tsv files)
///     <dst>    destination folder for .conllu files
/// ```
pub struct Convert {
    #[structopt(parse(from_os_str), help = "source folder (contains .csv/.tsv files)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination folder for .conllu files")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "s",
        long = "schema",
        help = "column mapping and boundary rules (json)"
    )]
    pub schema: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        short = "r",
        long = "report",
        help = "write a per-file conversion report (csv)"
    )]
    pub report: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
/// Load command and parameters.
pub struct Load {
    #[structopt(parse(from_os_str), help = "folder containing .conllu files")]
    pub src: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "j",
        long = "json",
        help = "export the loaded corpus as json"
    )]
    pub json: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
/// Pipeline command and parameters.
pub struct Pipeline {
    #[structopt(parse(from_os_str), help = "source folder (contains .csv/.tsv files)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination folder for .conllu files")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "s",
        long = "schema",
        help = "column mapping and boundary rules (json)"
    )]
    pub schema: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        short = "j",
        long = "json",
        help = "export the loaded corpus as json"
    )]
    pub json: Option<PathBuf>,
}
