/*! Corpus export conversion

Turns the tabular exports of the corpus into CoNLL-U files:

1. Source bytes are decoded ([encoding]) and the delimiter is sniffed.
1. The header is resolved against the [Schema] column mapping.
1. Each row is sanitized ([sanitize]), then grouped into sentences using the
   [Boundary] rules and the shared [crate::segment::Segmenter].
1. Sentences are written with a `sent_id` and a `text` comment.

Malformed rows and unreadable files are logged and skipped.
!*/
pub mod boundary;
mod converter;
pub mod encoding;
pub mod sanitize;
mod schema;

pub use boundary::Boundary;
pub use converter::{
    ConversionReport, Conversion, Converter, CONLLU_EXTENSION, SOURCE_EXTENSIONS,
};
pub use schema::{Columns, Layout, Schema, SourceRow};
