pub mod conllu;
pub mod convert;
pub mod corpus;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod segment;

pub use conllu::{Sentence, Token};
pub use corpus::Corpus;
pub use error::Error;
pub use pipeline::parse_corpus;
