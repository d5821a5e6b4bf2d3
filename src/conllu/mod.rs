/*! CoNLL-U object model

[Token]s are fixed ten-column records and [Sentence]s own their tokens.
Both render back to CoNLL-U through [std::fmt::Display].
!*/
mod ids;
mod sentence;
mod token;

pub use ids::UniqueIds;
pub use sentence::{Sentence, SENT_ID, TEXT};
pub use token::{Token, NB_COLUMNS, PLACEHOLDER};
pub(crate) use token::index;
