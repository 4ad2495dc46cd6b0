//! Lexicon sentiment scoring with optional negation-scope tokenization

mod lexicon;
mod preprocess;
mod scorer;
mod select;
#[cfg(feature = "negation-tokenizer")]
mod tokenizer;

pub use lexicon::Lexicon;
pub use preprocess::preprocess;
pub use scorer::LexiconScorer;
#[cfg(feature = "negation-tokenizer")]
pub use scorer::NegationAwareScorer;
pub use select::{select_scorer, ScorerSelection};
#[cfg(feature = "negation-tokenizer")]
pub use tokenizer::{Token, TokenKind, Tokenizer};
