//! Synthetic, anonymized survey text for every region and month

mod generator;
mod templates;

pub use generator::{month_adjustment, CorpusGenerator, MONTHS};
pub use templates::{template_pool, NEGATIVE_TEMPLATES, NEUTRAL_TEMPLATES, POSITIVE_TEMPLATES};
