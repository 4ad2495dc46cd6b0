//! Startup scorer selection

use crate::lexicon::Lexicon;
use crate::scorer::LexiconScorer;
#[cfg(feature = "negation-tokenizer")]
use crate::scorer::NegationAwareScorer;
#[cfg(feature = "negation-tokenizer")]
use crate::tokenizer::Tokenizer;
use std::sync::Arc;
use wellpulse_core::{AppConfig, SentimentScorer};

/// The scorer chosen at startup and whether the negation-aware capability is
/// in use
#[derive(Clone)]
pub struct ScorerSelection {
    pub scorer: Arc<dyn SentimentScorer>,
    pub capability_available: bool,
}

impl std::fmt::Debug for ScorerSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScorerSelection")
            .field("variant", &self.scorer.variant())
            .field("capability_available", &self.capability_available)
            .finish()
    }
}

/// Pick the negation-aware scorer when the tokenizer loads, otherwise fall
/// back to the lexicon scorer
pub fn select_scorer(config: &AppConfig) -> ScorerSelection {
    let lexicon = Lexicon::new().with_negations(&config.scorer.extra_negations);

    match negation_aware(config, &lexicon) {
        Some(scorer) => {
            tracing::info!("Using negation-aware scorer");
            ScorerSelection {
                scorer,
                capability_available: true,
            }
        }
        None => {
            if config.scorer.enhanced {
                tracing::warn!("Negation tokenizer unavailable, falling back to lexicon scorer");
            } else {
                tracing::info!("Using lexicon scorer");
            }
            ScorerSelection {
                scorer: Arc::new(LexiconScorer::new(lexicon)),
                capability_available: false,
            }
        }
    }
}

#[cfg(feature = "negation-tokenizer")]
fn negation_aware(config: &AppConfig, lexicon: &Lexicon) -> Option<Arc<dyn SentimentScorer>> {
    let tokenizer = Tokenizer::load(&config.scorer, lexicon.negations())?;
    Some(Arc::new(NegationAwareScorer::new(lexicon.clone(), tokenizer)))
}

#[cfg(not(feature = "negation-tokenizer"))]
fn negation_aware(_config: &AppConfig, _lexicon: &Lexicon) -> Option<Arc<dyn SentimentScorer>> {
    None
}
