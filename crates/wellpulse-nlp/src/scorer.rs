//! Lexicon and negation-aware scorer variants

use crate::lexicon::{Lexicon, NEGATION_SCALAR};
use crate::preprocess::preprocess;
#[cfg(feature = "negation-tokenizer")]
use crate::tokenizer::{TokenKind, Tokenizer};
use wellpulse_core::{rescale_compound, round2, ScorerVariant, Sentiment, SentimentScorer};

const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_BOOST: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const NEGATION_WINDOW: usize = 3;
#[cfg(feature = "negation-tokenizer")]
const RESIDUAL_NEGATION_THRESHOLD: f64 = 0.1;
#[cfg(feature = "negation-tokenizer")]
const RESIDUAL_NEGATION_DAMPING: f64 = 0.1;

/// Map an unbounded valence sum into [-1, 1]
fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn summarize(valences: &[f64], exclamations: usize, negated: bool) -> Sentiment {
    if valences.is_empty() {
        return Sentiment::neutral();
    }

    let mut sum: f64 = valences.iter().sum();
    let emphasis = exclamations.min(MAX_EXCLAMATIONS) as f64 * EXCLAMATION_BOOST;
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut positive = 0.0;
    let mut negative = 0.0;
    let mut neutral = 0.0;
    for &v in valences {
        if v > 0.0 {
            positive += v + 1.0;
        } else if v < 0.0 {
            negative += 1.0 - v;
        } else {
            neutral += 1.0;
        }
    }
    let total = positive + negative + neutral;

    Sentiment {
        compound,
        score: rescale_compound(compound),
        positive: round2(positive / total * 100.0),
        negative: round2(negative / total * 100.0),
        neutral: round2(neutral / total * 100.0),
        token_count: valences.len(),
        negated,
    }
}

/// Lexicon polarity; a word is negated when a cue appears within the three
/// preceding words
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    lexicon: Lexicon,
}

impl LexiconScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl SentimentScorer for LexiconScorer {
    fn variant(&self) -> ScorerVariant {
        ScorerVariant::Lexicon
    }

    fn analyze(&self, text: &str) -> Sentiment {
        let cleaned = preprocess(text);
        let words: Vec<String> = cleaned
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();
        let words: Vec<&str> = words.iter().map(String::as_str).collect();

        let mut negated = false;
        let valences: Vec<f64> = words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let Some(valence) = self.lexicon.valence(word) else {
                    return 0.0;
                };
                let mut valence = self.lexicon.boosted(&words, i, valence);
                let window = &words[i.saturating_sub(NEGATION_WINDOW)..i];
                if window.iter().any(|w| self.lexicon.is_negation(w)) {
                    valence *= NEGATION_SCALAR;
                    negated = true;
                }
                valence
            })
            .collect();

        summarize(&valences, cleaned.matches('!').count(), negated)
    }
}

/// Lexicon polarity over tokenizer output: every polar word inside a negation
/// scope is flipped, and a still-positive result is damped when negation was
/// present
#[cfg(feature = "negation-tokenizer")]
#[derive(Debug, Clone)]
pub struct NegationAwareScorer {
    lexicon: Lexicon,
    tokenizer: Tokenizer,
}

#[cfg(feature = "negation-tokenizer")]
impl NegationAwareScorer {
    pub fn new(lexicon: Lexicon, tokenizer: Tokenizer) -> Self {
        Self { lexicon, tokenizer }
    }
}

#[cfg(feature = "negation-tokenizer")]
impl SentimentScorer for NegationAwareScorer {
    fn variant(&self) -> ScorerVariant {
        ScorerVariant::NegationAware
    }

    fn analyze(&self, text: &str) -> Sentiment {
        let tokens = self.tokenizer.tokenize(text);
        let exclamations = tokens.iter().filter(|t| t.text == "!").count();
        let words: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Word).collect();
        let texts: Vec<&str> = words.iter().map(|t| t.text.as_str()).collect();

        let has_negation = texts.iter().any(|w| self.tokenizer.is_negation(w));
        let valences: Vec<f64> = words
            .iter()
            .enumerate()
            .map(|(i, token)| match self.lexicon.valence(&token.text) {
                Some(valence) => {
                    let valence = self.lexicon.boosted(&texts, i, valence);
                    if token.negated {
                        valence * NEGATION_SCALAR
                    } else {
                        valence
                    }
                }
                None => 0.0,
            })
            .collect();

        let mut sentiment = summarize(&valences, exclamations, has_negation);
        if has_negation && sentiment.compound > RESIDUAL_NEGATION_THRESHOLD {
            sentiment.compound = (sentiment.compound - RESIDUAL_NEGATION_DAMPING).max(-1.0);
            sentiment.score = rescale_compound(sentiment.compound);
        }
        sentiment
    }
}
