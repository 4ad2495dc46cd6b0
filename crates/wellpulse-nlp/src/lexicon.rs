//! Polarity lexicon for well-being survey text
//!
//! Valences use a -4..4 scale. Boosters scale the next polar word up or down,
//! negation cues flip it.

use std::collections::{HashMap, HashSet};

static VALENCES: &[(&str, f64)] = &[
    // Positive
    ("acceptable", 1.3),
    ("balance", 1.1),
    ("balanced", 1.2),
    ("better", 1.9),
    ("calm", 1.3),
    ("care", 2.2),
    ("comfortable", 1.5),
    ("confident", 2.2),
    ("connected", 1.4),
    ("coping", 0.8),
    ("easier", 1.8),
    ("effective", 2.0),
    ("encouraging", 2.4),
    ("excellent", 2.7),
    ("game-changer", 2.0),
    ("good", 1.9),
    ("grateful", 2.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("help", 1.7),
    ("helped", 1.7),
    ("helpful", 1.8),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("improving", 1.8),
    ("love", 3.2),
    ("manageable", 1.1),
    ("mindfulness", 1.5),
    ("optimistic", 2.1),
    ("positive", 2.6),
    ("quality", 1.0),
    ("recovery", 1.4),
    ("relief", 2.1),
    ("resilient", 1.9),
    ("safe", 1.9),
    ("strong", 2.3),
    ("support", 1.7),
    ("supported", 1.8),
    ("supportive", 2.0),
    ("thrive", 2.4),
    ("thriving", 2.4),
    ("well-being", 1.8),
    ("wellness", 1.9),
    // Negative
    ("afraid", -2.2),
    ("alone", -1.0),
    ("anxiety", -0.7),
    ("anxious", -1.0),
    ("awful", -2.0),
    ("bad", -2.5),
    ("barrier", -1.4),
    ("burnout", -2.0),
    ("complicated", -1.1),
    ("concern", -1.2),
    ("crisis", -3.1),
    ("demands", -0.5),
    ("depressed", -2.3),
    ("depression", -2.7),
    ("difficult", -1.5),
    ("exhausted", -1.9),
    ("fail", -2.5),
    ("failing", -2.3),
    ("fear", -2.2),
    ("fluctuate", -0.4),
    ("gaps", -0.6),
    ("hard", -0.4),
    ("harder", -0.5),
    ("hate", -2.7),
    ("helpless", -2.0),
    ("hopeless", -2.0),
    ("impacted", -0.8),
    ("inconsistent", -1.2),
    ("isolation", -1.8),
    ("lack", -1.2),
    ("limited", -0.9),
    ("lonely", -2.0),
    ("losses", -1.5),
    ("low", -1.1),
    ("overcrowded", -1.5),
    ("overwhelmed", -1.9),
    ("pressures", -1.2),
    ("problem", -1.7),
    ("prohibitive", -1.5),
    ("sad", -2.1),
    ("stigma", -2.0),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("struggle", -1.9),
    ("struggling", -1.9),
    ("terrible", -3.1),
    ("underfunded", -1.5),
    ("understaffed", -1.6),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worsened", -2.1),
];

static BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293),
    ("deeply", 0.293),
    ("extremely", 0.293),
    ("greatly", 0.293),
    ("highly", 0.293),
    ("incredibly", 0.293),
    ("major", 0.293),
    ("much", 0.293),
    ("really", 0.293),
    ("severely", 0.293),
    ("significantly", 0.293),
    ("so", 0.293),
    ("truly", 0.293),
    ("very", 0.293),
    ("barely", -0.293),
    ("marginally", -0.293),
    ("occasional", -0.293),
    ("partly", -0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
];

static NEGATIONS: &[&str] = &[
    "not", "no", "never", "without", "neither", "nor", "none", "nobody", "nothing", "nowhere",
    "cannot", "n't", "dont", "don't", "doesnt", "doesn't", "didnt", "didn't", "isnt", "isn't",
    "arent", "aren't", "wasnt", "wasn't", "werent", "weren't", "cant", "can't", "couldnt",
    "couldn't", "wont", "won't", "wouldnt", "wouldn't", "shouldnt", "shouldn't", "hardly",
    "rarely", "seldom",
];

/// Scalar applied to a polar word inside a negation
pub const NEGATION_SCALAR: f64 = -0.74;

/// Word valences, boosters and negation cues
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            valences: VALENCES.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Add extra negation cues (lowercased)
    pub fn with_negations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.negations
            .extend(extra.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        self
    }

    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    pub fn negations(&self) -> &HashSet<String> {
        &self.negations
    }

    /// Apply boosters found among the (up to three) words preceding `index`
    pub fn boosted(&self, words: &[&str], index: usize, valence: f64) -> f64 {
        const DISTANCE_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

        let mut boosted = valence;
        for (step, decay) in DISTANCE_DECAY.iter().enumerate() {
            let Some(prev) = index.checked_sub(step + 1) else {
                break;
            };
            if let Some(scalar) = self.booster(words[prev]) {
                boosted += valence.signum() * scalar * decay;
            }
        }
        boosted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let lexicon = Lexicon::new();
        assert!(lexicon.valence("hopeful").unwrap() > 0.0);
        assert!(lexicon.valence("overwhelmed").unwrap() < 0.0);
        assert_eq!(lexicon.valence("region"), None);
        assert!(lexicon.is_negation("without"));
        assert!(lexicon.is_negation("n't"));
    }

    #[test]
    fn test_extra_negations() {
        let lexicon = Lexicon::new().with_negations([" Lacking "]);
        assert!(lexicon.is_negation("lacking"));
    }

    #[test]
    fn test_boosters_scale_magnitude() {
        let lexicon = Lexicon::new();
        let words = ["very", "helpful"];
        assert!(lexicon.boosted(&words, 1, 1.8) > 1.8);

        let words = ["slightly", "worse"];
        let damped = lexicon.boosted(&words, 1, -2.1);
        assert!(damped > -2.1 && damped < 0.0);
    }
}
