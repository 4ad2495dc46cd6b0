//! Clause-aware tokenizer that marks negation scopes

use std::collections::HashSet;
use wellpulse_core::ScorerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercased surface form
    pub text: String,
    pub kind: TokenKind,
    /// Inside the scope of a preceding negation cue
    pub negated: bool,
}

impl Token {
    fn word(text: String) -> Self {
        Self {
            text,
            kind: TokenKind::Word,
            negated: false,
        }
    }

    fn punct(c: char) -> Self {
        Self {
            text: c.to_string(),
            kind: TokenKind::Punct,
            negated: false,
        }
    }
}

const CLAUSE_BOUNDARIES: &[&str] = &[",", ".", ";", ":", "!", "?", "but", "however", "although"];

/// Splits text into words and punctuation, then opens a negation scope at
/// each cue and closes it at the next clause boundary
#[derive(Debug, Clone)]
pub struct Tokenizer {
    negations: HashSet<String>,
}

impl Tokenizer {
    pub fn new(negations: HashSet<String>) -> Self {
        Self { negations }
    }

    /// Tokenizer resource, if enabled by config
    pub fn load(config: &ScorerConfig, negations: &HashSet<String>) -> Option<Self> {
        config.enhanced.then(|| Self::new(negations.clone()))
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    fn push_word(tokens: &mut Vec<Token>, word: &mut String) {
        if word.is_empty() {
            return;
        }
        let lowered = word.trim_matches(|c| c == '-' || c == '\'').to_lowercase();
        word.clear();
        if lowered.is_empty() {
            return;
        }
        // Split the clitic: "don't" -> "do" + "n't"
        match lowered.strip_suffix("n't") {
            Some(stem) if !stem.is_empty() => {
                tokens.push(Token::word(stem.to_string()));
                tokens.push(Token::word("n't".to_string()));
            }
            _ => tokens.push(Token::word(lowered)),
        }
    }

    fn split(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word = String::new();

        for c in text.chars() {
            if c.is_alphanumeric() || c == '_' || ((c == '-' || c == '\'') && !word.is_empty()) {
                word.push(c);
            } else {
                Self::push_word(&mut tokens, &mut word);
                if c.is_ascii_punctuation() && c != '-' && c != '\'' {
                    tokens.push(Token::punct(c));
                }
            }
        }
        Self::push_word(&mut tokens, &mut word);
        tokens
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.split(text);

        let mut in_scope = false;
        for token in &mut tokens {
            if CLAUSE_BOUNDARIES.contains(&token.text.as_str()) {
                in_scope = false;
            } else if token.kind == TokenKind::Word && self.is_negation(&token.text) {
                in_scope = true;
            } else if token.kind == TokenKind::Word {
                token.negated = in_scope;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lexicon;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(Lexicon::new().negations().clone())
    }

    fn words(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_splits_punctuation_and_clitics() {
        let tokens = tokenizer().tokenize("I don't feel well-being, really!");
        assert_eq!(
            words(&tokens),
            vec!["i", "do", "n't", "feel", "well-being", ",", "really", "!"]
        );
        assert_eq!(tokens[5].kind, TokenKind::Punct);
    }

    #[test]
    fn test_negation_scope_closes_at_boundary() {
        let tokens = tokenizer().tokenize("Not helpful or supportive, but hopeful");
        let negated: Vec<_> = tokens.iter().filter(|t| t.negated).map(|t| t.text.as_str()).collect();
        assert_eq!(negated, vec!["helpful", "or", "supportive"]);
    }

    #[test]
    fn test_without_opens_scope() {
        let tokens = tokenizer().tokenize("left many people without timely support.");
        let support = tokens.iter().find(|t| t.text == "support").unwrap();
        assert!(support.negated);
        let people = tokens.iter().find(|t| t.text == "people").unwrap();
        assert!(!people.negated);
    }

    #[test]
    fn test_load_respects_config() {
        let negations = Lexicon::new().negations().clone();
        let disabled = ScorerConfig {
            enhanced: false,
            extra_negations: vec![],
        };
        assert!(Tokenizer::load(&disabled, &negations).is_none());

        let enabled = ScorerConfig::default();
        assert!(Tokenizer::load(&enabled, &negations).is_some());
    }
}
