//! N-gram corpus generation for fuzzy full-text matching.
//!
//! # Responsibility
//! - Tokenize input text and emit fixed-window substrings per token.
//! - Keep prefix-anchored and anywhere-anchored corpora independent.
//!
//! # Invariants
//! - Output order is deterministic: token order, increasing window
//!   length, left to right; duplicates keep their first occurrence.
//! - Windows are cut on char boundaries, never mid-codepoint.

use std::collections::HashSet;

/// Anchoring mode for generated n-grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NgramMode {
    /// Anchored at token starts; more relevant, indexed with higher weight.
    PrefixOnly,
    /// Anchored anywhere within a token; indexed with lower weight.
    InfixOnly,
}

/// Window-length bounds for n-gram generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramConfig {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 12,
        }
    }
}

/// Generator seam so callers can swap tokenization strategies.
pub trait NgramGenerator {
    fn create_ngrams(&self, text: &str, mode: NgramMode, config: &NgramConfig) -> Vec<String>;
}

/// Default generator: whitespace tokenization, lowercasing, sliding
/// char windows.
///
/// Tokens shorter than `min_length` are emitted whole so short codes
/// stay searchable.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowNgramGenerator;

impl NgramGenerator for WindowNgramGenerator {
    fn create_ngrams(&self, text: &str, mode: NgramMode, config: &NgramConfig) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut ngrams = Vec::new();
        let mut emit = |candidate: String| {
            if seen.insert(candidate.clone()) {
                ngrams.push(candidate);
            }
        };

        // Zero-length windows are meaningless; treat them as length 1.
        let min_length = config.min_length.max(1);

        for token in text.split_whitespace() {
            let chars: Vec<char> = token.to_lowercase().chars().collect();
            if chars.is_empty() {
                continue;
            }

            if chars.len() < min_length {
                emit(chars.iter().collect());
                continue;
            }

            let max = config.max_length.min(chars.len());
            for length in min_length..=max {
                match mode {
                    NgramMode::PrefixOnly => emit(chars[..length].iter().collect()),
                    NgramMode::InfixOnly => {
                        for window in chars.windows(length) {
                            emit(window.iter().collect());
                        }
                    }
                }
            }
        }

        ngrams
    }
}
