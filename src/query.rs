//! Query normalization for keyword retrieval
//!
//! Turns a free-text issue description into the filter tokens the record
//! stores match on. The rules are fixed and deterministic: split on
//! whitespace, lowercase, drop stopwords and empty fragments. Order is
//! preserved and duplicates are kept (each token is an independent
//! OR-clause downstream).

/// Words that carry no topical signal and never become filter tokens.
pub const STOPWORDS: [&str; 16] = [
    "the", "is", "a", "an", "to", "for", "with", "and", "or", "what", "do", "i", "my", "on",
    "how", "of",
];

/// Ordered set of lowercase filter tokens derived from one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterTokens(Vec<String>);

impl FilterTokens {
    /// Extract filter tokens from free text.
    ///
    /// Any input is valid; stopword-only or whitespace-only queries
    /// produce an empty token set.
    pub fn parse(query: &str) -> Self {
        let tokens = query
            .split_whitespace()
            .map(|fragment| fragment.trim().to_lowercase())
            .filter(|token| !token.is_empty() && !STOPWORDS.contains(&token.as_str()))
            .collect();
        FilterTokens(tokens)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Rejoin tokens for boundaries that take a single query string.
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    /// OR-substring match: true if any token appears case-insensitively
    /// in the haystack. An empty token set matches everything (no filter).
    pub fn matches(&self, haystack: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        let haystack = haystack.to_lowercase();
        self.0.iter().any(|token| haystack.contains(token.as_str()))
    }
}

impl std::fmt::Display for FilterTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}
