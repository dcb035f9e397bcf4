//! Results of library queries

use std::fmt;

use crate::confirmation::ConfirmationCode;

/// Outcome of a library search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Confirmation code of the search
    pub code: ConfirmationCode,

    /// Template id of the best match (0 unless `code` is OK)
    pub id: u16,

    /// Match score of the best match (0 unless `code` is OK)
    pub score: u16,
}

impl SearchResult {
    /// A result carrying only a code
    pub fn miss(code: ConfirmationCode) -> Self {
        Self {
            code,
            id: 0,
            score: 0,
        }
    }

    /// True when a template was found
    pub fn is_found(&self) -> bool {
        self.code.is_ok()
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_found() {
            write!(f, "Found[id: {}, score: {}]", self.id, self.score)
        } else {
            write!(f, "NotFound[{}]", self.code)
        }
    }
}

/// Outcome of comparing the two character buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Confirmation code of the comparison
    pub code: ConfirmationCode,

    /// Match score as reported by the module
    pub score: u16,
}

impl MatchResult {
    /// True when the buffers match
    pub fn is_match(&self) -> bool {
        self.code.is_ok()
    }
}
