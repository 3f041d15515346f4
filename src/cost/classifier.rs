//! Query cost classifier for Carbon Black EDR watchlists.
//!
//! Scores a raw watchlist query on a handful of textual patterns that tend
//! to correlate with expensive backend execution.
//!
//! ## Overview
//!
//! None of these checks parse the query language. They are plain substring
//! and token inspections, cheap enough to run over every watchlist on a
//! server, and loose on purpose:
//! - `OR` is counted as a raw substring, so it also matches inside words
//! - `<field>=` is matched anywhere, without word boundaries
//! - filemod/modload tokens are split on single spaces only
//!
//! ## Example
//!
//! ```rust
//! use cbexpensive::cost::CostIndicators;
//!
//! let cost = CostIndicators::classify("process_name:foo.exe modload:*.dll");
//! assert_eq!(cost.wildcard_count, 1);
//! assert!(cost.has_modload_wildcard);
//! assert!(!cost.has_filemod_wildcard);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::fields::SEARCH_FIELDS;

const WILDCARD: char = '*';
const OR_OPERATOR: &str = "OR";
const FILEMOD_SYNTAX: &str = "filemod:";
const MODLOAD_SYNTAX: &str = "modload:";
const EQUAL: char = '=';

/// Cost indicators derived from a single query string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostIndicators {
    /// Number of `*` characters anywhere in the query
    pub wildcard_count: usize,
    /// A `filemod:` term carries a wildcard
    pub has_filemod_wildcard: bool,
    /// A `modload:` term carries a wildcard
    pub has_modload_wildcard: bool,
    /// Some known field is compared with `=` instead of `:`
    pub has_equality_operator: bool,
    /// Number of `OR` substrings
    pub or_operator_count: usize,
}

impl CostIndicators {
    /// Run every check against `query`.
    pub fn classify(query: &str) -> Self {
        Self {
            wildcard_count: count_wildcards(query),
            has_filemod_wildcard: has_filemod_wildcard(query),
            has_modload_wildcard: has_modload_wildcard(query),
            has_equality_operator: has_equality_operator(query),
            or_operator_count: count_or_operators(query),
        }
    }

    /// True if any indicator fired.
    pub fn is_flagged(&self) -> bool {
        self.wildcard_count > 0
            || self.has_filemod_wildcard
            || self.has_modload_wildcard
            || self.has_equality_operator
            || self.or_operator_count > 0
    }
}

impl fmt::Display for CostIndicators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wildcards={} filemod_wildcard={} modload_wildcard={} equal_operator={} or_operators={}",
            self.wildcard_count,
            self.has_filemod_wildcard,
            self.has_modload_wildcard,
            self.has_equality_operator,
            self.or_operator_count
        )
    }
}

/// Count `*` characters in the query.
pub fn count_wildcards(query: &str) -> usize {
    query.matches(WILDCARD).count()
}

/// Count non-overlapping, case-sensitive `OR` substrings.
///
/// Not a word match: `"ORACLE"` and `"FOREMOST"` each count once.
pub fn count_or_operators(query: &str) -> usize {
    query.matches(OR_OPERATOR).count()
}

/// True if a space-separated token contains both `filemod:` and a wildcard.
pub fn has_filemod_wildcard(query: &str) -> bool {
    has_wildcard_term(query, FILEMOD_SYNTAX)
}

/// True if a space-separated token contains both `modload:` and a wildcard.
pub fn has_modload_wildcard(query: &str) -> bool {
    has_wildcard_term(query, MODLOAD_SYNTAX)
}

/// True if `<field>=` appears anywhere in the query for a known search field.
///
/// Unanchored, so `xpath=...` also matches through `path`.
pub fn has_equality_operator(query: &str) -> bool {
    if !query.contains(EQUAL) {
        return false;
    }

    SEARCH_FIELDS.iter().any(|field| {
        query
            .match_indices(EQUAL)
            .any(|(idx, _)| query[..idx].ends_with(field))
    })
}

/// Tokens come from splitting on `' '` only; tabs and runs of spaces are not
/// collapsed, and the empty tokens they produce never match.
fn has_wildcard_term(query: &str, syntax: &str) -> bool {
    query
        .split(' ')
        .any(|term| term.contains(syntax) && term.contains(WILDCARD))
}
