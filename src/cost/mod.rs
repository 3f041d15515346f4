//! Heuristic cost scoring for watchlist queries.
//!
//! A watchlist runs its query against the whole process store on a
//! schedule, so a badly written query is paid for over and over. This
//! module flags the query shapes that usually cause that:
//!
//! - **Wildcards**: every `*` widens the scan
//! - **filemod / modload wildcards**: wildcards on the two largest event tables
//! - **Equality operators**: `field=value` bypasses the indexed `field:value` path
//! - **OR operators**: long disjunctions fan out into many sub-searches
//!
//! It is a proxy, not a cost model. Nothing here estimates cardinality or
//! inspects an execution plan.

pub mod classifier;
pub mod fields;

// Re-exports for convenient access
pub use classifier::{
    count_or_operators, count_wildcards, has_equality_operator, has_filemod_wildcard,
    has_modload_wildcard, CostIndicators,
};
pub use fields::SEARCH_FIELDS;
