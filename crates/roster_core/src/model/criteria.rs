//! Member search criteria.
//!
//! # Invariants
//! - Every field is optional; `None` contributes no filter.
//! - Blank strings are accepted here and dropped later by the predicate
//!   builder, so a criteria value is never rejected.
//! - `age_goe > age_loe` is legal and simply matches nothing.

use serde::{Deserialize, Serialize};

/// Sparse filter set for member searches.
///
/// Deserializes from query-string-style maps. Both `team_name` and the
/// camelCase `teamName` spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberSearchCriteria {
    /// Exact username match.
    pub username: Option<String>,
    /// Exact match on the joined team's name.
    #[serde(alias = "teamName")]
    pub team_name: Option<String>,
    /// Inclusive lower age bound.
    #[serde(alias = "ageGoe")]
    pub age_goe: Option<i32>,
    /// Inclusive upper age bound.
    #[serde(alias = "ageLoe")]
    pub age_loe: Option<i32>,
}

impl MemberSearchCriteria {
    /// Criteria with no constraints; matches every member.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn with_age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn with_age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// Convenience for an inclusive `[min, max]` age range.
    pub fn with_age_between(self, min: i32, max: i32) -> Self {
        self.with_age_goe(min).with_age_loe(max)
    }
}
