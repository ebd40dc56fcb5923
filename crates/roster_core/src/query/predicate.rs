//! Dynamic predicate composition for member searches.
//!
//! Each `*_eq` / `age_*` function maps one optional criteria field to
//! `Some(predicate)` or `None`, so callers can compose any subset.
//!
//! # Invariants
//! - Absent or blank string fields yield no predicate.
//! - An empty predicate list renders no WHERE clause (matches all rows).

use crate::model::criteria::MemberSearchCriteria;
use rusqlite::types::Value;

/// One boolean condition over the `member LEFT JOIN team` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberPredicate {
    UsernameEq(String),
    TeamNameEq(String),
    AgeGoe(i32),
    AgeLoe(i32),
}

impl MemberPredicate {
    /// Whether this condition reads a `team` column.
    pub fn requires_team_join(&self) -> bool {
        matches!(self, Self::TeamNameEq(_))
    }

    fn condition_sql(&self) -> &'static str {
        match self {
            Self::UsernameEq(_) => "member.username = ?",
            Self::TeamNameEq(_) => "team.name = ?",
            Self::AgeGoe(_) => "member.age >= ?",
            Self::AgeLoe(_) => "member.age <= ?",
        }
    }

    fn bind_value(&self) -> Value {
        match self {
            Self::UsernameEq(value) | Self::TeamNameEq(value) => Value::Text(value.clone()),
            Self::AgeGoe(value) | Self::AgeLoe(value) => Value::Integer(i64::from(*value)),
        }
    }
}

/// `member.username = ?` when `username` has non-whitespace text.
///
/// The value is matched as given, not trimmed.
pub fn username_eq(username: Option<&str>) -> Option<MemberPredicate> {
    has_text(username).map(|value| MemberPredicate::UsernameEq(value.to_string()))
}

/// `team.name = ?` when `team_name` has non-whitespace text.
pub fn team_name_eq(team_name: Option<&str>) -> Option<MemberPredicate> {
    has_text(team_name).map(|value| MemberPredicate::TeamNameEq(value.to_string()))
}

/// `member.age >= ?` when a lower bound is given.
pub fn age_goe(age: Option<i32>) -> Option<MemberPredicate> {
    age.map(MemberPredicate::AgeGoe)
}

/// `member.age <= ?` when an upper bound is given.
pub fn age_loe(age: Option<i32>) -> Option<MemberPredicate> {
    age.map(MemberPredicate::AgeLoe)
}

/// Collects the predicates for every populated criteria field.
pub fn build_predicates(criteria: &MemberSearchCriteria) -> Vec<MemberPredicate> {
    [
        username_eq(criteria.username.as_deref()),
        team_name_eq(criteria.team_name.as_deref()),
        age_goe(criteria.age_goe),
        age_loe(criteria.age_loe),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// AND-folded predicate set ready for the SQLite store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    conditions: Vec<&'static str>,
    bind_values: Vec<Value>,
    requires_team_join: bool,
}

impl WhereClause {
    /// True when no condition is present, i.e. the filter is `TRUE`.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Number of AND-ed conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn requires_team_join(&self) -> bool {
        self.requires_team_join
    }

    /// Renders ` WHERE c1 AND c2 ...`, or an empty string for no conditions.
    pub fn to_sql(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }
        format!(" WHERE {}", self.conditions.join(" AND "))
    }

    /// Positional values in the same order as the rendered `?` markers.
    pub fn bind_values(&self) -> &[Value] {
        &self.bind_values
    }
}

/// Folds `predicates` with logical AND.
pub fn all_of(predicates: &[MemberPredicate]) -> WhereClause {
    predicates
        .iter()
        .fold(WhereClause::default(), |mut clause, predicate| {
            clause.conditions.push(predicate.condition_sql());
            clause.bind_values.push(predicate.bind_value());
            clause.requires_team_join |= predicate.requires_team_join();
            clause
        })
}

/// Shorthand for `all_of(&build_predicates(criteria))`.
pub fn where_clause_for(criteria: &MemberSearchCriteria) -> WhereClause {
    all_of(&build_predicates(criteria))
}

fn has_text(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{
        age_goe, age_loe, all_of, build_predicates, team_name_eq, username_eq, where_clause_for,
        MemberPredicate,
    };
    use crate::model::criteria::MemberSearchCriteria;
    use rusqlite::types::Value;

    #[test]
    fn empty_criteria_yields_no_predicates() {
        let criteria = MemberSearchCriteria::new();
        assert!(build_predicates(&criteria).is_empty());

        let clause = where_clause_for(&criteria);
        assert!(clause.is_empty());
        assert_eq!(clause.to_sql(), "");
        assert!(clause.bind_values().is_empty());
    }

    #[test]
    fn blank_strings_are_treated_as_absent() {
        assert_eq!(username_eq(Some("")), None);
        assert_eq!(username_eq(Some("   \t")), None);
        assert_eq!(team_name_eq(Some(" ")), None);
        assert_eq!(username_eq(None), None);

        let blank = MemberSearchCriteria::new().with_username("  ");
        assert_eq!(build_predicates(&blank), build_predicates(&MemberSearchCriteria::new()));
    }

    #[test]
    fn username_is_matched_as_given() {
        assert_eq!(
            username_eq(Some(" member1")),
            Some(MemberPredicate::UsernameEq(" member1".to_string()))
        );
    }

    #[test]
    fn zero_age_is_a_real_bound() {
        assert_eq!(age_goe(Some(0)), Some(MemberPredicate::AgeGoe(0)));
        assert_eq!(age_loe(Some(0)), Some(MemberPredicate::AgeLoe(0)));
        assert_eq!(age_goe(None), None);
    }

    #[test]
    fn full_criteria_renders_conjunction_in_field_order() {
        let criteria = MemberSearchCriteria::new()
            .with_username("member1")
            .with_team_name("teamA")
            .with_age_between(10, 20);

        let clause = where_clause_for(&criteria);
        assert_eq!(
            clause.to_sql(),
            " WHERE member.username = ? AND team.name = ? AND member.age >= ? AND member.age <= ?"
        );
        assert_eq!(
            clause.bind_values(),
            &[
                Value::Text("member1".to_string()),
                Value::Text("teamA".to_string()),
                Value::Integer(10),
                Value::Integer(20),
            ]
        );
        assert!(clause.requires_team_join());
    }

    #[test]
    fn subset_composition_without_team_filter_skips_join() {
        let predicates = [username_eq(Some("member1")), age_goe(Some(10))]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        let clause = all_of(&predicates);
        assert_eq!(
            clause.to_sql(),
            " WHERE member.username = ? AND member.age >= ?"
        );
        assert!(!clause.requires_team_join());
    }
}
