//! ORDER BY rendering for explicit sorts.

use crate::model::page::{NullOrdering, Sort, SortDirection, SortKey};

/// Renders ` ORDER BY ...` for `sort`, or an empty string when unsorted.
pub fn order_by_sql(sort: &Sort) -> String {
    if sort.is_unsorted() {
        return String::new();
    }

    let terms = sort
        .orders()
        .iter()
        .map(|order| {
            let mut term = format!("{} {}", column(order.key), direction(order.direction));
            match order.nulls {
                NullOrdering::StoreDefault => {}
                NullOrdering::NullsFirst => term.push_str(" NULLS FIRST"),
                NullOrdering::NullsLast => term.push_str(" NULLS LAST"),
            }
            term
        })
        .collect::<Vec<_>>();

    format!(" ORDER BY {}", terms.join(", "))
}

fn column(key: SortKey) -> &'static str {
    match key {
        SortKey::MemberId => "member.id",
        SortKey::Username => "member.username",
        SortKey::Age => "member.age",
        SortKey::TeamName => "team.name",
    }
}

fn direction(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    }
}
