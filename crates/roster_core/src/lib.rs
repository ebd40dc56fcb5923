//! Member/team search core.
//! Owns predicate composition, count-query elision and the SQLite store.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::criteria::MemberSearchCriteria;
pub use model::member::{Member, MemberId, MemberTeamRecord, NewMember, Team, TeamId};
pub use model::page::{
    NullOrdering, Page, PageRequest, PageRequestError, Sort, SortDirection, SortKey, SortOrder,
    MAX_PAGE_LIMIT,
};
pub use query::count::{decide_total, resolve_total, CountDecision, ResolvedTotal};
pub use query::predicate::{
    age_goe, age_loe, all_of, build_predicates, team_name_eq, username_eq, where_clause_for,
    MemberPredicate, WhereClause,
};
pub use repo::member_repo::{
    FetchBounds, MemberSearchStore, MemberWriteRepository, RepoError, RepoResult,
    SqliteMemberRepository,
};
pub use service::member_search_service::{MemberSearchService, PagingStrategy};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
