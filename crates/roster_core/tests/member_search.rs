use roster_core::db::open_db_in_memory;
use roster_core::{
    FetchBounds, MemberSearchCriteria, MemberSearchService, MemberSearchStore, MemberTeamRecord,
    MemberWriteRepository, NewMember, PageRequest, PagingStrategy, RepoError, RepoResult, Sort,
    SortKey, SortOrder, SqliteMemberRepository, WhereClause,
};
use rusqlite::Connection;
use std::cell::Cell;

/// Wraps the SQLite store and records how often each query runs.
struct CountingStore<'conn> {
    inner: SqliteMemberRepository<'conn>,
    fetches: Cell<usize>,
    counts: Cell<usize>,
}

impl<'conn> CountingStore<'conn> {
    fn new(conn: &'conn Connection) -> Self {
        Self {
            inner: SqliteMemberRepository::try_new(conn).unwrap(),
            fetches: Cell::new(0),
            counts: Cell::new(0),
        }
    }
}

impl MemberSearchStore for CountingStore<'_> {
    fn fetch_member_teams(
        &self,
        filter: &WhereClause,
        sort: &Sort,
        bounds: Option<FetchBounds>,
    ) -> RepoResult<Vec<MemberTeamRecord>> {
        self.fetches.set(self.fetches.get() + 1);
        self.inner.fetch_member_teams(filter, sort, bounds)
    }

    fn count_member_teams(&self, filter: &WhereClause) -> RepoResult<u64> {
        self.counts.set(self.counts.get() + 1);
        self.inner.count_member_teams(filter)
    }
}

fn seeded_roster() -> Connection {
    let conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteMemberRepository::try_new(&conn).unwrap();
        let team_a = repo.create_team("teamA").unwrap();
        let team_b = repo.create_team("teamB").unwrap();
        for (name, age, team) in [
            ("member1", 10, team_a.id),
            ("member2", 20, team_a.id),
            ("member3", 30, team_b.id),
            ("member4", 40, team_b.id),
        ] {
            repo.create_member(&NewMember::new(name, age).in_team(team))
                .unwrap();
        }
    }
    conn
}

fn age_20_to_40() -> MemberSearchCriteria {
    MemberSearchCriteria::new().with_age_between(20, 40)
}

fn by_age() -> Sort {
    Sort::by(SortOrder::asc(SortKey::Age))
}

#[test]
fn full_first_page_issues_count_query() {
    let conn = seeded_roster();
    let store = CountingStore::new(&conn);
    let service = MemberSearchService::new(&store);

    let page = service
        .search_page_optimized(&age_20_to_40(), &PageRequest::new(0, 2).unwrap())
        .unwrap();

    assert_eq!(page.content.len(), 2);
    assert!(page
        .content
        .iter()
        .all(|row| (20..=40).contains(&row.age)));
    assert_eq!(page.total, 3);
    assert_eq!(store.counts.get(), 1);
    assert!(page.has_next());
}

#[test]
fn under_full_first_page_derives_total_without_count() {
    let conn = seeded_roster();
    let store = CountingStore::new(&conn);
    let service = MemberSearchService::new(&store);

    let page = service
        .search_page_optimized(&age_20_to_40(), &PageRequest::new(0, 10).unwrap())
        .unwrap();

    assert_eq!(page.content.len(), 3);
    assert_eq!(page.total, 3);
    assert_eq!(store.fetches.get(), 1);
    assert_eq!(store.counts.get(), 0);
}

#[test]
fn under_full_last_page_derives_total_from_offset() {
    let conn = seeded_roster();
    let store = CountingStore::new(&conn);
    let service = MemberSearchService::new(&store);

    let request = PageRequest::new(2, 2).unwrap().with_sort(by_age());
    let page = service
        .search_page_optimized(&age_20_to_40(), &request)
        .unwrap();

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].age, 40);
    assert_eq!(page.content[0].team_name.as_deref(), Some("teamB"));
    assert_eq!(page.total, 3);
    assert_eq!(store.counts.get(), 0);
    assert!(page.is_last());
}

#[test]
fn empty_page_past_the_end_falls_back_to_count() {
    let conn = seeded_roster();
    let store = CountingStore::new(&conn);
    let service = MemberSearchService::new(&store);

    let page = service
        .search_page_optimized(&age_20_to_40(), &PageRequest::new(10, 2).unwrap())
        .unwrap();

    assert!(page.content.is_empty());
    assert_eq!(page.total, 3);
    assert_eq!(store.counts.get(), 1);
}

#[test]
fn simple_strategy_always_counts() {
    let conn = seeded_roster();
    let store = CountingStore::new(&conn);
    let service = MemberSearchService::new(&store);

    let page = service
        .search_page_simple(&age_20_to_40(), &PageRequest::new(0, 10).unwrap())
        .unwrap();

    assert_eq!(page.content.len(), 3);
    assert_eq!(page.total, 3);
    assert_eq!(store.fetches.get(), 1);
    assert_eq!(store.counts.get(), 1);
}

#[test]
fn strategies_agree_on_content_and_total() {
    let conn = seeded_roster();
    let store = CountingStore::new(&conn);
    let service = MemberSearchService::new(&store);

    for (offset, limit) in [(0, 1), (0, 2), (1, 2), (2, 2), (0, 10), (3, 5)] {
        let request = PageRequest::new(offset, limit).unwrap().with_sort(by_age());
        let simple = service
            .search_page(&age_20_to_40(), &request, PagingStrategy::Simple)
            .unwrap();
        let optimized = service
            .search_page(&age_20_to_40(), &request, PagingStrategy::Optimized)
            .unwrap();
        assert_eq!(simple, optimized, "offset={offset} limit={limit}");
    }
}

#[test]
fn empty_criteria_matches_all_rows() {
    let conn = seeded_roster();
    let repo = SqliteMemberRepository::try_new(&conn).unwrap();
    let service = MemberSearchService::new(repo);

    let rows = service
        .search(&MemberSearchCriteria::new(), &Sort::unsorted())
        .unwrap();
    assert_eq!(rows.len(), 4);
}

#[test]
fn blank_username_behaves_like_unset() {
    let conn = seeded_roster();
    let repo = SqliteMemberRepository::try_new(&conn).unwrap();
    let service = MemberSearchService::new(repo);
    let request = PageRequest::new(0, 10).unwrap().with_sort(by_age());

    let unset = service
        .search_page_optimized(&age_20_to_40(), &request)
        .unwrap();
    let blank = service
        .search_page_optimized(&age_20_to_40().with_username("   "), &request)
        .unwrap();
    assert_eq!(unset, blank);
}

#[test]
fn username_and_team_filters_combine() {
    let conn = seeded_roster();
    let repo = SqliteMemberRepository::try_new(&conn).unwrap();
    let service = MemberSearchService::new(repo);

    let hit = MemberSearchCriteria::new()
        .with_username("member3")
        .with_team_name("teamB");
    let rows = service.search(&hit, &Sort::unsorted()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].age, 30);

    let miss = MemberSearchCriteria::new()
        .with_username("member3")
        .with_team_name("teamA");
    assert!(service.search(&miss, &Sort::unsorted()).unwrap().is_empty());
}

#[test]
fn inverted_age_range_is_an_empty_result_not_an_error() {
    let conn = seeded_roster();
    let store = CountingStore::new(&conn);
    let service = MemberSearchService::new(&store);

    let criteria = MemberSearchCriteria::new().with_age_between(40, 20);
    let page = service
        .search_page_optimized(&criteria, &PageRequest::new(0, 10).unwrap())
        .unwrap();

    assert!(page.content.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(store.counts.get(), 0);
}

#[test]
fn repeated_search_is_idempotent() {
    let conn = seeded_roster();
    let repo = SqliteMemberRepository::try_new(&conn).unwrap();
    let service = MemberSearchService::new(repo);
    let request = PageRequest::new(0, 2).unwrap().with_sort(by_age());

    let first = service
        .search_page_optimized(&age_20_to_40(), &request)
        .unwrap();
    let second = service
        .search_page_optimized(&age_20_to_40(), &request)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn store_failure_propagates_unchanged() {
    let conn = seeded_roster();
    let repo = SqliteMemberRepository::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE member;").unwrap();
    let service = MemberSearchService::new(repo);

    let err = service
        .search_page_optimized(&age_20_to_40(), &PageRequest::new(0, 2).unwrap())
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn criteria_deserializes_from_query_style_json() {
    let criteria: MemberSearchCriteria =
        serde_json::from_str(r#"{"teamName": "teamA", "ageGoe": 15}"#).unwrap();
    assert_eq!(
        criteria,
        MemberSearchCriteria::new()
            .with_team_name("teamA")
            .with_age_goe(15)
    );

    let conn = seeded_roster();
    let repo = SqliteMemberRepository::try_new(&conn).unwrap();
    let rows = MemberSearchService::new(repo)
        .search(&criteria, &Sort::unsorted())
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username.as_deref(), Some("member2"));
}
