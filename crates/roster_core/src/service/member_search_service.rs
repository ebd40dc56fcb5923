//! Member search use-case service.
//!
//! # Responsibility
//! - Compose criteria predicates and run them against a search store.
//! - Offer both paging strategies: always-count and count-elision.
//!
//! # Invariants
//! - At most one bounded fetch and one COUNT query per paged search.
//! - Store errors are returned unchanged; nothing is retried.
//! - Log lines carry metadata only, never filter values.

use crate::model::criteria::MemberSearchCriteria;
use crate::model::member::MemberTeamRecord;
use crate::model::page::{Page, PageRequest, Sort};
use crate::query::count::resolve_total;
use crate::query::predicate::{where_clause_for, WhereClause};
use crate::repo::member_repo::{FetchBounds, MemberSearchStore, RepoResult};
use log::{error, info};
use std::time::Instant;

/// Paging strategy for [`MemberSearchService::search_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingStrategy {
    /// Fetch the page and always run the COUNT query.
    Simple,
    /// Fetch the page and run COUNT only when geometry cannot fix the total.
    Optimized,
}

impl PagingStrategy {
    fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Optimized => "optimized",
        }
    }
}

/// Search facade over a [`MemberSearchStore`].
pub struct MemberSearchService<S: MemberSearchStore> {
    store: S,
}

impl<S: MemberSearchStore> MemberSearchService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns every matching row, unpaged, in `sort` order.
    pub fn search(
        &self,
        criteria: &MemberSearchCriteria,
        sort: &Sort,
    ) -> RepoResult<Vec<MemberTeamRecord>> {
        let started_at = Instant::now();
        let filter = where_clause_for(criteria);
        let content = self
            .store
            .fetch_member_teams(&filter, sort, None)
            .inspect_err(|err| log_failure("search", started_at, err))?;

        info!(
            "event=member_search module=service status=ok mode=list predicates={} rows={} duration_ms={}",
            filter.len(),
            content.len(),
            started_at.elapsed().as_millis()
        );
        Ok(content)
    }

    /// Pages through matches, always issuing a separate COUNT query.
    pub fn search_page_simple(
        &self,
        criteria: &MemberSearchCriteria,
        request: &PageRequest,
    ) -> RepoResult<Page<MemberTeamRecord>> {
        self.search_page(criteria, request, PagingStrategy::Simple)
    }

    /// Pages through matches, skipping COUNT when the page shape fixes the
    /// total.
    pub fn search_page_optimized(
        &self,
        criteria: &MemberSearchCriteria,
        request: &PageRequest,
    ) -> RepoResult<Page<MemberTeamRecord>> {
        self.search_page(criteria, request, PagingStrategy::Optimized)
    }

    /// Pages through matches with an explicitly chosen `strategy`.
    pub fn search_page(
        &self,
        criteria: &MemberSearchCriteria,
        request: &PageRequest,
        strategy: PagingStrategy,
    ) -> RepoResult<Page<MemberTeamRecord>> {
        let started_at = Instant::now();
        let filter = where_clause_for(criteria);

        let result = self.run_page(&filter, request, strategy);
        match result {
            Ok((page, count_query_issued)) => {
                info!(
                    "event=member_search module=service status=ok mode=page strategy={} predicates={} offset={} limit={} rows={} total={} count_query={} duration_ms={}",
                    strategy.as_str(),
                    filter.len(),
                    request.offset(),
                    request.limit(),
                    page.len(),
                    page.total,
                    if count_query_issued { "issued" } else { "skipped" },
                    started_at.elapsed().as_millis()
                );
                Ok(page)
            }
            Err(err) => {
                log_failure(strategy.as_str(), started_at, &err);
                Err(err)
            }
        }
    }

    fn run_page(
        &self,
        filter: &WhereClause,
        request: &PageRequest,
        strategy: PagingStrategy,
    ) -> RepoResult<(Page<MemberTeamRecord>, bool)> {
        let bounds = FetchBounds {
            offset: request.offset(),
            limit: request.limit(),
        };
        let content = self
            .store
            .fetch_member_teams(filter, request.sort(), Some(bounds))?;

        let (total, count_query_issued) = match strategy {
            PagingStrategy::Simple => (self.store.count_member_teams(filter)?, true),
            PagingStrategy::Optimized => {
                let resolved = resolve_total(request.offset(), request.limit(), content.len(), || {
                    self.store.count_member_teams(filter)
                })?;
                (resolved.total, resolved.count_query_issued)
            }
        };

        Ok((
            Page::new(content, request.clone(), total),
            count_query_issued,
        ))
    }
}

fn log_failure(mode: &str, started_at: Instant, err: &dyn std::error::Error) {
    error!(
        "event=member_search module=service status=error mode={} duration_ms={} error={}",
        mode,
        started_at.elapsed().as_millis(),
        err
    );
}
