//! Count-query elision from page geometry.
//!
//! The decision only looks at `offset`, `limit` and how many rows the bounded
//! fetch returned, never at the data itself.
//!
//! | offset | rows fetched        | total                 |
//! |--------|---------------------|-----------------------|
//! | 0      | `< limit`           | rows fetched          |
//! | > 0    | `1..limit`          | `offset + rows`       |
//! | > 0    | 0                   | COUNT query           |
//! | any    | `>= limit`          | COUNT query           |

/// Outcome of [`decide_total`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountDecision {
    /// Total follows from the fetched page alone.
    Known(u64),
    /// More rows may exist; a COUNT query must run.
    CountRequired,
}

/// Total plus whether it cost a COUNT query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTotal {
    pub total: u64,
    pub count_query_issued: bool,
}

/// Decides whether the total of a page can be derived from its geometry.
///
/// An empty page past offset 0 still needs a count: the offset may lie
/// beyond the last row, so `offset` would overstate the total.
pub fn decide_total(offset: u64, limit: u32, content_size: usize) -> CountDecision {
    let content_size = content_size as u64;
    if content_size >= u64::from(limit) {
        return CountDecision::CountRequired;
    }

    if offset == 0 {
        return CountDecision::Known(content_size);
    }

    if content_size > 0 {
        return CountDecision::Known(offset + content_size);
    }

    CountDecision::CountRequired
}

/// Applies [`decide_total`], calling `count` only when it is required.
///
/// Errors from `count` are returned unchanged.
pub fn resolve_total<E>(
    offset: u64,
    limit: u32,
    content_size: usize,
    count: impl FnOnce() -> Result<u64, E>,
) -> Result<ResolvedTotal, E> {
    match decide_total(offset, limit, content_size) {
        CountDecision::Known(total) => Ok(ResolvedTotal {
            total,
            count_query_issued: false,
        }),
        CountDecision::CountRequired => Ok(ResolvedTotal {
            total: count()?,
            count_query_issued: true,
        }),
    }
}
