//! Roster domain model and search request/response shapes.
//!
//! # Responsibility
//! - Define `Member` / `Team` records as stored in SQLite.
//! - Define the search inputs (`MemberSearchCriteria`, `PageRequest`) and
//!   the paged output envelope (`Page`).
//!
//! # Invariants
//! - Absent optional fields mean "no constraint", never "equals empty/zero".

pub mod criteria;
pub mod member;
pub mod page;
