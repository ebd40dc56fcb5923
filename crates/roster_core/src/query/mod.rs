//! Query construction for member searches.
//!
//! # Responsibility
//! - Turn sparse criteria into a conjunction of column predicates.
//! - Render explicit sort orders from a closed column set.
//! - Decide when a page total can be derived without a COUNT query.
//!
//! # Invariants
//! - Everything here is pure; no module touches a connection.
//! - User input only ever reaches SQL as bind values.

pub mod count;
pub mod order;
pub mod predicate;
