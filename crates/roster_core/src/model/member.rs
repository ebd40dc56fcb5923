//! Member and team records.
//!
//! # Invariants
//! - `id` values are assigned by the store and never reused.
//! - A member references at most one team; `team_id = None` means no team.

use serde::{Deserialize, Serialize};

/// Store-assigned member identifier.
pub type MemberId = i64;

/// Store-assigned team identifier.
pub type TeamId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// Nullable in storage; absent usernames are never matched by an
    /// equality filter.
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<TeamId>,
}

/// Insert payload for a new member. The id is generated on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<TeamId>,
}

impl NewMember {
    /// Member with a username and no team.
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    /// Assigns the member to `team_id`.
    pub fn in_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

/// Flattened member + team row produced by the search join.
///
/// Owned by the query layer and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberTeamRecord {
    pub member_id: MemberId,
    pub username: Option<String>,
    pub age: i32,
    /// `None` for members without a team.
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
}
