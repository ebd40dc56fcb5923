//! Member/team repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Run the filtered `member LEFT JOIN team` fetch and its COUNT twin.
//! - Provide the small write path used to seed teams and members.
//!
//! # Invariants
//! - Fetches always left-join `team`, so members without a team are kept.
//! - Counts aggregate with `COUNT(member.id)` and never materialize rows.
//! - Read paths reject undecodable rows instead of masking them.

use crate::db::DbError;
use crate::model::member::{Member, MemberId, MemberTeamRecord, NewMember, Team, TeamId};
use crate::model::page::Sort;
use crate::query::order::order_by_sql;
use crate::query::predicate::WhereClause;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MEMBER_TEAM_SELECT_SQL: &str = "SELECT
    member.id AS member_id,
    member.username AS username,
    member.age AS age,
    team.id AS team_id,
    team.name AS team_name
FROM member
LEFT JOIN team ON team.id = member.team_id";

const TEAM_JOIN_SQL: &str = " LEFT JOIN team ON team.id = member.team_id";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for roster reads and seed writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A required table is missing on the given connection.
    MissingRequiredTable(&'static str),
    /// A stored row could not be decoded into the projection.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted roster data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Row window applied to a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchBounds {
    pub offset: u64,
    pub limit: u32,
}

/// Read capability required by member searches.
pub trait MemberSearchStore {
    /// Fetches projection rows matching `filter`, ordered by `sort` and
    /// bounded by `bounds` when given.
    fn fetch_member_teams(
        &self,
        filter: &WhereClause,
        sort: &Sort,
        bounds: Option<FetchBounds>,
    ) -> RepoResult<Vec<MemberTeamRecord>>;

    /// Counts all member rows matching `filter`, ignoring paging.
    fn count_member_teams(&self, filter: &WhereClause) -> RepoResult<u64>;
}

impl<S: MemberSearchStore + ?Sized> MemberSearchStore for &S {
    fn fetch_member_teams(
        &self,
        filter: &WhereClause,
        sort: &Sort,
        bounds: Option<FetchBounds>,
    ) -> RepoResult<Vec<MemberTeamRecord>> {
        (**self).fetch_member_teams(filter, sort, bounds)
    }

    fn count_member_teams(&self, filter: &WhereClause) -> RepoResult<u64> {
        (**self).count_member_teams(filter)
    }
}

/// Write path for seeding teams and members.
pub trait MemberWriteRepository {
    fn create_team(&self, name: &str) -> RepoResult<Team>;
    fn create_member(&self, member: &NewMember) -> RepoResult<Member>;
}

/// SQLite-backed roster repository.
pub struct SqliteMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when `team` or `member` does not exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in ["team", "member"] {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

impl MemberSearchStore for SqliteMemberRepository<'_> {
    fn fetch_member_teams(
        &self,
        filter: &WhereClause,
        sort: &Sort,
        bounds: Option<FetchBounds>,
    ) -> RepoResult<Vec<MemberTeamRecord>> {
        let mut sql = format!(
            "{MEMBER_TEAM_SELECT_SQL}{}{}",
            filter.to_sql(),
            order_by_sql(sort)
        );
        let mut bind_values: Vec<Value> = filter.bind_values().to_vec();

        if let Some(bounds) = bounds {
            sql.push_str(" LIMIT ? OFFSET ?");
            bind_values.push(Value::Integer(i64::from(bounds.limit)));
            // Offsets past i64::MAX cannot match any row.
            bind_values.push(Value::Integer(
                i64::try_from(bounds.offset).unwrap_or(i64::MAX),
            ));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_member_team_row(row)?);
        }

        debug!(
            "event=member_fetch module=repo status=ok bounded={} rows={}",
            bounds.is_some(),
            records.len()
        );
        Ok(records)
    }

    fn count_member_teams(&self, filter: &WhereClause) -> RepoResult<u64> {
        let join = if filter.requires_team_join() {
            TEAM_JOIN_SQL
        } else {
            ""
        };
        let sql = format!("SELECT COUNT(member.id) FROM member{join}{}", filter.to_sql());

        let count: i64 = self.conn.query_row(
            &sql,
            params_from_iter(filter.bind_values()),
            |row| row.get(0),
        )?;

        debug!(
            "event=member_count module=repo status=ok joined={} total={}",
            filter.requires_team_join(),
            count
        );
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative member count `{count}`")))
    }
}

impl MemberWriteRepository for SqliteMemberRepository<'_> {
    fn create_team(&self, name: &str) -> RepoResult<Team> {
        self.conn
            .execute("INSERT INTO team (name) VALUES (?1);", [name])?;
        Ok(Team {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    fn create_member(&self, member: &NewMember) -> RepoResult<Member> {
        self.conn.execute(
            "INSERT INTO member (username, age, team_id) VALUES (?1, ?2, ?3);",
            params![member.username.as_deref(), member.age, member.team_id],
        )?;
        Ok(Member {
            id: self.conn.last_insert_rowid(),
            username: member.username.clone(),
            age: member.age,
            team_id: member.team_id,
        })
    }
}

fn parse_member_team_row(row: &Row<'_>) -> RepoResult<MemberTeamRecord> {
    let member_id: MemberId = row.get("member_id")?;
    let team_id: Option<TeamId> = row.get("team_id")?;
    let team_name: Option<String> = row.get("team_name")?;

    if team_id.is_some() != team_name.is_some() {
        return Err(RepoError::InvalidData(format!(
            "member {member_id} has a partial team join (team_id={team_id:?})"
        )));
    }

    Ok(MemberTeamRecord {
        member_id,
        username: row.get("username")?,
        age: row.get("age")?,
        team_id,
        team_name,
    })
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
