//! Command-line probe for the member search core.
//!
//! # Responsibility
//! - Open a roster database (file or in-memory) and optionally seed demo rows.
//! - Run one paged search with an explicit strategy and print it as JSON.

use clap::{Parser, ValueEnum};
use log::info;
use roster_core::db::{open_db, open_db_in_memory};
use roster_core::{
    init_logging, MemberSearchCriteria, MemberSearchService, MemberWriteRepository, NewMember,
    PageRequest, PagingStrategy, Sort, SortKey, SortOrder, SqliteMemberRepository,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Simple,
    Optimized,
}

impl From<StrategyArg> for PagingStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Simple => PagingStrategy::Simple,
            StrategyArg::Optimized => PagingStrategy::Optimized,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Search members by team and age")]
struct Cli {
    /// SQLite database file; an in-memory database is used when omitted.
    #[arg(long, env = "ROSTER_DB")]
    db: Option<PathBuf>,

    /// Insert the two-team demo roster before searching.
    #[arg(long)]
    seed_demo: bool,

    #[arg(long)]
    username: Option<String>,

    #[arg(long)]
    team_name: Option<String>,

    /// Inclusive minimum age.
    #[arg(long, allow_negative_numbers = true)]
    age_goe: Option<i32>,

    /// Inclusive maximum age.
    #[arg(long, allow_negative_numbers = true)]
    age_loe: Option<i32>,

    #[arg(long, default_value_t = 0)]
    offset: u64,

    #[arg(long, default_value_t = 20)]
    limit: u32,

    /// Sort key as `key[:asc|desc]`; repeat for secondary keys.
    #[arg(long = "sort", value_parser = parse_sort_order)]
    sort: Vec<SortOrder>,

    #[arg(long, value_enum, default_value_t = StrategyArg::Optimized)]
    strategy: StrategyArg,

    #[arg(long, env = "ROSTER_LOG_LEVEL", default_value_t = roster_core::default_log_level().to_string())]
    log_level: String,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long, env = "ROSTER_LOG_DIR")]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("roster: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir)?;
    }

    let conn = match cli.db.as_ref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let repo = SqliteMemberRepository::try_new(&conn)?;

    if cli.seed_demo {
        seed_demo(&repo)?;
    }

    let criteria = MemberSearchCriteria {
        username: cli.username,
        team_name: cli.team_name,
        age_goe: cli.age_goe,
        age_loe: cli.age_loe,
    };
    let sort = cli
        .sort
        .into_iter()
        .fold(Sort::unsorted(), |sort, order| sort.then(order));
    let request = PageRequest::new(cli.offset, cli.limit)?.with_sort(sort);

    let service = MemberSearchService::new(repo);
    let page = service.search_page(&criteria, &request, cli.strategy.into())?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

fn seed_demo(repo: &SqliteMemberRepository<'_>) -> Result<(), Box<dyn Error>> {
    let team_a = repo.create_team("teamA")?;
    let team_b = repo.create_team("teamB")?;
    for (username, age, team_id) in [
        ("member1", 10, team_a.id),
        ("member2", 20, team_a.id),
        ("member3", 30, team_b.id),
        ("member4", 40, team_b.id),
    ] {
        repo.create_member(&NewMember::new(username, age).in_team(team_id))?;
    }
    info!("event=seed_demo module=cli status=ok teams=2 members=4");
    Ok(())
}

fn parse_sort_order(value: &str) -> Result<SortOrder, String> {
    let (key, direction) = value.split_once(':').unwrap_or((value, "asc"));
    let key = SortKey::parse(key).ok_or_else(|| {
        format!("unknown sort key `{key}`; expected member_id|username|age|team_name")
    })?;
    match direction.trim().to_ascii_lowercase().as_str() {
        "asc" => Ok(SortOrder::asc(key)),
        "desc" => Ok(SortOrder::desc(key)),
        other => Err(format!("unknown sort direction `{other}`; expected asc|desc")),
    }
}
