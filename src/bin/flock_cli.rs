//! Flock CLI
//!
//! Exercises the membership rules from a terminal.
//!
//! Usage:
//!   cargo run --features cli --bin flock_cli -- promote --kind disciple --roles disciple,treasurer
//!   cargo run --features cli --bin flock_cli -- search-url --entity disciple \
//!     --search-type full-name --first-names "Ana Maria" --last-names Quispe
//!   cargo run --features cli --bin flock_cli -- search --entity zone \
//!     --search-type zone-name --input Norte --all
//!   cargo run --features cli --bin flock_cli -- report --from 2024-06-01 --to 2024-06-30
//!   cargo run --features cli --bin flock_cli -- statuses

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use flock::client::STATUS_MESSAGES;
use flock::flock_types::{
    build_search_query, DateRange, MemberKind, OfferingExpense, OfferingIncome, Paging, RoleSet,
    SearchEntity, SearchFormInput, SearchQuery, SearchType, SortOrder,
};
use flock::{promotion_rule_for, summarize_offerings, ApiClient, FlockConfig};

#[derive(Parser, Debug)]
#[command(name = "flock_cli")]
#[command(about = "Church membership rules and API from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the promote action of a tier's update form against a role set
    Promote {
        /// Member tier whose form runs the action (disciple, supervisor, copastor)
        #[arg(long, short = 'k')]
        kind: MemberKind,

        /// Current roles, comma-separated (e.g. "disciple,treasurer")
        #[arg(long, short = 'r')]
        roles: RoleSet,
    },

    /// Print the request URL a search form would issue
    SearchUrl(SearchArgs),

    /// Run a search against the API and print the results as JSON
    Search(SearchArgs),

    /// Fetch offering income and expenses for a period and print the balance
    Report {
        /// First day of the period (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Last day of the period; defaults to --from
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Print the HTTP status message table
    Statuses,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long, short = 'e')]
    entity: SearchEntity,

    #[arg(long, short = 't')]
    search_type: SearchType,

    /// Free-text input term
    #[arg(long)]
    input: Option<String>,

    #[arg(long)]
    first_names: Option<String>,

    #[arg(long)]
    last_names: Option<String>,

    /// Start of a date range (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of a date range (YYYY-MM-DD); defaults to --from
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Select term (e.g. "female", "active")
    #[arg(long)]
    select: Option<String>,

    #[arg(long, short = 'l')]
    limit: Option<u32>,

    #[arg(long, default_value_t = 0)]
    offset: u32,

    /// Oldest first
    #[arg(long)]
    ascending: bool,

    /// Fetch every match
    #[arg(long)]
    all: bool,
}

impl SearchArgs {
    fn to_query(&self, config: &FlockConfig) -> Result<SearchQuery> {
        let input = SearchFormInput {
            input_term: self.input.clone(),
            first_names_term: self.first_names.clone(),
            last_names_term: self.last_names.clone(),
            date_term: self.from.map(|from| DateRange { from, to: self.to }),
            select_term: self.select.clone(),
        };
        let paging = Paging {
            limit: self.limit.unwrap_or(config.search_limit),
            offset: self.offset,
            order: if self.ascending {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            },
            all: self.all,
        };
        Ok(build_search_query(
            self.entity,
            self.search_type,
            &input,
            paging,
        )?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    flock::telemetry::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Promote { kind, roles } => {
            let Some(rule) = promotion_rule_for(kind) else {
                bail!("{} update form has no promote action", kind);
            };
            let outcome = rule.evaluate(&roles);
            let report = serde_json::json!({
                "rule": rule,
                "outcome": outcome,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::SearchUrl(args) => {
            let config = FlockConfig::from_env()?;
            let client = ApiClient::new(&config)?;
            let url = client.search_url(&args.to_query(&config)?)?;
            println!("{}", url);
        }
        Command::Search(args) => {
            let config = FlockConfig::from_env()?;
            let client = ApiClient::new(&config)?;
            let query = args.to_query(&config)?;
            let results: Vec<serde_json::Value> = client
                .search(&query)
                .await
                .with_context(|| format!("searching {} by {}", query.entity, query.search_type))?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Report { from, to } => {
            let config = FlockConfig::from_env()?;
            let client = ApiClient::new(&config)?;
            let input = SearchFormInput {
                date_term: Some(DateRange { from, to }),
                ..Default::default()
            };
            let paging = Paging {
                all: true,
                ..Paging::default()
            };

            let income_query =
                build_search_query(SearchEntity::OfferingIncome, SearchType::Date, &input, paging)?;
            let expense_query =
                build_search_query(SearchEntity::OfferingExpense, SearchType::Date, &input, paging)?;
            let income: Vec<OfferingIncome> = client
                .search(&income_query)
                .await
                .context("fetching offering income")?;
            let expenses: Vec<OfferingExpense> = client
                .search(&expense_query)
                .await
                .context("fetching offering expenses")?;

            let summary = summarize_offerings(&income, &expenses, input.date_term);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Statuses => {
            for entry in STATUS_MESSAGES {
                let logout = if entry.requires_logout { " (logout)" } else { "" };
                println!("{}  {}{}", entry.status, entry.message, logout);
            }
        }
    }

    Ok(())
}
