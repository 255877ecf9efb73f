use std::path::PathBuf;

use anyhow::{bail, Error};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use rand::Rng;
use tracing::error;

use crate::firestore::{credentials, DocumentStore, FirestoreClient};
use crate::generate::{estates, members, notices, transactions};
use crate::seed::{self, OpReport};

pub const DEFAULT_MEMBER_COUNT: usize = 25;
pub const DEFAULT_NOTICE_COUNT: usize = 10;
pub const DEFAULT_ESTATES_COUNT: usize = 3;

/// Add or clear sample data in the Lonepeak backend.
///
/// Flag spellings keep the underscore form (`--estate_id`) that existing
/// scripts and runbooks use.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The estate to operate on. Required for everything except
    /// `--type=estates`.
    #[arg(long = "estate_id")]
    pub estate_id: Option<String>,

    /// Action to perform.
    #[arg(long, value_enum, default_value_t = Action::Add)]
    pub action: Action,

    /// Kind of data to generate or clear.
    #[arg(long = "type", value_enum, default_value_t = DataKind::All)]
    pub kind: DataKind,

    /// Number of items to generate; 0 means the per-kind default
    /// (25 members, 10 notices).
    #[arg(long, default_value_t = 0)]
    pub count: i64,

    /// Number of estates to create with `--type=estates`.
    #[arg(long = "estates_count", default_value_t = 3)]
    pub estates_count: i64,

    /// Path to a service-account key file (alternatively set
    /// FIREBASE_CREDENTIALS_PATH or FIREBASE_CREDENTIALS_JSON).
    #[arg(long = "credentials_path")]
    pub credentials_path: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Clear,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    All,
    Transactions,
    Notices,
    Members,
    Estates,
}

impl Cli {
    pub fn run() -> Result<(), Error> {
        let cli = Cli::parse();
        let key = credentials::resolve(cli.credentials_path.as_deref())?;
        let store = FirestoreClient::connect(&key)?;
        let mut rng = rand::thread_rng();
        dispatch(&store, &cli, &mut rng)
    }
}

/// The `(action, type)` dispatch table. Fatal errors (missing estate id)
/// propagate; per-operation store errors are logged and folded into the
/// printed tallies without changing the exit code.
pub fn dispatch(store: &impl DocumentStore, cli: &Cli, rng: &mut impl Rng) -> Result<(), Error> {
    if cli.kind == DataKind::Estates {
        create_estates(store, cli, rng);
        return Ok(());
    }

    let Some(estate_id) = cli.estate_id.as_deref() else {
        bail!(
            "--estate_id is required for operations other than creating estates\n\
             Use: lonepeak-seed --type=estates --estates_count=3 to create new estates"
        );
    };

    println!("Working with estate ID: {estate_id}");

    match cli.action {
        Action::Clear => {
            if matches!(cli.kind, DataKind::All | DataKind::Transactions) {
                clear_kind(store, estate_id, "transactions");
            }
            if matches!(cli.kind, DataKind::All | DataKind::Notices) {
                clear_kind(store, estate_id, "notices");
            }
            if matches!(cli.kind, DataKind::All | DataKind::Members) {
                clear_kind(store, estate_id, "members");
            }
        }
        Action::Add => match cli.kind {
            DataKind::All => {
                let members_count = positive_or(cli.count, DEFAULT_MEMBER_COUNT);
                let notices_count = members_count.min(DEFAULT_NOTICE_COUNT);
                setup_estate(store, estate_id, members_count, notices_count, rng);
            }
            DataKind::Members => {
                add_members(store, estate_id, positive_or(cli.count, DEFAULT_MEMBER_COUNT), rng);
            }
            DataKind::Notices => {
                add_notices(store, estate_id, positive_or(cli.count, DEFAULT_NOTICE_COUNT), rng);
            }
            DataKind::Transactions => {
                add_transactions(store, estate_id);
            }
            // Handled before the estate-id check above.
            DataKind::Estates => {}
        },
    }

    Ok(())
}

/// `--type=estates`: create top-level estates, print ready-to-paste
/// follow-ups, and optionally populate the first one.
fn create_estates(store: &impl DocumentStore, cli: &Cli, rng: &mut impl Rng) {
    let count = positive_or(cli.estates_count, DEFAULT_ESTATES_COUNT);
    let batch = estates::estates(rng, count);
    let (created, report) = seed::add_estates(store, &batch);
    log_failures("adding estates", &report);

    for estate in &created {
        println!("Created estate: {} with ID: {}", estate.name, estate.id);
    }
    println!("Successfully added {} dummy estates!", created.len());

    println!("\nCreated estates:");
    for (idx, estate) in created.iter().enumerate() {
        println!("{}. {} (ID: {})", idx + 1, estate.name, estate.id);
    }

    println!("\nTo add data to these estates, use the --estate_id parameter:");
    for estate in &created {
        println!(
            "lonepeak-seed --estate_id={} --type=all  # Adds data to {}",
            estate.id, estate.name
        );
    }

    if let Some(first) = created.first() {
        if cli.count > 0 {
            let count = cli.count as usize;
            println!("\nSetting up the first estate ({}) with sample data...", first.name);
            setup_estate(store, &first.id, count, count, rng);
        }
    }
}

/// Populate one estate with members, notices, and the fixed transaction
/// set.
fn setup_estate(
    store: &impl DocumentStore,
    estate_id: &str,
    members_count: usize,
    notices_count: usize,
    rng: &mut impl Rng,
) {
    add_members(store, estate_id, members_count, rng);
    add_notices(store, estate_id, notices_count, rng);
    add_transactions(store, estate_id);
    println!("Estate {estate_id} has been successfully set up with data!");
}

fn add_members(store: &impl DocumentStore, estate_id: &str, count: usize, rng: &mut impl Rng) {
    let batch = members::members(rng, count);
    let report = seed::add_members(store, estate_id, &batch);
    log_failures("adding members", &report);
    println!(
        "Successfully added {} dummy members to estate {estate_id}!",
        report.succeeded
    );
}

fn add_notices(store: &impl DocumentStore, estate_id: &str, count: usize, rng: &mut impl Rng) {
    let batch = notices::notices(rng, Utc::now(), count);
    let report = seed::add_notices(store, estate_id, &batch);
    log_failures("adding notices", &report);
    println!(
        "Successfully added {} dummy notices to estate {estate_id}!",
        report.succeeded
    );
}

fn add_transactions(store: &impl DocumentStore, estate_id: &str) {
    let batch = transactions::transactions(Utc::now().date_naive());
    let report = seed::add_transactions(store, estate_id, &batch);
    log_failures("adding transactions", &report);
    println!(
        "Successfully added {} dummy transactions to estate {estate_id}!",
        report.succeeded
    );
}

fn clear_kind(store: &impl DocumentStore, estate_id: &str, kind: &str) {
    let collection = format!("estates/{estate_id}/{kind}");
    match seed::clear_collection(store, &collection) {
        Ok(report) => {
            log_failures("clearing", &report);
            println!(
                "Successfully cleared {} {kind} from estate {estate_id}!",
                report.succeeded
            );
        }
        Err(err) => error!("Error clearing {kind}: {err}"),
    }
}

fn log_failures(doing: &str, report: &OpReport) {
    for failure in &report.failures {
        error!("Error {doing} ({}): {}", failure.key, failure.error);
    }
}

fn positive_or(count: i64, default: usize) -> usize {
    if count > 0 {
        count as usize
    } else {
        default
    }
}
