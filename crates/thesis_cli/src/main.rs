//! Command-line entry point for the degree/role collections.
//!
//! # Responsibility
//! - Provide a thin local transport over `thesis_api` handlers.
//! - Print `status` plus JSON body so scripts can check outcomes.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use thesis_api::{
    create_record_json, delete_record, get_record, init_logging_from, list_records,
    update_record_json, with_collections, ApiConfig, ApiResponse, Collections,
};
use thesis_core::{Record, RecordId, RecordRepository, RecordService};

#[derive(Debug, Parser)]
#[command(name = "thesis", version, about = "Manage degree and role records")]
struct Cli {
    /// SQLite database file; overrides THESIS_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core version and health probe.
    Ping,
    /// Print stored record totals for both collections.
    Count,
    /// Operate on degrees.
    Degrees {
        #[command(subcommand)]
        action: Action,
    },
    /// Operate on roles.
    Roles {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Debug, Subcommand)]
enum Action {
    List,
    Get {
        #[arg(allow_negative_numbers = true)]
        id: RecordId,
    },
    /// Create from a JSON payload.
    Create { payload: String },
    /// Update the record at `id` from a JSON payload.
    Update {
        #[arg(allow_negative_numbers = true)]
        id: RecordId,
        payload: String,
    },
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: RecordId,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = ApiConfig::from_env().clone();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(err) = init_logging_from(&config) {
        eprintln!("logging disabled: {err}");
    }

    let outcome = match cli.command {
        Command::Ping => {
            println!("thesis_core ping={}", thesis_core::ping());
            println!("thesis_core version={}", thesis_core::core_version());
            return ExitCode::SUCCESS;
        }
        Command::Count => with_collections(&config, print_counts),
        Command::Degrees { action } => with_collections(&config, |c| run(&c.degrees, action)),
        Command::Roles { action } => with_collections(&config, |c| run(&c.roles, action)),
    };

    match outcome {
        Ok(Ok(true)) => ExitCode::SUCCESS,
        Ok(Ok(false)) => ExitCode::FAILURE,
        Ok(Err(err)) | Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Dispatches one action and prints the response; returns whether it succeeded.
fn run<R, S>(service: &RecordService<R, S>, action: Action) -> Result<bool, String>
where
    R: Record,
    S: RecordRepository<R>,
{
    let response = match action {
        Action::List => list_records(service),
        Action::Get { id } => get_record(service, id),
        Action::Create { payload } => create_record_json(service, &payload),
        Action::Update { id, payload } => update_record_json(service, id, &payload),
        Action::Delete { id } => delete_record(service, id),
    };
    print_response(&response)?;
    Ok(response.is_success())
}

fn print_counts(collections: &Collections<'_>) -> Result<bool, String> {
    let counts = collections
        .counts()
        .map_err(|err| format!("count failed: {err}"))?;
    println!("degrees={}", counts.degrees);
    println!("roles={}", counts.roles);
    Ok(true)
}

fn print_response<T: Serialize>(response: &ApiResponse<T>) -> Result<(), String> {
    let body = serde_json::to_string_pretty(&response.body)
        .map_err(|err| format!("failed to encode response: {err}"))?;
    println!("status={}", response.status);
    println!("{body}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Action, Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_update_with_global_db_flag() {
        let cli = Cli::try_parse_from([
            "thesis",
            "roles",
            "update",
            "3",
            r#"{"name":"Adviser"}"#,
            "--db",
            "/tmp/records.db",
        ])
        .unwrap();

        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/records.db")));
        let Command::Roles {
            action: Action::Update { id, payload },
        } = cli.command
        else {
            panic!("expected roles update");
        };
        assert_eq!(id, 3);
        assert_eq!(payload, r#"{"name":"Adviser"}"#);
    }

    #[test]
    fn accepts_negative_id_as_positional_value() {
        let cli = Cli::try_parse_from(["thesis", "degrees", "get", "-1"]).unwrap();

        let Command::Degrees {
            action: Action::Get { id },
        } = cli.command
        else {
            panic!("expected degrees get");
        };
        assert_eq!(id, -1);
    }

    #[test]
    fn parses_count_command() {
        let cli = Cli::try_parse_from(["thesis", "count"]).unwrap();
        assert!(matches!(cli.command, Command::Count));
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["thesis", "degrees", "get", "abc"]).is_err());
    }
}
