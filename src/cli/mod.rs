//! Command-line binding
//!
//! Parses subcommands with clap, forwards them to the [`QueryFacade`] and
//! prints results as text tables or JSON. Error kinds map to exit codes:
//! validation 2, not found 3, storage 4.

pub mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::{self, AppState};
use crate::config::{ArchiveConfig, DATA_FILE_ENV, HOST_ENV, PORT_ENV};
use crate::error::{ArchiveError, ArchiveResult};
use crate::event_store::EventStore;
use crate::facade::{split_tags, AddEventInput, QueryFacade, StatsView, UpdateEventInput};
use crate::storage::JsonlBackend;

use output::{print_json, render_event_detail, render_event_table, render_stats, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "heavenly-archive")]
#[command(about = "Heavenly Archive - record your journey from the terminal")]
#[command(version)]
pub struct Cli {
    /// Archive file (defaults to $ARCHIVE_DATA_FILE or ./archive.jsonl)
    #[arg(long, global = true, env = DATA_FILE_ENV)]
    pub data_file: Option<PathBuf>,

    /// Output format
    #[arg(long, short, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the archive file
    Init,

    /// Add a new event
    Add {
        /// Event title
        #[arg(long, short)]
        title: String,

        /// virtue, trial, victory, legendary, divine or mortal
        #[arg(long, short, default_value = "virtue")]
        category: String,

        /// low, medium, high, critical or legendary
        #[arg(long, short, default_value = "medium")]
        importance: String,

        /// Event description
        #[arg(long, short)]
        description: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Where it happened
        #[arg(long)]
        location: Option<String>,

        /// Related link
        #[arg(long)]
        url: Option<String>,

        /// When it happened (YYYY-MM-DD or RFC 3339); defaults to now
        #[arg(long)]
        date: Option<String>,
    },

    /// List recent events, newest first
    List {
        /// Number of events to display
        #[arg(long, short, default_value_t = 10, allow_negative_numbers = true)]
        limit: i64,

        /// Filter by category
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Search titles and descriptions
    Search {
        /// Search query
        #[arg(long, short)]
        query: String,

        /// Maximum number of results
        #[arg(long, short, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Show totals per category
    Stats,

    /// Show one event
    Get {
        /// Event id
        id: u64,
    },

    /// Change fields of an event; an empty value clears optional text
    Update {
        /// Event id
        id: u64,

        #[arg(long, short)]
        title: Option<String>,

        #[arg(long, short)]
        category: Option<String>,

        #[arg(long, short)]
        importance: Option<String>,

        #[arg(long, short)]
        description: Option<String>,

        /// Comma-separated tags, replacing the current list
        #[arg(long)]
        tags: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an event
    Delete {
        /// Event id
        id: u64,
    },

    /// Run the HTTP API
    Serve {
        /// Bind address (defaults to $ARCHIVE_HOST or 0.0.0.0)
        #[arg(long, env = HOST_ENV)]
        host: Option<String>,

        /// Port (defaults to $ARCHIVE_PORT or 8000)
        #[arg(long, env = PORT_ENV)]
        port: Option<u16>,
    },
}

/// Exit code for a failed command
pub fn exit_code(err: &ArchiveError) -> u8 {
    match err {
        ArchiveError::Validation { .. } => 2,
        ArchiveError::NotFound(_) => 3,
        ArchiveError::Storage(_) => 4,
    }
}

/// Resolve configuration, run the command, report errors on stderr
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = ArchiveConfig::from_env().context("invalid environment configuration")?;
    if let Some(path) = &cli.data_file {
        config = config.with_data_file(path);
    }
    debug!(?config, "Resolved configuration");

    let result = match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            return serve(config).await.map(|_| ExitCode::SUCCESS);
        }
        Command::Init => init(&config),
        command => execute(&config, command, cli.output),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e);
            Ok(ExitCode::from(exit_code(&e)))
        }
    }
}

fn init(config: &ArchiveConfig) -> ArchiveResult<()> {
    if JsonlBackend::initialize(&config.data_file)? {
        println!("Archive initialized at {}", config.data_file.display());
    } else {
        println!("Archive already present at {}", config.data_file.display());
    }
    println!("You can now start adding events with: heavenly-archive add --title <TITLE>");
    Ok(())
}

async fn serve(config: ArchiveConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    let store = EventStore::open_file(&config.data_file)
        .with_context(|| format!("failed to open {}", config.data_file.display()))?;
    let state = Arc::new(AppState::new(Arc::new(store)));
    api::serve(state, addr)
        .await
        .with_context(|| format!("server on {} failed", addr))
}

/// Run a store-backed command against the archive file
pub fn execute(
    config: &ArchiveConfig,
    command: Command,
    format: OutputFormat,
) -> ArchiveResult<()> {
    let facade = QueryFacade::new(Arc::new(EventStore::open_file(&config.data_file)?));

    match command {
        Command::Add {
            title,
            category,
            importance,
            description,
            tags,
            location,
            url,
            date,
        } => {
            let event = facade.add(AddEventInput {
                title,
                description,
                category: Some(category),
                importance: Some(importance),
                tags: tags.as_deref().map(split_tags).unwrap_or_default(),
                location,
                related_url: url,
                event_date: date,
            })?;
            if format.is_text() {
                println!("Event recorded in the archive\n");
                print!("{}", render_event_detail(&event));
            } else {
                print_json(&event)?;
            }
        }

        Command::List { limit, category } => {
            let events = facade.list(Some(limit), category.as_deref())?;
            if format.is_text() {
                if events.is_empty() {
                    println!("No events found");
                } else {
                    print!("{}", render_event_table(&events));
                }
            } else {
                print_json(&events)?;
            }
        }

        Command::Search { query, limit } => {
            let events = facade.search(&query, limit)?;
            if format.is_text() {
                if events.is_empty() {
                    println!("No events found matching '{}'", query);
                } else {
                    print!("{}", render_event_table(&events));
                }
            } else {
                print_json(&events)?;
            }
        }

        Command::Stats => {
            let stats = facade.stats()?;
            if format.is_text() {
                print!("{}", render_stats(&StatsView::from(&stats)));
            } else {
                print_json(&stats)?;
            }
        }

        Command::Get { id } => {
            let event = facade.get(id)?;
            if format.is_text() {
                print!("{}", render_event_detail(&event));
            } else {
                print_json(&event)?;
            }
        }

        Command::Update {
            id,
            title,
            category,
            importance,
            description,
            tags,
            location,
            url,
            date,
        } => {
            let event = facade.update(
                id,
                UpdateEventInput {
                    title,
                    description: description.map(Some),
                    category,
                    importance,
                    tags: tags.as_deref().map(split_tags),
                    location: location.map(Some),
                    related_url: url.map(Some),
                    event_date: date,
                },
            )?;
            if format.is_text() {
                print!("{}", render_event_detail(&event));
            } else {
                print_json(&event)?;
            }
        }

        Command::Delete { id } => {
            facade.delete(id)?;
            if format.is_text() {
                println!("Deleted event {}", id);
            } else {
                print_json(&serde_json::json!({ "deleted": id }))?;
            }
        }

        Command::Init | Command::Serve { .. } => {
            return Err(ArchiveError::validation(
                "command",
                "init and serve are not store queries",
            ));
        }
    }

    Ok(())
}
