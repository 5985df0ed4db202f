mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use caldir_index::config::IndexConfig;
use caldir_index::source::CalendarSource;
use caldir_index::{CalendarId, EventStore};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "caldir-index")]
#[command(about = "Query the events in your caldir by calendar and by file")]
struct Cli {
    /// Calendar directory to index (defaults to calendar_dir from the config)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show event, file and calendar counts
    Stats,
    /// List events grouped by calendar
    List {
        /// Only show this calendar (by slug)
        #[arg(short, long)]
        calendar: Option<String>,

        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// List the events read from one file (path relative to the calendar directory)
    File {
        path: String,

        /// Only show events in this calendar (by slug)
        #[arg(short, long)]
        calendar: Option<String>,
    },
    /// Show where an event lives
    Show { id: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = load_source(cli.dir)?;
    let mut store = EventStore::new();
    source.index_all(&mut store)?;

    match cli.command {
        Commands::Stats => commands::stats::run(&store),
        Commands::List { calendar, json } => {
            let calendar = resolve_calendar(&source, calendar.as_deref())?;
            commands::list::run(&store, calendar.as_ref(), json)
        }
        Commands::File { path, calendar } => {
            let calendar = resolve_calendar(&source, calendar.as_deref())?;
            commands::file::run(&store, &path, calendar.as_ref())
        }
        Commands::Show { id } => commands::show::run(&store, &id),
    }
}

fn load_source(dir: Option<PathBuf>) -> Result<CalendarSource> {
    let mut config = IndexConfig::load()?;
    if let Some(dir) = dir {
        config.calendar_dir = dir;
    }

    let source = CalendarSource::from_config(&config);
    debug!(root = %source.root().display(), "indexing calendar directory");
    if !source.root().exists() {
        anyhow::bail!(
            "Calendar directory {} does not exist.\n\n\
            Set calendar_dir in {} or pass --dir.",
            source.root().display(),
            IndexConfig::config_path()?.display()
        );
    }

    Ok(source)
}

/// Match a calendar filter against the calendar directories on disk, so
/// calendars with no events can still be selected.
fn resolve_calendar(
    source: &CalendarSource,
    calendar_filter: Option<&str>,
) -> Result<Option<CalendarId>> {
    let Some(slug) = calendar_filter else {
        return Ok(None);
    };

    let calendars = source.calendars()?;
    let calendar = CalendarId::from(slug);
    if calendars.contains(&calendar) {
        return Ok(Some(calendar));
    }

    let available: Vec<_> = calendars.iter().map(|c| c.to_string()).collect();
    anyhow::bail!(
        "Calendar '{}' not found. Available: {}",
        slug,
        available.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_calendar_accepts_empty_calendar_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();
        let source = CalendarSource::new(dir.path());

        let calendar = resolve_calendar(&source, Some("empty")).unwrap();

        assert_eq!(calendar, Some(CalendarId::from("empty")));
    }

    #[test]
    fn test_resolve_calendar_rejects_unknown_calendar() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("work")).unwrap();
        let source = CalendarSource::new(dir.path());

        let err = resolve_calendar(&source, Some("home")).unwrap_err();

        assert_eq!(err.to_string(), "Calendar 'home' not found. Available: work");
    }

    #[test]
    fn test_resolve_calendar_without_filter() {
        let dir = TempDir::new().unwrap();
        let source = CalendarSource::new(dir.path());

        assert_eq!(resolve_calendar(&source, None).unwrap(), None);
    }
}
