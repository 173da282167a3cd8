use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;
use wonderland_core::{AnySource, Backend, CatalogSource, MemoryStore, resolve_data_dir};

mod commands;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    }
}

/// CLI wrapper for Backend enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliBackend {
    #[default]
    Fixtures,
    Hosted,
}

impl From<CliBackend> for Backend {
    fn from(cli: CliBackend) -> Self {
        match cli {
            CliBackend::Fixtures => Backend::Fixtures,
            CliBackend::Hosted => Backend::Hosted,
        }
    }
}

#[derive(Parser)]
#[command(name = "wonderland")]
#[command(about = "Browse lessons, track progress and plan coaching sessions")]
struct Cli {
    /// Where to load the catalog from
    #[arg(short, long, global = true, default_value = "fixtures")]
    backend: CliBackend,

    /// Fixture directory. Defaults to $WONDERLAND_DATA_DIR, then the platform data dir.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Act as this user. Defaults to the first user in the catalog.
    #[arg(short, long, global = true)]
    user: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search, filter and sort the lesson catalog
    Lessons {
        /// Free-text search over title, description, category and tags
        #[arg(short, long, default_value = "")]
        query: String,

        /// Exact category, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Beginner, Intermediate, Advanced, or "all"
        #[arg(short, long, default_value = "all")]
        level: String,

        /// featured, title, price-low, price-high, duration-short, duration-long
        #[arg(short, long, default_value = "featured")]
        sort: String,

        /// Extra criteria as key=value
        #[arg(short = 'w', long = "where")]
        filters: Vec<String>,
    },

    /// Upcoming and past coaching sessions
    Sessions {
        /// individual, group, workshop, or "all"
        #[arg(short = 't', long = "type", default_value = "all")]
        session_type: String,

        /// upcoming, past, or "all"
        #[arg(short, long, default_value = "all")]
        window: String,
    },

    /// Progress dashboard for the current user
    Progress,

    /// Lessons grouped by topic area
    Areas {
        /// Show the lessons of a single area
        #[arg(short, long)]
        area: Option<String>,
    },

    /// Quote of the day
    Wisdom {
        /// Show a specific quote instead
        #[arg(long)]
        id: Option<u32>,
    },

    /// Buy a lesson
    Purchase { lesson: u32 },

    /// Record how far into a lesson you are
    Watch { lesson: u32, percent: i64 },

    /// Bookmark a playback position in seconds
    Bookmark { lesson: u32, seconds: u32 },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let backend: Backend = cli.backend.into();
    let source = AnySource::from_backend(backend, resolve_data_dir(cli.data_dir))?;

    println!(
        "\n{}  {}\n",
        style("wonderland").cyan().bold(),
        style("Lesson Garden").dim()
    );

    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Loading catalog from {}...", backend.name()));
    let catalog = source.load().await?;
    spinner.finish_with_message(format!(
        "{} Loaded {} lessons, {} sessions {}",
        style("✓").green().bold(),
        catalog.lessons.len(),
        catalog.sessions.len(),
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    let mut store = MemoryStore::new(catalog);
    let mut ctx = store.context_for(cli.user, chrono::Utc::now())?;

    println!("{}", style("─".repeat(60)).dim());

    let dirty = match cli.command {
        Command::Lessons {
            query,
            category,
            level,
            sort,
            filters,
        } => {
            commands::lessons(&store, &ctx, &query, &category, &level, &sort, &filters)?;
            false
        }
        Command::Sessions {
            session_type,
            window,
        } => {
            commands::sessions(&store, &ctx, &session_type, &window)?;
            false
        }
        Command::Progress => {
            commands::progress(&store, &ctx);
            false
        }
        Command::Areas { area } => {
            commands::areas(&store, area.as_deref())?;
            false
        }
        Command::Wisdom { id } => {
            commands::wisdom(&store, &ctx, id);
            false
        }
        Command::Purchase { lesson } => commands::purchase(&mut store, &mut ctx, lesson)?,
        Command::Watch { lesson, percent } => {
            commands::watch(&mut store, &ctx, lesson, percent)?;
            true
        }
        Command::Bookmark { lesson, seconds } => {
            commands::bookmark(&mut store, &ctx, lesson, seconds)?
        }
    };

    if dirty {
        let spinner = create_spinner("Saving changes...");
        source.save(store.catalog()).await?;
        spinner.finish_with_message(format!("{} Saved", style("✓").green().bold()));
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
