//! groupmix - split a roster into balanced groups from the command line.
//!
//! The roster, settings and last result live in the data directory, so a
//! typical session is a few `add` calls, `settings`, then `generate`.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use groupmix_core::rng::seeded;
use groupmix_core::{Config, Gender, GroupPlanner, GroupSettings, Person, Store};

/// Log file name prefix inside the data directory
const LOG_FILE: &str = "groupmix.log";

#[derive(Parser, Debug)]
#[command(name = "groupmix", version, about = "Split a roster into balanced groups")]
struct Cli {
    /// Directory holding roster, settings and groups
    #[arg(long, global = true, env = "GROUPMIX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Seed for reproducible group generation
    #[arg(long, global = true, env = "GROUPMIX_SEED")]
    seed: Option<u64>,

    /// Also write logs to a daily file in the data directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a person to the roster (replaces an entry with the same id)
    Add {
        name: String,
        /// M or F
        #[arg(long, short)]
        gender: Gender,
        /// Family or network number
        #[arg(long, short)]
        family: Option<u32>,
        /// Mark as a group leader
        #[arg(long, short)]
        leader: bool,
        /// Explicit id; derived from the name when omitted
        #[arg(long)]
        id: Option<String>,
    },
    /// Remove a person from the roster
    Remove { id: String },
    /// Mark a person as missing, or present again with --clear
    Missing {
        id: String,
        #[arg(long)]
        clear: bool,
    },
    /// List the roster
    List,
    /// Show or change group settings
    Settings {
        /// Target number of people per group
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        separate_genders: Option<bool>,
        #[arg(long)]
        require_leader: Option<bool>,
        #[arg(long)]
        group_by_network: Option<bool>,
    },
    /// Show or change the saved configuration
    Config {
        /// Default data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,
        /// Default seed for reproducible runs
        #[arg(long)]
        set_seed: Option<u64>,
    },
    /// Generate new groups and print them
    Generate,
    /// Print the current groups
    Show,
    /// Write the current groups as text
    Export {
        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Initialize the tracing subscriber for logging.
/// Returns the file writer guard, which must stay alive until exit.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: ignoring unreadable config: {}", e);
        Config::default()
    });
    if let Command::Config {
        set_data_dir,
        set_seed,
    } = cli.command
    {
        return update_config(config, set_data_dir, set_seed);
    }

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => config.data_dir()?,
    };

    let store = Store::new(data_dir.clone())?;
    let _guard = init_tracing(cli.log_file.then_some(data_dir.as_path()));
    info!(data_dir = %data_dir.display(), "groupmix starting");

    let seed = cli.seed.or(config.seed);
    debug!(?seed, "Using random seed");
    let mut planner = GroupPlanner::open(store, seeded(seed));

    run(cli.command, &mut planner).await
}

async fn run(command: Command, planner: &mut GroupPlanner) -> Result<()> {
    match command {
        Command::Add {
            name,
            gender,
            family,
            leader,
            id,
        } => {
            let id = id.unwrap_or_else(|| derive_id(&name, planner.people()));
            let mut person = Person::new(id.clone(), name, gender);
            person.family_number = family;
            person.is_leader = leader;
            planner.add_person(person);
            println!("Added {}", id);
        }
        Command::Remove { id } => {
            if !planner.remove_person(&id) {
                anyhow::bail!("No person with id '{}'", id);
            }
            println!("Removed {}", id);
        }
        Command::Missing { id, clear } => {
            if !planner.set_missing(&id, !clear) {
                anyhow::bail!("No person with id '{}'", id);
            }
            if clear {
                println!("{} is present", id);
            } else {
                println!("{} marked missing", id);
            }
        }
        Command::List => print_roster(planner.people()),
        Command::Settings {
            size,
            separate_genders,
            require_leader,
            group_by_network,
        } => {
            let current = *planner.settings();
            let updated = GroupSettings {
                people_per_group: size.unwrap_or(current.people_per_group),
                separate_genders: separate_genders.unwrap_or(current.separate_genders),
                require_leader: require_leader.unwrap_or(current.require_leader),
                group_by_network: group_by_network.unwrap_or(current.group_by_network),
            };
            if updated != current {
                planner.update_settings(updated);
            }
            print_settings(planner.settings());
        }
        Command::Config { .. } => unreachable!("handled before opening the planner"),
        Command::Generate => {
            let mut busy = planner.subscribe_busy();
            tokio::spawn(async move {
                while busy.changed().await.is_ok() {
                    if *busy.borrow_and_update() {
                        eprintln!("Regenerating groups...");
                    }
                }
            });

            let outcome = planner.regenerate_with_dwell().await.map(|groups| groups.len());
            match outcome {
                Ok(count) => {
                    debug!(groups = count, "Printing generated groups");
                    println!("{}", planner.export_text());
                }
                Err(e) => eprintln!("Warning: {}", e),
            }
        }
        Command::Show => {
            if planner.groups().is_empty() {
                println!("No groups yet. Run `groupmix generate`.");
            } else {
                println!("{}", planner.export_text());
            }
        }
        Command::Export { output } => {
            let text = planner.export_text();
            match output {
                Some(path) => std::fs::write(&path, text)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{}", text),
            }
        }
    }
    Ok(())
}

fn update_config(mut config: Config, data_dir: Option<PathBuf>, seed: Option<u64>) -> Result<()> {
    if data_dir.is_some() || seed.is_some() {
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }
        if seed.is_some() {
            config.seed = seed;
        }
        config.save().context("Failed to save config")?;
    }
    println!("Data directory:  {}", config.data_dir()?.display());
    match config.seed {
        Some(seed) => println!("Default seed:    {}", seed),
        None => println!("Default seed:    (random)"),
    }
    Ok(())
}

/// Lowercase, dash-separated id from `name`, suffixed until unique
fn derive_id(name: &str, people: &[Person]) -> String {
    let base: String = name
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    let base = if base.is_empty() { "person".to_string() } else { base };

    let taken = |candidate: &str| people.iter().any(|p| p.id == candidate);
    if !taken(base.as_str()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}

fn print_roster(people: &[Person]) {
    if people.is_empty() {
        println!("Roster is empty.");
        return;
    }
    for person in people {
        let family = person
            .family_number
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-".to_string());
        let mut flags = Vec::new();
        if person.is_leader {
            flags.push("leader");
        }
        if person.is_missing {
            flags.push("missing");
        }
        println!(
            "{:<16} {:<24} {} family {:<4} {}",
            person.id,
            person.name,
            person.gender,
            family,
            flags.join(", ")
        );
    }
}

fn print_settings(settings: &GroupSettings) {
    println!("People per group:  {}", settings.people_per_group);
    println!("Separate genders:  {}", settings.separate_genders);
    println!("Require leader:    {}", settings.require_leader);
    println!("Group by network:  {}", settings.group_by_network);
}
