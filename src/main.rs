use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doubles_scheduler::calculate::{leaderboard, partnership_report, standings, summarize};
use doubles_scheduler::config::AppConfig;
use doubles_scheduler::models::{Outcome, Roster, Session, Side};
use doubles_scheduler::results::{MatchRef, WinnerInput};
use doubles_scheduler::schedule::ScheduleGenerator;
use doubles_scheduler::storage::{JsonDocument, SessionDocument, StorageConfig};

#[derive(Parser)]
#[command(name = "doubles-scheduler")]
#[command(about = "Fair round-robin doubles scheduler")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./scheduler.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the player roster
    Players {
        #[command(subcommand)]
        action: PlayersAction,
    },

    /// Generate a new schedule, discarding previous results
    Generate {
        /// Number of rounds
        #[arg(long)]
        rounds: Option<u32>,

        /// Number of courts
        #[arg(long)]
        courts: Option<u32>,

        /// Seed for a reproducible schedule
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the current schedule
    Show {
        /// Print the session document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record the winning team of a match
    Record {
        /// Round index (0-based)
        #[arg(long)]
        round_index: usize,

        /// Match index within the round (0-based)
        #[arg(long)]
        match_index: usize,

        /// Winning team (1 or 2)
        #[arg(long, value_parser = parse_side)]
        team: Side,
    },

    /// Clear the recorded winner of a match
    ClearResult {
        #[arg(long)]
        round_index: usize,

        #[arg(long)]
        match_index: usize,
    },

    /// Clear every recorded winner and all stats
    ResetStats,

    /// Print per-player standings
    Standings,

    /// Print how often each pair partnered
    Partnerships,
}

#[derive(Subcommand)]
enum PlayersAction {
    /// Add players (comma-separated names are split)
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Remove a player by name
    Remove { name: String },

    /// List the roster
    List,

    /// Remove every player
    Clear,
}

fn parse_side(s: &str) -> Result<Side, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("expected 1 or 2, got {}", s))?;
    Side::try_from(value)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);

    // Initialize tracing (stderr)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let (plain, json) = if cli.json_logs {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr);
        (None, Some(layer))
    } else {
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();

    tracing::debug!("Starting doubles-scheduler v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let roster_doc = storage.roster_document();
    let session_doc = storage.session_document();

    match cli.command {
        Commands::Players { action } => {
            let mut roster = load_roster(&roster_doc)?;
            match action {
                PlayersAction::Add { names } => {
                    let added = roster.add_names(&names.join(","));
                    if added.is_empty() {
                        println!("No new players added.");
                    } else {
                        roster_doc.save(&roster)?;
                        for player in &added {
                            println!("Added {}", player);
                        }
                    }
                }
                PlayersAction::Remove { name } => {
                    if roster.remove(name.trim()) {
                        roster_doc.save(&roster)?;
                        println!("Removed {}", name.trim());
                    } else {
                        bail!("No player named {:?}", name.trim());
                    }
                }
                PlayersAction::List => {
                    if roster.is_empty() {
                        println!("No players registered.");
                    }
                    for (i, player) in roster.iter().enumerate() {
                        println!("{:>3}. {}", i + 1, player);
                    }
                }
                PlayersAction::Clear => {
                    storage.clear_players()?;
                    println!("Roster, schedule and stats cleared.");
                }
            }
        }
        Commands::Generate {
            rounds,
            courts,
            seed,
        } => {
            let roster = load_roster(&roster_doc)?;
            let params = config.generation.params(rounds, courts);
            let generator =
                ScheduleGenerator::new(config.scoring.clone(), config.generation.bounds());

            let schedule = match seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    generator.generate_with_rng(roster.as_slice(), params, &mut rng)?
                }
                None => generator.generate(roster.as_slice(), params)?,
            };

            let summary = summarize(&schedule, roster.len(), params);
            let mut session = session_doc.load_or_default()?.session;
            session.replace_schedule(schedule);
            session_doc.save(&SessionDocument::new(session, Some(params)))?;

            println!("\n=== Schedule Generated ===");
            println!("Players:          {}", summary.players);
            println!("Courts:           {}", summary.courts);
            println!(
                "Rounds:           {} (requested {})",
                summary.rounds_produced, summary.rounds_requested
            );
            println!("Total matches:    {}", summary.total_matches);
        }
        Commands::Show { json } => {
            let doc = session_doc.load_or_default()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print_schedule(&doc.session);
            }
        }
        Commands::Record {
            round_index,
            match_index,
            team,
        } => {
            let mut doc = load_session(&session_doc)?;
            doc.session.record_winner(WinnerInput {
                round_index,
                match_index,
                winning_team: team,
            })?;
            session_doc.save(&SessionDocument::new(doc.session, doc.params))?;
            println!("Recorded team {} as winner.", team);
        }
        Commands::ClearResult {
            round_index,
            match_index,
        } => {
            let mut doc = load_session(&session_doc)?;
            let cleared = doc.session.clear_result(MatchRef {
                round_index,
                match_index,
            })?;
            if cleared {
                session_doc.save(&SessionDocument::new(doc.session, doc.params))?;
                println!("Result cleared.");
            } else {
                println!("Match has no recorded result.");
            }
        }
        Commands::ResetStats => {
            let mut doc = load_session(&session_doc)?;
            doc.session.reset_results();
            session_doc.save(&SessionDocument::new(doc.session, doc.params))?;
            println!("All results cleared.");
        }
        Commands::Standings => {
            let roster = load_roster(&roster_doc)?;
            let doc = session_doc.load_or_default()?;
            let session = &doc.session;

            println!("=== Standings ===\n");
            println!(
                "{:<20} {:>9} {:>5} {:>6} {:>6} {:>5}",
                "Player", "Scheduled", "Wins", "Losses", "Games", "Win%"
            );
            for row in standings(roster.iter(), &session.schedule, &session.stats) {
                println!(
                    "{:<20} {:>9} {:>5} {:>6} {:>6} {:>4}%",
                    row.player.as_str(),
                    row.scheduled,
                    row.wins,
                    row.losses,
                    row.games,
                    row.win_percent
                );
            }

            let board = leaderboard(&session.stats);
            if !board.is_empty() {
                println!("\n=== Leaderboard ===\n");
                for (rank, (player, stat)) in board.iter().enumerate() {
                    println!(
                        "{:>3}. {:<20} {:>3}% ({}-{})",
                        rank + 1,
                        player.as_str(),
                        stat.win_percent(),
                        stat.wins,
                        stat.losses
                    );
                }
            }
        }
        Commands::Partnerships => {
            let doc = load_session(&session_doc)?;
            let report = partnership_report(&doc.session.schedule);

            println!("=== Partnerships ===\n");
            for entry in &report {
                println!(
                    "{:>3}x  {} & {}",
                    entry.count, entry.players[0], entry.players[1]
                );
            }
            let repeats = report.iter().filter(|e| e.count > 1).count();
            println!("\nRepeated partnerships: {}", repeats);
        }
    }

    Ok(())
}

/// Load the roster, rejecting a file with blank or duplicate names.
fn load_roster(doc: &JsonDocument<Roster>) -> Result<Roster> {
    let stored = doc.load_or_default()?;
    let roster = Roster::from_names(stored.iter().map(|p| p.as_str().to_string()))
        .with_context(|| format!("Invalid roster in {:?}", doc.path()))?;
    Ok(roster)
}

fn load_session(doc: &JsonDocument<SessionDocument>) -> Result<SessionDocument> {
    match doc.load()? {
        Some(session) => Ok(session),
        None => bail!("No schedule found; run `generate` first"),
    }
}

fn print_schedule(session: &Session) {
    if session.schedule.is_empty() {
        println!("No schedule generated.");
        return;
    }

    for (round_index, round) in session.schedule.rounds().iter().enumerate() {
        println!("\n=== Round {} ===", round.round);
        for (match_index, m) in round.matches.iter().enumerate() {
            let result = match m.winner {
                Outcome::Unplayed => String::new(),
                Outcome::Decided(side) => format!("  -> {} won", m.team(side)),
            };
            println!(
                "  [{}:{}] Court {}: {}  vs  {}{}",
                round_index, match_index, m.court, m.team1, m.team2, result
            );
        }
        if !round.sit_out.is_empty() {
            let names: Vec<&str> = round.sit_out.iter().map(|p| p.as_str()).collect();
            println!("  Sitting out: {}", names.join(", "));
        }
    }
}
