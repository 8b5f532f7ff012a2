//! hoops CLI
//!
//! Single games, seeded seasons, score predictions and predictor backtests
//! from the command line. Output goes to stdout; nothing is written to disk.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use hoops_core::api::{convert_team, load_engine_config, request_schema_json, TeamData};
use hoops_core::prediction::{backtest, PredictorConfig, ScorePredictor};
use hoops_core::{
    simulate_game, simulate_season, EngineConfig, Player, Position, Roster, TeamBoxScore, TeamSeasonStats, TeamSide,
};

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "Basketball game simulator and score predictor", long_about = None)]
struct Cli {
    /// Debug-level logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game
    Game {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Home team JSON file (name + players); demo roster when omitted
        #[arg(long)]
        home: Option<PathBuf>,

        /// Away team JSON file
        #[arg(long)]
        away: Option<PathBuf>,

        /// Engine config JSON file
        #[arg(long, env = "HOOPS_ENGINE_CONFIG")]
        config: Option<PathBuf>,

        /// Print every possession
        #[arg(long, default_value = "false")]
        play_by_play: bool,

        /// Print the full result as JSON instead of tables
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Simulate a series of games between the same rosters
    Season {
        #[arg(long, default_value_t = 82)]
        games: u32,

        /// Game i uses seed base_seed + i
        #[arg(long, default_value_t = 1)]
        base_seed: u64,

        #[arg(long)]
        home: Option<PathBuf>,

        #[arg(long)]
        away: Option<PathBuf>,

        #[arg(long, env = "HOOPS_ENGINE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Predict a final score from season averages
    Predict {
        /// NAME,PPG,WIN_PCT,PLUS_MINUS,FG_PCT
        #[arg(long, value_parser = parse_team_stats)]
        home: TeamSeasonStats,

        /// NAME,PPG,WIN_PCT,PLUS_MINUS,FG_PCT
        #[arg(long, value_parser = parse_team_stats)]
        away: TeamSeasonStats,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Compare predictions from one season's stats against the next
    Backtest {
        /// JSON array of team season stats
        #[arg(long)]
        prior: PathBuf,

        /// JSON array of team season stats, same team order as --prior
        #[arg(long)]
        current: PathBuf,

        /// Random subset of matchups; all pairings when omitted
        #[arg(long)]
        sample: Option<usize>,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Print the JSON Schema of the API requests
    Schema,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Game { seed, home, away, config, play_by_play, json } => {
            let config = engine_config(config.as_deref())?;
            let home = load_roster(home.as_deref(), "Home")?;
            let away = load_roster(away.as_deref(), "Away")?;
            let mut result = simulate_game(home, away, seed, &config).context("game simulation failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            if play_by_play {
                for line in result.take_play_by_play() {
                    println!("{line}");
                }
                println!();
            }

            let ot = match result.overtime_periods() {
                0 => String::new(),
                1 => " (OT)".to_string(),
                n => format!(" ({n}OT)"),
            };
            println!(
                "FINAL{ot}: {} {} - {} {}   (seed {})",
                result.home_name, result.home_score, result.away_score, result.away_name, result.seed
            );
            println!();
            print_box_score(&result.box_score.home);
            println!();
            print_box_score(&result.box_score.away);
        }

        Commands::Season { games, base_seed, home, away, config } => {
            let config = engine_config(config.as_deref())?;
            let home = load_roster(home.as_deref(), "Home")?;
            let away = load_roster(away.as_deref(), "Away")?;
            let summary =
                simulate_season(&home, &away, games, base_seed, &config).context("season simulation failed")?;

            println!(
                "{}: {}-{}   {}: {}-{}",
                home.name,
                summary.home_record.wins,
                summary.home_record.losses,
                away.name,
                summary.away_record.wins,
                summary.away_record.losses
            );
            println!();
            println!(
                "{:<22} {:<4} {:>3} {:>5} {:>5} {:>5} {:>5} {:>5} {:>6} {:>6} {:>5}",
                "PLAYER", "TEAM", "GP", "PPG", "RPG", "APG", "SPG", "BPG", "FG%", "3P%", "MPG"
            );
            for p in &summary.player_averages {
                let team = match p.team {
                    TeamSide::Home => "HOME",
                    TeamSide::Away => "AWAY",
                };
                println!(
                    "{:<22} {:<4} {:>3} {:>5.1} {:>5.1} {:>5.1} {:>5.1} {:>5.1} {:>6} {:>6} {:>5.1}",
                    p.name,
                    team,
                    p.games_played,
                    p.ppg,
                    p.rpg,
                    p.apg,
                    p.spg,
                    p.bpg,
                    pct(p.fg_pct),
                    pct(p.three_pct),
                    p.mpg
                );
            }
        }

        Commands::Predict { home, away, seed } => {
            let mut predictor = ScorePredictor::new(seed)?;
            let p = predictor.predict(&home, &away).context("prediction failed")?;
            let winner = match p.winner {
                TeamSide::Home => &p.home_name,
                TeamSide::Away => &p.away_name,
            };
            println!("{} {:.1} - {:.1} {}", p.home_name, p.home_score, p.away_score, p.away_name);
            println!("  total {:.1}, margin {:.1}, winner {winner}", p.total, p.margin);
            println!("  home win probability {:.1}%", p.home_win_probability * 100.0);
            println!(
                "  adjustments: quality {:+.2}, plus-minus {:+.2}, shooting {:+.2}",
                p.adjustments.quality, p.adjustments.plus_minus, p.adjustments.shooting
            );
        }

        Commands::Backtest { prior, current, sample, seed } => {
            let prior = load_season_stats(&prior)?;
            let current = load_season_stats(&current)?;
            let report = backtest(&prior, &current, sample, seed, &PredictorConfig::default())?;
            let Some(summary) = report.summary else {
                bail!("no matchups to evaluate (need at least two teams)");
            };
            println!("games:              {}", summary.games);
            println!(
                "winner accuracy:    {:.1}% ({}/{})",
                summary.winner_accuracy * 100.0,
                summary.correct_winners,
                summary.games
            );
            println!("mean total error:   {:.2}", summary.mean_total_error);
            println!("median total error: {:.2}", summary.median_total_error);
            println!("mean margin error:  {:.2}", summary.mean_margin_error);
            match summary.total_correlation {
                Some(r) => println!("total correlation:  {r:.3} (R^2 {:.3})", r * r),
                None => println!("total correlation:  n/a"),
            }
            println!("mean bias:          {:+.2}", summary.mean_bias);
        }

        Commands::Schema => {
            println!("{}", request_schema_json()?);
        }
    }

    Ok(())
}

fn engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let display = path.display().to_string();
            load_engine_config(&display).with_context(|| format!("loading engine config {display}"))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn load_roster(path: Option<&Path>, default_name: &str) -> Result<Roster> {
    let Some(path) = path else {
        return demo_roster(default_name);
    };
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let team: TeamData =
        serde_json::from_str(&content).with_context(|| format!("parsing team file {}", path.display()))?;
    Ok(convert_team(team)?)
}

fn load_season_stats(path: &Path) -> Result<Vec<TeamSeasonStats>> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing season stats {}", path.display()))
}

/// Eight players on position defaults: a starting five plus PG, SF and C
/// off the bench.
fn demo_roster(name: &str) -> Result<Roster> {
    use Position::*;
    let players = [PG, SG, SF, PF, C, PG, SF, C]
        .iter()
        .enumerate()
        .map(|(i, pos)| Player::with_position_defaults(format!("{name} {pos} #{}", i + 1), *pos))
        .collect();
    Ok(Roster::new(name, players)?)
}

fn parse_team_stats(s: &str) -> std::result::Result<TeamSeasonStats, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [name, ppg, win_pct, plus_minus, fg_pct] = parts.as_slice() else {
        return Err(format!("expected NAME,PPG,WIN_PCT,PLUS_MINUS,FG_PCT, got '{s}'"));
    };
    let number = |field: &str, value: &str| {
        value.parse::<f64>().map_err(|e| format!("{field} '{value}': {e}"))
    };
    Ok(TeamSeasonStats::new(
        *name,
        number("PPG", ppg)?,
        number("WIN_PCT", win_pct)?,
        number("PLUS_MINUS", plus_minus)?,
        number("FG_PCT", fg_pct)?,
    ))
}

fn pct(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v * 100.0)).unwrap_or_else(|| "-".to_string())
}

fn print_box_score(team: &TeamBoxScore) {
    println!("{}", team.name);
    println!(
        "{:<22} {:<3} {:>5} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>7} {:>7} {:>7}",
        "PLAYER", "POS", "MIN", "PTS", "REB", "AST", "STL", "BLK", "TO", "FG", "3P", "FT"
    );
    let split = |s: hoops_core::models::ShotSplit| format!("{}-{}", s.makes, s.attempts);
    for p in team.players.iter().chain(std::iter::once(&team.totals())) {
        let pos = p.position.map(|pos| pos.to_string()).unwrap_or_default();
        println!(
            "{:<22} {:<3} {:>2}:{:02} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>7} {:>7} {:>7}",
            p.name,
            pos,
            p.seconds_played / 60,
            p.seconds_played % 60,
            p.points,
            p.rebounds(),
            p.assists,
            p.steals,
            p.blocks,
            p.turnovers,
            split(p.field_goals_total()),
            split(p.three_pointers()),
            split(p.free_throws)
        );
    }
    if team.degenerate_substitutions > 0 {
        println!(
            "{} substitutions, {} checkpoints without a fresh replacement",
            team.substitutions, team.degenerate_substitutions
        );
    }
}
