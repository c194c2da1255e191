//! Command-line client for the code + tests execution sandbox.
//!
//! Loads the mission catalog, submits code and tests to the execution
//! service, and reports counts, coverage, score and the mission verdict.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::warn;

use quest::core::catalog::Catalog;
use quest::core::evaluate::Verdict;
use quest::core::run::RunState;
use quest::exit_codes;
use quest::io::catalog_file::load_catalog;
use quest::io::config::{ClientConfig, load_config, write_config};
use quest::io::service::ExecutionClient;
use quest::session::Session;

const STARTER_MISSIONS: &str = include_str!("../assets/missions.json");
const DEMO_CODE: &str = include_str!("../assets/main.py");
const DEMO_TESTS: &str = include_str!("../assets/test_main.py");

#[derive(Parser)]
#[command(
    name = "quest",
    version,
    about = "Client for a code + tests execution sandbox"
)]
struct Cli {
    /// Path of the client configuration file.
    #[arg(long, default_value = "quest.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write default config, a starter mission catalog and demo snippets.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// List the mission catalog with criteria summaries.
    Missions,
    /// Submit code and tests, print the report and the mission verdict.
    Run {
        /// File with the code snippet.
        #[arg(long)]
        code: PathBuf,
        /// File with the test snippet.
        #[arg(long)]
        tests: PathBuf,
        /// Mission id to judge the run against (default: first in catalog).
        #[arg(long)]
        mission: Option<String>,
    },
    /// Check that the execution service is reachable.
    Ping,
}

fn main() {
    quest::logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Missions => cmd_missions(&cli.config),
        Command::Run {
            code,
            tests,
            mission,
        } => cmd_run(&cli.config, &code, &tests, mission.as_deref()),
        Command::Ping => cmd_ping(&cli.config),
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<i32> {
    if force || !config_path.exists() {
        write_config(config_path, &ClientConfig::default())?;
    }
    let config = load_config(config_path)?;
    write_if_missing_or_force(&config.missions_path, STARTER_MISSIONS, force)?;
    write_if_missing_or_force(Path::new("main.py"), DEMO_CODE, force)?;
    write_if_missing_or_force(Path::new("test_main.py"), DEMO_TESTS, force)?;
    Ok(exit_codes::OK)
}

fn cmd_missions(config_path: &Path) -> Result<i32> {
    let config = load_config(config_path)?;
    let catalog = load_catalog(&config.missions_path)?;
    for mission in catalog.missions() {
        println!("{}  {}", mission.id, mission.title);
        for line in mission.criteria_summary() {
            println!("    {line}");
        }
    }
    Ok(exit_codes::OK)
}

fn cmd_run(
    config_path: &Path,
    code_path: &Path,
    tests_path: &Path,
    mission_id: Option<&str>,
) -> Result<i32> {
    let config = load_config(config_path)?;
    let code = fs::read_to_string(code_path)
        .with_context(|| format!("read code {}", code_path.display()))?;
    let tests = fs::read_to_string(tests_path)
        .with_context(|| format!("read tests {}", tests_path.display()))?;

    // A broken or absent catalog must not block running code and tests.
    let catalog = match load_catalog(&config.missions_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!("no mission catalog loaded: {err:#}");
            Catalog::empty()
        }
    };
    let mut session = Session::new(catalog);
    if let Some(id) = mission_id {
        if session.catalog().get(id).is_none() {
            bail!(
                "mission '{}' not found in {}",
                id,
                config.missions_path.display()
            );
        }
        session.select_mission(id);
    }

    let client = ExecutionClient::new(&config)?;
    session.submit(&client, &code, &tests).context("submit run")?;
    print_report(&session)
}

fn cmd_ping(config_path: &Path) -> Result<i32> {
    let config = load_config(config_path)?;
    let client = ExecutionClient::new(&config)?;
    client.health().context("service health check")?;
    println!("ok: {}", config.service_url);
    Ok(exit_codes::OK)
}

/// Print the run report and map the verdict to an exit code.
fn print_report(session: &Session) -> Result<i32> {
    let view = session.view();
    let result = match &view.state {
        RunState::Done { result } => result,
        RunState::Error { message } => bail!("run failed: {message}"),
        RunState::Idle | RunState::Running => bail!("run did not settle"),
    };

    let coverage = result
        .coverage_percent
        .map_or_else(|| "-".to_string(), |coverage| format!("{coverage}%"));
    let score = result
        .score
        .map_or_else(|| "-".to_string(), |score| score.to_string());
    println!(
        "run: passed={} failed={} coverage={} score={}",
        result.passed, result.failed, coverage, score
    );
    if !result.output.is_empty() {
        println!("{}", result.output.trim_end());
    }

    match &view.verdict {
        Some(Verdict::Satisfied) => {
            let reward = view.mission.as_ref().and_then(|m| m.reward_points);
            match reward {
                Some(points) => println!("mission: satisfied reward={points}"),
                None => println!("mission: satisfied"),
            }
            Ok(exit_codes::OK)
        }
        Some(Verdict::Unsatisfied { reasons }) => {
            println!("mission: unsatisfied");
            for reason in reasons {
                println!("    {reason}");
            }
            Ok(exit_codes::UNSATISFIED)
        }
        Some(Verdict::NoMission) | None => Ok(exit_codes::OK),
    }
}

fn write_if_missing_or_force(path: &Path, contents: &str, force: bool) -> Result<()> {
    if !force && path.exists() {
        return Ok(());
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::parse_from(["quest", "init"]);
        assert!(matches!(cli.command, Command::Init { force: false }));
        assert_eq!(cli.config, PathBuf::from("quest.toml"));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["quest", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true }));
    }

    #[test]
    fn parse_run_with_mission() {
        let cli = Cli::parse_from([
            "quest",
            "--config",
            "other.toml",
            "run",
            "--code",
            "main.py",
            "--tests",
            "test_main.py",
            "--mission",
            "first-green",
        ]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        match cli.command {
            Command::Run {
                code,
                tests,
                mission,
            } => {
                assert_eq!(code, PathBuf::from("main.py"));
                assert_eq!(tests, PathBuf::from("test_main.py"));
                assert_eq!(mission.as_deref(), Some("first-green"));
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn starter_missions_load_as_a_catalog() {
        let document: serde_json::Value =
            serde_json::from_str(STARTER_MISSIONS).expect("starter missions parse");
        let missions: Vec<quest::core::mission::Mission> =
            serde_json::from_value(document["missions"].clone()).expect("missions parse");
        let catalog = Catalog::load(missions).expect("starter catalog loads");
        assert_eq!(catalog.current().map(|m| m.id.as_str()), Some("first-green"));
    }
}
